//! Retained general purpose register of the POWER peripheral.
use crate::hal::register::RetainedRegister;
use core::ptr;

const GPREGRET: usize = 0x4000_051C;

/// `GPREGRET` survives every reset except power loss, which makes it
/// the mailbox between the application and the bootloader.
pub struct Gpregret {
    _0: (),
}

impl Gpregret {
    /// # Safety
    ///
    /// Must be taken at most once; concurrent owners would race on
    /// the read and clear of a pending request.
    pub unsafe fn new() -> Self { Self { _0: () } }
}

impl RetainedRegister for Gpregret {
    fn read(&self) -> u32 {
        // NOTE(Safety) single owner, see `new`.
        unsafe { ptr::read_volatile(GPREGRET as *const u32) }
    }

    fn write(&mut self, value: u32) {
        // NOTE(Safety) single owner, see `new`.
        unsafe { ptr::write_volatile(GPREGRET as *mut u32, value) }
    }
}
