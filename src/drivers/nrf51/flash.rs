//! Read access to the memory mapped internal flash.
use crate::{
    error::Error as BootgateError,
    hal::flash::{self, Address},
};
use core::ptr;

const FLASH_START: Address = Address(0x0000_0000);
const FLASH_END: Address = Address(0x0004_0000);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    MemoryNotReachable,
}

pub struct McuFlash {
    _0: (),
}

impl McuFlash {
    pub fn new() -> Self { Self { _0: () } }
}

impl Default for McuFlash {
    fn default() -> Self { Self::new() }
}

impl flash::Read for McuFlash {
    type Error = Error;

    fn read(&mut self, address: Address, bytes: &mut [u8]) -> nb::Result<(), Self::Error> {
        if address < FLASH_START || address + bytes.len() > FLASH_END {
            return Err(nb::Error::Other(Error::MemoryNotReachable));
        }

        let base = address.0 as *const u8;
        for (index, byte) in bytes.iter_mut().enumerate() {
            // NOTE(Safety) the whole range was checked to be mapped flash.
            *byte = unsafe { ptr::read_volatile(base.add(index)) };
        }
        Ok(())
    }

    fn readable_range(&self) -> (Address, Address) { (FLASH_START, FLASH_END) }
}

impl From<Error> for BootgateError {
    fn from(error: Error) -> Self {
        match error {
            Error::MemoryNotReachable => BootgateError::DriverError("[MCU Flash] Memory not reachable"),
        }
    }
}
