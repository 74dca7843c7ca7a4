//! GPIO driver for the nRF51 family.
//!
//! Every pin is configured through its own `PIN_CNF` register, and
//! driven or read through the port wide `OUTSET`, `OUTCLR` and `IN`
//! registers.
use crate::hal::gpio::{InputPin, OutputPin};
use core::{marker::PhantomData, ptr};

const GPIO_BASE: usize = 0x5000_0000;
const OUTSET: usize = GPIO_BASE + 0x508;
const OUTCLR: usize = GPIO_BASE + 0x50C;
const IN: usize = GPIO_BASE + 0x510;
const PIN_CNF: usize = GPIO_BASE + 0x700;

const DIR_OUTPUT: u32 = 1 << 0;
const INPUT_DISCONNECT: u32 = 1 << 1;
const PULL_OFFSET: u32 = 2;
const SENSE_LOW: u32 = 3 << 16;

/// Pin state after reset (type state)
pub struct Disconnected;

/// Input mode (type state)
pub struct Input<MODE> {
    _mode: PhantomData<MODE>,
}
/// Floating input (type state)
pub struct Floating;
/// Pulled down input (type state)
pub struct PullDown;
/// Pulled up input (type state)
pub struct PullUp;

/// Output mode (type state)
pub struct Output<MODE> {
    _mode: PhantomData<MODE>,
}
/// Push pull output (type state)
pub struct PushPull;

/// Value of the `PULL` field for each input type state.
pub trait Pull {
    const PULL: u32;
}
impl Pull for Floating { const PULL: u32 = 0; }
impl Pull for PullDown { const PULL: u32 = 1; }
impl Pull for PullUp { const PULL: u32 = 3; }

pub struct Pin<MODE> {
    index: u8,
    _mode: PhantomData<MODE>,
}

impl Pin<Disconnected> {
    /// # Safety
    ///
    /// Each pin index must be taken at most once; pins share the port
    /// wide registers and rely on single ownership of their bit.
    pub unsafe fn new(index: u8) -> Self {
        debug_assert!(index < 32);
        Self { index, _mode: PhantomData }
    }
}

impl<MODE> Pin<MODE> {
    fn configure(&mut self, configuration: u32) {
        // NOTE(Safety) each pin owns its configuration register.
        unsafe { ptr::write_volatile((PIN_CNF + 4 * self.index as usize) as *mut u32, configuration) }
    }

    /// Connects the input buffer, with wake-up sensing on a low level
    /// for buttons that pull the line down.
    pub fn into_input<PULL: Pull>(mut self) -> Pin<Input<PULL>> {
        self.configure((PULL::PULL << PULL_OFFSET) | SENSE_LOW);
        Pin { index: self.index, _mode: PhantomData }
    }

    pub fn into_push_pull_output(mut self) -> Pin<Output<PushPull>> {
        self.configure(DIR_OUTPUT | INPUT_DISCONNECT);
        Pin { index: self.index, _mode: PhantomData }
    }
}

impl<MODE> InputPin for Pin<Input<MODE>> {
    fn is_high(&self) -> bool {
        // NOTE(Safety) atomic read of a stateless register.
        let levels = unsafe { ptr::read_volatile(IN as *const u32) };
        levels & (1 << self.index) != 0
    }
}

impl<MODE> OutputPin for Pin<Output<MODE>> {
    fn set_high(&mut self) {
        // NOTE(Safety) atomic write to a stateless register. Only this
        // pin's bit is written, so other pin owners are unaffected.
        unsafe { ptr::write_volatile(OUTSET as *mut u32, 1 << self.index) }
    }

    fn set_low(&mut self) {
        // NOTE(Safety) see `set_high`.
        unsafe { ptr::write_volatile(OUTCLR as *mut u32, 1 << self.index) }
    }
}
