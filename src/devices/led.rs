//! Status indicator.
//!
//! The bootloader drives a single LED: lit while it listens for a
//! button gesture and while update mode runs, dark once the
//! application is started. The indicator is best effort and never
//! takes part in the boot decision.
use crate::hal::gpio::OutputPin;

/// Interface to a LED's direct on/off/toggle operations.
pub trait Toggle {
    fn on(&mut self);
    fn off(&mut self);
    fn toggle(&mut self);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Logic {
    /// Logical high equals "on"
    Direct,
    /// Logical high equals "off"
    Inverted,
}

/// Solid (non-blinking) monochrome LED
///
/// # Example
/// ```
/// # use bootgate_lib::devices::led::*;
/// # use bootgate_lib::hal::doubles::gpio::MockPin;
/// # let pin = MockPin::default();
/// let mut led = MonochromeLed::new(pin, Logic::Direct);
///
/// led.toggle();
/// assert!(led.is_on());
/// # assert!(led.pin().is_high());
/// ```
pub struct MonochromeLed<Pin: OutputPin> {
    pin: Pin,
    is_on: bool,
    logic: Logic,
}

// Extension trait to ensure LED pins are correctly
// operated based on the led's direct or inverted logic
trait LedPin: OutputPin {
    fn off(&mut self, logic: Logic) {
        if let Logic::Direct = logic {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    fn on(&mut self, logic: Logic) {
        if let Logic::Direct = logic {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

// Blanket implementation of LedPin for all output pins
impl<Pin: OutputPin> LedPin for Pin {}

impl<Pin: OutputPin> MonochromeLed<Pin> {
    /// Takes control of the pin, starting with the LED off.
    pub fn new(mut pin: Pin, logic: Logic) -> Self {
        pin.off(logic);
        Self { pin, is_on: false, logic }
    }
    pub fn is_on(&self) -> bool { self.is_on }
    pub fn pin(&self) -> &Pin { &self.pin }
}

impl<Pin: OutputPin> Toggle for MonochromeLed<Pin> {
    fn on(&mut self) {
        if !self.is_on {
            self.pin.on(self.logic);
        }
        self.is_on = true;
    }

    fn off(&mut self) {
        if self.is_on {
            self.pin.off(self.logic);
        }
        self.is_on = false;
    }

    fn toggle(&mut self) {
        if self.is_on {
            self.off();
        } else {
            self.on();
        }
    }
}
