use crate::hal::time::{self, Hertz, Microseconds};

/// Busy wait delay, counted in core clock cycles.
///
/// The gesture window runs before any timer is initialised, so delays
/// are spun on the CPU. The core runs from the 16 MHz high frequency
/// clock out of reset.
pub struct CycleDelay {
    clock: Hertz,
}

impl CycleDelay {
    pub fn new(clock: Hertz) -> Self { Self { clock } }
}

impl time::Wait for CycleDelay {
    fn wait(&mut self, period: Microseconds) {
        cortex_m::asm::delay(self.clock.cycles_in(period));
    }
}
