//! Time units.

/// Blocking wait for a fixed period.
///
/// Implementers are expected to busy wait: the gesture detector
/// depends on the wait never yielding to other work.
pub trait Wait {
    fn wait(&mut self, period: Microseconds);
}

#[derive(Clone, Copy, Debug, PartialOrd, Ord, PartialEq, Eq)]
pub struct Microseconds(pub u32);

/// Hertz
#[derive(Clone, Copy, Debug, PartialOrd, PartialEq, Eq)]
pub struct Hertz(pub u32);

/// MegaHertz
#[derive(Clone, Copy, Debug, PartialOrd, PartialEq, Eq)]
pub struct MegaHertz(pub u32);

/// Extension trait that adds convenience methods to the `u32` type
pub trait U32Ext {
    /// Wrap in `MegaHertz`
    fn mhz(self) -> MegaHertz;

    /// Wrap in `Microseconds`
    fn us(self) -> Microseconds;
}

impl U32Ext for u32 {
    fn mhz(self) -> MegaHertz { MegaHertz(self) }

    fn us(self) -> Microseconds { Microseconds(self) }
}

impl From<MegaHertz> for Hertz {
    fn from(frequency: MegaHertz) -> Self { Hertz(frequency.0 * 1_000_000) }
}

impl Hertz {
    /// Number of clock cycles elapsed during a period at this frequency.
    pub fn cycles_in(self, period: Microseconds) -> u32 {
        ((self.0 as u64 * period.0 as u64) / 1_000_000) as u32
    }
}
