//! Retained register interface.

/// A fixed-width register that keeps its value across a warm
/// reset, but not across a power cycle.
///
/// Reads and writes are single word accesses. Nothing else in
/// the system touches the register while the bootloader runs, so
/// no further synchronisation is required.
pub trait RetainedRegister {
    fn read(&self) -> u32;
    fn write(&mut self, value: u32);
}
