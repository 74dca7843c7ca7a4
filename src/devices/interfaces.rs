//! Boundaries to the vendor infrastructure around the boot decision.
//!
//! Everything behind these traits (radio stack, timers, event
//! scheduler, the update transport and the jump into the application)
//! is supplied by the chip vendor's SDK.
use crate::{devices::memory_map::ReportLayout, error::Error, hal::flash::Address};
use marker_blanket::marker_blanket;

/// Start-up services the update transport relies on.
pub trait Services {
    fn init_timers(&mut self) -> Result<(), Error>;
    fn init_scheduler(&mut self) -> Result<(), Error>;
    /// Brings the radio stack up. The stack itself is only initialised
    /// from scratch when `initialise` is set; otherwise the instance
    /// left running by the application is reattached.
    fn init_radio_stack(&mut self, initialise: bool) -> Result<(), Error>;
}

/// Firmware update transport.
pub trait UpdateTransport {
    /// Runs an update session. Returns once the session is over,
    /// whether or not a new image was received.
    fn enter_update_mode(&mut self) -> Result<(), Error>;
}

/// Irreversible hand-offs out of the bootloader.
pub trait Launcher {
    /// Transfers execution to the application at `region_start`.
    fn start_application(&mut self, region_start: Address) -> !;
    /// Resets the whole device.
    fn reset(&mut self) -> !;
}

/// Complete vendor runtime, as required by the boot sequence.
#[marker_blanket]
pub trait Firmware: Services + UpdateTransport + Launcher + ReportLayout {}
