//! Error type for the bootgate project as a whole.
//!
//! None of the boot decision logic can fail; these errors come from the
//! collaborators around it. All of them are fatal: the boot sequence
//! logs them and resets the device instead of returning into the
//! decision.
use crate::devices::interfaces::Launcher;

/// Top level error type for the bootloader. Like the messages of the
/// driver errors it wraps, it is meant to be reported directly.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Error {
    /// Error caused by a low level peripheral driver
    DriverError(&'static str),
    /// Error caused by a high level device driver
    DeviceError(&'static str),
    /// The chip reports a bootloader start address other than the configured one.
    BootloaderAddressMismatch { configured: u32, reported: u32 },
    /// The chip reports a flash page size other than the configured one.
    PageSizeMismatch { configured: u32, reported: u32 },
    /// A vendor SDK call returned a non-success status code.
    VendorError { operation: &'static str, code: u32 },
}

/// Exposes a `reset_on_error()` method that behaves like
/// `unwrap()`, but logs the error and resets the device instead of
/// panicking.
pub trait ResetOnError<T, L: Launcher> {
    fn reset_on_error(self, launcher: &mut L) -> T;
}

impl<T, L: Launcher> ResetOnError<T, L> for Result<T, Error> {
    fn reset_on_error(self, launcher: &mut L) -> T {
        match self {
            Ok(value) => value,
            Err(error) => {
                error.report();
                launcher.reset()
            }
        }
    }
}

impl Error {
    /// Reports the error through the logger.
    pub fn report(&self) {
        match *self {
            Error::DriverError(text) => log_error!("[Driver Error] -> {=str}", text),
            Error::DeviceError(text) => log_error!("[Device Error] -> {=str}", text),
            Error::BootloaderAddressMismatch { configured, reported } => log_error!(
                "[Configuration Error] -> Bootloader configured at {=u32}, chip reports {=u32}",
                configured,
                reported
            ),
            Error::PageSizeMismatch { configured, reported } => log_error!(
                "[Configuration Error] -> Page size configured as {=u32}, chip reports {=u32}",
                configured,
                reported
            ),
            Error::VendorError { operation, code } => {
                log_error!("[Vendor Error] -> {=str} failed with status {=u32}", operation, code)
            }
        }
    }
}
