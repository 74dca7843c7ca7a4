//! Boot decision policy.
use super::{button::ButtonGesture, update_signal::PersistedFlag};

/// Terminal action selected for the current boot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum BootDecision {
    EnterUpdateMode,
    StartApplication,
}

/// Combines the persisted flag, the button gesture and the validity of
/// the installed application into a boot decision.
///
/// In priority order: any update request wins, then any recognised
/// gesture, then a missing or corrupt application. Only a device with
/// no request, no gesture and a valid application starts it.
pub fn decide(flag: PersistedFlag, gesture: ButtonGesture, app_is_valid: bool) -> BootDecision {
    if flag.requests_update() || gesture != ButtonGesture::None || !app_is_valid {
        BootDecision::EnterUpdateMode
    } else {
        BootDecision::StartApplication
    }
}
