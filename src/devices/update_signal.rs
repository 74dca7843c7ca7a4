//! Update requests persisted across a reset.
//!
//! The application asks the bootloader for update mode by writing
//! one of two bit patterns to a retained register and resetting.
//! The bootloader consumes the request exactly once: the register
//! is cleared before the read returns, so an interrupted start-up
//! can never bring the device back into update mode by itself.
use crate::{
    hal::register::RetainedRegister,
    utilities::bitwise::BitSubset,
};

/// Written by an application that hands control to the bootloader
/// with the radio stack already running.
pub const FORCE_UPDATE_PATTERN: u32 = 0xB1;
/// Written by an application that resets into the bootloader.
pub const RESET_REQUESTED_UPDATE_PATTERN: u32 = 0x02;
/// Register value once a request has been consumed.
pub const CLEARED: u32 = 0x00;

/// Indicates the state of an update request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum PersistedFlag {
    /// No update requested.
    None,
    /// The application jumped straight into the bootloader.
    ForceUpdate,
    /// The application reset the device to enter the bootloader.
    ResetRequestedUpdate,
}

impl PersistedFlag {
    /// Decodes a raw register value. Patterns are matched by mask,
    /// with [`FORCE_UPDATE_PATTERN`] taking priority.
    pub fn from_bits(bits: u32) -> Self {
        if FORCE_UPDATE_PATTERN.is_subset_of(bits) {
            PersistedFlag::ForceUpdate
        } else if RESET_REQUESTED_UPDATE_PATTERN.is_subset_of(bits) {
            PersistedFlag::ResetRequestedUpdate
        } else {
            PersistedFlag::None
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            PersistedFlag::None => CLEARED,
            PersistedFlag::ForceUpdate => FORCE_UPDATE_PATTERN,
            PersistedFlag::ResetRequestedUpdate => RESET_REQUESTED_UPDATE_PATTERN,
        }
    }

    pub fn requests_update(self) -> bool { self != PersistedFlag::None }

    /// The radio stack must only be initialised from scratch when the
    /// application did not leave it running.
    pub fn requires_stack_initialisation(self) -> bool { self != PersistedFlag::ForceUpdate }
}

pub trait ReadUpdateSignal {
    fn read_and_clear_flag(&mut self) -> PersistedFlag;
}

pub trait WriteUpdateSignal {
    fn write_flag(&mut self, flag: PersistedFlag);
}

/// Update signal stored in a retained register.
pub struct UpdateSignal<R: RetainedRegister> {
    register: R,
}

impl<R: RetainedRegister> UpdateSignal<R> {
    pub fn new(register: R) -> Self { Self { register } }
}

impl<R: RetainedRegister> ReadUpdateSignal for UpdateSignal<R> {
    fn read_and_clear_flag(&mut self) -> PersistedFlag {
        let flag = PersistedFlag::from_bits(self.register.read());
        if flag.requests_update() {
            self.register.write(CLEARED);
        }
        flag
    }
}

impl<R: RetainedRegister> WriteUpdateSignal for UpdateSignal<R> {
    fn write_flag(&mut self, flag: PersistedFlag) { self.register.write(flag.bits()); }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hal::doubles::register::FakeRegister;

    #[test]
    fn unrecognised_values_read_as_none_and_stay_untouched() {
        for value in [0x00, 0x01, 0x10, 0x30, 0xA0, 0xB0, 0x71, 0x100] {
            // Given
            let register = FakeRegister::holding(value);
            let mut signal = UpdateSignal::new(register.clone());

            // When
            let flag = signal.read_and_clear_flag();

            // Then
            assert_eq!(flag, PersistedFlag::None, "value {:#x}", value);
            assert_eq!(register.value(), value);
            assert_eq!(register.writes(), 0);
        }
    }

    #[test]
    fn force_update_pattern_is_consumed_once() {
        // Given
        let register = FakeRegister::holding(FORCE_UPDATE_PATTERN);
        let mut signal = UpdateSignal::new(register.clone());

        // When
        let first = signal.read_and_clear_flag();
        let second = signal.read_and_clear_flag();

        // Then
        assert_eq!(first, PersistedFlag::ForceUpdate);
        assert_eq!(second, PersistedFlag::None);
        assert_eq!(register.value(), CLEARED);
        assert_eq!(register.writes(), 1);
    }

    #[test]
    fn reset_requested_pattern_is_consumed_once() {
        // Given
        let register = FakeRegister::holding(RESET_REQUESTED_UPDATE_PATTERN);
        let mut signal = UpdateSignal::new(register.clone());

        // When
        let first = signal.read_and_clear_flag();
        let second = signal.read_and_clear_flag();

        // Then
        assert_eq!(first, PersistedFlag::ResetRequestedUpdate);
        assert_eq!(second, PersistedFlag::None);
        assert_eq!(register.value(), CLEARED);
    }

    #[test]
    fn patterns_are_matched_by_mask_with_force_update_first() {
        assert_eq!(PersistedFlag::from_bits(0xB3), PersistedFlag::ForceUpdate);
        assert_eq!(PersistedFlag::from_bits(0xFF), PersistedFlag::ForceUpdate);
        assert_eq!(PersistedFlag::from_bits(0x03), PersistedFlag::ResetRequestedUpdate);
        assert_eq!(PersistedFlag::from_bits(0xB2), PersistedFlag::ResetRequestedUpdate);
    }

    #[test]
    fn application_writes_are_read_back_by_the_bootloader() {
        // Given
        let register = FakeRegister::default();
        let mut application_side = UpdateSignal::new(register.clone());
        let mut bootloader_side = UpdateSignal::new(register.clone());

        // When
        application_side.write_flag(PersistedFlag::ResetRequestedUpdate);

        // Then
        assert_eq!(register.value(), RESET_REQUESTED_UPDATE_PATTERN);
        assert_eq!(bootloader_side.read_and_clear_flag(), PersistedFlag::ResetRequestedUpdate);
        assert_eq!(bootloader_side.read_and_clear_flag(), PersistedFlag::None);
    }

    #[test]
    fn only_force_update_keeps_the_radio_stack() {
        assert!(PersistedFlag::None.requires_stack_initialisation());
        assert!(PersistedFlag::ResetRequestedUpdate.requires_stack_initialisation());
        assert!(!PersistedFlag::ForceUpdate.requires_stack_initialisation());
    }
}
