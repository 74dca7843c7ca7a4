//! Modules with business logic related to the problem
//! domain, that lay on top of abstract drivers. Devices are
//! generic, while board specifics (pins, board config) are
//! handled in the `ports` module.

pub mod boot_policy;
pub mod bootloader;
pub mod button;
pub mod image;
pub mod interfaces;
pub mod led;
pub mod memory_map;
pub mod update_signal;
