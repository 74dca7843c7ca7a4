//! # Boot Mode Decision Library
//!
//! This crate contains all functionality for the
//! bootgate bootloader in library form: the persisted
//! update flag, the button gesture detector, the boot
//! policy and the boot sequence that ties them to the
//! vendor services of the target.
#![cfg_attr(test, allow(unused_imports))]
#![cfg_attr(target_arch = "arm", no_std)]

#[cfg(target_arch = "arm")]
use defmt_rtt as _;
extern crate static_assertions;

#[macro_use]
pub mod utilities {
    pub mod bitwise;
    pub mod guard;
    pub mod memory;
    mod macros;
}

pub mod hal;
pub mod devices;
#[cfg(feature = "nrf51")]
pub mod drivers;
pub mod ports;
pub mod error;
