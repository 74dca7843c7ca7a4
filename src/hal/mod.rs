//! Hardware Abstraction Layer, containing interfaces
//! for low level drivers.
#![macro_use]

pub mod gpio;
pub mod time;
pub mod flash;
pub mod register;

#[cfg(not(target_arch = "arm"))]
#[doc(hidden)]
pub mod doubles;
