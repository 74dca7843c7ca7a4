//! Host-side test doubles for the hardware abstraction layer.
pub mod error;
pub mod flash;
pub mod gpio;
pub mod register;
pub mod time;
