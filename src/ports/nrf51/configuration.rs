//! Board description, generated at build time from the configuration
//! file selected by the board feature (or `BOOTGATE_CONFIG`).
#![allow(unused_imports)]
use crate::{
    devices::{
        button::{ActiveLevel, GestureTiming},
        led::Logic,
        memory_map::MemoryMap,
    },
    drivers::nrf51::gpio::{Floating, PullDown, PullUp},
    hal::{flash::Address, time::Microseconds},
    utilities::memory::Span,
};

include!(concat!(env!("OUT_DIR"), "/configuration.rs"));
