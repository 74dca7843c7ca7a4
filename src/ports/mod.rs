//! Full project ports for specific targets. They mainly
//! provide a method to construct a generic bootloader from
//! specific parts.

#[cfg(feature = "nrf51")]
port!(nrf51: [bootloader, configuration,]);
