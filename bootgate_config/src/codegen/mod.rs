//! Generation of the board specific code included by bootgate.
use std::{fs::File, io::Write, path::Path};

use anyhow::Result;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::{
    pins::{ActiveLevel, Logic, Pull},
    Configuration, KB,
};

pub mod linker_script;

/// Name of the generated module, relative to the output directory.
pub const CONFIGURATION_MODULE: &str = "configuration.rs";

/// Writes the generated configuration module and linker script into
/// `out_dir`.
pub fn generate_modules<P: AsRef<Path>>(out_dir: P, configuration: &Configuration) -> Result<()> {
    let out_dir = out_dir.as_ref();
    let mut file = File::create(out_dir.join(CONFIGURATION_MODULE))?;
    file.write_all(format!("{}", configuration_tokens(configuration)).as_bytes())?;
    linker_script::generate_linker_script(out_dir, configuration)?;
    Ok(())
}

/// Constants the port reads its board description from.
pub fn configuration_tokens(configuration: &Configuration) -> TokenStream {
    let board = configuration.board.to_string();
    let button_pin = configuration.button.pin;
    let button_pull = format_ident!(
        "{}",
        match configuration.button.pull {
            Pull::Floating => "Floating",
            Pull::PullUp => "PullUp",
            Pull::PullDown => "PullDown",
        }
    );
    let active_level = format_ident!(
        "{}",
        match configuration.button.active_level {
            ActiveLevel::Low => "Low",
            ActiveLevel::High => "High",
        }
    );
    let indicator_pin = configuration.indicator.pin;
    let logic = format_ident!(
        "{}",
        match configuration.indicator.logic {
            Logic::Direct => "Direct",
            Logic::Inverted => "Inverted",
        }
    );

    let timing = &configuration.timing;
    let (tick, debounce, single, long, settle) = (
        timing.tick_us,
        timing.debounce_ticks,
        timing.single_click_ticks,
        timing.long_press_ticks,
        timing.settle_ticks,
    );

    let memory = &configuration.memory;
    let bootloader_start = memory.bootloader_region_start;
    let application_start = memory.application_region_start;
    let application_size = KB!(memory.application_size_kb as usize);
    let settings = memory.settings_address;
    let page_size = memory.code_page_size;

    quote! {
        pub const BOARD: &str = #board;

        pub const BUTTON_PIN: u8 = #button_pin;
        pub type ButtonPull = #button_pull;
        pub const BUTTON_ACTIVE_LEVEL: ActiveLevel = ActiveLevel::#active_level;

        pub const INDICATOR_PIN: u8 = #indicator_pin;
        pub const INDICATOR_LOGIC: Logic = Logic::#logic;

        pub const GESTURE_TIMING: GestureTiming = GestureTiming {
            tick: Microseconds(#tick),
            debounce_ticks: #debounce,
            single_click_ticks: #single,
            long_press_ticks: #long,
            settle_ticks: #settle,
        };

        pub const MEMORY_MAP: MemoryMap = MemoryMap {
            bootloader_region_start: Address(#bootloader_start),
            application: Span { start: Address(#application_start), size: #application_size },
            settings_address: Address(#settings),
            code_page_size: #page_size,
        };
    }
}
