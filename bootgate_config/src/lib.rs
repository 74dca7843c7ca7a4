//! This bootgate sub-crate contains all definitions to help generate
//! final bootgate binaries.
//!
//! NOTE: This code is not included anywhere from bootgate itself! This
//! is a dependency of the bootgate **build script**. The build script
//! uses this dependency to read a board configuration file and generate
//! the code and linker script that bootgate includes.

use std::fmt::Display;

use anyhow::{anyhow, ensure, Result};
use board::Board;
use memory::MemoryConfiguration;
use pins::{ButtonConfiguration, IndicatorConfiguration};
use serde::{Deserialize, Serialize};
use timing::TimingConfiguration;

pub mod board;
pub mod codegen;
pub mod memory;
pub mod pins;
pub mod timing;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub board: Board,
    pub button: ButtonConfiguration,
    pub indicator: IndicatorConfiguration,
    #[serde(default)]
    pub timing: TimingConfiguration,
    pub memory: MemoryConfiguration,
}

impl Configuration {
    /// Checks the configuration for inconsistencies that would only
    /// surface once the bootloader runs on the device.
    pub fn validate(&self) -> Result<()> {
        if let Some(problem) = self.problems().next() {
            return Err(anyhow!("Invalid configuration for {}: {}", self.board, problem));
        }
        Ok(())
    }

    pub fn problems(&self) -> impl Iterator<Item = ConfigurationProblem> + '_ {
        let memory = &self.memory;
        let timing = &self.timing;
        let pin_count = self.board.family().pin_count();
        #[rustfmt::skip]
        let problems = [
            (self.button.pin >= pin_count).then(|| ConfigurationProblem::ButtonPin),
            (self.indicator.pin >= pin_count).then(|| ConfigurationProblem::IndicatorPin),
            (self.button.pin == self.indicator.pin).then(|| ConfigurationProblem::SharedPin),

            (memory.code_page_size == 0 || !memory.code_page_size.is_power_of_two())
                .then(|| ConfigurationProblem::PageSize),
            [memory.bootloader_region_start, memory.application_region_start, memory.settings_address]
                .iter()
                .any(|address| memory.code_page_size != 0 && address % memory.code_page_size != 0)
                .then(|| ConfigurationProblem::PageAlignment),
            (memory.bootloader_region_end() as usize > self.board.family().flash().end())
                .then(|| ConfigurationProblem::OutsideFlash),
            (memory.application_region_end() > memory.bootloader_region_start)
                .then(|| ConfigurationProblem::ApplicationOverlap),
            (!(memory.bootloader_region_start..memory.bootloader_region_end())
                .contains(&memory.settings_address))
                .then(|| ConfigurationProblem::SettingsPlacement),

            (timing.tick_us == 0).then(|| ConfigurationProblem::Tick),
            (timing.debounce_ticks >= timing.single_click_ticks
                || timing.single_click_ticks >= timing.long_press_ticks)
                .then(|| ConfigurationProblem::Thresholds),
        ];
        problems.into_iter().flatten()
    }

    /// Feature flags the bootgate crate must be built with to match
    /// this configuration.
    pub fn required_feature_flags(&self) -> impl Iterator<Item = &'static str> {
        [self.board.feature_name(), self.board.family().feature_name()].into_iter()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigurationProblem {
    ButtonPin,
    IndicatorPin,
    SharedPin,
    PageSize,
    PageAlignment,
    OutsideFlash,
    ApplicationOverlap,
    SettingsPlacement,
    Tick,
    Thresholds,
}

impl Display for ConfigurationProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ConfigurationProblem::ButtonPin => "[Pins] Button pin does not exist on this family",
            ConfigurationProblem::IndicatorPin => {
                "[Pins] Indicator pin does not exist on this family"
            }
            ConfigurationProblem::SharedPin => "[Pins] Button and indicator share a pin",
            ConfigurationProblem::PageSize => "[Memory Map] Code page size must be a power of two",
            ConfigurationProblem::PageAlignment => {
                "[Memory Map] Region starts must be aligned to the code page size"
            }
            ConfigurationProblem::OutsideFlash => {
                "[Memory Map] Bootloader region extends past the end of flash"
            }
            ConfigurationProblem::ApplicationOverlap => {
                "[Memory Map] Application region overlaps the bootloader"
            }
            ConfigurationProblem::SettingsPlacement => {
                "[Memory Map] Settings page must lie inside the bootloader region"
            }
            ConfigurationProblem::Tick => "[Timing] Tick duration must be non-zero",
            ConfigurationProblem::Thresholds => {
                "[Timing] Thresholds must satisfy debounce < single click < long press"
            }
        })
    }
}

/// Checks that the feature flags a crate was built with agree with
/// the configuration it is built from.
pub fn ensure_feature_flags<'a>(
    configuration: &Configuration,
    supplied: impl Iterator<Item = &'a str> + Clone,
) -> Result<()> {
    for flag in configuration.required_feature_flags() {
        ensure!(
            supplied.clone().any(|s| s == flag),
            "Configuration mismatch. Configuration file requires the `{}` feature flag",
            flag
        );
    }
    let other_boards = Board::boards().filter(|b| *b != configuration.board);
    for board in other_boards {
        ensure!(
            !supplied.clone().any(|s| s == board.feature_name()),
            "Configuration mismatch. Feature flags select {}, configuration file selects {}",
            board,
            configuration.board
        );
    }
    Ok(())
}
