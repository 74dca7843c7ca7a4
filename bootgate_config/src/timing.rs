use serde::{Deserialize, Serialize};

/// Button gesture thresholds, in polling ticks. Omitted from a
/// configuration file, these default to the values every supported
/// board ships with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfiguration {
    pub tick_us: u32,
    pub debounce_ticks: u32,
    pub single_click_ticks: u32,
    pub long_press_ticks: u32,
    pub settle_ticks: u32,
}

impl Default for TimingConfiguration {
    fn default() -> Self {
        Self {
            tick_us: 100,
            debounce_ticks: 30,
            single_click_ticks: 4_000,
            long_press_ticks: 30_000,
            settle_ticks: 10,
        }
    }
}
