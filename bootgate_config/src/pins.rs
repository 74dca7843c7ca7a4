use serde::{Deserialize, Serialize};

/// Internal resistor configuration of an input pin.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pull {
    Floating,
    PullUp,
    PullDown,
}

/// Logic level read while the button is held down.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveLevel {
    Low,
    High,
}

/// Logic level that lights the indicator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Logic {
    /// Logical high equals "on"
    Direct,
    /// Logical high equals "off"
    Inverted,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonConfiguration {
    pub pin: u8,
    pub pull: Pull,
    pub active_level: ActiveLevel,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorConfiguration {
    pub pin: u8,
    pub logic: Logic,
}
