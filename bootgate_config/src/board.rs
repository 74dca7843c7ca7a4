use std::fmt::Display;

use enum_iterator::IntoEnumIterator;
use serde::{Deserialize, Serialize};

use crate::{memory::LinkerArea, KB};

/// Boards bootgate can be configured for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, IntoEnumIterator)]
pub enum Board {
    ArchBle,
    BleSmurfs,
    GroveNode,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Family {
    Nrf51,
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Board::ArchBle => "Arch BLE",
            Board::BleSmurfs => "BLE Smurfs",
            Board::GroveNode => "Grove Node",
        })
    }
}

impl Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Family::Nrf51 => "nRF51",
        })
    }
}

impl Board {
    pub fn boards() -> impl Iterator<Item = Board> { Board::into_enum_iter() }

    pub fn family(&self) -> Family {
        match self {
            Board::ArchBle | Board::BleSmurfs | Board::GroveNode => Family::Nrf51,
        }
    }

    /// Name of the cargo feature that selects this board.
    pub fn feature_name(&self) -> &'static str {
        match self {
            Board::ArchBle => "arch_ble",
            Board::BleSmurfs => "ble_smurfs",
            Board::GroveNode => "grove_node",
        }
    }

    /// Default configuration file, under `sample_configurations`.
    pub fn sample_configuration(&self) -> &'static str {
        match self {
            Board::ArchBle => "arch_ble.ron",
            Board::BleSmurfs => "ble_smurfs.ron",
            Board::GroveNode => "grove_node.ron",
        }
    }
}

impl Family {
    pub fn feature_name(&self) -> &'static str {
        match self {
            Family::Nrf51 => "nrf51",
        }
    }

    pub fn pin_count(&self) -> u8 {
        match self {
            Family::Nrf51 => 32,
        }
    }

    /// Full extent of the on-chip flash.
    pub fn flash(&self) -> LinkerArea {
        match self {
            Family::Nrf51 => LinkerArea { origin: 0x0000_0000, size: KB!(256) },
        }
    }
}
