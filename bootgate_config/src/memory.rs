use serde::{Deserialize, Serialize};

#[macro_export(local_inner_macros)]
macro_rules! KB {
    ($val:expr) => {
        $val * 1024
    };
}

/// Flash layout of the device, shared with the update transport and
/// the application. All addresses are absolute.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfiguration {
    pub bootloader_region_start: u32,
    pub bootloader_size_kb: u32,
    pub application_region_start: u32,
    pub application_size_kb: u32,
    /// Page holding the record of the application bank.
    pub settings_address: u32,
    /// Size of the smallest erasable flash page.
    pub code_page_size: u32,
    pub ram: LinkerArea,
}

impl MemoryConfiguration {
    pub fn bootloader_region_end(&self) -> u32 {
        self.bootloader_region_start + KB!(self.bootloader_size_kb)
    }

    pub fn application_region_end(&self) -> u32 {
        self.application_region_start + KB!(self.application_size_kb)
    }

    /// Flash area the bootloader image itself may occupy: its region,
    /// minus the settings page at its top.
    pub fn bootloader_flash(&self) -> LinkerArea {
        LinkerArea {
            origin: self.bootloader_region_start,
            size: (self.settings_address - self.bootloader_region_start) as usize,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkerArea {
    pub origin: u32,
    pub size: usize,
}

impl LinkerArea {
    pub fn end(&self) -> usize { self.origin as usize + self.size }
}
