//! Layout facts programmed into the factory (FICR) and user (UICR)
//! information registers.
use crate::devices::memory_map::ReportLayout;
use core::ptr;

const FICR_CODEPAGESIZE: usize = 0x1000_0010;
const UICR_BOOTLOADERADDR: usize = 0x1000_1014;

pub struct FactoryInformation {
    _0: (),
}

impl FactoryInformation {
    pub fn new() -> Self { Self { _0: () } }
}

impl Default for FactoryInformation {
    fn default() -> Self { Self::new() }
}

impl ReportLayout for FactoryInformation {
    fn bootloader_address(&self) -> u32 {
        // NOTE(Safety) read only register.
        unsafe { ptr::read_volatile(UICR_BOOTLOADERADDR as *const u32) }
    }

    fn code_page_size(&self) -> u32 {
        // NOTE(Safety) read only register.
        unsafe { ptr::read_volatile(FICR_CODEPAGESIZE as *const u32) }
    }
}
