//! Flash layout shared by the bootloader, the update transport and
//! the application.
use crate::{error::Error, hal::flash::Address, utilities::memory::Span};

/// Layout facts reported by the chip itself.
pub trait ReportLayout {
    /// Bootloader start address programmed in the user configuration registers.
    fn bootloader_address(&self) -> u32;
    /// Size of the smallest erasable flash page.
    fn code_page_size(&self) -> u32;
}

/// Configured flash layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MemoryMap {
    pub bootloader_region_start: Address,
    pub application: Span<Address>,
    pub settings_address: Address,
    pub code_page_size: u32,
}

impl MemoryMap {
    /// Checks the configured layout against what the chip reports. A
    /// mismatch means the bootloader was built for another chip or
    /// flashed at the wrong address, and nothing it does can be trusted.
    pub fn verify<R: ReportLayout>(&self, chip: &R) -> Result<(), Error> {
        let reported = chip.bootloader_address();
        if reported != self.bootloader_region_start.0 {
            return Err(Error::BootloaderAddressMismatch {
                configured: self.bootloader_region_start.0,
                reported,
            });
        }

        let reported = chip.code_page_size();
        if reported != self.code_page_size {
            return Err(Error::PageSizeMismatch { configured: self.code_page_size, reported });
        }
        Ok(())
    }
}
