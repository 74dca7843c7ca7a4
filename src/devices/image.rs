//! Application image validity.
//!
//! The vendor update transport records the state of the application
//! bank in a settings page once an image has been fully received: a
//! bank code, a CRC-16 (CCITT) of the image and its size. The
//! bootloader trusts an image only if something is programmed at the
//! start of the region, the record marks the bank valid, and the image
//! bytes still match the CRC.
use crate::{
    error::Error,
    hal::flash::{self, Address, ReadWord},
    utilities::memory::Span,
};
use crc::crc16::{self, Hasher16};
use nb::block;

/// Bank code of an application that was completely received.
pub const BANK_VALID_APP: u8 = 0x01;
/// Stored CRC value meaning the image was not checksummed.
pub const CRC_NOT_RECORDED: u16 = 0x0000;
/// Value of a word of erased flash.
pub const ERASED_WORD: u32 = 0xFFFF_FFFF;

/// Record of the application bank, as the vendor transport lays it
/// out at the start of the settings page:
///
/// | offset | field        |
/// |--------|--------------|
/// | 0      | bank code    |
/// | 2      | image CRC    |
/// | 4      | other bank   |
/// | 8      | image size   |
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BootloaderSettings {
    pub bank_code: u8,
    pub image_crc: u16,
    pub image_size: u32,
}

impl BootloaderSettings {
    const HEADER_OFFSET: usize = 0;
    const SIZE_OFFSET: usize = 8;

    pub fn read<F: flash::Read>(flash: &mut F, location: Address) -> Result<Self, F::Error> {
        let header = block!(flash.read_word(location + Self::HEADER_OFFSET))?;
        Ok(Self {
            bank_code: header as u8,
            image_crc: (header >> 16) as u16,
            image_size: block!(flash.read_word(location + Self::SIZE_OFFSET))?,
        })
    }
}

/// CRC-16 with the CCITT polynomial, `0xFFFF` seed and no reflection.
///
/// The `crc` crate only runs reflected CRC-16s. Feeding it bit reversed
/// bytes over the reflected polynomial yields the bit reversed CCITT
/// register.
pub struct Crc16Ccitt(crc16::Digest);

impl Crc16Ccitt {
    pub fn new() -> Self {
        // The digest inverts the register on entry, so a zero initial
        // value seeds it with 0xFFFF.
        Self(crc16::Digest::new_with_initial(crc16::X25, 0))
    }

    pub fn write(&mut self, bytes: &mut [u8]) {
        bytes.iter_mut().for_each(|byte| *byte = byte.reverse_bits());
        self.0.write(bytes);
    }

    pub fn sum(&self) -> u16 { (!self.0.sum16()).reverse_bits() }
}

impl Default for Crc16Ccitt {
    fn default() -> Self { Self::new() }
}

/// Answers whether a bootable application lives at a given address.
/// Queries are expected to be free of side effects.
pub trait CheckImage {
    fn is_valid(&mut self, region_start: Address) -> bool;
}

/// Checks the application region against the settings page record.
pub struct ImageValidator<F: flash::Read> {
    flash: F,
    application: Span<Address>,
    settings: Address,
}

impl<F: flash::Read> ImageValidator<F> {
    pub fn new(flash: F, application: Span<Address>, settings: Address) -> Self {
        Self { flash, application, settings }
    }

    fn crc_of(&mut self, size: usize) -> Result<u16, F::Error> {
        // Generic buffer to hold temporary slices read from flash memory.
        const BUFFER_SIZE: usize = 256;
        let mut buffer = [0u8; BUFFER_SIZE];
        let mut crc = Crc16Ccitt::new();
        let mut offset = 0usize;
        while offset < size {
            let chunk = &mut buffer[..BUFFER_SIZE.min(size - offset)];
            block!(self.flash.read(self.application.start + offset, chunk))?;
            offset += chunk.len();
            crc.write(chunk);
        }
        Ok(crc.sum())
    }

    fn check(&mut self) -> Result<bool, F::Error> {
        if block!(self.flash.read_word(self.application.start))? == ERASED_WORD {
            return Ok(false);
        }

        let settings = BootloaderSettings::read(&mut self.flash, self.settings)?;
        if settings.bank_code != BANK_VALID_APP {
            return Ok(false);
        }

        if settings.image_crc == CRC_NOT_RECORDED {
            return Ok(true);
        }

        let size = settings.image_size as usize;
        if !self.application.fits(size) {
            log_warn!("Recorded image does not fit the application region.");
            return Ok(false);
        }
        Ok(self.crc_of(size)? == settings.image_crc)
    }
}

impl<F: flash::Read> CheckImage for ImageValidator<F>
where
    Error: From<F::Error>,
{
    fn is_valid(&mut self, region_start: Address) -> bool {
        if region_start != self.application.start {
            log_warn!("Only applications at the configured region can be booted.");
            return false;
        }

        self.check().unwrap_or_else(|error| {
            log_warn!("Application image could not be read.");
            Error::from(error).report();
            false
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hal::doubles::flash::FakeFlash;

    const APPLICATION_START: Address = Address(0x1_4000);
    const APPLICATION_SIZE: usize = kb!(16);
    const SETTINGS: Address = Address(0x3_FC00);

    fn image() -> Vec<u8> { (0..1_000u32).map(|i| (i * 7 % 251) as u8).collect() }

    /// Settings page bytes as the vendor transport writes them.
    fn record(settings: BootloaderSettings) -> [u8; 12] {
        let mut bytes = [0u8; 12];
        bytes[0] = settings.bank_code;
        bytes[2..4].copy_from_slice(&settings.image_crc.to_le_bytes());
        bytes[8..12].copy_from_slice(&settings.image_size.to_le_bytes());
        bytes
    }

    fn crc_of(image: &[u8]) -> u16 {
        let mut crc = Crc16Ccitt::new();
        crc.write(&mut image.to_vec());
        crc.sum()
    }

    fn validator_with(image: &[u8], settings: BootloaderSettings) -> ImageValidator<FakeFlash> {
        let mut flash = FakeFlash::new(Address(0));
        flash.program(APPLICATION_START, image);
        flash.program(SETTINGS, &record(settings));
        let application = Span { start: APPLICATION_START, size: APPLICATION_SIZE };
        ImageValidator::new(flash, application, SETTINGS)
    }

    fn settings_for(image: &[u8]) -> BootloaderSettings {
        BootloaderSettings {
            bank_code: BANK_VALID_APP,
            image_crc: crc_of(image),
            image_size: image.len() as u32,
        }
    }

    #[test]
    fn crc_matches_the_ccitt_check_value() {
        assert_eq!(crc_of(b"123456789"), 0x29B1);
        assert_eq!(crc_of(&[]), 0xFFFF);
    }

    #[test]
    fn crc_is_independent_of_chunking() {
        // Given
        let image = image();
        let mut crc = Crc16Ccitt::new();

        // When
        image.chunks(256).for_each(|chunk| crc.write(&mut chunk.to_vec()));

        // Then
        assert_eq!(crc.sum(), crc_of(&image));
        assert_eq!(crc.sum(), 0xBBEC);
    }

    #[test]
    fn settings_are_decoded_from_the_vendor_layout() {
        // Given a record with padding bytes and the other bank code set
        let mut flash = FakeFlash::new(Address(0));
        flash.program(SETTINGS, &[0x01, 0xAA, 0xEC, 0xBB, 0x01, 0xAA, 0xAA, 0xAA, 0xE8, 0x03, 0, 0]);

        // When
        let settings = BootloaderSettings::read(&mut flash, SETTINGS).unwrap();

        // Then
        assert_eq!(
            settings,
            BootloaderSettings { bank_code: BANK_VALID_APP, image_crc: 0xBBEC, image_size: 1_000 }
        );
    }

    #[test]
    fn image_matching_its_record_is_valid() {
        // Given
        let image = image();
        let mut validator = validator_with(&image, settings_for(&image));

        // Then
        assert!(validator.is_valid(APPLICATION_START));
    }

    #[test]
    fn corrupted_image_is_invalid() {
        // Given
        let mut image = image();
        let settings = settings_for(&image);
        image[512] ^= 0xFF;
        let mut validator = validator_with(&image, settings);

        // Then
        assert!(!validator.is_valid(APPLICATION_START));
    }

    #[test]
    fn erased_settings_page_means_no_application() {
        // Given
        let mut flash = FakeFlash::new(Address(0));
        flash.program(APPLICATION_START, &image());
        let application = Span { start: APPLICATION_START, size: APPLICATION_SIZE };
        let mut validator = ImageValidator::new(flash, application, SETTINGS);

        // Then
        assert!(!validator.is_valid(APPLICATION_START));
    }

    #[test]
    fn erased_application_region_is_invalid_even_without_a_recorded_crc() {
        // Given a record claiming a valid bank over blank flash
        let settings = BootloaderSettings {
            bank_code: BANK_VALID_APP,
            image_crc: CRC_NOT_RECORDED,
            image_size: 1_000,
        };
        let mut validator = validator_with(&[], settings);

        // When
        let valid = validator.is_valid(APPLICATION_START);

        // Then the settings page is never consulted
        assert!(!valid);
        assert_eq!(validator.flash.reads(), 1);
    }

    #[test]
    fn incomplete_bank_is_invalid() {
        // Given
        let image = image();
        let settings = BootloaderSettings { bank_code: 0x00, ..settings_for(&image) };
        let mut validator = validator_with(&image, settings);

        // Then
        assert!(!validator.is_valid(APPLICATION_START));
    }

    #[test]
    fn oversized_records_are_invalid() {
        // Given
        let image = image();
        let oversized =
            BootloaderSettings { image_size: APPLICATION_SIZE as u32 + 1, ..settings_for(&image) };

        // Then
        assert!(!validator_with(&image, oversized).is_valid(APPLICATION_START));
    }

    #[test]
    fn unrecorded_crc_skips_the_scan() {
        // Given
        let image = image();
        let settings = BootloaderSettings { image_crc: CRC_NOT_RECORDED, ..settings_for(&image) };
        let mut validator = validator_with(&image, settings);

        // When
        let valid = validator.is_valid(APPLICATION_START);

        // Then only the first application word and the record were read
        assert!(valid);
        assert_eq!(validator.flash.reads(), 3);
    }

    #[test]
    fn other_regions_are_never_valid() {
        // Given
        let image = image();
        let mut validator = validator_with(&image, settings_for(&image));

        // Then
        assert!(!validator.is_valid(APPLICATION_START + 0x1000));
    }

    #[test]
    fn unreadable_settings_mean_no_application() {
        // Given
        let mut flash = FakeFlash::new(Address(0));
        flash.program(APPLICATION_START, &image());
        let application = Span { start: APPLICATION_START, size: APPLICATION_SIZE };
        let mut validator = ImageValidator::new(flash, application, Address(0x1000_0000));

        // Then
        assert!(!validator.is_valid(APPLICATION_START));
    }

    #[test]
    fn validity_queries_are_repeatable() {
        // Given
        let image = image();
        let mut validator = validator_with(&image, settings_for(&image));

        // Then
        assert_eq!(validator.is_valid(APPLICATION_START), validator.is_valid(APPLICATION_START));
    }
}
