//! Construction of the bootloader from nRF51 parts.
use super::configuration::*;
use crate::{
    devices::{
        bootloader::Bootloader,
        button::Button,
        image::ImageValidator,
        led::MonochromeLed,
        update_signal::UpdateSignal,
    },
    drivers::nrf51::{
        delay::CycleDelay,
        factory::FactoryInformation,
        flash::McuFlash,
        gpio::{Input, Output, Pin, PushPull},
        power::Gpregret,
        vendor::NordicSdk,
    },
    hal::time::{Hertz, U32Ext},
};

type ButtonPin = Pin<Input<ButtonPull>>;
type Indicator = MonochromeLed<Pin<Output<PushPull>>>;

pub type Nrf51Bootloader = Bootloader<
    UpdateSignal<Gpregret>,
    ButtonPin,
    CycleDelay,
    Indicator,
    ImageValidator<McuFlash>,
    NordicSdk,
>;

impl Default for Nrf51Bootloader {
    fn default() -> Self { Self::new() }
}

impl Nrf51Bootloader {
    pub fn new() -> Self {
        log_info!("Bootgate for {=str}", BOARD);
        let core_clock: Hertz = 16.mhz().into();

        // NOTE(Safety) the bootloader is built once, from the entry
        // point, and is the sole owner of these pins and registers.
        let (button_pin, indicator_pin, gpregret) = unsafe {
            (
                Pin::new(BUTTON_PIN).into_input::<ButtonPull>(),
                Pin::new(INDICATOR_PIN).into_push_pull_output(),
                Gpregret::new(),
            )
        };

        Bootloader {
            signal: UpdateSignal::new(gpregret),
            button: Button::new(button_pin, BUTTON_ACTIVE_LEVEL),
            delay: CycleDelay::new(core_clock),
            indicator: MonochromeLed::new(indicator_pin, INDICATOR_LOGIC),
            images: ImageValidator::new(
                McuFlash::new(),
                MEMORY_MAP.application,
                MEMORY_MAP.settings_address,
            ),
            firmware: NordicSdk::new(FactoryInformation::new()),
            memory_map: MEMORY_MAP,
            timing: GESTURE_TIMING,
        }
    }
}
