//! Bindings to the Nordic nRF51 SDK.
//!
//! The DFU transport, the application launcher and the radio stack are
//! linked in from the SDK's C sources. Timer, scheduler and radio stack
//! set-up are macro heavy on the C side, so they are reached through
//! thin C shims built alongside the SDK, each returning an SDK status
//! code.
use super::factory::FactoryInformation;
use crate::{
    devices::{
        interfaces::{Launcher, Services, UpdateTransport},
        memory_map::ReportLayout,
    },
    error::Error,
    hal::flash::Address,
};
use cortex_m::peripheral::SCB;

const NRF_SUCCESS: u32 = 0;

extern "C" {
    fn bootloader_dfu_start() -> u32;
    fn bootloader_app_start(app_addr: u32);
    fn bootgate_timers_init() -> u32;
    fn bootgate_scheduler_init() -> u32;
    fn bootgate_ble_stack_init(init_softdevice: bool) -> u32;
}

fn check(operation: &'static str, code: u32) -> Result<(), Error> {
    match code {
        NRF_SUCCESS => Ok(()),
        code => Err(Error::VendorError { operation, code }),
    }
}

/// Vendor runtime around the boot decision.
pub struct NordicSdk {
    layout: FactoryInformation,
}

impl NordicSdk {
    pub fn new(layout: FactoryInformation) -> Self { Self { layout } }
}

impl Services for NordicSdk {
    fn init_timers(&mut self) -> Result<(), Error> {
        // NOTE(Safety) plain C call with no pointer arguments.
        check("timers init", unsafe { bootgate_timers_init() })
    }

    fn init_scheduler(&mut self) -> Result<(), Error> {
        // NOTE(Safety) plain C call with no pointer arguments.
        check("scheduler init", unsafe { bootgate_scheduler_init() })
    }

    fn init_radio_stack(&mut self, initialise: bool) -> Result<(), Error> {
        // NOTE(Safety) plain C call with no pointer arguments.
        check("radio stack init", unsafe { bootgate_ble_stack_init(initialise) })
    }
}

impl UpdateTransport for NordicSdk {
    fn enter_update_mode(&mut self) -> Result<(), Error> {
        // NOTE(Safety) the transport takes over the radio stack and
        // flash until the session ends; nothing else runs meanwhile.
        check("DFU start", unsafe { bootloader_dfu_start() })
    }
}

impl Launcher for NordicSdk {
    fn start_application(&mut self, region_start: Address) -> ! {
        // NOTE(Safety) Thoroughly unsafe: execution continues in an
        // entirely different image. The address was checked to hold a
        // valid application just before.
        unsafe { bootloader_app_start(region_start.0) };
        log_error!("Application returned control to the bootloader.");
        SCB::sys_reset()
    }

    fn reset(&mut self) -> ! { SCB::sys_reset() }
}

impl ReportLayout for NordicSdk {
    fn bootloader_address(&self) -> u32 { self.layout.bootloader_address() }
    fn code_page_size(&self) -> u32 { self.layout.code_page_size() }
}
