//! Generic Bootloader.
//!
//! This module contains the boot sequence, with the exception of how
//! to construct a bootloader. Construction is handled by the `port`
//! module as it depends on board specific information.
use super::{
    boot_policy::{decide, BootDecision},
    button::{Button, ButtonGesture, GestureTiming},
    image::CheckImage,
    interfaces::Firmware,
    led::Toggle,
    memory_map::MemoryMap,
    update_signal::{PersistedFlag, ReadUpdateSignal},
};
use crate::{
    error::{Error, ResetOnError},
    hal::{flash::Address, gpio::InputPin, time::Wait},
    utilities::guard::Guard,
};

/// Where execution goes once the bootloader is done.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Handoff {
    /// Jump into the application at the given address.
    Application(Address),
    /// Reset the device and start over.
    Reset,
}

pub struct Bootloader<SIG, PIN, CLK, LED, IMG, FW>
where
    SIG: ReadUpdateSignal,
    PIN: InputPin,
    CLK: Wait,
    LED: Toggle,
    IMG: CheckImage,
    FW: Firmware,
{
    pub(crate) signal: SIG,
    pub(crate) button: Button<PIN>,
    pub(crate) delay: CLK,
    pub(crate) indicator: LED,
    pub(crate) images: IMG,
    pub(crate) firmware: FW,
    pub(crate) memory_map: MemoryMap,
    pub(crate) timing: GestureTiming,
}

impl<SIG, PIN, CLK, LED, IMG, FW> Bootloader<SIG, PIN, CLK, LED, IMG, FW>
where
    SIG: ReadUpdateSignal,
    PIN: InputPin,
    CLK: Wait,
    LED: Toggle,
    IMG: CheckImage,
    FW: Firmware,
{
    /// Main bootloader routine. Never returns: it ends either in the
    /// application or in a device reset.
    pub fn run(mut self) -> ! {
        log_info!("-- Bootgate initialised --");
        let decision = self.prepare().reset_on_error(&mut self.firmware);
        match self.handoff(decision).reset_on_error(&mut self.firmware) {
            Handoff::Application(region_start) => {
                self.indicator.off();
                log_warn!("Jumping to the application. This will break `defmt`.");
                self.firmware.start_application(region_start)
            }
            Handoff::Reset => self.firmware.reset(),
        }
    }

    /// Gathers the boot inputs, brings up the vendor services and
    /// decides what this boot does.
    ///
    /// The persisted flag is consumed before anything else, so a
    /// failure further down can't replay the request on the next boot.
    pub fn prepare(&mut self) -> Result<BootDecision, Error> {
        let flag = self.signal.read_and_clear_flag();
        log_info!("Persisted flag: {:?}", flag);

        let gesture = match flag {
            PersistedFlag::None => self.listen_for_gesture(),
            _ => ButtonGesture::None,
        };
        log_info!("Button gesture: {:?}", gesture);

        self.memory_map.verify(&self.firmware)?;

        self.firmware.init_timers()?;
        self.firmware.init_scheduler()?;
        self.firmware.init_radio_stack(flag.requires_stack_initialisation())?;

        let app_is_valid = self.images.is_valid(self.memory_map.application.start);
        let decision = decide(flag, gesture, app_is_valid);
        log_info!("Boot decision: {:?}", decision);
        Ok(decision)
    }

    /// Carries out a boot decision up to the point of no return.
    ///
    /// Update mode runs until the transport gives control back. The
    /// application is then checked again, since the session may have
    /// replaced or erased it.
    pub fn handoff(&mut self, decision: BootDecision) -> Result<Handoff, Error> {
        let application = self.memory_map.application.start;
        if decision == BootDecision::EnterUpdateMode {
            log_info!("Entering update mode.");
            let Self { indicator, firmware, .. } = self;
            {
                let _lit = Guard::new(indicator, Toggle::on, Toggle::off);
                firmware.enter_update_mode()?;
            }

            if !self.images.is_valid(application) {
                log_warn!("No valid application after the update session.");
                return Ok(Handoff::Reset);
            }
        }
        Ok(Handoff::Application(application))
    }

    fn listen_for_gesture(&mut self) -> ButtonGesture {
        let Self { button, delay, indicator, timing, .. } = self;
        let _lit = Guard::new(indicator, Toggle::on, Toggle::off);
        button.detect_gesture(delay, *timing)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        devices::{
            button::ActiveLevel,
            interfaces::{Launcher, Services, UpdateTransport},
            led::{Logic, MonochromeLed},
            memory_map::ReportLayout,
            update_signal::UpdateSignal,
        },
        hal::{
            doubles::{
                gpio::{MockPin, ScriptedButton},
                register::FakeRegister,
                time::MockClock,
            },
            time::Microseconds,
        },
        utilities::memory::Span,
    };
    use std::{cell::Cell, cell::RefCell, rc::Rc};

    const BOOTLOADER_START: u32 = 0x3_C000;
    const PAGE_SIZE: u32 = 1024;
    const APPLICATION: Span<Address> = Span { start: Address(0x1_4000), size: 0x2_8000 };

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    enum Call {
        InitTimers,
        InitScheduler,
        InitRadioStack { initialise: bool },
        EnterUpdateMode,
    }

    #[derive(Clone, Default)]
    struct FakeImages {
        valid: Rc<Cell<bool>>,
    }

    impl CheckImage for FakeImages {
        fn is_valid(&mut self, region_start: Address) -> bool {
            region_start == APPLICATION.start && self.valid.get()
        }
    }

    struct MockFirmware {
        calls: Rc<RefCell<Vec<Call>>>,
        page_size: u32,
        radio_status: u32,
        // Validity of the application once an update session ends.
        installs: Option<(FakeImages, bool)>,
    }

    impl MockFirmware {
        fn record(&self, call: Call) { self.calls.borrow_mut().push(call); }
    }

    impl Services for MockFirmware {
        fn init_timers(&mut self) -> Result<(), Error> {
            self.record(Call::InitTimers);
            Ok(())
        }

        fn init_scheduler(&mut self) -> Result<(), Error> {
            self.record(Call::InitScheduler);
            Ok(())
        }

        fn init_radio_stack(&mut self, initialise: bool) -> Result<(), Error> {
            self.record(Call::InitRadioStack { initialise });
            match self.radio_status {
                0 => Ok(()),
                code => Err(Error::VendorError { operation: "radio stack", code }),
            }
        }
    }

    impl UpdateTransport for MockFirmware {
        fn enter_update_mode(&mut self) -> Result<(), Error> {
            self.record(Call::EnterUpdateMode);
            if let Some((images, valid)) = &self.installs {
                images.valid.set(*valid);
            }
            Ok(())
        }
    }

    impl Launcher for MockFirmware {
        fn start_application(&mut self, region_start: Address) -> ! {
            panic!("application started at {:#x}", region_start.0)
        }

        fn reset(&mut self) -> ! { panic!("device reset") }
    }

    impl ReportLayout for MockFirmware {
        fn bootloader_address(&self) -> u32 { BOOTLOADER_START }
        fn code_page_size(&self) -> u32 { self.page_size }
    }

    type TestBootloader = Bootloader<
        UpdateSignal<FakeRegister>,
        ScriptedButton,
        MockClock,
        MonochromeLed<MockPin>,
        FakeImages,
        MockFirmware,
    >;

    struct Fixture {
        register: FakeRegister,
        button: ScriptedButton,
        images: FakeImages,
        calls: Rc<RefCell<Vec<Call>>>,
        bootloader: TestBootloader,
    }

    fn at(ticks: u32) -> Microseconds { GestureTiming::DEFAULT.duration(ticks) }

    fn fixture(flag: u32, app_is_valid: bool, presses: &[(u32, u32)]) -> Fixture {
        let clock = MockClock::new();
        let button = presses
            .iter()
            .fold(ScriptedButton::active_low(&clock), |button, &(start, end)| {
                button.press(at(start), at(end))
            });
        let register = FakeRegister::holding(flag);
        let images = FakeImages::default();
        images.valid.set(app_is_valid);
        let calls = Rc::new(RefCell::new(Vec::new()));
        let firmware =
            MockFirmware { calls: calls.clone(), page_size: PAGE_SIZE, radio_status: 0, installs: None };

        let bootloader = Bootloader {
            signal: UpdateSignal::new(register.clone()),
            button: Button::new(button.clone(), ActiveLevel::Low),
            delay: clock,
            indicator: MonochromeLed::new(MockPin::default(), Logic::Direct),
            images: images.clone(),
            firmware,
            memory_map: MemoryMap {
                bootloader_region_start: Address(BOOTLOADER_START),
                application: APPLICATION,
                settings_address: Address(0x3_FC00),
                code_page_size: PAGE_SIZE,
            },
            timing: GestureTiming::DEFAULT,
        };
        Fixture { register, button, images, calls, bootloader }
    }

    const STARTUP: [Call; 3] =
        [Call::InitTimers, Call::InitScheduler, Call::InitRadioStack { initialise: true }];

    #[test]
    fn idle_boot_with_valid_application_starts_it() {
        // Given
        let mut fixture = fixture(0, true, &[]);

        // When
        let decision = fixture.bootloader.prepare();

        // Then
        assert_eq!(decision, Ok(BootDecision::StartApplication));
        assert_eq!(*fixture.calls.borrow(), STARTUP);
        assert_eq!(fixture.button.samples(), 1);
        assert_eq!(fixture.register.writes(), 0);
    }

    #[test]
    fn indicator_is_lit_only_while_listening_for_a_gesture() {
        // Given
        let mut fixture = fixture(0, true, &[]);

        // When
        fixture.bootloader.prepare().unwrap();

        // Then
        assert!(!fixture.bootloader.indicator.is_on());
        assert_eq!(fixture.bootloader.indicator.pin().changes, [false, true, false]);
    }

    #[test]
    fn reset_requested_flag_skips_the_button_and_enters_update_mode() {
        // Given
        let mut fixture = fixture(0x02, true, &[(0, 40_000)]);

        // When
        let decision = fixture.bootloader.prepare();

        // Then
        assert_eq!(decision, Ok(BootDecision::EnterUpdateMode));
        assert_eq!(fixture.register.value(), 0);
        assert_eq!(fixture.button.samples(), 0);
        assert_eq!(*fixture.calls.borrow(), STARTUP);
    }

    #[test]
    fn force_update_flag_reattaches_the_running_radio_stack() {
        // Given
        let mut fixture = fixture(0xB1, true, &[]);

        // When
        let decision = fixture.bootloader.prepare();

        // Then
        assert_eq!(decision, Ok(BootDecision::EnterUpdateMode));
        assert_eq!(fixture.register.value(), 0);
        assert_eq!(
            *fixture.calls.borrow(),
            [Call::InitTimers, Call::InitScheduler, Call::InitRadioStack { initialise: false }]
        );
    }

    #[test]
    fn single_click_enters_update_mode() {
        // Given
        let mut fixture = fixture(0, true, &[(0, 100)]);

        // Then
        assert_eq!(fixture.bootloader.prepare(), Ok(BootDecision::EnterUpdateMode));
    }

    #[test]
    fn bounce_alone_does_not_enter_update_mode() {
        // Given
        let mut fixture = fixture(0, true, &[(0, 10)]);

        // Then
        assert_eq!(fixture.bootloader.prepare(), Ok(BootDecision::StartApplication));
    }

    #[test]
    fn invalid_application_enters_update_mode() {
        // Given
        let mut fixture = fixture(0, false, &[]);

        // Then
        assert_eq!(fixture.bootloader.prepare(), Ok(BootDecision::EnterUpdateMode));
    }

    #[test]
    fn layout_mismatch_aborts_before_any_service_starts() {
        // Given
        let mut fixture = fixture(0x02, true, &[]);
        fixture.bootloader.firmware.page_size = 4096;

        // When
        let result = fixture.bootloader.prepare();

        // Then the flag is consumed regardless
        assert_eq!(result, Err(Error::PageSizeMismatch { configured: PAGE_SIZE, reported: 4096 }));
        assert!(fixture.calls.borrow().is_empty());
        assert_eq!(fixture.register.value(), 0);
    }

    #[test]
    fn vendor_failures_are_propagated() {
        // Given
        let mut fixture = fixture(0, true, &[]);
        fixture.bootloader.firmware.radio_status = 8;

        // Then
        assert_eq!(
            fixture.bootloader.prepare(),
            Err(Error::VendorError { operation: "radio stack", code: 8 })
        );
    }

    #[test]
    fn starting_the_application_needs_no_update_session() {
        // Given
        let mut fixture = fixture(0, true, &[]);

        // When
        let handoff = fixture.bootloader.handoff(BootDecision::StartApplication);

        // Then
        assert_eq!(handoff, Ok(Handoff::Application(APPLICATION.start)));
        assert!(fixture.calls.borrow().is_empty());
    }

    #[test]
    fn successful_update_session_hands_off_to_the_new_application() {
        // Given
        let mut fixture = fixture(0, false, &[]);
        fixture.bootloader.firmware.installs = Some((fixture.images.clone(), true));

        // When
        let handoff = fixture.bootloader.handoff(BootDecision::EnterUpdateMode);

        // Then
        assert_eq!(handoff, Ok(Handoff::Application(APPLICATION.start)));
        assert_eq!(*fixture.calls.borrow(), [Call::EnterUpdateMode]);
        assert_eq!(fixture.bootloader.indicator.pin().changes, [false, true, false]);
    }

    #[test]
    fn update_session_without_valid_image_resets() {
        // Given
        let mut fixture = fixture(0, true, &[]);
        fixture.bootloader.firmware.installs = Some((fixture.images.clone(), false));

        // Then
        assert_eq!(fixture.bootloader.handoff(BootDecision::EnterUpdateMode), Ok(Handoff::Reset));
    }

    #[test]
    #[should_panic(expected = "application started at 0x14000")]
    fn run_jumps_into_a_valid_application() { fixture(0, true, &[]).bootloader.run() }

    #[test]
    #[should_panic(expected = "device reset")]
    fn run_resets_on_layout_mismatch() {
        let mut fixture = fixture(0, true, &[]);
        fixture.bootloader.firmware.page_size = 4096;
        fixture.bootloader.run()
    }
}
