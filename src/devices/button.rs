//! Button gesture detection.
//!
//! The detector classifies what the user does with the button during
//! a single busy-polling window at start-up. Time is counted in
//! polling ticks (100 microseconds by default), and a single tick
//! counter runs from the first sample to the decision, across every
//! phase of the detection.
//!
//! ```text
//!            released, < debounce                 released, > single
//!   Pressing ----------------------> None  Pressing ----------------> Single
//!      |  pressed, > long press
//!      +-------------------------> Long
//!      |  released, <= single
//!      v
//!   AwaitingSecondPress --(pressed)--> Confirming --(pressed)--> Double
//!      ^        |  > single                |
//!      |        +-------------> Single     | released, counter += settle
//!      +-----------------------------------+
//! ```
use crate::hal::{
    gpio::InputPin,
    time::{Microseconds, Wait},
};
use static_assertions::const_assert;

/// Gesture performed by the user during the detection window.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum ButtonGesture {
    /// No press, or a press too short to get past debouncing.
    None,
    Single,
    Double,
    /// Held beyond the long press threshold. Reported without
    /// waiting for the release.
    Long,
}

/// Timing thresholds for gesture detection, in polling ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GestureTiming {
    /// Duration of a polling tick.
    pub tick: Microseconds,
    /// Presses released before this many ticks are contact bounce.
    pub debounce_ticks: u32,
    /// Releases after this many ticks are a single click. Also the
    /// ceiling of the double click window, counted from the first press.
    pub single_click_ticks: u32,
    /// Presses held beyond this many ticks are a long press.
    pub long_press_ticks: u32,
    /// Delay before a second press is confirmed.
    pub settle_ticks: u32,
}

impl GestureTiming {
    pub const DEFAULT: GestureTiming = GestureTiming {
        tick: Microseconds(100),
        debounce_ticks: 30,
        single_click_ticks: 4_000,
        long_press_ticks: 30_000,
        settle_ticks: 10,
    };

    /// Wall clock duration of a number of ticks.
    pub fn duration(&self, ticks: u32) -> Microseconds { Microseconds(self.tick.0 * ticks) }
}

const_assert!(GestureTiming::DEFAULT.debounce_ticks < GestureTiming::DEFAULT.single_click_ticks);
const_assert!(GestureTiming::DEFAULT.single_click_ticks < GestureTiming::DEFAULT.long_press_ticks);

impl Default for GestureTiming {
    fn default() -> Self { Self::DEFAULT }
}

/// What the detector needs before it can make progress.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Poll {
    /// Sample the button again right away.
    Sample,
    /// Busy wait for this many ticks, then sample.
    Wait(u32),
    /// Detection finished.
    Done(ButtonGesture),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    /// First press in progress: debouncing, then watching for a long press.
    Pressing,
    /// First press released early enough to start a double click.
    AwaitingSecondPress,
    /// A second press was seen and the settle delay has elapsed.
    Confirming,
}

/// Finite state machine classifying a sequence of button samples.
///
/// Feed it one sample per [`Poll::Sample`] or [`Poll::Wait`] until it
/// returns [`Poll::Done`].
#[derive(Clone, Debug)]
pub struct GestureDetector {
    phase: Phase,
    elapsed: u32,
    timing: GestureTiming,
}

impl GestureDetector {
    pub fn new(timing: GestureTiming) -> Self { Self { phase: Phase::Pressing, elapsed: 0, timing } }

    /// Ticks counted since the first sample.
    pub fn elapsed(&self) -> u32 { self.elapsed }

    /// Advances the detector with the button state observed now.
    pub fn step(&mut self, pressed: bool) -> Poll {
        let timing = self.timing;
        match (self.phase, pressed) {
            (Phase::Pressing, true) if self.elapsed > timing.long_press_ticks => {
                Poll::Done(ButtonGesture::Long)
            }
            (Phase::Pressing, true) => self.tick(),
            (Phase::Pressing, false) if self.elapsed < timing.debounce_ticks => {
                Poll::Done(ButtonGesture::None)
            }
            (Phase::Pressing, false) if self.elapsed > timing.single_click_ticks => {
                Poll::Done(ButtonGesture::Single)
            }
            (Phase::Pressing, false) => {
                self.phase = Phase::AwaitingSecondPress;
                Poll::Sample
            }
            (Phase::AwaitingSecondPress, true) => {
                self.phase = Phase::Confirming;
                Poll::Wait(timing.settle_ticks)
            }
            (Phase::AwaitingSecondPress, false) => self.tick_within_window(),
            (Phase::Confirming, true) => Poll::Done(ButtonGesture::Double),
            (Phase::Confirming, false) => {
                self.elapsed += timing.settle_ticks;
                self.phase = Phase::AwaitingSecondPress;
                self.tick_within_window()
            }
        }
    }

    fn tick(&mut self) -> Poll {
        self.elapsed += 1;
        Poll::Wait(1)
    }

    fn tick_within_window(&mut self) -> Poll {
        if self.elapsed > self.timing.single_click_ticks {
            Poll::Done(ButtonGesture::Single)
        } else {
            self.tick()
        }
    }
}

/// Level the pin reads while the button is held down.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActiveLevel {
    /// Pulled up, shorted to ground when pressed.
    Low,
    /// Pulled down, shorted to the supply when pressed.
    High,
}

/// Push button attached to a digital input. The pin provides no
/// debouncing of its own.
pub struct Button<Pin: InputPin> {
    pin: Pin,
    active_level: ActiveLevel,
}

impl<Pin: InputPin> Button<Pin> {
    pub fn new(pin: Pin, active_level: ActiveLevel) -> Self { Self { pin, active_level } }

    pub fn is_pressed(&self) -> bool {
        match self.active_level {
            ActiveLevel::Low => self.pin.is_low(),
            ActiveLevel::High => self.pin.is_high(),
        }
    }

    /// Samples the button until a gesture is recognised.
    ///
    /// Busy waits for the whole detection, which can take a bit over
    /// the long press threshold (about three seconds by default). Call
    /// it before relying on any concurrent service.
    pub fn detect_gesture<W: Wait>(&mut self, delay: &mut W, timing: GestureTiming) -> ButtonGesture {
        let mut detector = GestureDetector::new(timing);
        loop {
            match detector.step(self.is_pressed()) {
                Poll::Done(gesture) => return gesture,
                Poll::Sample => (),
                Poll::Wait(ticks) => delay.wait(timing.duration(ticks)),
            }
        }
    }
}
