use crate::hal::{
    gpio::{InputPin, OutputPin},
    time::Microseconds,
};
use std::{cell::Cell, ops::Range, rc::Rc, vec::Vec};

use super::time::MockClock;

#[derive(Clone, Debug, Default)]
pub struct MockPin {
    pub state: bool,
    pub changes: Vec<bool>,
}

impl MockPin {
    pub fn is_high(&self) -> bool { self.state }
    pub fn is_low(&self) -> bool { !self.state }
}

impl OutputPin for MockPin {
    fn set_low(&mut self) {
        self.state = false;
        self.changes.push(self.state);
    }

    fn set_high(&mut self) {
        self.state = true;
        self.changes.push(self.state);
    }
}

/// Input pin that replays a scripted sequence of button presses
/// against a [`MockClock`]. Presses are half open time ranges,
/// measured in microseconds since the clock started.
#[derive(Clone, Debug)]
pub struct ScriptedButton {
    clock: MockClock,
    presses: Vec<Range<u64>>,
    pressed_level: bool,
    samples: Rc<Cell<usize>>,
}

impl ScriptedButton {
    /// Button wired to ground through a pull-up: reads low when pressed.
    pub fn active_low(clock: &MockClock) -> Self { Self::new(clock, false) }

    /// Button wired to the supply through a pull-down: reads high when pressed.
    pub fn active_high(clock: &MockClock) -> Self { Self::new(clock, true) }

    fn new(clock: &MockClock, pressed_level: bool) -> Self {
        Self { clock: clock.clone(), presses: Vec::new(), pressed_level, samples: Rc::default() }
    }

    /// Adds a press held from `start` (inclusive) until `end` (exclusive).
    pub fn press(mut self, start: Microseconds, end: Microseconds) -> Self {
        self.presses.push(start.0 as u64..end.0 as u64);
        self
    }

    /// Number of times the pin level has been read, across all clones.
    pub fn samples(&self) -> usize { self.samples.get() }

    fn is_pressed(&self) -> bool {
        let now = self.clock.now().0 as u64;
        self.presses.iter().any(|press| press.contains(&now))
    }
}

impl InputPin for ScriptedButton {
    fn is_high(&self) -> bool {
        self.samples.set(self.samples.get() + 1);
        self.is_pressed() == self.pressed_level
    }
}
