use crate::hal::time::{self, Microseconds};
use std::{cell::Cell, rc::Rc};

/// Simulated clock. Waiting advances time instantly; clones share
/// the same time base so scripted inputs can follow it.
#[derive(Clone, Debug, Default)]
pub struct MockClock {
    elapsed: Rc<Cell<u32>>,
    waits: Rc<Cell<usize>>,
}

impl MockClock {
    pub fn new() -> Self { Self::default() }

    /// Time elapsed since the clock was created.
    pub fn now(&self) -> Microseconds { Microseconds(self.elapsed.get()) }

    /// Number of waits performed so far.
    pub fn waits(&self) -> usize { self.waits.get() }
}

impl time::Wait for MockClock {
    fn wait(&mut self, period: Microseconds) {
        self.elapsed.set(self.elapsed.get() + period.0);
        self.waits.set(self.waits.get() + 1);
    }
}
