use crate::hal::register::RetainedRegister;
use std::{cell::Cell, rc::Rc};

/// Retained register backed by shared memory, so a test can keep a
/// handle to the value after handing a clone to the code under test.
#[derive(Clone, Debug, Default)]
pub struct FakeRegister {
    value: Rc<Cell<u32>>,
    writes: Rc<Cell<usize>>,
}

impl FakeRegister {
    pub fn holding(value: u32) -> Self {
        Self { value: Rc::new(Cell::new(value)), writes: Rc::default() }
    }

    pub fn value(&self) -> u32 { self.value.get() }

    /// Number of writes performed so far, across all clones.
    pub fn writes(&self) -> usize { self.writes.get() }
}

impl RetainedRegister for FakeRegister {
    fn read(&self) -> u32 { self.value.get() }

    fn write(&mut self, value: u32) {
        self.value.set(value);
        self.writes.set(self.writes.get() + 1);
    }
}
