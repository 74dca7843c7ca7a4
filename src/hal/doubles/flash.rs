use super::error::FakeError;
use crate::hal::flash::{self, Address};
use std::{cmp::max, vec::Vec};

/// Flash double. Bytes never written read back as erased (`0xFF`).
pub struct FakeFlash {
    base: Address,
    length: usize,
    data: Vec<u8>,
    reads: usize,
}

impl FakeFlash {
    pub fn new(base: Address) -> FakeFlash {
        FakeFlash { base, data: Vec::new(), length: kb!(256), reads: 0 }
    }

    /// Programs bytes directly, bypassing any flash discipline.
    pub fn program(&mut self, address: Address, bytes: &[u8]) {
        let offset = address - self.base;
        self.data.resize(max(self.data.len(), offset + bytes.len()), 0xFF);
        self.data.iter_mut().skip(offset).zip(bytes).for_each(|(o, i)| *o = *i);
    }

    /// Number of read operations performed so far.
    pub fn reads(&self) -> usize { self.reads }
}

impl flash::Read for FakeFlash {
    type Error = FakeError;

    fn read(&mut self, address: Address, bytes: &mut [u8]) -> nb::Result<(), Self::Error> {
        let (start, end) = self.readable_range();
        if address < start || address + bytes.len() > end {
            return Err(nb::Error::Other(FakeError));
        }
        self.reads += 1;
        let offset = address - self.base;
        bytes.iter_mut().enumerate().for_each(|(index, byte)| {
            *byte = self.data.get(offset + index).copied().unwrap_or(0xFF);
        });
        Ok(())
    }

    fn readable_range(&self) -> (Address, Address) { (self.base, self.base + self.length) }
}
