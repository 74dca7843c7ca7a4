//! Flash reading interface.
//!
//! The boot decision only ever reads flash (to check the installed
//! application image), so writing and erasing are left to the
//! vendor update transport.
use core::{
    fmt,
    ops::{Add, Sub},
};

/// Absolute address in the MCU's flash address space.
#[derive(Copy, Clone, Debug, Default, Ord, PartialOrd, PartialEq, Eq)]
pub struct Address(pub u32);

impl Add<usize> for Address {
    type Output = Address;
    fn add(self, rhs: usize) -> Self::Output { Address(self.0 + rhs as u32) }
}

impl Sub<usize> for Address {
    type Output = Address;
    fn sub(self, rhs: usize) -> Self::Output { Address(self.0.saturating_sub(rhs as u32)) }
}

impl Sub<Address> for Address {
    type Output = usize;
    fn sub(self, rhs: Address) -> Self::Output { self.0.saturating_sub(rhs.0) as usize }
}

impl From<Address> for usize {
    fn from(address: Address) -> Self { address.0 as usize }
}

/// Reads a range of bytes, generic over an address
pub trait Read {
    type Error: Clone + Copy + fmt::Debug;
    fn read(&mut self, address: Address, bytes: &mut [u8]) -> nb::Result<(), Self::Error>;
    fn readable_range(&self) -> (Address, Address);
}

/// Reads a little endian word at a given address.
pub trait ReadWord: Read {
    fn read_word(&mut self, address: Address) -> nb::Result<u32, Self::Error> {
        let mut bytes = [0u8; 4];
        self.read(address, &mut bytes)?;
        Ok(u32::from_le_bytes(bytes))
    }
}
impl<F: Read> ReadWord for F {}
