//! Utilities to manipulate generic memory
#![macro_use]

#[macro_export]
macro_rules! kb {
    ($val:expr) => {
        $val * 1024
    };
}

/// Generic address for the purpose of this module's methods.
/// Anything that can be offset by a usize and yield another
/// address works as an address.
pub trait Address: Copy + PartialOrd + core::ops::Add<usize, Output = Self> {}
impl<A> Address for A where A: Copy + PartialOrd + core::ops::Add<usize, Output = A> {}

/// Contiguous span of memory starting at a fixed address.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Span<A: Address> {
    pub start: A,
    pub size: usize,
}

impl<A: Address> Span<A> {
    /// Whether a block of `length` bytes starting at the span's
    /// start fits entirely inside it.
    pub fn fits(&self, length: usize) -> bool { length <= self.size }
}
