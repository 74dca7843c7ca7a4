//! Convenience bitwise operations.

use core::ops::BitOr;

/// Checks that every '1' bit is a '1' on the
/// right hand side.
pub trait BitSubset: Copy {
    fn is_subset_of(self, rhs: Self) -> bool;
}

impl<U: Copy + BitOr<Output = Self> + PartialEq> BitSubset for U {
    fn is_subset_of(self, rhs: Self) -> bool { (self | rhs) == rhs }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn checks_bit_subsets() {
        assert!(0xAAu8.is_subset_of(0xFFu8));
        assert!(!0xFFFF_FFFF_u32.is_subset_of(0xAAAA_AAAA_u32));
        assert!(0b0101u8.is_subset_of(0b0111));
        assert!(0xB1u32.is_subset_of(0xB3));
        assert!(!0xB1u32.is_subset_of(0xB0));
    }
}
