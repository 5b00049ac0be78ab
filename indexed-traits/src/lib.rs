//! Shared element contract for the indexed-data ecosystem.
//!
//! This crate provides the trait definitions that are shared across
//! `indexed-bits` (packed codecs) and `indexed-data` (storage backends and
//! views), so that numeric crates can implement them for their own element
//! types without orphan rule violations.
//!
//! - [`Element`]: anything a sequence slot can hold (`Clone + Default`)
//! - [`PackedElement`]: elements made of fixed-width unsigned components,
//!   storable in bit-packed or unit-aligned pools
//! - [`Widen`]: lossless promotion into a higher-precision element type
//! - [`UnsignedInt`] / [`SignedInt`]: integers of arbitrary bit width (1..=64)

pub mod element;
pub mod fixed;
pub mod widen;

pub use element::{Element, PackedElement};
pub use fixed::{SignedInt, UnsignedInt};
pub use widen::Widen;

/// Low `n` bits set. Valid for `n` in `0..=64`.
#[inline(always)]
pub const fn low_mask(n: u32) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_mask_edges() {
        assert_eq!(low_mask(0), 0);
        assert_eq!(low_mask(1), 1);
        assert_eq!(low_mask(15), 0x7fff);
        assert_eq!(low_mask(63), u64::MAX >> 1);
        assert_eq!(low_mask(64), u64::MAX);
    }
}
