//! Integers of arbitrary bit width.
//!
//! Element types such as a 15-bit signed integer have no primitive
//! counterpart. [`UnsignedInt<BITS>`] and [`SignedInt<BITS>`] hold the value
//! in a 64-bit primitive and advertise a `BITS`-wide single component, so
//! bit-packed storage stores exactly `BITS` bits per element.
//!
//! Sign handling lives here: `SignedInt` hands the codec its low `BITS` bits
//! and sign-extends them again on the way back.

use std::fmt;

use num_traits::Bounded;

use crate::element::PackedElement;
use crate::low_mask;

/// Unsigned integer restricted to `BITS` bits (`1..=64`).
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnsignedInt<const BITS: u32>(u64);

/// Two's-complement signed integer restricted to `BITS` bits (`1..=64`).
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignedInt<const BITS: u32>(i64);

impl<const BITS: u32> UnsignedInt<BITS> {
    const VALID_WIDTH: () = assert!(BITS >= 1 && BITS <= 64, "width must be in 1..=64");

    /// Largest representable value.
    pub const MAX: u64 = low_mask(BITS);

    /// Returns `None` if `value` needs more than `BITS` bits.
    #[inline]
    pub fn new(value: u64) -> Option<Self> {
        let () = Self::VALID_WIDTH;
        (value <= Self::MAX).then_some(Self(value))
    }

    /// Keep only the low `BITS` bits of `value`.
    #[inline]
    pub fn wrapping_new(value: u64) -> Self {
        let () = Self::VALID_WIDTH;
        Self(value & Self::MAX)
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl<const BITS: u32> SignedInt<BITS> {
    const VALID_WIDTH: () = assert!(BITS >= 1 && BITS <= 64, "width must be in 1..=64");

    /// Smallest representable value.
    pub const MIN: i64 = if BITS == 64 { i64::MIN } else { -(1i64 << (BITS - 1)) };

    /// Largest representable value.
    pub const MAX: i64 = if BITS == 64 { i64::MAX } else { (1i64 << (BITS - 1)) - 1 };

    /// Returns `None` if `value` is outside `MIN..=MAX`.
    #[inline]
    pub fn new(value: i64) -> Option<Self> {
        let () = Self::VALID_WIDTH;
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Reinterpret the low `BITS` bits of `bits` as a two's-complement value.
    #[inline]
    pub fn from_bits(bits: u64) -> Self {
        let () = Self::VALID_WIDTH;
        let shift = 64 - BITS;
        Self(((bits << shift) as i64) >> shift)
    }

    /// The low `BITS` bits of the two's-complement representation.
    #[inline]
    pub fn to_bits(self) -> u64 {
        self.0 as u64 & low_mask(BITS)
    }

    #[inline]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl<const BITS: u32> PackedElement for UnsignedInt<BITS> {
    const COMPONENTS: usize = 1;
    const COMPONENT_BITS: u32 = BITS;

    #[inline(always)]
    fn component(&self, _k: usize) -> u64 {
        self.0
    }

    #[inline(always)]
    fn set_component(&mut self, _k: usize, bits: u64) {
        *self = Self::wrapping_new(bits);
    }
}

impl<const BITS: u32> PackedElement for SignedInt<BITS> {
    const COMPONENTS: usize = 1;
    const COMPONENT_BITS: u32 = BITS;

    #[inline(always)]
    fn component(&self, _k: usize) -> u64 {
        self.to_bits()
    }

    #[inline(always)]
    fn set_component(&mut self, _k: usize, bits: u64) {
        *self = Self::from_bits(bits);
    }
}

impl<const BITS: u32> Bounded for UnsignedInt<BITS> {
    fn min_value() -> Self {
        Self(0)
    }

    fn max_value() -> Self {
        Self(Self::MAX)
    }
}

impl<const BITS: u32> Bounded for SignedInt<BITS> {
    fn min_value() -> Self {
        Self(Self::MIN)
    }

    fn max_value() -> Self {
        Self(Self::MAX)
    }
}

impl<const BITS: u32> From<UnsignedInt<BITS>> for u64 {
    fn from(value: UnsignedInt<BITS>) -> Self {
        value.0
    }
}

impl<const BITS: u32> From<SignedInt<BITS>> for i64 {
    fn from(value: SignedInt<BITS>) -> Self {
        value.0
    }
}

impl<const BITS: u32> From<SignedInt<BITS>> for f64 {
    fn from(value: SignedInt<BITS>) -> Self {
        value.0 as f64
    }
}

impl<const BITS: u32> fmt::Debug for UnsignedInt<BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}({})", BITS, self.0)
    }
}

impl<const BITS: u32> fmt::Debug for SignedInt<BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i{}({})", BITS, self.0)
    }
}

impl<const BITS: u32> fmt::Display for UnsignedInt<BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<const BITS: u32> fmt::Display for SignedInt<BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
