//! Unit-aligned slot codec.
//!
//! Each value occupies a whole number of storage units (`u8`, `u16`, `u32`
//! or `u64`), low unit first. A 15-bit value in `u8` units takes two bytes; a
//! 40-bit value in `u16` units takes three shorts. Nothing straddles: value
//! `i` always starts at unit `i * units_per_value`.

use std::fmt::Debug;

use indexed_traits::low_mask;

use crate::{BitsError, Result, WORD_BITS};

/// A primitive storage unit for [`SlotPool`].
pub trait StorageUnit: Copy + Default + Debug + PartialEq + 'static {
    /// Width of the unit in bits.
    const BITS: u32;

    /// Truncate `bits` to the unit width.
    fn from_bits(bits: u64) -> Self;

    fn to_bits(self) -> u64;
}

macro_rules! impl_storage_unit {
    ($($t:ty),*) => {
        $(
            impl StorageUnit for $t {
                const BITS: u32 = <$t>::BITS;

                #[inline(always)]
                fn from_bits(bits: u64) -> Self {
                    bits as $t
                }

                #[inline(always)]
                fn to_bits(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

impl_storage_unit!(u8, u16, u32, u64);

/// Number of `U` units a `bits`-wide value occupies.
#[inline]
pub const fn units_per_value(bits: u32, unit_bits: u32) -> usize {
    bits.div_ceil(unit_bits) as usize
}

/// `len` values of `value_bits` bits, each stored in whole `U` units.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotPool<U: StorageUnit> {
    units: Vec<U>,
    value_bits: u32,
    stride: usize,
    len: u64,
}

impl<U: StorageUnit> SlotPool<U> {
    /// Create a zero-filled pool.
    ///
    /// # Errors
    /// Returns an error if `value_bits` is outside `1..=64` or the pool would
    /// not fit in addressable memory.
    pub fn new(value_bits: u32, len: u64) -> Result<Self> {
        if value_bits == 0 || value_bits > WORD_BITS {
            return Err(BitsError::InvalidWidth {
                bits: value_bits,
                max: WORD_BITS,
            });
        }
        let stride = units_per_value(value_bits, U::BITS);
        let units = usize::try_from(len)
            .ok()
            .and_then(|len| len.checked_mul(stride))
            .ok_or(BitsError::LengthOverflow)?;
        tracing::debug!(value_bits, unit_bits = U::BITS, stride, len, "allocating slot pool");
        Ok(Self {
            units: vec![U::default(); units],
            value_bits,
            stride,
            len,
        })
    }

    #[inline]
    pub fn value_bits(&self) -> u32 {
        self.value_bits
    }

    /// Units per stored value.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: u64) -> Result<u64> {
        let start = self.start(index)?;
        let mut value = 0u64;
        for (k, unit) in self.units[start..start + self.stride].iter().enumerate() {
            value |= unit.to_bits() << (k as u32 * U::BITS);
        }
        Ok(value)
    }

    pub fn set(&mut self, index: u64, value: u64) -> Result<()> {
        let start = self.start(index)?;
        if value > low_mask(self.value_bits) {
            return Err(BitsError::ValueTooWide {
                value,
                bits: self.value_bits,
            });
        }
        for (k, unit) in self.units[start..start + self.stride]
            .iter_mut()
            .enumerate()
        {
            *unit = U::from_bits(value >> (k as u32 * U::BITS));
        }
        Ok(())
    }

    /// The raw storage units.
    #[inline]
    pub fn units(&self) -> &[U] {
        &self.units
    }

    fn start(&self, index: u64) -> Result<usize> {
        if index >= self.len {
            return Err(BitsError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        Ok(index as usize * self.stride)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_per_value() {
        assert_eq!(units_per_value(15, 8), 2);
        assert_eq!(units_per_value(16, 16), 1);
        assert_eq!(units_per_value(40, 16), 3);
        assert_eq!(units_per_value(64, 32), 2);
        assert_eq!(units_per_value(1, 64), 1);
    }

    #[test]
    fn test_byte_slots_little_endian() {
        let mut pool = SlotPool::<u8>::new(15, 3).unwrap();
        assert_eq!(pool.stride(), 2);
        pool.set(1, 0x7abc).unwrap();
        assert_eq!(pool.units(), &[0, 0, 0xbc, 0x7a, 0, 0]);
        assert_eq!(pool.get(1).unwrap(), 0x7abc);
        assert_eq!(pool.get(0).unwrap(), 0);
    }

    #[test]
    fn test_full_width_in_shorts() {
        let mut pool = SlotPool::<u16>::new(64, 2).unwrap();
        pool.set(0, u64::MAX).unwrap();
        pool.set(1, 0x0123_4567_89ab_cdef).unwrap();
        assert_eq!(pool.get(0).unwrap(), u64::MAX);
        assert_eq!(pool.get(1).unwrap(), 0x0123_4567_89ab_cdef);
    }

    #[test]
    fn test_errors() {
        assert!(SlotPool::<u32>::new(0, 1).is_err());
        assert!(SlotPool::<u32>::new(65, 1).is_err());
        let mut pool = SlotPool::<u32>::new(20, 2).unwrap();
        assert_eq!(
            pool.set(0, 1 << 20),
            Err(BitsError::ValueTooWide {
                value: 1 << 20,
                bits: 20
            })
        );
        assert_eq!(
            pool.get(2),
            Err(BitsError::IndexOutOfBounds { index: 2, len: 2 })
        );
    }
}
