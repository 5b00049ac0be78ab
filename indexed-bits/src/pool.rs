//! Packed pool of fixed-width unsigned integers.

use indexed_traits::low_mask;

use crate::codec::{self, MAX_WIDTH};
use crate::{BitsError, Result, WORD_BITS};

/// `len` unsigned integers of `element_bits` bits each, packed edge-to-edge
/// into `u64` words.
///
/// Element `i` starts at absolute bit `i * element_bits`; see
/// [`word_index`](Self::word_index) and [`bit_offset`](Self::bit_offset).
/// Unused high bits of the last word are always zero.
///
/// # Example
/// ```
/// use indexed_bits::BitPool;
///
/// let mut pool = BitPool::new(15, 10).unwrap();
/// pool.set(4, 0x7fff).unwrap();
/// assert_eq!(pool.get(4).unwrap(), 0x7fff);
/// // Element 4 covers bits 60..75: it straddles words 0 and 1.
/// assert_eq!(pool.word_index(4), 0);
/// assert_eq!(pool.bit_offset(4), 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitPool {
    words: Vec<u64>,
    element_bits: u32,
    len: u64,
}

impl BitPool {
    /// Create a zero-filled pool.
    ///
    /// # Errors
    /// Returns an error if `element_bits` is outside `1..=63` or the pool
    /// would not fit in addressable memory.
    pub fn new(element_bits: u32, len: u64) -> Result<Self> {
        let words = Self::words_for(element_bits, len)?;
        tracing::debug!(element_bits, len, words, "allocating bit pool");
        Ok(Self {
            words: vec![0; words],
            element_bits,
            len,
        })
    }

    /// Rebuild a pool from its persisted layout.
    ///
    /// # Errors
    /// Returns an error if the width is invalid or `words.len()` is not exactly
    /// the number of words `len` elements need.
    pub fn from_words(words: Vec<u64>, element_bits: u32, len: u64) -> Result<Self> {
        let expected = Self::words_for(element_bits, len)?;
        if words.len() != expected {
            return Err(BitsError::WordCountMismatch {
                expected,
                found: words.len(),
            });
        }
        let mut pool = Self {
            words,
            element_bits,
            len,
        };
        pool.clear_tail();
        Ok(pool)
    }

    /// Number of words needed for `len` elements of `element_bits` bits.
    pub fn words_for(element_bits: u32, len: u64) -> Result<usize> {
        if element_bits == 0 || element_bits > MAX_WIDTH {
            return Err(BitsError::InvalidWidth {
                bits: element_bits,
                max: MAX_WIDTH,
            });
        }
        let bits = len
            .checked_mul(element_bits as u64)
            .ok_or(BitsError::LengthOverflow)?;
        usize::try_from(bits.div_ceil(WORD_BITS as u64)).map_err(|_| BitsError::LengthOverflow)
    }

    /// Width of each element in bits.
    #[inline]
    pub fn element_bits(&self) -> u32 {
        self.element_bits
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // Widened so any `u64` index is safe to map, in range or not.
    #[inline]
    fn bit_position(&self, index: u64) -> u128 {
        u128::from(index) * u128::from(self.element_bits)
    }

    /// Word holding the low bits of element `index`.
    ///
    /// Exact for `index < len()`; saturates at `usize::MAX` for indices whose
    /// word would not be addressable.
    #[inline]
    pub fn word_index(&self, index: u64) -> usize {
        usize::try_from(self.bit_position(index) / u128::from(WORD_BITS)).unwrap_or(usize::MAX)
    }

    /// Bit offset of element `index` inside its first word.
    #[inline]
    pub fn bit_offset(&self, index: u64) -> u32 {
        (self.bit_position(index) % u128::from(WORD_BITS)) as u32
    }

    /// Read element `index`.
    pub fn get(&self, index: u64) -> Result<u64> {
        self.check_index(index)?;
        Ok(codec::load(
            &self.words,
            self.word_index(index),
            self.bit_offset(index),
            self.element_bits,
        ))
    }

    /// Write element `index`.
    ///
    /// # Errors
    /// Returns an error if `index >= len` or `value` needs more than
    /// `element_bits` bits.
    pub fn set(&mut self, index: u64, value: u64) -> Result<()> {
        self.check_index(index)?;
        if value > low_mask(self.element_bits) {
            return Err(BitsError::ValueTooWide {
                value,
                bits: self.element_bits,
            });
        }
        let word = self.word_index(index);
        let offset = self.bit_offset(index);
        codec::store(&mut self.words, word, offset, self.element_bits, value);
        Ok(())
    }

    /// Iterate over all elements in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = u64> + '_ {
        (0..self.len as usize).map(move |i| {
            let i = i as u64;
            codec::load(
                &self.words,
                self.word_index(i),
                self.bit_offset(i),
                self.element_bits,
            )
        })
    }

    /// The packed words.
    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Consume the pool, returning its packed words.
    #[inline]
    pub fn into_words(self) -> Vec<u64> {
        self.words
    }

    #[inline]
    fn check_index(&self, index: u64) -> Result<()> {
        if index >= self.len {
            return Err(BitsError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    // Bits past the last element carry no data; keep them zero so equality
    // compares logical contents.
    fn clear_tail(&mut self) {
        let used = (self.len * self.element_bits as u64 % WORD_BITS as u64) as u32;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= low_mask(used);
            }
        }
    }
}
