//! Bit-level codec for one fixed-width value inside a word array.
//!
//! A `width`-bit value stored at bit `offset` of word `k` occupies bits
//! `[offset, offset + first)` of word `k`, where
//! `first = min(width, 64 - offset)`. When `first < width` the value
//! straddles a word boundary and its remaining high bits occupy bits
//! `[0, width - first)` of word `k + 1`:
//!
//! ```text
//!  word k+1                         word k
//! |.......... hi(width-first) |  lo(first) ...... offset ......|
//!  63                        0  63           offset            0
//! ```
//!
//! Word `k`'s bits are the low-order bits of the value; word `k + 1`'s bits are
//! the high-order bits. The codec is unsigned-only.

use indexed_traits::low_mask;

use crate::{BitsError, Result, WORD_BITS};

/// Widest value the bit codec accepts.
pub const MAX_WIDTH: u32 = WORD_BITS - 1;

/// Number of a value's bits that land in the first word.
#[inline(always)]
pub fn first_word_bits(width: u32, offset: u32) -> u32 {
    width.min(WORD_BITS - offset)
}

/// Whether a `width`-bit value at `offset` spills into the next word.
#[inline(always)]
pub fn straddles(width: u32, offset: u32) -> bool {
    first_word_bits(width, offset) < width
}

/// Store `value` (`width` bits) at bit `offset` of `words[word]`.
///
/// All other bits of the touched words are preserved.
///
/// # Errors
/// Returns an error if `width` is outside `1..=63`, `offset >= 64`, `value`
/// needs more than `width` bits, or the value would touch a word past the end
/// of `words`.
pub fn encode(words: &mut [u64], word: usize, offset: u32, width: u32, value: u64) -> Result<()> {
    check_layout(words.len(), word, offset, width)?;
    if value > low_mask(width) {
        return Err(BitsError::ValueTooWide { value, bits: width });
    }
    store(words, word, offset, width, value);
    Ok(())
}

/// Load the `width`-bit value stored at bit `offset` of `words[word]`.
///
/// # Errors
/// Same layout checks as [`encode`].
pub fn decode(words: &[u64], word: usize, offset: u32, width: u32) -> Result<u64> {
    check_layout(words.len(), word, offset, width)?;
    Ok(load(words, word, offset, width))
}

fn check_layout(words_len: usize, word: usize, offset: u32, width: u32) -> Result<()> {
    if width == 0 || width > MAX_WIDTH {
        return Err(BitsError::InvalidWidth {
            bits: width,
            max: MAX_WIDTH,
        });
    }
    if offset >= WORD_BITS {
        return Err(BitsError::InvalidOffset { offset });
    }
    let last = if straddles(width, offset) {
        word.checked_add(1).ok_or(BitsError::LengthOverflow)?
    } else {
        word
    };
    if last >= words_len {
        return Err(BitsError::IndexOutOfBounds {
            index: last as u64,
            len: words_len as u64,
        });
    }
    Ok(())
}

/// Unchecked store. Caller guarantees a valid layout and `value <= low_mask(width)`.
#[inline]
pub(crate) fn store(words: &mut [u64], word: usize, offset: u32, width: u32, value: u64) {
    let first = first_word_bits(width, offset);
    let first_mask = low_mask(first);
    words[word] = (words[word] & !(first_mask << offset)) | ((value & first_mask) << offset);

    if first < width {
        let remaining = width - first;
        let rest_mask = low_mask(remaining);
        words[word + 1] = (words[word + 1] & !rest_mask) | ((value >> first) & rest_mask);
    }
}

/// Unchecked load. Caller guarantees a valid layout.
#[inline]
pub(crate) fn load(words: &[u64], word: usize, offset: u32, width: u32) -> u64 {
    let first = first_word_bits(width, offset);
    let mut value = (words[word] >> offset) & low_mask(first);

    if first < width {
        let remaining = width - first;
        value |= (words[word + 1] & low_mask(remaining)) << first;
    }
    value
}
