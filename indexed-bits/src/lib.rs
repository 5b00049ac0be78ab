//! Fixed-width integer codecs over machine-word pools.
//!
//! This crate is the single place where integers whose natural width is not
//! a multiple of 8 are laid out in memory. It sits between `indexed-traits`
//! (element contract) and `indexed-data` (storage backends and views).
//!
//! # Dependency graph
//!
//! ```text
//! indexed-traits -> indexed-bits -> indexed-data
//! ```
//!
//! # Codecs
//!
//! - [`codec`]: store a `W`-bit value (`W < 64`) at bit offset `O` of word `k`,
//!   spilling into word `k + 1` when `O + W > 64`
//! - [`BitPool`]: `len` values of `element_bits` bits packed edge-to-edge
//! - [`SlotPool`]: values occupying a whole number of `u8`/`u16`/`u32`/`u64`
//!   storage units
//!
//! # Persisted layout
//!
//! A `BitPool` is fully described by its `u64` words plus
//! `(element_bits, len)`; [`BitPool::from_words`] rebuilds it from exactly that.

pub mod codec;
pub mod pool;
pub mod slot;

pub use codec::{decode, encode, first_word_bits};
pub use pool::BitPool;
pub use slot::{SlotPool, StorageUnit};

/// Number of bits in one pool word.
pub const WORD_BITS: u32 = u64::BITS;

/// Errors raised by the packed codecs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BitsError {
    /// Element width outside the range the codec supports.
    #[error("unsupported element width {bits} (expected 1..={max})")]
    InvalidWidth { bits: u32, max: u32 },

    /// Bit offset inside a word must be below 64.
    #[error("bit offset {offset} out of range for a 64-bit word")]
    InvalidOffset { offset: u32 },

    /// Element or word index past the end of the pool.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: u64, len: u64 },

    /// Value needs more bits than the element width provides.
    #[error("value {value:#x} does not fit in {bits} bits")]
    ValueTooWide { value: u64, bits: u32 },

    /// Word buffer does not match `(element_bits, len)`.
    #[error("word count mismatch: expected {expected}, found {found}")]
    WordCountMismatch { expected: usize, found: usize },

    /// Total bit count does not fit in addressable memory.
    #[error("packed length overflows addressable memory")]
    LengthOverflow,
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, BitsError>;
