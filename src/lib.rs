//! Randomly-addressable element sequences with composable zero-copy views.
//!
//! This crate is the storage layer underneath numeric algebra types: vectors,
//! matrices and tensors read and write their elements only through the
//! [`IndexedData`] contract (`size`, `get`, `set`, `duplicate`), so one
//! algorithm works unchanged over contiguous memory, packed bit pools, or any
//! composition of views.
//!
//! # Storage backends
//!
//! - [`ArrayData`]: contiguous `Vec`-backed storage
//! - [`SegmentedData`]: chained, lazily-allocated segments with a full `u64` length
//! - [`BitPackedData`]: element components packed edge-to-edge in `u64` words
//! - [`SlotData`]: element components in whole `u8`/`u16`/`u32`/`u64` units
//!
//! # Views
//!
//! Views never copy backing data on construction (except the index maps of
//! [`Masked`] and [`Conditional`]). They own their backing sequence, which may
//! itself be a `&mut` borrow of another sequence:
//!
//! - [`Trimmed`], [`Sequenced`], [`Reversed`], [`Concatenated`]: index remapping
//! - [`Masked`], [`Conditional`]: filtering by a cyclic boolean mask or a predicate
//! - [`Transformed`]: bidirectional element conversion
//! - [`Procedural`]: computed, effectively unbounded, read-only
//! - [`Padded`]: out-of-bounds read policy
//! - [`ReadOnly`], [`ReadOnlyWidening`]: write protection, optional promotion
//! - [`WriteNotifying`]: synchronous write listeners
//!
//! # Example
//!
//! ```rust
//! use indexed_data::{ArrayData, IndexedData, IndexedDataExt};
//!
//! let mut data = ArrayData::from_fn(16, |i| i as i32);
//!
//! // Every other element from 3, five times, walked backwards.
//! let view = data.by_ref().sequenced(3, 2, 5).unwrap().reversed();
//! assert_eq!(view.to_vec().unwrap(), vec![11, 9, 7, 5, 3]);
//!
//! // Writes through a borrowed view land in the backing array.
//! let mut window = data.by_ref().trimmed(4, 2).unwrap();
//! window.set(0, &-1).unwrap();
//! assert_eq!(data.get_value(4).unwrap(), -1);
//! ```

mod array;
mod concat;
mod conditional;
mod data;
mod ext;
mod masked;
mod notify;
mod packed;
mod padded;
mod procedural;
mod read_only;
mod reversed;
mod segmented;
mod sequenced;
mod transformed;
mod trimmed;

// ============================================================================
// Contract
// ============================================================================
pub use data::{IndexedData, Iter};
pub use ext::IndexedDataExt;

// ============================================================================
// Storage backends
// ============================================================================
pub use array::ArrayData;
pub use packed::{BitPackedData, SlotData};
pub use segmented::{SegmentedData, DEFAULT_SEGMENT_LEN, MAX_SEGMENT_LEN};

// ============================================================================
// Views
// ============================================================================
pub use concat::Concatenated;
pub use conditional::Conditional;
pub use masked::Masked;
pub use notify::{ListenerId, WriteNotifying};
pub use padded::{ClampPadding, FnPadding, Padded, Padding, PaddingPolicy, ReflectPadding, ZeroPadding};
pub use procedural::Procedural;
pub use read_only::{ReadOnly, ReadOnlyWidening};
pub use reversed::Reversed;
pub use sequenced::Sequenced;
pub use transformed::{Conjugate, FnTransform, ReadTransform, Transform, Transformed};
pub use trimmed::Trimmed;

// ============================================================================
// Re-exports
// ============================================================================
pub use indexed_bits::{BitPool, BitsError, SlotPool, StorageUnit};
pub use indexed_traits::{Element, PackedElement, SignedInt, UnsignedInt, Widen};

// ============================================================================
// Error types
// ============================================================================

/// The three ways an indexed data operation can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Index outside `[0, size())`.
    OutOfBounds,
    /// The sequence refused a write.
    WriteRejected,
    /// A view or backend was constructed with invalid parameters.
    InvalidConfiguration,
}

/// Errors that can occur when building or accessing indexed data.
#[derive(Debug, thiserror::Error)]
pub enum IndexedError {
    /// Index outside `[0, size)`. Signed so padded reads can report negative indices.
    #[error("index {index} out of bounds for size {size}")]
    OutOfBounds { index: i128, size: u64 },

    /// Write refused by a read-only, computed or predicate-guarded sequence.
    #[error("write rejected: {0}")]
    WriteRejected(&'static str),

    /// Construction-time validation failure.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Failure inside a packed codec.
    #[error(transparent)]
    Bits(#[from] BitsError),
}

impl IndexedError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IndexedError::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            IndexedError::WriteRejected(_) => ErrorKind::WriteRejected,
            IndexedError::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            IndexedError::Bits(err) => match err {
                BitsError::IndexOutOfBounds { .. } => ErrorKind::OutOfBounds,
                BitsError::ValueTooWide { .. } => ErrorKind::WriteRejected,
                BitsError::InvalidWidth { .. }
                | BitsError::InvalidOffset { .. }
                | BitsError::WordCountMismatch { .. }
                | BitsError::LengthOverflow => ErrorKind::InvalidConfiguration,
            },
        }
    }
}

/// Result type for indexed data operations.
pub type Result<T> = std::result::Result<T, IndexedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_of_codec_errors() {
        let err: IndexedError = BitsError::ValueTooWide { value: 9, bits: 3 }.into();
        assert_eq!(err.kind(), ErrorKind::WriteRejected);
        let err: IndexedError = BitsError::InvalidWidth { bits: 0, max: 63 }.into();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
        let err: IndexedError = BitsError::IndexOutOfBounds { index: 3, len: 3 }.into();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn test_error_messages() {
        let err = IndexedError::OutOfBounds { index: -1, size: 4 };
        assert_eq!(err.to_string(), "index -1 out of bounds for size 4");
        let err = IndexedError::WriteRejected("read-only view");
        assert_eq!(err.to_string(), "write rejected: read-only view");
    }
}
