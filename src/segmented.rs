//! Large-sequence storage built from chained fixed-length segments.
//!
//! A single `Vec` is bounded by the native index range and must be allocated
//! up front. `SegmentedData` splits the `u64` index space into
//! power-of-two segments, kept in an ordered map and allocated on first write,
//! so its length can be anything up to `u64::MAX` and memory grows only with
//! the slots actually written. Unwritten slots read as `T::default()`.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use indexed_traits::Element;

use crate::data::{check_index, IndexedData};
use crate::{IndexedError, Result};

/// Default number of elements per segment.
pub const DEFAULT_SEGMENT_LEN: u64 = 1 << 16;

/// Largest accepted number of elements per segment.
pub const MAX_SEGMENT_LEN: u64 = 1 << 32;

/// Sequence of up to `u64::MAX` elements stored in lazily-allocated segments.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedData<T> {
    segments: BTreeMap<u64, Box<[T]>>,
    segment_shift: u32,
    len: u64,
}

impl<T: Element> SegmentedData<T> {
    /// Create a sequence of `len` default values with [`DEFAULT_SEGMENT_LEN`]
    /// elements per segment.
    pub fn new(len: u64) -> Self {
        Self {
            segments: BTreeMap::new(),
            segment_shift: DEFAULT_SEGMENT_LEN.trailing_zeros(),
            len,
        }
    }

    /// Create a sequence with a custom segment length.
    ///
    /// # Errors
    /// Returns [`IndexedError::InvalidConfiguration`] unless `segment_len` is
    /// a power of two no larger than [`MAX_SEGMENT_LEN`] and the native range.
    pub fn with_segment_len(len: u64, segment_len: u64) -> Result<Self> {
        if !segment_len.is_power_of_two()
            || segment_len > MAX_SEGMENT_LEN
            || usize::try_from(segment_len).is_err()
        {
            return Err(IndexedError::InvalidConfiguration(format!(
                "segment length {segment_len} must be a power of two up to {MAX_SEGMENT_LEN} \
                 within the native range"
            )));
        }
        tracing::debug!(len, segment_len, "segmented storage");
        Ok(Self {
            segments: BTreeMap::new(),
            segment_shift: segment_len.trailing_zeros(),
            len,
        })
    }

    /// Elements per segment.
    #[inline]
    pub fn segment_len(&self) -> u64 {
        1 << self.segment_shift
    }

    /// Number of segments currently holding data.
    #[inline]
    pub fn allocated_segments(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    fn locate(&self, index: u64) -> (u64, usize) {
        let segment = index >> self.segment_shift;
        let slot = (index & (self.segment_len() - 1)) as usize;
        (segment, slot)
    }

    // The last segment is cut short at `len`.
    fn segment_capacity(&self, segment: u64) -> usize {
        let start = segment << self.segment_shift;
        (self.len - start).min(self.segment_len()) as usize
    }
}

// Allocation failure surfaces as an error instead of aborting.
fn allocate_segment<T: Element>(capacity: usize) -> Result<Box<[T]>> {
    let mut values = Vec::new();
    values.try_reserve_exact(capacity).map_err(|err| {
        IndexedError::InvalidConfiguration(format!(
            "cannot allocate a segment of {capacity} elements: {err}"
        ))
    })?;
    values.resize(capacity, T::default());
    Ok(values.into_boxed_slice())
}

impl<T: Element> IndexedData<T> for SegmentedData<T> {
    type Owned = SegmentedData<T>;

    #[inline]
    fn size(&self) -> u64 {
        self.len
    }

    fn get(&self, index: u64, out: &mut T) -> Result<()> {
        check_index(index, self.len)?;
        let (segment, slot) = self.locate(index);
        match self.segments.get(&segment) {
            Some(values) => out.clone_from(&values[slot]),
            None => *out = T::default(),
        }
        Ok(())
    }

    fn set(&mut self, index: u64, value: &T) -> Result<()> {
        check_index(index, self.len)?;
        let (segment, slot) = self.locate(index);
        let capacity = self.segment_capacity(segment);
        let values = match self.segments.entry(segment) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(allocate_segment(capacity)?),
        };
        values[slot].clone_from(value);
        Ok(())
    }

    fn duplicate(&self) -> Self::Owned {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_unwritten_slots_read_default() {
        let data = SegmentedData::<i32>::new(1000);
        assert_eq!(data.get_value(999).unwrap(), 0);
        assert_eq!(data.allocated_segments(), 0);
    }

    #[test]
    fn test_lengths_beyond_native_range() {
        let mut data = SegmentedData::<u8>::new(u64::MAX);
        assert_eq!(data.size(), u64::MAX);
        data.set(u64::MAX - 1, &7).unwrap();
        data.set(3, &1).unwrap();
        assert_eq!(data.get_value(u64::MAX - 1).unwrap(), 7);
        assert_eq!(data.get_value(3).unwrap(), 1);
        assert_eq!(data.get_value(1 << 40).unwrap(), 0);
        assert_eq!(data.allocated_segments(), 2);
        assert_eq!(
            data.get_value(u64::MAX).unwrap_err().kind(),
            ErrorKind::OutOfBounds
        );
    }

    #[test]
    fn test_segment_boundaries() {
        let mut data = SegmentedData::<u32>::with_segment_len(10, 4).unwrap();
        for i in 0..10 {
            data.set(i, &(i as u32 * 3)).unwrap();
        }
        assert_eq!(data.allocated_segments(), 3);
        let values: Vec<u32> = (0..10).map(|i| data.get_value(i).unwrap()).collect();
        assert_eq!(values, vec![0, 3, 6, 9, 12, 15, 18, 21, 24, 27]);
    }

    #[test]
    fn test_invalid_segment_len() {
        let err = SegmentedData::<u8>::with_segment_len(10, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
        assert!(SegmentedData::<u8>::with_segment_len(10, 0).is_err());
    }

    #[test]
    fn test_oversized_segment_len_rejected() {
        let err = SegmentedData::<u64>::with_segment_len(1 << 62, 1 << 62).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
        let err = SegmentedData::<u64>::with_segment_len(u64::MAX, MAX_SEGMENT_LEN * 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
        let data = SegmentedData::<u64>::with_segment_len(u64::MAX, MAX_SEGMENT_LEN).unwrap();
        assert_eq!(data.segment_len(), MAX_SEGMENT_LEN);
        assert_eq!(data.allocated_segments(), 0);
    }

    #[test]
    fn test_failed_segment_allocation_is_an_error() {
        let err = allocate_segment::<u64>(usize::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }

    #[test]
    fn test_duplicate_does_not_share_segments() {
        let mut data = SegmentedData::<i64>::with_segment_len(8, 4).unwrap();
        data.set(1, &5).unwrap();
        let mut copy = data.duplicate();
        copy.set(1, &6).unwrap();
        copy.set(6, &9).unwrap();
        assert_eq!(data.get_value(1).unwrap(), 5);
        assert_eq!(data.get_value(6).unwrap(), 0);
        assert_eq!(copy.get_value(1).unwrap(), 6);
    }
}
