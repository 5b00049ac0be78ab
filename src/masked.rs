//! Filtering by a cyclic boolean mask.
//!
//! The mask does not need to match the data length: it is tiled over the data,
//! so slot `i` is kept iff `mask[i % mask.len()]`. A mask of `[true]` keeps
//! everything; `[false, true]` keeps every odd slot.

use indexed_traits::Element;

use crate::data::{check_index, IndexedData};
use crate::{IndexedError, Result};

/// The slots of `data` selected by a cyclically repeated mask.
///
/// Selected backing indices are computed once at construction; `size`, `get`
/// and `set` are then O(1). Writes go to the selected backing slot and never
/// change which slots are selected.
#[derive(Debug, Clone)]
pub struct Masked<S> {
    src: S,
    indices: Vec<u64>,
}

impl<S> Masked<S> {
    /// Apply `mask` cyclically over `src`.
    ///
    /// The mask is only read here; the view does not keep it.
    ///
    /// # Errors
    /// Returns [`IndexedError::InvalidConfiguration`] for an empty mask and
    /// propagates any error raised while reading the mask.
    pub fn new<T: Element, M: IndexedData<bool> + ?Sized>(src: S, mask: &M) -> Result<Self>
    where
        S: IndexedData<T>,
    {
        let period = mask.size();
        if period == 0 {
            return Err(IndexedError::InvalidConfiguration(
                "mask must contain at least one entry".to_string(),
            ));
        }

        // Evaluate one period of the mask, then tile it.
        let mut selected_offsets = Vec::new();
        let mut flag = false;
        for offset in 0..period.min(src.size()) {
            mask.get(offset, &mut flag)?;
            if flag {
                selected_offsets.push(offset);
            }
        }

        let size = src.size();
        let mut indices = Vec::new();
        if !selected_offsets.is_empty() {
            let mut base = 0u64;
            'tiles: while base < size {
                for &offset in &selected_offsets {
                    let index = base + offset;
                    if index >= size {
                        break 'tiles;
                    }
                    indices.push(index);
                }
                base = match base.checked_add(period) {
                    Some(next) => next,
                    None => break,
                };
            }
        }

        tracing::debug!(
            backing = size,
            period,
            selected = indices.len(),
            "masked view"
        );
        Ok(Self { src, indices })
    }

    /// Backing indices selected by the mask, in order.
    #[inline]
    pub fn indices(&self) -> &[u64] {
        &self.indices
    }

    #[inline]
    pub fn inner(&self) -> &S {
        &self.src
    }
}

impl<T: Element, S: IndexedData<T>> IndexedData<T> for Masked<S> {
    type Owned = Masked<S::Owned>;

    #[inline]
    fn size(&self) -> u64 {
        self.indices.len() as u64
    }

    #[inline]
    fn get(&self, index: u64, out: &mut T) -> Result<()> {
        check_index(index, self.size())?;
        self.src.get(self.indices[index as usize], out)
    }

    #[inline]
    fn set(&mut self, index: u64, value: &T) -> Result<()> {
        check_index(index, self.size())?;
        self.src.set(self.indices[index as usize], value)
    }

    fn duplicate(&self) -> Self::Owned {
        Masked {
            src: self.src.duplicate(),
            indices: self.indices.clone(),
        }
    }

    #[inline]
    fn is_writable(&self) -> bool {
        self.src.is_writable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArrayData, ErrorKind, IndexedDataExt, Procedural};

    fn data() -> ArrayData<i32> {
        ArrayData::from_vec(vec![1, 2, 3, 4, 5])
    }

    fn mask(bits: &[bool]) -> ArrayData<bool> {
        ArrayData::from_vec(bits.to_vec())
    }

    #[test]
    fn test_short_mask_tiles() {
        let view = Masked::new(data(), &mask(&[false, true])).unwrap();
        assert_eq!(view.to_vec().unwrap(), vec![2, 4]);
        assert_eq!(view.indices(), &[1, 3]);
    }

    #[test]
    fn test_single_true_keeps_everything() {
        let view = Masked::new(data(), &mask(&[true])).unwrap();
        assert_eq!(view.to_vec().unwrap(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_period_three() {
        let view = Masked::new(data(), &mask(&[true, false, true])).unwrap();
        assert_eq!(view.to_vec().unwrap(), vec![1, 3, 4]);
    }

    #[test]
    fn test_mask_longer_than_data() {
        let view = Masked::new(data(), &mask(&[false, false, true, true, false, true, true])).unwrap();
        assert_eq!(view.to_vec().unwrap(), vec![3, 4]);
    }

    #[test]
    fn test_all_false() {
        let view = Masked::new(data(), &mask(&[false, false])).unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn test_empty_mask_rejected() {
        let err = Masked::new(data(), &mask(&[])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }

    #[test]
    fn test_computed_mask() {
        let every_third = Procedural::new(|i| i % 3 == 0).trimmed(0, 3).unwrap();
        let view = Masked::new(ArrayData::from_fn(10, |i| i), &every_third).unwrap();
        assert_eq!(view.to_vec().unwrap(), vec![0, 3, 6, 9]);
    }

    #[test]
    fn test_set_keeps_selection() {
        let mut backing = data();
        let mut view = Masked::new(&mut backing, &mask(&[false, true])).unwrap();
        view.set(0, &20).unwrap();
        view.set(1, &40).unwrap();
        assert_eq!(view.indices(), &[1, 3]);
        assert_eq!(backing.as_slice(), &[1, 20, 3, 40, 5]);
    }
}
