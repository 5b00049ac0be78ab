//! Contiguous in-memory storage.

use indexed_traits::Element;

use crate::data::{check_index, IndexedData};
use crate::{IndexedError, Result};

/// Owned, contiguous, `Vec`-backed sequence.
///
/// Length is bounded by the native `usize` range; use
/// [`SegmentedData`](crate::SegmentedData) for lengths beyond it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ArrayData<T> {
    data: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for ArrayData<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T: Element> ArrayData<T> {
    /// Create an array of `len` default values.
    ///
    /// # Errors
    /// Returns [`IndexedError::InvalidConfiguration`] if `len` exceeds the
    /// native index range or cannot be allocated.
    pub fn new(len: u64) -> Result<Self> {
        let len = usize::try_from(len).map_err(|_| {
            IndexedError::InvalidConfiguration(format!(
                "array length {len} exceeds the native limit {}",
                usize::MAX
            ))
        })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|err| {
            IndexedError::InvalidConfiguration(format!("cannot allocate {len} elements: {err}"))
        })?;
        data.resize(len, T::default());
        Ok(Self { data })
    }

    /// Create an array with values produced by a function of the index.
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> T) -> Self {
        Self {
            data: (0..len).map(f).collect(),
        }
    }
}

impl<T> ArrayData<T> {
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T> From<Vec<T>> for ArrayData<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> FromIterator<T> for ArrayData<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<T: Element> IndexedData<T> for ArrayData<T> {
    type Owned = ArrayData<T>;

    #[inline]
    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    #[inline]
    fn get(&self, index: u64, out: &mut T) -> Result<()> {
        check_index(index, self.size())?;
        out.clone_from(&self.data[index as usize]);
        Ok(())
    }

    #[inline]
    fn set(&mut self, index: u64, value: &T) -> Result<()> {
        check_index(index, self.size())?;
        self.data[index as usize].clone_from(value);
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
    fn test_new_is_default_filled() {
        let data = ArrayData::<f64>::new(3).unwrap();
        assert_eq!(data.as_slice(), &[0.0, 0.0, 0.0]);
        assert_eq!(data.size(), 3);
    }

    #[test]
    fn test_get_set() {
        let mut data = ArrayData::from_fn(4, |i| i as i64 * 10);
        let mut out = 0;
        data.get(2, &mut out).unwrap();
        assert_eq!(out, 20);
        data.set(2, &-5).unwrap();
        assert_eq!(data.get_value(2).unwrap(), -5);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut data: ArrayData<u8> = vec![1, 2].into();
        let mut out = 0;
        let err = data.get(2, &mut out).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        let err = data.set(u64::MAX, &0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn test_duplicate_is_independent() {
        let mut data: ArrayData<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        let mut copy = data.duplicate();
        copy.set(0, &"changed".to_string()).unwrap();
        data.set(1, &"also".to_string()).unwrap();
        assert_eq!(data.as_slice(), &["a".to_string(), "also".to_string()]);
        assert_eq!(copy.as_slice(), &["changed".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_native_limit() {
        let err = ArrayData::<u8>::new(u64::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }
}
