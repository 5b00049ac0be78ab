//! Two sequences joined end to end.

use indexed_traits::Element;

use crate::data::{check_index, IndexedData};
use crate::{IndexedError, Result};

/// `A` followed by `B`.
///
/// Index `i` routes to `A` when `i < size(A)` and to `B` at `i - size(A)`
/// otherwise, for both reads and writes.
#[derive(Debug, Clone)]
pub struct Concatenated<A, B> {
    first: A,
    second: B,
}

impl<A, B> Concatenated<A, B> {
    /// # Errors
    /// Returns [`IndexedError::InvalidConfiguration`] if the combined size
    /// overflows `u64`.
    pub fn new<T: Element>(first: A, second: B) -> Result<Self>
    where
        A: IndexedData<T>,
        B: IndexedData<T>,
    {
        let (a, b) = (first.size(), second.size());
        if a.checked_add(b).is_none() {
            return Err(IndexedError::InvalidConfiguration(format!(
                "concatenated size {a} + {b} overflows u64"
            )));
        }
        tracing::debug!(first = a, second = b, "concatenated view");
        Ok(Self { first, second })
    }

    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<T: Element, A: IndexedData<T>, B: IndexedData<T>> IndexedData<T> for Concatenated<A, B> {
    type Owned = Concatenated<A::Owned, B::Owned>;

    #[inline]
    fn size(&self) -> u64 {
        self.first.size() + self.second.size()
    }

    fn get(&self, index: u64, out: &mut T) -> Result<()> {
        check_index(index, self.size())?;
        let split = self.first.size();
        if index < split {
            self.first.get(index, out)
        } else {
            self.second.get(index - split, out)
        }
    }

    fn set(&mut self, index: u64, value: &T) -> Result<()> {
        check_index(index, self.size())?;
        let split = self.first.size();
        if index < split {
            self.first.set(index, value)
        } else {
            self.second.set(index - split, value)
        }
    }

    fn duplicate(&self) -> Self::Owned {
        Concatenated {
            first: self.first.duplicate(),
            second: self.second.duplicate(),
        }
    }

    #[inline]
    fn is_writable(&self) -> bool {
        self.first.is_writable() || self.second.is_writable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArrayData, ErrorKind, IndexedDataExt, ReadOnly, SegmentedData};

    #[test]
    fn test_routing() {
        let a = ArrayData::from_vec(vec![1, 2]);
        let b = ArrayData::from_vec(vec![3, 4, 5]);
        let view = Concatenated::new(a, b).unwrap();
        assert_eq!(view.size(), 5);
        assert_eq!(view.to_vec().unwrap(), vec![1, 2, 3, 4, 5]);
        assert_eq!(view.get_value(5).unwrap_err().kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn test_write_routing() {
        let mut a = ArrayData::from_vec(vec![1, 2]);
        let mut b = ArrayData::from_vec(vec![3]);
        let mut view = Concatenated::new(&mut a, &mut b).unwrap();
        view.set(1, &20).unwrap();
        view.set(2, &30).unwrap();
        assert_eq!(a.as_slice(), &[1, 20]);
        assert_eq!(b.as_slice(), &[30]);
    }

    #[test]
    fn test_mixed_writability() {
        let a = ReadOnly::new(ArrayData::from_vec(vec![1]));
        let b = ArrayData::from_vec(vec![2]);
        let mut view = Concatenated::new(a, b).unwrap();
        assert_eq!(view.set(0, &9).unwrap_err().kind(), ErrorKind::WriteRejected);
        view.set(1, &9).unwrap();
        assert_eq!(view.to_vec().unwrap(), vec![1, 9]);
    }

    #[test]
    fn test_size_overflow() {
        let a = SegmentedData::<u8>::new(u64::MAX);
        let b = SegmentedData::<u8>::new(1);
        let err = Concatenated::new(a, b).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }
}
