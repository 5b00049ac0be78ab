//! Contiguous window into a backing sequence.

use indexed_traits::Element;

use crate::data::{check_index, IndexedData};
use crate::{IndexedError, Result};

/// `count` consecutive slots of the backing sequence starting at `start`.
///
/// # Example
/// ```
/// use indexed_data::{ArrayData, IndexedDataExt};
///
/// let data = ArrayData::from_fn(10, |i| i as u8);
/// let window = data.trimmed(2, 3).unwrap();
/// assert_eq!(window.to_vec().unwrap(), vec![2, 3, 4]);
/// ```
#[derive(Debug, Clone)]
pub struct Trimmed<S> {
    src: S,
    start: u64,
    count: u64,
}

impl<S> Trimmed<S> {
    /// Create a window over `[start, start + count)`.
    ///
    /// # Errors
    /// Returns [`IndexedError::InvalidConfiguration`] if the window extends
    /// past the end of `src`.
    pub fn new<T: Element>(src: S, start: u64, count: u64) -> Result<Self>
    where
        S: IndexedData<T>,
    {
        let size = src.size();
        match start.checked_add(count) {
            Some(end) if end <= size => {}
            _ => {
                return Err(IndexedError::InvalidConfiguration(format!(
                    "window [{start}, {start} + {count}) exceeds backing size {size}"
                )))
            }
        }
        tracing::debug!(start, count, backing = size, "trimmed view");
        Ok(Self { src, start, count })
    }

    #[inline]
    pub fn start(&self) -> u64 {
        self.start
    }

    /// The backing sequence.
    #[inline]
    pub fn inner(&self) -> &S {
        &self.src
    }

    pub fn into_inner(self) -> S {
        self.src
    }
}

impl<T: Element, S: IndexedData<T>> IndexedData<T> for Trimmed<S> {
    type Owned = Trimmed<S::Owned>;

    #[inline]
    fn size(&self) -> u64 {
        self.count
    }

    #[inline]
    fn get(&self, index: u64, out: &mut T) -> Result<()> {
        check_index(index, self.count)?;
        self.src.get(self.start + index, out)
    }

    #[inline]
    fn set(&mut self, index: u64, value: &T) -> Result<()> {
        check_index(index, self.count)?;
        self.src.set(self.start + index, value)
    }

    fn duplicate(&self) -> Self::Owned {
        Trimmed {
            src: self.src.duplicate(),
            start: self.start,
            count: self.count,
        }
    }

    #[inline]
    fn is_writable(&self) -> bool {
        self.src.is_writable()
    }
}
