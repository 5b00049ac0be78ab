//! Computed, read-only sequences.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use indexed_traits::Element;

use crate::data::{check_index, IndexedData};
use crate::{IndexedError, Result};

/// A sequence whose slot `i` is `f(i)`.
///
/// Effectively unbounded: `size()` is `i64::MAX`. Nothing is stored, so every
/// read re-evaluates `f` and every write is rejected. Combine with
/// [`Trimmed`](crate::Trimmed) or [`Sequenced`](crate::Sequenced) to take a
/// finite window.
///
/// # Example
/// ```
/// use indexed_data::{IndexedData, IndexedDataExt, Procedural};
///
/// let squares = Procedural::new(|i| i * i);
/// assert_eq!(squares.get_value(12).unwrap(), 144);
/// assert_eq!(squares.trimmed(2, 3).unwrap().to_vec().unwrap(), vec![4, 9, 16]);
/// ```
pub struct Procedural<T, F> {
    f: Arc<F>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Element, F: Fn(i64) -> T> Procedural<T, F> {
    pub fn new(f: F) -> Self {
        Self {
            f: Arc::new(f),
            _marker: PhantomData,
        }
    }

    /// Evaluate at any signed index, including negative ones.
    #[inline]
    pub fn get_signed(&self, index: i64, out: &mut T) {
        *out = (self.f)(index);
    }
}

impl<T, F> Clone for Procedural<T, F> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
            _marker: PhantomData,
        }
    }
}

impl<T, F> fmt::Debug for Procedural<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Procedural").finish_non_exhaustive()
    }
}

impl<T: Element, F: Fn(i64) -> T> IndexedData<T> for Procedural<T, F> {
    type Owned = Self;

    #[inline]
    fn size(&self) -> u64 {
        i64::MAX as u64
    }

    #[inline]
    fn get(&self, index: u64, out: &mut T) -> Result<()> {
        check_index(index, self.size())?;
        self.get_signed(index as i64, out);
        Ok(())
    }

    fn set(&mut self, index: u64, _value: &T) -> Result<()> {
        check_index(index, self.size())?;
        Err(IndexedError::WriteRejected("procedural data is read-only"))
    }

    fn duplicate(&self) -> Self::Owned {
        self.clone()
    }

    #[inline]
    fn is_writable(&self) -> bool {
        false
    }
}
