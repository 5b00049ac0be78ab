//! The indexed data contract.
//!
//! Every storage backend and every view implements [`IndexedData`]: a sized,
//! randomly-addressable, duplicatable sequence. Views differ only in how they
//! translate a requested index into zero, one or more backing accesses.
//!
//! Key points:
//! - `get` writes into caller-supplied scratch instead of returning a fresh value
//! - `duplicate` is always deep with respect to observable mutation
//! - `&mut S` is itself `IndexedData`, so views can borrow their backing
//!   instead of owning it; `&S` is too, read-only, so views can share one

use std::marker::PhantomData;

use indexed_traits::Element;

use crate::{IndexedError, Result};

/// A sized, randomly-addressable, duplicatable sequence of `T`.
pub trait IndexedData<T: Element> {
    /// Type produced by [`duplicate`](Self::duplicate).
    type Owned: IndexedData<T>;

    /// Number of slots.
    fn size(&self) -> u64;

    /// Copy slot `index` into `out`.
    ///
    /// # Errors
    /// Returns [`IndexedError::OutOfBounds`] if `index >= size()`.
    fn get(&self, index: u64, out: &mut T) -> Result<()>;

    /// Overwrite slot `index` with `value`.
    ///
    /// # Errors
    /// Returns [`IndexedError::OutOfBounds`] if `index >= size()`, or
    /// [`IndexedError::WriteRejected`] if the sequence refuses the write.
    fn set(&mut self, index: u64, value: &T) -> Result<()>;

    /// An independent sequence with the same logical contents.
    ///
    /// Mutating the duplicate is never observable through `self`, and vice versa.
    fn duplicate(&self) -> Self::Owned;

    #[inline]
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Whether `set` can succeed at all.
    #[inline]
    fn is_writable(&self) -> bool {
        true
    }

    /// Read slot `index` into a fresh value.
    #[inline]
    fn get_value(&self, index: u64) -> Result<T> {
        let mut out = T::default();
        self.get(index, &mut out)?;
        Ok(out)
    }
}

impl<T: Element, S: IndexedData<T> + ?Sized> IndexedData<T> for &mut S {
    type Owned = S::Owned;

    #[inline]
    fn size(&self) -> u64 {
        (**self).size()
    }

    #[inline]
    fn get(&self, index: u64, out: &mut T) -> Result<()> {
        (**self).get(index, out)
    }

    #[inline]
    fn set(&mut self, index: u64, value: &T) -> Result<()> {
        (**self).set(index, value)
    }

    #[inline]
    fn duplicate(&self) -> Self::Owned {
        (**self).duplicate()
    }

    #[inline]
    fn is_writable(&self) -> bool {
        (**self).is_writable()
    }
}

/// A shared borrow reads through and rejects every write, so several read-only
/// views can share one backing.
impl<T: Element, S: IndexedData<T> + ?Sized> IndexedData<T> for &S {
    type Owned = S::Owned;

    #[inline]
    fn size(&self) -> u64 {
        (**self).size()
    }

    #[inline]
    fn get(&self, index: u64, out: &mut T) -> Result<()> {
        (**self).get(index, out)
    }

    fn set(&mut self, index: u64, _value: &T) -> Result<()> {
        check_index(index, self.size())?;
        tracing::trace!(index, "write through a shared borrow rejected");
        Err(IndexedError::WriteRejected("shared borrow is read-only"))
    }

    #[inline]
    fn duplicate(&self) -> Self::Owned {
        (**self).duplicate()
    }

    #[inline]
    fn is_writable(&self) -> bool {
        false
    }
}

/// Fail with `OutOfBounds` unless `index < size`.
#[inline]
pub(crate) fn check_index(index: u64, size: u64) -> Result<()> {
    if index >= size {
        return Err(IndexedError::OutOfBounds {
            index: index as i128,
            size,
        });
    }
    Ok(())
}

// ============================================================================
// Iteration
// ============================================================================

/// Fallible front-to-back iterator over an [`IndexedData`].
///
/// Each item is read into a fresh value; a failed read is yielded as `Err`
/// and iteration continues with the next slot.
#[derive(Debug)]
pub struct Iter<'a, T, S: ?Sized> {
    src: &'a S,
    front: u64,
    back: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: Element, S: IndexedData<T> + ?Sized> Iter<'a, T, S> {
    pub fn new(src: &'a S) -> Self {
        Self {
            src,
            front: 0,
            back: src.size(),
            _marker: PhantomData,
        }
    }
}

impl<T: Element, S: IndexedData<T> + ?Sized> Iterator for Iter<'_, T, S> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.src.get_value(self.front);
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl<T: Element, S: IndexedData<T> + ?Sized> DoubleEndedIterator for Iter<'_, T, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.src.get_value(self.back))
    }
}
