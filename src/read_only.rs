//! Write protection, optionally with element promotion.

use std::marker::PhantomData;

use indexed_traits::{Element, Widen};

use crate::data::{check_index, IndexedData};
use crate::{IndexedError, Result};

/// Forwards everything except writes, which always fail.
#[derive(Debug, Clone)]
pub struct ReadOnly<S> {
    src: S,
}

impl<S> ReadOnly<S> {
    pub fn new(src: S) -> Self {
        Self { src }
    }

    #[inline]
    pub fn inner(&self) -> &S {
        &self.src
    }

    pub fn into_inner(self) -> S {
        self.src
    }
}

impl<T: Element, S: IndexedData<T>> IndexedData<T> for ReadOnly<S> {
    type Owned = ReadOnly<S::Owned>;

    #[inline]
    fn size(&self) -> u64 {
        self.src.size()
    }

    #[inline]
    fn get(&self, index: u64, out: &mut T) -> Result<()> {
        self.src.get(index, out)
    }

    fn set(&mut self, index: u64, _value: &T) -> Result<()> {
        check_index(index, self.src.size())?;
        tracing::trace!(index, "read-only view rejected write");
        Err(IndexedError::WriteRejected("read-only view"))
    }

    fn duplicate(&self) -> Self::Owned {
        ReadOnly::new(self.src.duplicate())
    }

    #[inline]
    fn is_writable(&self) -> bool {
        false
    }
}

/// Read-only view promoting each backing `A` to a wider `W` on read.
///
/// # Example
/// ```
/// use indexed_data::{ArrayData, IndexedData, ReadOnlyWidening};
///
/// let narrow = ArrayData::from_vec(vec![1.5f32, -0.25]);
/// let wide: ReadOnlyWidening<f32, f64, _> = ReadOnlyWidening::new(narrow);
/// assert_eq!(wide.get_value(1).unwrap(), -0.25f64);
/// ```
#[derive(Debug)]
pub struct ReadOnlyWidening<A, W, S> {
    src: S,
    _marker: PhantomData<fn(A) -> W>,
}

impl<A, W, S> ReadOnlyWidening<A, W, S>
where
    A: Element + Widen<W>,
    W: Element,
    S: IndexedData<A>,
{
    pub fn new(src: S) -> Self {
        tracing::debug!(backing = src.size(), "widening view");
        Self {
            src,
            _marker: PhantomData,
        }
    }
}

impl<A, W, S> ReadOnlyWidening<A, W, S> {
    #[inline]
    pub fn inner(&self) -> &S {
        &self.src
    }
}

impl<A, W, S: Clone> Clone for ReadOnlyWidening<A, W, S> {
    fn clone(&self) -> Self {
        Self {
            src: self.src.clone(),
            _marker: PhantomData,
        }
    }
}

impl<A, W, S> IndexedData<W> for ReadOnlyWidening<A, W, S>
where
    A: Element + Widen<W>,
    W: Element,
    S: IndexedData<A>,
{
    type Owned = ReadOnlyWidening<A, W, S::Owned>;

    #[inline]
    fn size(&self) -> u64 {
        self.src.size()
    }

    #[inline]
    fn get(&self, index: u64, out: &mut W) -> Result<()> {
        let mut narrow = A::default();
        self.src.get(index, &mut narrow)?;
        *out = narrow.widen();
        Ok(())
    }

    fn set(&mut self, index: u64, _value: &W) -> Result<()> {
        check_index(index, self.src.size())?;
        tracing::trace!(index, "widening view rejected write");
        Err(IndexedError::WriteRejected("widening view is read-only"))
    }

    fn duplicate(&self) -> Self::Owned {
        ReadOnlyWidening {
            src: self.src.duplicate(),
            _marker: PhantomData,
        }
    }

    #[inline]
    fn is_writable(&self) -> bool {
        false
    }
}
