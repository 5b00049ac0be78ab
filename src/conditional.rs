//! Filtering by an element predicate.

use std::fmt;
use std::sync::Arc;

use indexed_traits::Element;

use crate::data::{check_index, IndexedData};
use crate::{IndexedError, Result};

/// The slots of the backing sequence whose value satisfies a predicate.
///
/// The predicate is evaluated once per element at construction. The resulting
/// index map is fixed: a write that changes which elements would match does not
/// add or remove slots. Writes of values that fail the predicate are rejected,
/// so every visible slot keeps satisfying it.
pub struct Conditional<S, P> {
    src: S,
    indices: Vec<u64>,
    predicate: Arc<P>,
}

impl<S, P> Conditional<S, P> {
    /// Scan `src` and keep the slots matching `predicate`.
    ///
    /// # Errors
    /// Propagates any error raised while reading `src`.
    pub fn new<T: Element>(src: S, predicate: P) -> Result<Self>
    where
        S: IndexedData<T>,
        P: Fn(&T) -> bool,
    {
        let size = src.size();
        let mut indices = Vec::new();
        let mut scratch = T::default();
        for index in 0..size {
            src.get(index, &mut scratch)?;
            if predicate(&scratch) {
                indices.push(index);
            }
        }
        tracing::debug!(backing = size, matched = indices.len(), "conditional view");
        Ok(Self {
            src,
            indices,
            predicate: Arc::new(predicate),
        })
    }

    /// Backing indices that matched at construction, in order.
    #[inline]
    pub fn indices(&self) -> &[u64] {
        &self.indices
    }

    #[inline]
    pub fn inner(&self) -> &S {
        &self.src
    }
}

impl<S: fmt::Debug, P> fmt::Debug for Conditional<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conditional")
            .field("src", &self.src)
            .field("indices", &self.indices)
            .finish_non_exhaustive()
    }
}

impl<S: Clone, P> Clone for Conditional<S, P> {
    fn clone(&self) -> Self {
        Self {
            src: self.src.clone(),
            indices: self.indices.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T, S, P> IndexedData<T> for Conditional<S, P>
where
    T: Element,
    S: IndexedData<T>,
    P: Fn(&T) -> bool,
{
    type Owned = Conditional<S::Owned, P>;

    #[inline]
    fn size(&self) -> u64 {
        self.indices.len() as u64
    }

    #[inline]
    fn get(&self, index: u64, out: &mut T) -> Result<()> {
        check_index(index, self.size())?;
        self.src.get(self.indices[index as usize], out)
    }

    fn set(&mut self, index: u64, value: &T) -> Result<()> {
        check_index(index, self.size())?;
        if !(self.predicate)(value) {
            tracing::trace!(index, "conditional view rejected write");
            return Err(IndexedError::WriteRejected(
                "value does not satisfy the view predicate",
            ));
        }
        self.src.set(self.indices[index as usize], value)
    }

    fn duplicate(&self) -> Self::Owned {
        Conditional {
            src: self.src.duplicate(),
            indices: self.indices.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }

    #[inline]
    fn is_writable(&self) -> bool {
        self.src.is_writable()
    }
}
