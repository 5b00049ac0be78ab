//! Combinator methods for every [`IndexedData`].

use indexed_traits::{Element, Widen};

use crate::concat::Concatenated;
use crate::conditional::Conditional;
use crate::data::{IndexedData, Iter};
use crate::masked::Masked;
use crate::notify::WriteNotifying;
use crate::padded::{Padded, PaddingPolicy};
use crate::read_only::{ReadOnly, ReadOnlyWidening};
use crate::reversed::Reversed;
use crate::sequenced::Sequenced;
use crate::transformed::{FnTransform, Transformed};
use crate::trimmed::Trimmed;
use crate::{IndexedError, Result};

/// Builder-style access to the view types.
///
/// Each method consumes `self`; call [`by_ref`](Self::by_ref) first to build a
/// view over a borrow instead.
pub trait IndexedDataExt<T: Element>: IndexedData<T> + Sized {
    /// See [`Trimmed::new`].
    fn trimmed(self, start: u64, count: u64) -> Result<Trimmed<Self>> {
        Trimmed::new(self, start, count)
    }

    /// See [`Sequenced::new`].
    fn sequenced(self, start: u64, step: i64, count: u64) -> Result<Sequenced<Self>> {
        Sequenced::new(self, start, step, count)
    }

    fn reversed(self) -> Reversed<Self> {
        Reversed::new(self)
    }

    fn concat<B: IndexedData<T>>(self, other: B) -> Result<Concatenated<Self, B>> {
        Concatenated::new(self, other)
    }

    /// See [`Masked::new`].
    fn masked<M: IndexedData<bool> + ?Sized>(self, mask: &M) -> Result<Masked<Self>> {
        Masked::new(self, mask)
    }

    fn conditional<P: Fn(&T) -> bool>(self, predicate: P) -> Result<Conditional<Self, P>> {
        Conditional::new(self, predicate)
    }

    fn transformed<B, F, G>(
        self,
        forward: F,
        backward: G,
    ) -> Transformed<T, B, Self, FnTransform<F, G>>
    where
        B: Element,
        F: Fn(&T) -> B,
        G: Fn(&B) -> T,
    {
        Transformed::new(self, forward, backward)
    }

    fn padded<P: PaddingPolicy<T>>(self, policy: P) -> Padded<Self, P> {
        Padded::with_policy(self, policy)
    }

    fn read_only(self) -> ReadOnly<Self> {
        ReadOnly::new(self)
    }

    fn widened<W: Element>(self) -> ReadOnlyWidening<T, W, Self>
    where
        T: Widen<W>,
    {
        ReadOnlyWidening::new(self)
    }

    fn notifying(self) -> WriteNotifying<Self> {
        WriteNotifying::new(self)
    }

    /// Borrow mutably, so views built from the result write through to `self`.
    #[inline]
    fn by_ref(&mut self) -> &mut Self {
        self
    }

    fn iter(&self) -> Iter<'_, T, Self> {
        Iter::new(self)
    }

    /// Read every slot into a `Vec`.
    ///
    /// # Errors
    /// Returns [`IndexedError::InvalidConfiguration`] if the sequence is too
    /// large to collect, or the first read error.
    fn to_vec(&self) -> Result<Vec<T>> {
        let size = self.size();
        let len = usize::try_from(size).map_err(|_| {
            IndexedError::InvalidConfiguration(format!("{size} elements do not fit in a Vec"))
        })?;
        let mut out = Vec::new();
        out.try_reserve_exact(len).map_err(|err| {
            IndexedError::InvalidConfiguration(format!("cannot collect {size} elements: {err}"))
        })?;
        for item in self.iter() {
            out.push(item?);
        }
        Ok(out)
    }
}

impl<T: Element, S: IndexedData<T>> IndexedDataExt<T> for S {}
