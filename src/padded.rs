//! Out-of-bounds read policies.
//!
//! A [`Padded`] view behaves exactly like its backing sequence inside
//! `[0, size)`. Reads outside that range, including negative indices through
//! [`Padded::get_signed`], are answered by a [`PaddingPolicy`] instead of
//! failing. Writes outside the range are rejected.
//!
//! | Policy | `index < 0` | `index >= size` |
//! |---|---|---|
//! | [`ZeroPadding`] | `T::default()` | `T::default()` |
//! | [`ClampPadding`] | slot `0` | slot `size - 1` |
//! | [`ReflectPadding`] | mirrored | mirrored |
//! | [`FnPadding`] | `f(index)` | `f(index)` |

use std::fmt;
use std::sync::Arc;

use indexed_traits::Element;

use crate::data::{check_index, IndexedData};
use crate::{IndexedError, Result};

/// How a policy answers an out-of-bounds read.
#[derive(Debug, Clone, PartialEq)]
pub enum Padding<T> {
    /// Return this value.
    Value(T),
    /// Read this in-bounds backing slot instead.
    Redirect(u64),
}

/// Decides what an out-of-bounds read returns.
pub trait PaddingPolicy<T> {
    /// Answer a read at `index`, which lies outside `[0, size)`.
    ///
    /// # Errors
    /// Returns an error if the policy cannot produce a value for this index.
    fn pad(&self, index: i64, size: u64) -> Result<Padding<T>>;
}

/// Pads with `T::default()`, which is zero for the numeric element types.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroPadding;

impl<T: Element> PaddingPolicy<T> for ZeroPadding {
    #[inline]
    fn pad(&self, _index: i64, _size: u64) -> Result<Padding<T>> {
        Ok(Padding::Value(T::default()))
    }
}

/// Repeats the nearest edge element.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClampPadding;

impl<T> PaddingPolicy<T> for ClampPadding {
    fn pad(&self, index: i64, size: u64) -> Result<Padding<T>> {
        if size == 0 {
            return Err(empty_backing(index));
        }
        Ok(Padding::Redirect(if index < 0 { 0 } else { size - 1 }))
    }
}

/// Mirrors the sequence about its edges: `-1 -> 0`, `-2 -> 1`, `size -> size - 1`.
///
/// The padded sequence is periodic with period `2 * size`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReflectPadding;

impl<T> PaddingPolicy<T> for ReflectPadding {
    fn pad(&self, index: i64, size: u64) -> Result<Padding<T>> {
        if size == 0 {
            return Err(empty_backing(index));
        }
        let size = i128::from(size);
        let folded = i128::from(index).rem_euclid(2 * size);
        let mirrored = if folded < size { folded } else { 2 * size - 1 - folded };
        Ok(Padding::Redirect(mirrored as u64))
    }
}

/// Pads with the result of a function of the (signed) index.
pub struct FnPadding<F> {
    f: Arc<F>,
}

impl<F> FnPadding<F> {
    pub fn new(f: F) -> Self {
        Self { f: Arc::new(f) }
    }
}

impl<F> Clone for FnPadding<F> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<T, F: Fn(i64) -> T> PaddingPolicy<T> for FnPadding<F> {
    #[inline]
    fn pad(&self, index: i64, _size: u64) -> Result<Padding<T>> {
        Ok(Padding::Value((self.f)(index)))
    }
}

fn empty_backing(index: i64) -> IndexedError {
    IndexedError::OutOfBounds {
        index: i128::from(index),
        size: 0,
    }
}

// ============================================================================
// View
// ============================================================================

/// The backing sequence with a policy for reads outside its bounds.
pub struct Padded<S, P> {
    src: S,
    policy: P,
}

impl<S, F> Padded<S, FnPadding<F>> {
    /// Pad with `oob(index)` for every out-of-bounds index.
    pub fn new<T: Element>(src: S, oob: F) -> Self
    where
        S: IndexedData<T>,
        F: Fn(i64) -> T,
    {
        Self::with_policy(src, FnPadding::new(oob))
    }
}

impl<S> Padded<S, ZeroPadding> {
    pub fn zero<T: Element>(src: S) -> Self
    where
        S: IndexedData<T>,
    {
        Self::with_policy(src, ZeroPadding)
    }
}

impl<S> Padded<S, ClampPadding> {
    /// Repeat the edge elements. Reads outside an empty backing still fail.
    pub fn clamp<T: Element>(src: S) -> Self
    where
        S: IndexedData<T>,
    {
        Self::with_policy(src, ClampPadding)
    }
}

impl<S> Padded<S, ReflectPadding> {
    /// Mirror about the edges. Reads outside an empty backing still fail.
    pub fn reflect<T: Element>(src: S) -> Self
    where
        S: IndexedData<T>,
    {
        Self::with_policy(src, ReflectPadding)
    }
}

impl<S, P> Padded<S, P> {
    pub fn with_policy<T: Element>(src: S, policy: P) -> Self
    where
        S: IndexedData<T>,
        P: PaddingPolicy<T>,
    {
        tracing::debug!(backing = src.size(), "padded view");
        Self { src, policy }
    }

    #[inline]
    pub fn inner(&self) -> &S {
        &self.src
    }

    #[inline]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Read at a signed index; anything outside `[0, size)` goes to the policy.
    pub fn get_signed<T: Element>(&self, index: i64, out: &mut T) -> Result<()>
    where
        S: IndexedData<T>,
        P: PaddingPolicy<T>,
    {
        let size = self.src.size();
        if index >= 0 && (index as u64) < size {
            return self.src.get(index as u64, out);
        }
        match self.policy.pad(index, size)? {
            Padding::Value(value) => {
                *out = value;
                Ok(())
            }
            Padding::Redirect(target) => self.src.get(target, out),
        }
    }
}

impl<S: fmt::Debug, P: fmt::Debug> fmt::Debug for Padded<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Padded")
            .field("src", &self.src)
            .field("policy", &self.policy)
            .finish()
    }
}

impl<F> fmt::Debug for FnPadding<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPadding").finish_non_exhaustive()
    }
}

impl<T, S, P> IndexedData<T> for Padded<S, P>
where
    T: Element,
    S: IndexedData<T>,
    P: PaddingPolicy<T> + Clone,
{
    type Owned = Padded<S::Owned, P>;

    #[inline]
    fn size(&self) -> u64 {
        self.src.size()
    }

    /// In-bounds reads forward; indices up to `i64::MAX` go to the policy.
    fn get(&self, index: u64, out: &mut T) -> Result<()> {
        match i64::try_from(index) {
            Ok(signed) => self.get_signed(signed, out),
            Err(_) => check_index(index, self.src.size()),
        }
    }

    fn set(&mut self, index: u64, value: &T) -> Result<()> {
        if index >= self.src.size() {
            tracing::trace!(index, "padded view rejected write beyond bounds");
            return Err(IndexedError::WriteRejected(
                "write beyond the bounds of a padded view",
            ));
        }
        self.src.set(index, value)
    }

    fn duplicate(&self) -> Self::Owned {
        Padded {
            src: self.src.duplicate(),
            policy: self.policy.clone(),
        }
    }

    #[inline]
    fn is_writable(&self) -> bool {
        self.src.is_writable()
    }
}
