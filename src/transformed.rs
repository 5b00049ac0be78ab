//! Bidirectional element conversion over a backing sequence.
//!
//! A [`Transformed`] view stores elements of type `A` and exposes them as `B`.
//! Reads apply [`Transform::forward`] to a stack-local `A`; writes apply
//! [`Transform::backward`] and store the result. The two directions need not be
//! exact inverses (a lossy `f64 -> u8` backward is fine).

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use num_complex::Complex;
use num_traits::Num;

use indexed_traits::Element;

use crate::data::{check_index, IndexedData};
use crate::{IndexedError, Result};

/// A conversion between a stored element type `A` and a visible type `B`.
pub trait Transform<A, B> {
    fn forward(&self, value: &A) -> B;

    /// Convert back for storage, or `None` if this direction is not supported.
    fn backward(&self, value: &B) -> Option<A>;

    /// Whether [`backward`](Self::backward) can ever return `Some`.
    #[inline]
    fn is_invertible(&self) -> bool {
        true
    }
}

/// Transform built from a pair of closures.
pub struct FnTransform<F, G> {
    forward: Arc<F>,
    backward: Arc<G>,
}

impl<F, G> FnTransform<F, G> {
    pub fn new(forward: F, backward: G) -> Self {
        Self {
            forward: Arc::new(forward),
            backward: Arc::new(backward),
        }
    }
}

impl<F, G> Clone for FnTransform<F, G> {
    fn clone(&self) -> Self {
        Self {
            forward: Arc::clone(&self.forward),
            backward: Arc::clone(&self.backward),
        }
    }
}

impl<A, B, F, G> Transform<A, B> for FnTransform<F, G>
where
    F: Fn(&A) -> B,
    G: Fn(&B) -> A,
{
    #[inline]
    fn forward(&self, value: &A) -> B {
        (self.forward)(value)
    }

    #[inline]
    fn backward(&self, value: &B) -> Option<A> {
        Some((self.backward)(value))
    }
}

/// Forward-only transform: the resulting view rejects every write.
pub struct ReadTransform<F> {
    forward: Arc<F>,
}

impl<F> ReadTransform<F> {
    pub fn new(forward: F) -> Self {
        Self {
            forward: Arc::new(forward),
        }
    }
}

impl<F> Clone for ReadTransform<F> {
    fn clone(&self) -> Self {
        Self {
            forward: Arc::clone(&self.forward),
        }
    }
}

impl<A, B, F: Fn(&A) -> B> Transform<A, B> for ReadTransform<F> {
    #[inline]
    fn forward(&self, value: &A) -> B {
        (self.forward)(value)
    }

    #[inline]
    fn backward(&self, _value: &B) -> Option<A> {
        None
    }

    #[inline]
    fn is_invertible(&self) -> bool {
        false
    }
}

/// Complex conjugation, its own inverse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Conjugate;

impl<T: Clone + Num + std::ops::Neg<Output = T>> Transform<Complex<T>, Complex<T>> for Conjugate {
    #[inline]
    fn forward(&self, value: &Complex<T>) -> Complex<T> {
        value.conj()
    }

    #[inline]
    fn backward(&self, value: &Complex<T>) -> Option<Complex<T>> {
        Some(value.conj())
    }
}

/// Backing elements of type `A` seen as `B` through a [`Transform`].
pub struct Transformed<A, B, S, X> {
    src: S,
    transform: X,
    _marker: PhantomData<fn(A) -> B>,
}

impl<A, B, S, F, G> Transformed<A, B, S, FnTransform<F, G>>
where
    A: Element,
    B: Element,
    S: IndexedData<A>,
    F: Fn(&A) -> B,
    G: Fn(&B) -> A,
{
    /// View `src` through a `forward` / `backward` closure pair.
    pub fn new(src: S, forward: F, backward: G) -> Self {
        Self::with_transform(src, FnTransform::new(forward, backward))
    }
}

impl<A, B, S, F> Transformed<A, B, S, ReadTransform<F>>
where
    A: Element,
    B: Element,
    S: IndexedData<A>,
    F: Fn(&A) -> B,
{
    /// View `src` through a read-only conversion.
    pub fn forward_only(src: S, forward: F) -> Self {
        Self::with_transform(src, ReadTransform::new(forward))
    }
}

impl<A, B, S, X> Transformed<A, B, S, X>
where
    A: Element,
    B: Element,
    S: IndexedData<A>,
    X: Transform<A, B>,
{
    pub fn with_transform(src: S, transform: X) -> Self {
        tracing::debug!(
            backing = src.size(),
            invertible = transform.is_invertible(),
            "transformed view"
        );
        Self {
            src,
            transform,
            _marker: PhantomData,
        }
    }
}

impl<A, B, S, X> Transformed<A, B, S, X> {
    #[inline]
    pub fn inner(&self) -> &S {
        &self.src
    }

    #[inline]
    pub fn transform(&self) -> &X {
        &self.transform
    }
}

impl<A, B, S: fmt::Debug, X> fmt::Debug for Transformed<A, B, S, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformed")
            .field("src", &self.src)
            .finish_non_exhaustive()
    }
}

impl<A, B, S, X> IndexedData<B> for Transformed<A, B, S, X>
where
    A: Element,
    B: Element,
    S: IndexedData<A>,
    X: Transform<A, B> + Clone,
{
    type Owned = Transformed<A, B, S::Owned, X>;

    #[inline]
    fn size(&self) -> u64 {
        self.src.size()
    }

    #[inline]
    fn get(&self, index: u64, out: &mut B) -> Result<()> {
        let mut stored = A::default();
        self.src.get(index, &mut stored)?;
        *out = self.transform.forward(&stored);
        Ok(())
    }

    fn set(&mut self, index: u64, value: &B) -> Result<()> {
        check_index(index, self.src.size())?;
        match self.transform.backward(value) {
            Some(stored) => self.src.set(index, &stored),
            None => {
                tracing::trace!(index, "transformed view has no backward conversion");
                Err(IndexedError::WriteRejected("transform has no backward conversion"))
            }
        }
    }

    fn duplicate(&self) -> Self::Owned {
        Transformed {
            src: self.src.duplicate(),
            transform: self.transform.clone(),
            _marker: PhantomData,
        }
    }

    #[inline]
    fn is_writable(&self) -> bool {
        self.transform.is_invertible() && self.src.is_writable()
    }
}
