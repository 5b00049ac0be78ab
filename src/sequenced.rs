//! Strided subsequence of a backing sequence.

use indexed_traits::Element;

use crate::data::{check_index, IndexedData};
use crate::{IndexedError, Result};

/// Every `step`-th slot of the backing sequence, `count` times, from `start`.
///
/// Virtual index `i` maps to backing index `start + i * step`. A negative
/// `step` walks backwards from `start`.
#[derive(Debug, Clone)]
pub struct Sequenced<S> {
    src: S,
    start: u64,
    step: i64,
    count: u64,
}

impl<S> Sequenced<S> {
    /// Create a strided view.
    ///
    /// Every mapped index is validated here, so later accesses within
    /// `[0, count)` cannot leave the backing bounds. `count == 0` is always
    /// valid and yields an empty view.
    ///
    /// # Errors
    /// Returns [`IndexedError::InvalidConfiguration`] if `step == 0` with a
    /// non-zero `count`, or if either end of the walk falls outside `src`.
    pub fn new<T: Element>(src: S, start: u64, step: i64, count: u64) -> Result<Self>
    where
        S: IndexedData<T>,
    {
        let size = src.size();
        if count > 0 {
            validate_walk(size, start, step, count)?;
        }
        tracing::debug!(start, step, count, backing = size, "sequenced view");
        Ok(Self {
            src,
            start,
            step,
            count,
        })
    }

    #[inline]
    pub fn step(&self) -> i64 {
        self.step
    }

    #[inline]
    pub fn inner(&self) -> &S {
        &self.src
    }

    /// Backing index of virtual index `index`. Only meaningful for `index < count`.
    #[inline]
    fn map(&self, index: u64) -> u64 {
        (self.start as i128 + index as i128 * self.step as i128) as u64
    }
}

// The walk is monotonic, so checking both ends covers every index in between.
fn validate_walk(size: u64, start: u64, step: i64, count: u64) -> Result<()> {
    if step == 0 {
        return Err(IndexedError::InvalidConfiguration(
            "sequence step must be non-zero".to_string(),
        ));
    }
    let first = start as i128;
    let last = first + (count as i128 - 1) * step as i128;
    let in_bounds = |i: i128| i >= 0 && i < size as i128;
    if !in_bounds(first) || !in_bounds(last) {
        return Err(IndexedError::InvalidConfiguration(format!(
            "walk from {first} to {last} (step {step}, count {count}) leaves backing size {size}"
        )));
    }
    Ok(())
}

impl<T: Element, S: IndexedData<T>> IndexedData<T> for Sequenced<S> {
    type Owned = Sequenced<S::Owned>;

    #[inline]
    fn size(&self) -> u64 {
        self.count
    }

    #[inline]
    fn get(&self, index: u64, out: &mut T) -> Result<()> {
        check_index(index, self.count)?;
        self.src.get(self.map(index), out)
    }

    #[inline]
    fn set(&mut self, index: u64, value: &T) -> Result<()> {
        check_index(index, self.count)?;
        let target = self.map(index);
        self.src.set(target, value)
    }

    fn duplicate(&self) -> Self::Owned {
        Sequenced {
            src: self.src.duplicate(),
            start: self.start,
            step: self.step,
            count: self.count,
        }
    }

    #[inline]
    fn is_writable(&self) -> bool {
        self.src.is_writable()
    }
}
