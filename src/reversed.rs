//! Back-to-front view of a backing sequence.

use indexed_traits::Element;

use crate::data::{check_index, IndexedData};
use crate::Result;

/// The backing sequence in reverse order: `get(i)` reads `size - 1 - i`.
///
/// Reversing twice is observationally the identity; [`into_inner`](Self::into_inner)
/// recovers the original sequence without any wrapping.
#[derive(Debug, Clone)]
pub struct Reversed<S> {
    src: S,
}

impl<S> Reversed<S> {
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

impl<T: Element, S: IndexedData<T>> IndexedData<T> for Reversed<S> {
    type Owned = Reversed<S::Owned>;

    #[inline]
    fn size(&self) -> u64 {
        self.src.size()
    }

    #[inline]
    fn get(&self, index: u64, out: &mut T) -> Result<()> {
        let size = self.src.size();
        check_index(index, size)?;
        self.src.get(size - 1 - index, out)
    }

    #[inline]
    fn set(&mut self, index: u64, value: &T) -> Result<()> {
        let size = self.src.size();
        check_index(index, size)?;
        self.src.set(size - 1 - index, value)
    }

    fn duplicate(&self) -> Self::Owned {
        Reversed::new(self.src.duplicate())
    }

    #[inline]
    fn is_writable(&self) -> bool {
        self.src.is_writable()
    }
}
