//! Synchronous write listeners.

use std::fmt;

use indexed_traits::Element;

use crate::data::IndexedData;
use crate::Result;

/// Handle returned by [`WriteNotifying::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener<S> = Box<dyn FnMut(&S, u64) + Send>;

/// Calls every subscribed listener after each successful write.
///
/// Listeners run inline, in subscription order, and receive the backing
/// sequence (already holding the new value) and the written index. A failed
/// write notifies nobody.
pub struct WriteNotifying<S> {
    src: S,
    listeners: Vec<(ListenerId, Listener<S>)>,
    next_id: u64,
}

impl<S> WriteNotifying<S> {
    pub fn new(src: S) -> Self {
        Self {
            src,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Register `listener`; it is called after every successful `set`.
    pub fn subscribe(&mut self, listener: impl FnMut(&S, u64) + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        tracing::debug!(id = id.0, listeners = self.listeners.len(), "listener subscribed");
        id
    }

    /// Remove a listener. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        match self.listeners.iter().position(|(lid, _)| *lid == id) {
            Some(pos) => {
                self.listeners.remove(pos);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    #[inline]
    pub fn inner(&self) -> &S {
        &self.src
    }

    pub fn into_inner(self) -> S {
        self.src
    }
}

impl<S: fmt::Debug> fmt::Debug for WriteNotifying<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteNotifying")
            .field("src", &self.src)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<T: Element, S: IndexedData<T>> IndexedData<T> for WriteNotifying<S> {
    type Owned = WriteNotifying<S::Owned>;

    #[inline]
    fn size(&self) -> u64 {
        self.src.size()
    }

    #[inline]
    fn get(&self, index: u64, out: &mut T) -> Result<()> {
        self.src.get(index, out)
    }

    fn set(&mut self, index: u64, value: &T) -> Result<()> {
        self.src.set(index, value)?;
        for (_, listener) in &mut self.listeners {
            listener(&self.src, index);
        }
        Ok(())
    }

    /// Duplicates the backing only; the copy starts with no listeners.
    fn duplicate(&self) -> Self::Owned {
        WriteNotifying::new(self.src.duplicate())
    }

    #[inline]
    fn is_writable(&self) -> bool {
        self.src.is_writable()
    }
}
