//! Coarse locking for containers shared between threads.

use parking_lot::RwLock;

use crate::{OrderedTree, PriorityHeap};

/// A container behind a reader-writer lock.
///
/// Each [`read`](Shared::read) or [`write`](Shared::write) call holds the lock
/// for the whole closure, so a multi-step relink inside one mutation is never
/// observed half done. Readers run concurrently with each other; a writer runs
/// alone.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use keyed_trees::SharedPriorityHeap;
///
/// let heap: Arc<SharedPriorityHeap<u32, String>> = Arc::default();
/// let workers: Vec<_> = (0..4)
///     .map(|id| {
///         let heap = Arc::clone(&heap);
///         thread::spawn(move || heap.write(|heap| heap.insert(id, Some(format!("worker {id}")))))
///     })
///     .collect();
/// for worker in workers {
///     assert!(worker.join().unwrap());
/// }
///
/// assert_eq!(heap.read(|heap| heap.len()), 4);
/// assert_eq!(heap.write(|heap| heap.extract_max()), Some("worker 3".to_string()));
/// ```
#[derive(Default)]
pub struct Shared<C> {
    inner: RwLock<C>,
}

/// An [`OrderedTree`] behind a reader-writer lock.
pub type SharedOrderedTree<K, D> = Shared<OrderedTree<K, D>>;

/// A [`PriorityHeap`] behind a reader-writer lock.
pub type SharedPriorityHeap<K, D> = Shared<PriorityHeap<K, D>>;

impl<C> Shared<C> {
    /// Wraps `container`.
    pub fn new(container: C) -> Self {
        Self {
            inner: RwLock::new(container),
        }
    }

    /// Runs `f` with shared access, blocking while a writer holds the lock.
    pub fn read<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&self.inner.read())
    }

    /// Runs `f` with exclusive access, blocking until all other readers and
    /// writers are done.
    pub fn write<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Unwraps the container.
    pub fn into_inner(self) -> C {
        self.inner.into_inner()
    }
}

impl<C> From<C> for Shared<C> {
    fn from(container: C) -> Self {
        Self::new(container)
    }
}
