use core::borrow::Borrow;
use core::fmt;

use log::debug;

use crate::raw::{RawPriorityHeap, Slot};
use crate::traversal::{InOrder, PostOrder, PreOrder};
use crate::view::HeapNodeRef;

mod capacity;

/// A keyed priority queue implemented as an array-backed binary max-heap.
///
/// Every key is stored at most once, together with an optional payload. The
/// entry with the largest key is always available in O(1) and removed in
/// O(log n). There is no index from key to slot, so key lookups, payload
/// updates and keyed removals scan the array in O(n).
///
/// Mutation takes `&mut self`, so a heap can have one writer or any number of
/// readers at a time. See [`Shared`](crate::Shared) for sharing across
/// threads.
///
/// # Examples
///
/// ```
/// use keyed_trees::PriorityHeap;
///
/// let mut jobs = PriorityHeap::new();
/// jobs.insert(2, Some("write report"));
/// jobs.insert(9, Some("fix outage"));
/// jobs.insert(5, Some("review patch"));
///
/// assert_eq!(jobs.peek_max(), Some((&9, Some(&"fix outage"))));
///
/// // Re-prioritising means removing and re-inserting; inserting an existing
/// // key only updates its payload.
/// assert!(jobs.insert(5, Some("review two patches")));
///
/// assert_eq!(jobs.extract_max(), Some("fix outage"));
/// assert_eq!(jobs.extract_max(), Some("review two patches"));
/// assert_eq!(jobs.extract_max(), Some("write report"));
/// assert_eq!(jobs.extract_max(), None);
/// assert!(!jobs.remove_max());
/// ```
pub struct PriorityHeap<K, D> {
    raw: RawPriorityHeap<K, D>,
}

impl<K, D> PriorityHeap<K, D> {
    /// Makes a new, empty `PriorityHeap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> Self {
        PriorityHeap {
            raw: RawPriorityHeap::new(),
        }
    }

    /// Returns the number of entries in the heap.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the heap contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every entry.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        debug!(target: "priority_heap", "clearing {} entries", self.raw.len());
        self.raw.clear();
    }

    /// Returns the entry with the largest key without removing it.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn peek_max(&self) -> Option<(&K, Option<&D>)> {
        self.raw.peek().map(|slot| (slot.key(), slot.payload()))
    }

    /// Returns a view of the root slot, or `None` if the heap is empty.
    ///
    /// The heap is seen as the complete binary tree its array encodes.
    #[must_use]
    pub fn root(&self) -> Option<HeapNodeRef<'_, K, D>> {
        (!self.raw.is_empty()).then(|| HeapNodeRef::new(&self.raw, 0))
    }

    /// Visits every entry of the implicit tree, each node before its
    /// subtrees.
    pub fn pre_order(&self) -> PreOrder<'_, HeapNodeRef<'_, K, D>> {
        PreOrder::new(self.root())
    }

    /// Visits every entry of the implicit tree, each node between its left
    /// and right subtrees. This is not key order.
    pub fn in_order(&self) -> InOrder<'_, HeapNodeRef<'_, K, D>> {
        InOrder::new(self.root())
    }

    /// Visits every entry of the implicit tree, each node after its
    /// subtrees.
    pub fn post_order(&self) -> PostOrder<'_, HeapNodeRef<'_, K, D>> {
        PostOrder::new(self.root())
    }
}

impl<K: Ord, D> PriorityHeap<K, D> {
    /// Builds a heap from `keys`, each stored without a payload. Repeated keys
    /// are stored once.
    ///
    /// # Complexity
    ///
    /// O(n²)
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        D: PartialEq,
    {
        let mut heap = Self::new();
        heap.insert_keys(keys);
        heap
    }

    /// Inserts `key` with `payload`, or updates the payload in place if `key`
    /// is already present.
    ///
    /// Returns `true` if the heap changed: the key was new, or its payload
    /// differed from `payload`. Updating a payload never moves the entry.
    ///
    /// # Complexity
    ///
    /// O(n) to look for `key`, then O(log n) to place a new entry.
    pub fn insert(&mut self, key: K, payload: Option<D>) -> bool
    where
        D: PartialEq,
    {
        self.raw.insert(key, payload)
    }

    /// Inserts every key in `keys` without a payload.
    ///
    /// Returns `true` only if every individual insert changed the heap. All
    /// keys are inserted either way.
    pub fn insert_keys<I>(&mut self, keys: I) -> bool
    where
        I: IntoIterator<Item = K>,
        D: PartialEq,
    {
        let mut all_changed = true;
        for key in keys {
            all_changed &= self.raw.insert(key, None);
        }
        if !all_changed {
            debug!(target: "priority_heap", "bulk insert left some entries unchanged");
        }
        all_changed
    }

    /// Removes the entry with the largest key. Returns `false` if the heap is
    /// empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove_max(&mut self) -> bool {
        self.raw.pop_max().is_some()
    }

    /// Removes the entry with the largest key and returns its payload.
    ///
    /// Returns `None` if the heap is empty, and also if the removed entry had
    /// no payload; use [`pop_max`](Self::pop_max) to tell the two apart.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn extract_max(&mut self) -> Option<D> {
        self.raw.pop_max().and_then(|(_, payload)| payload)
    }

    /// Removes the entry with the largest key and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_trees::PriorityHeap;
    ///
    /// let mut heap: PriorityHeap<i32, ()> = PriorityHeap::from_keys([3, 8]);
    /// assert_eq!(heap.pop_max(), Some((8, None)));
    /// assert_eq!(heap.pop_max(), Some((3, None)));
    /// assert_eq!(heap.pop_max(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_max(&mut self) -> Option<(K, Option<D>)> {
        self.raw.pop_max()
    }

    /// Removes `key` from the heap. Returns `false` if it was not present.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key).is_some()
    }

    /// Removes `key` from the heap, returning the stored key and payload.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, Option<D>)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key)
    }

    /// Removes every key in `keys`.
    ///
    /// Returns `true` only if every key was present. Present keys are removed
    /// even when others are missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_trees::PriorityHeap;
    ///
    /// let mut heap: PriorityHeap<i32, ()> = PriorityHeap::from_keys([1, 2, 3]);
    /// assert!(!heap.remove_keys([1, 7, 3]));
    /// assert_eq!(heap.len(), 1);
    /// assert!(heap.contains_key(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) per key.
    pub fn remove_keys<I>(&mut self, keys: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<K>,
    {
        let mut all_removed = true;
        for key in keys {
            let key: &K = key.borrow();
            all_removed &= self.raw.remove_entry(key).is_some();
        }
        if !all_removed {
            debug!(target: "priority_heap", "bulk remove skipped missing keys");
        }
        all_removed
    }

    /// Returns `true` if the heap contains `key`.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.position(key).is_some()
    }

    /// Returns `true` if the heap contains every key in `keys`. An empty
    /// `keys` is trivially contained.
    ///
    /// # Complexity
    ///
    /// O(n) per key; stops at the first missing key.
    #[must_use]
    pub fn contains_keys<I>(&self, keys: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<K>,
    {
        keys.into_iter().all(|key| {
            let key: &K = key.borrow();
            self.raw.position(key).is_some()
        })
    }

    /// Returns the payload stored with `key`.
    ///
    /// Returns `None` both when `key` is absent and when it was stored without
    /// a payload.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&D>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.position(key).and_then(|index| self.raw.slot(index).payload())
    }

    /// Returns the stored key and its payload.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, Option<&D>)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.position(key).map(|index| {
            let slot = self.raw.slot(index);
            (slot.key(), slot.payload())
        })
    }
}

impl<K, D> Default for PriorityHeap<K, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, D: Clone> Clone for PriorityHeap<K, D> {
    fn clone(&self) -> Self {
        PriorityHeap { raw: self.raw.clone() }
    }
}

/// Lists the slots in array order, slot 0 (the maximum) first.
impl<K: fmt::Debug, D: fmt::Debug> fmt::Debug for PriorityHeap<K, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.raw.slots().iter().map(|slot: &Slot<K, D>| (slot.key(), slot.payload())))
            .finish()
    }
}

impl<K: Ord, D: PartialEq> Extend<(K, Option<D>)> for PriorityHeap<K, D> {
    fn extend<T: IntoIterator<Item = (K, Option<D>)>>(&mut self, iter: T) {
        for (key, payload) in iter {
            self.raw.insert(key, payload);
        }
    }
}

impl<K: Ord, D: PartialEq> FromIterator<(K, Option<D>)> for PriorityHeap<K, D> {
    fn from_iter<T: IntoIterator<Item = (K, Option<D>)>>(iter: T) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}
