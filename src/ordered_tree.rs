use core::borrow::Borrow;
use core::fmt;

use log::debug;

use crate::raw::RawOrderedTree;
use crate::traversal::{InOrder, PostOrder, PreOrder};
use crate::view::TreeNodeRef;

mod capacity;

/// An ordered map based on an unbalanced [binary search tree].
///
/// Every key is stored at most once, together with an optional payload.
/// Inserting a key that is already present updates its payload in place.
///
/// The tree never rebalances: inserting keys in sorted order produces a tree
/// as deep as it is long, and lookups degrade to O(n). Removing a node with
/// two children moves its in-order predecessor or successor into its place,
/// whichever is fewer hops away, which keeps the relinking shallow but is not
/// a balance guarantee.
///
/// Mutation takes `&mut self`, so a tree can have one writer or any number of
/// readers at a time. See [`Shared`](crate::Shared) for sharing across
/// threads.
///
/// # Examples
///
/// ```
/// use keyed_trees::OrderedTree;
///
/// let mut tree = OrderedTree::new();
/// assert!(tree.insert(50, Some("root")));
/// assert!(tree.insert_keys([30, 70, 20, 40, 60, 80]));
///
/// // Same key, same payload: nothing changes.
/// assert!(!tree.insert(50, Some("root")));
/// // Same key, new payload: updated in place.
/// assert!(tree.insert(50, Some("renamed")));
/// assert_eq!(tree.get(&50), Some(&"renamed"));
///
/// assert!(tree.remove(&50));
/// assert!(!tree.remove(&50));
///
/// let keys: Vec<i32> = tree.in_order().map(|(key, _)| *key).collect();
/// assert_eq!(keys, [20, 30, 40, 60, 70, 80]);
/// assert_eq!(tree.height(), 3);
/// ```
///
/// [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
pub struct OrderedTree<K, D> {
    raw: RawOrderedTree<K, D>,
}

impl<K, D> OrderedTree<K, D> {
    /// Makes a new, empty `OrderedTree`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> Self {
        OrderedTree {
            raw: RawOrderedTree::new(),
        }
    }

    /// Returns the number of entries in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no entries.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of nodes on the longest path from the root to a
    /// leaf, or 0 for an empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_trees::OrderedTree;
    ///
    /// let balanced: OrderedTree<i32, ()> = OrderedTree::from_keys([2, 1, 3]);
    /// assert_eq!(balanced.height(), 2);
    ///
    /// let degenerate: OrderedTree<i32, ()> = OrderedTree::from_keys([1, 2, 3]);
    /// assert_eq!(degenerate.height(), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Removes every entry.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        debug!(target: "ordered_tree", "clearing {} entries", self.raw.len());
        self.raw.clear();
    }

    /// Returns a view of the root node, or `None` if the tree is empty.
    ///
    /// Views give read-only access to the tree's shape for rendering; see
    /// [`NodeView`](crate::NodeView).
    #[must_use]
    pub fn root(&self) -> Option<TreeNodeRef<'_, K, D>> {
        self.raw.root().map(|handle| TreeNodeRef::new(&self.raw, handle))
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Complexity
    ///
    /// O(height)
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, Option<&D>)> {
        self.raw.first().map(|handle| {
            let node = self.raw.node(handle);
            (node.key(), node.payload())
        })
    }

    /// Returns the entry with the largest key.
    ///
    /// # Complexity
    ///
    /// O(height)
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, Option<&D>)> {
        self.raw.last().map(|handle| {
            let node = self.raw.node(handle);
            (node.key(), node.payload())
        })
    }

    /// Visits every entry, each node before its subtrees.
    pub fn pre_order(&self) -> PreOrder<'_, TreeNodeRef<'_, K, D>> {
        PreOrder::new(self.root())
    }

    /// Visits every entry in ascending key order.
    pub fn in_order(&self) -> InOrder<'_, TreeNodeRef<'_, K, D>> {
        InOrder::new(self.root())
    }

    /// Visits every entry, each node after its subtrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_trees::OrderedTree;
    ///
    /// let tree: OrderedTree<i32, ()> = OrderedTree::from_keys([5, 3, 8, 1, 4]);
    /// let keys: Vec<i32> = tree.post_order().map(|(key, _)| *key).collect();
    /// assert_eq!(keys, [1, 4, 3, 8, 5]);
    /// ```
    pub fn post_order(&self) -> PostOrder<'_, TreeNodeRef<'_, K, D>> {
        PostOrder::new(self.root())
    }
}

impl<K: Ord, D> OrderedTree<K, D> {
    /// Builds a tree from `keys`, each stored without a payload. Repeated keys
    /// are stored once.
    ///
    /// # Complexity
    ///
    /// O(n * height)
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        D: PartialEq,
    {
        let mut tree = Self::new();
        tree.insert_keys(keys);
        tree
    }

    /// Inserts `key` with `payload`, or updates the payload if `key` is
    /// already present.
    ///
    /// Returns `true` if the tree changed: the key was new, or its payload
    /// differed from `payload`. Payloads are compared by value.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_trees::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// assert!(tree.insert(1, None));
    /// assert!(!tree.insert(1, None));
    /// assert!(tree.insert(1, Some('a')));
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn insert(&mut self, key: K, payload: Option<D>) -> bool
    where
        D: PartialEq,
    {
        self.raw.insert(key, payload)
    }

    /// Inserts every key in `keys` without a payload.
    ///
    /// Returns `true` only if every individual insert changed the tree. All
    /// keys are inserted either way.
    ///
    /// # Complexity
    ///
    /// O(n * height)
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
            debug!(target: "ordered_tree", "bulk insert left some entries unchanged");
        }
        all_changed
    }

    /// Removes `key` from the tree. Returns `false` if it was not present.
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key).is_some()
    }

    /// Removes `key` from the tree, returning the stored key and payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_trees::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert("k", Some(7));
    /// assert_eq!(tree.remove_entry("k"), Some(("k", Some(7))));
    /// assert_eq!(tree.remove_entry("k"), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
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
    /// # Complexity
    ///
    /// O(n * height)
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
            debug!(target: "ordered_tree", "bulk remove skipped missing keys");
        }
        all_removed
    }

    /// Returns `true` if the tree contains `key`.
    ///
    /// # Complexity
    ///
    /// O(height)
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).is_some()
    }

    /// Returns `true` if the tree contains every key in `keys`. An empty
    /// `keys` is trivially contained.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_trees::OrderedTree;
    ///
    /// let tree: OrderedTree<i32, ()> = OrderedTree::from_keys([5, 3, 8]);
    /// assert!(tree.contains_keys([3, 8]));
    /// assert!(!tree.contains_keys(&[3, 4]));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height) per key; stops at the first missing key.
    #[must_use]
    pub fn contains_keys<I>(&self, keys: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<K>,
    {
        keys.into_iter().all(|key| {
            let key: &K = key.borrow();
            self.raw.find(key).is_some()
        })
    }

    /// Returns the payload stored with `key`.
    ///
    /// Returns `None` both when `key` is absent and when it was stored without
    /// a payload; use [`contains_key`](Self::contains_key) or
    /// [`get_key_value`](Self::get_key_value) to tell the two apart.
    ///
    /// # Complexity
    ///
    /// O(height)
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&D>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key).and_then(|node| node.payload())
    }

    /// Returns the stored key and its payload.
    ///
    /// # Complexity
    ///
    /// O(height)
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, Option<&D>)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key).map(|node| (node.key(), node.payload()))
    }
}

impl<K, D> Default for OrderedTree<K, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, D: Clone> Clone for OrderedTree<K, D> {
    fn clone(&self) -> Self {
        OrderedTree { raw: self.raw.clone() }
    }
}

impl<K: fmt::Debug, D: fmt::Debug> fmt::Debug for OrderedTree<K, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.in_order()).finish()
    }
}

impl<K: Ord, D: PartialEq> Extend<(K, Option<D>)> for OrderedTree<K, D> {
    fn extend<T: IntoIterator<Item = (K, Option<D>)>>(&mut self, iter: T) {
        for (key, payload) in iter {
            self.raw.insert(key, payload);
        }
    }
}

impl<K: Ord, D: PartialEq> FromIterator<(K, Option<D>)> for OrderedTree<K, D> {
    fn from_iter<T: IntoIterator<Item = (K, Option<D>)>>(iter: T) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
