use super::OrderedTree;
use crate::raw::RawOrderedTree;

impl<K, D> OrderedTree<K, D> {
    /// Creates an empty tree with node storage for at least `capacity`
    /// entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_trees::OrderedTree;
    ///
    /// let tree: OrderedTree<u32, String> = OrderedTree::with_capacity(64);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 64);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedTree {
            raw: RawOrderedTree::with_capacity(capacity),
        }
    }

    /// Returns how many entries the tree can hold before its node storage
    /// reallocates.
    ///
    /// Slots freed by removals are reused before the storage grows.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
