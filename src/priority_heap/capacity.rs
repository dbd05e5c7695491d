use super::PriorityHeap;
use crate::raw::RawPriorityHeap;

impl<K, D> PriorityHeap<K, D> {
    /// Creates an empty heap with room for at least `capacity` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_trees::PriorityHeap;
    ///
    /// let heap: PriorityHeap<u32, ()> = PriorityHeap::with_capacity(16);
    /// assert!(heap.is_empty());
    /// assert!(heap.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        PriorityHeap {
            raw: RawPriorityHeap::with_capacity(capacity),
        }
    }

    /// Returns how many entries the heap can hold without reallocating.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
