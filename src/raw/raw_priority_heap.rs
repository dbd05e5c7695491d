use alloc::vec::Vec;
use core::borrow::Borrow;

use log::trace;

const LOG_TARGET: &str = "priority_heap";

/// One entry of the heap array.
#[derive(Clone)]
pub(crate) struct Slot<K, D> {
    key: K,
    payload: Option<D>,
}

impl<K, D> Slot<K, D> {
    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn payload(&self) -> Option<&D> {
        self.payload.as_ref()
    }

    pub(crate) fn into_entry(self) -> (K, Option<D>) {
        (self.key, self.payload)
    }
}

/// The array-backed binary max-heap backing `PriorityHeap`.
///
/// Slot `i` has children `2i + 1` and `2i + 2`; no slot's key exceeds its
/// parent's.
#[derive(Clone)]
pub(crate) struct RawPriorityHeap<K, D> {
    slots: Vec<Slot<K, D>>,
}

impl<K, D> RawPriorityHeap<K, D> {
    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }

    pub(crate) fn slots(&self) -> &[Slot<K, D>] {
        &self.slots
    }

    pub(crate) fn slot(&self, index: usize) -> &Slot<K, D> {
        &self.slots[index]
    }

    /// The maximum entry, at slot 0.
    pub(crate) fn peek(&self) -> Option<&Slot<K, D>> {
        self.slots.first()
    }

    #[inline]
    pub(crate) fn left_of(&self, index: usize) -> Option<usize> {
        let left = 2 * index + 1;
        (left < self.slots.len()).then_some(left)
    }

    #[inline]
    pub(crate) fn right_of(&self, index: usize) -> Option<usize> {
        let right = 2 * index + 2;
        (right < self.slots.len()).then_some(right)
    }
}

impl<K: Ord, D> RawPriorityHeap<K, D> {
    /// Linear scan for the slot holding `key`.
    pub(crate) fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.slots.iter().position(|slot| {
            let stored: &Q = slot.key.borrow();
            stored == key
        })
    }

    /// Inserts `key`, or overwrites its payload in place if it is already
    /// present.
    ///
    /// Returns `false` only when the key was present with an equal payload.
    pub(crate) fn insert(&mut self, key: K, payload: Option<D>) -> bool
    where
        D: PartialEq,
    {
        if let Some(index) = self.position(&key) {
            let slot = &mut self.slots[index];
            if slot.payload == payload {
                return false;
            }
            slot.payload = payload;
            return true;
        }

        self.slots.push(Slot { key, payload });
        let settled = self.sift_up(self.slots.len() - 1);
        trace!(target: LOG_TARGET, "appended slot settled at {settled}");
        true
    }

    /// Takes the maximum entry out of the heap.
    pub(crate) fn pop_max(&mut self) -> Option<(K, Option<D>)> {
        if self.slots.is_empty() {
            return None;
        }
        let max = self.slots.swap_remove(0);
        if !self.slots.is_empty() {
            self.sift_down(0);
        }
        Some(max.into_entry())
    }

    /// Takes the entry at `index` out of the heap, refilling the hole with the
    /// last slot.
    pub(crate) fn remove_at(&mut self, index: usize) -> (K, Option<D>) {
        let removed = self.slots.swap_remove(index);
        if index < self.slots.len() {
            // The refill came from the end of the array, possibly from another
            // subtree, so it may belong above the hole as well as below it.
            if self.sift_down(index) == index {
                self.sift_up(index);
            }
        }
        removed.into_entry()
    }

    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, Option<D>)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let index = self.position(key)?;
        Some(self.remove_at(index))
    }

    /// Moves the slot at `index` up while it outranks its parent. Returns
    /// where it came to rest.
    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.slots[parent].key >= self.slots[index].key {
                break;
            }
            trace!(target: LOG_TARGET, "sift up: {index} -> {parent}");
            self.slots.swap(parent, index);
            index = parent;
        }
        index
    }

    /// Moves the slot at `index` down while a child strictly outranks it,
    /// always trading places with the larger child (the left one on a tie).
    /// Returns where it came to rest.
    fn sift_down(&mut self, mut index: usize) -> usize {
        loop {
            let mut largest = index;
            for child in [self.left_of(index), self.right_of(index)].into_iter().flatten() {
                if self.slots[child].key > self.slots[largest].key {
                    largest = child;
                }
            }
            if largest == index {
                return index;
            }
            trace!(target: LOG_TARGET, "sift down: {index} -> {largest}");
            self.slots.swap(index, largest);
            index = largest;
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use proptest::prelude::*;

    impl<K: Ord, D> RawPriorityHeap<K, D> {
        /// Checks the max-heap property. Panics on the first violation.
        pub(crate) fn validate_invariants(&self) {
            for index in 1..self.slots.len() {
                let parent = (index - 1) / 2;
                assert!(
                    self.slots[index].key <= self.slots[parent].key,
                    "slot {index} outranks its parent {parent}"
                );
            }
        }

        fn keys(&self) -> Vec<&K> {
            self.slots.iter().map(Slot::key).collect()
        }
    }

    fn heap_of(keys: &[i32]) -> RawPriorityHeap<i32, i32> {
        let mut heap = RawPriorityHeap::new();
        for &key in keys {
            assert!(heap.insert(key, Some(key * 10)));
            heap.validate_invariants();
        }
        heap
    }

    #[test]
    fn insert_sifts_up() {
        let heap = heap_of(&[5, 1, 9, 3, 7]);
        assert_eq!(heap.keys(), [&9, &7, &5, &1, &3]);
    }

    #[test]
    fn pop_max_drains_in_descending_order() {
        let mut heap = heap_of(&[5, 1, 9, 3, 7]);
        let mut drained = Vec::new();
        while let Some((key, payload)) = heap.pop_max() {
            heap.validate_invariants();
            drained.push((key, payload));
        }
        assert_eq!(drained, [(9, Some(90)), (7, Some(70)), (5, Some(50)), (3, Some(30)), (1, Some(10))]);
        assert_eq!(heap.pop_max(), None);
    }

    #[test]
    fn remove_refill_can_move_up() {
        let mut heap = heap_of(&[10, 5, 9, 1, 2, 8, 7]);
        assert_eq!(heap.keys(), [&10, &5, &9, &1, &2, &8, &7]);

        assert_eq!(heap.remove_entry(&1), Some((1, Some(10))));
        heap.validate_invariants();
        assert_eq!(heap.keys(), [&10, &7, &9, &5, &2, &8]);
    }

    #[test]
    fn remove_last_slot() {
        let mut heap = heap_of(&[3, 2, 1]);
        assert_eq!(heap.remove_entry(&1), Some((1, Some(10))));
        assert_eq!(heap.keys(), [&3, &2]);
        assert_eq!(heap.remove_entry(&1), None);
    }

    #[test]
    fn equal_children_leave_parent_in_place() {
        let mut heap: RawPriorityHeap<i32, ()> = RawPriorityHeap::new();
        for key in [9, 4, 4, 1] {
            heap.slots.push(Slot { key, payload: None });
        }
        // Slot 0 is now the former last slot (1); it trades with the left 4.
        heap.pop_max();
        heap.validate_invariants();
        assert_eq!(heap.keys(), [&4, &1, &4]);
    }

    #[test]
    fn child_indices() {
        let heap = heap_of(&[4, 3, 2, 1]);
        assert_eq!(heap.left_of(0), Some(1));
        assert_eq!(heap.right_of(0), Some(2));
        assert_eq!(heap.left_of(1), Some(3));
        assert_eq!(heap.right_of(1), None);
        assert_eq!(heap.left_of(2), None);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32, Option<u8>),
        Remove(i32),
        PopMax,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0i32..100, proptest::option::of(0u8..3)).prop_map(|(key, payload)| Op::Insert(key, payload)),
            2 => (0i32..100).prop_map(Op::Remove),
            1 => Just(Op::PopMax),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn heap_invariants_maintained_after_operations(ops in prop::collection::vec(op_strategy(), 0..400)) {
            let mut heap: RawPriorityHeap<i32, u8> = RawPriorityHeap::new();
            let mut model: BTreeMap<i32, Option<u8>> = BTreeMap::new();

            for op in ops {
                match op {
                    Op::Insert(key, payload) => {
                        let changed = model.insert(key, payload) != Some(payload);
                        prop_assert_eq!(heap.insert(key, payload), changed);
                    }
                    Op::Remove(key) => {
                        prop_assert_eq!(heap.remove_entry(&key), model.remove_entry(&key));
                    }
                    Op::PopMax => {
                        prop_assert_eq!(heap.pop_max(), model.pop_last());
                    }
                }
                heap.validate_invariants();
                prop_assert_eq!(heap.len(), model.len());
                prop_assert_eq!(heap.peek().map(Slot::key), model.keys().next_back());
            }
        }
    }
}
