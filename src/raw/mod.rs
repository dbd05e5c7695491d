mod arena;
mod handle;
mod node;
mod raw_ordered_tree;
mod raw_priority_heap;

pub(crate) use handle::Handle;
pub(crate) use raw_ordered_tree::RawOrderedTree;
pub(crate) use raw_priority_heap::{RawPriorityHeap, Slot};
