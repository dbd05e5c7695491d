//! Read-only views of individual nodes.
//!
//! A view is a small `Copy` value borrowing its container. It exposes the
//! entry stored at one position and the positions of its two children, which
//! is all the traversal and rendering code needs. Neither the tree's arena
//! handles nor the heap's slot indices are exposed.

use core::fmt;

use crate::raw::{Handle, RawOrderedTree, RawPriorityHeap};

/// Borrowed access to one node of a binary tree shape.
///
/// Implemented by [`TreeNodeRef`] and [`HeapNodeRef`].
pub trait NodeView<'a>: Copy {
    /// The key type of the container.
    type Key: 'a;
    /// The payload type of the container.
    type Payload: 'a;

    /// The key stored at this node.
    fn key(self) -> &'a Self::Key;

    /// The payload stored at this node, if one was given.
    fn payload(self) -> Option<&'a Self::Payload>;

    /// The left child, if any.
    #[must_use]
    fn left(self) -> Option<Self>;

    /// The right child, if any.
    #[must_use]
    fn right(self) -> Option<Self>;

    /// The key and payload as a pair.
    fn entry(self) -> (&'a Self::Key, Option<&'a Self::Payload>) {
        (self.key(), self.payload())
    }
}

/// A view of one node of an [`OrderedTree`](crate::OrderedTree).
///
/// # Examples
///
/// ```
/// use keyed_trees::{NodeView, OrderedTree};
///
/// let tree: OrderedTree<i32, ()> = OrderedTree::from_keys([5, 3, 8]);
/// let root = tree.root().unwrap();
/// assert_eq!(*root.key(), 5);
/// assert_eq!(root.left().map(|node| *node.key()), Some(3));
/// assert_eq!(root.right().map(|node| *node.key()), Some(8));
/// ```
pub struct TreeNodeRef<'a, K, D> {
    tree: &'a RawOrderedTree<K, D>,
    handle: Handle,
}

impl<'a, K, D> TreeNodeRef<'a, K, D> {
    pub(crate) fn new(tree: &'a RawOrderedTree<K, D>, handle: Handle) -> Self {
        Self { tree, handle }
    }

    /// The parent node, `None` at the root.
    #[must_use]
    pub fn parent(self) -> Option<Self> {
        self.tree.node(self.handle).parent().map(|handle| Self::new(self.tree, handle))
    }
}

impl<K, D> Clone for TreeNodeRef<'_, K, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, D> Copy for TreeNodeRef<'_, K, D> {}

impl<'a, K, D> NodeView<'a> for TreeNodeRef<'a, K, D> {
    type Key = K;
    type Payload = D;

    fn key(self) -> &'a K {
        self.tree.node(self.handle).key()
    }

    fn payload(self) -> Option<&'a D> {
        self.tree.node(self.handle).payload()
    }

    fn left(self) -> Option<Self> {
        self.tree.node(self.handle).left().map(|handle| Self::new(self.tree, handle))
    }

    fn right(self) -> Option<Self> {
        self.tree.node(self.handle).right().map(|handle| Self::new(self.tree, handle))
    }
}

impl<K: fmt::Debug, D: fmt::Debug> fmt::Debug for TreeNodeRef<'_, K, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNodeRef")
            .field("key", self.key())
            .field("payload", &self.payload())
            .finish()
    }
}

/// A view of one slot of a [`PriorityHeap`](crate::PriorityHeap), seen as a
/// node of the implicit complete binary tree.
///
/// # Examples
///
/// ```
/// use keyed_trees::{NodeView, PriorityHeap};
///
/// let heap: PriorityHeap<i32, ()> = PriorityHeap::from_keys([1, 9, 4]);
/// let root = heap.root().unwrap();
/// assert_eq!(*root.key(), 9);
/// assert!(root.left().is_some() && root.right().is_some());
/// ```
pub struct HeapNodeRef<'a, K, D> {
    heap: &'a RawPriorityHeap<K, D>,
    index: usize,
}

impl<'a, K, D> HeapNodeRef<'a, K, D> {
    pub(crate) fn new(heap: &'a RawPriorityHeap<K, D>, index: usize) -> Self {
        Self { heap, index }
    }
}

impl<K, D> Clone for HeapNodeRef<'_, K, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, D> Copy for HeapNodeRef<'_, K, D> {}

impl<'a, K, D> NodeView<'a> for HeapNodeRef<'a, K, D> {
    type Key = K;
    type Payload = D;

    fn key(self) -> &'a K {
        self.heap.slot(self.index).key()
    }

    fn payload(self) -> Option<&'a D> {
        self.heap.slot(self.index).payload()
    }

    fn left(self) -> Option<Self> {
        self.heap.left_of(self.index).map(|index| Self::new(self.heap, index))
    }

    fn right(self) -> Option<Self> {
        self.heap.right_of(self.index).map(|index| Self::new(self.heap, index))
    }
}

impl<K: fmt::Debug, D: fmt::Debug> fmt::Debug for HeapNodeRef<'_, K, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapNodeRef")
            .field("key", self.key())
            .field("payload", &self.payload())
            .finish()
    }
}
