//! Lazy depth-first traversals over any [`NodeView`] shape.
//!
//! Each iterator yields `(key, payload)` pairs and keeps its own stack, so
//! traversing a degenerate tree does not recurse. Containers hand out a fresh
//! iterator per call; cloning one mid-way resumes from the same point.

use core::iter::FusedIterator;
use core::marker::PhantomData;

use smallvec::SmallVec;

use crate::view::NodeView;

type Stack<T> = SmallVec<[T; 16]>;

/// Node first, then the left subtree, then the right subtree.
///
/// Created by `pre_order` on [`OrderedTree`](crate::OrderedTree) and
/// [`PriorityHeap`](crate::PriorityHeap).
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct PreOrder<'a, N> {
    pending: Stack<N>,
    _marker: PhantomData<&'a ()>,
}

impl<'a, N: NodeView<'a>> PreOrder<'a, N> {
    /// Starts a traversal at `root`; `None` yields nothing.
    pub fn new(root: Option<N>) -> Self {
        Self {
            pending: root.into_iter().collect(),
            _marker: PhantomData,
        }
    }
}

impl<'a, N: NodeView<'a>> Iterator for PreOrder<'a, N> {
    type Item = (&'a N::Key, Option<&'a N::Payload>);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pending.pop()?;
        self.pending.extend(node.right());
        self.pending.extend(node.left());
        Some(node.entry())
    }
}

impl<'a, N: NodeView<'a>> FusedIterator for PreOrder<'a, N> {}

/// Left subtree, then the node, then the right subtree. For an
/// [`OrderedTree`](crate::OrderedTree) this is ascending key order.
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct InOrder<'a, N> {
    pending: Stack<N>,
    descend: Option<N>,
    _marker: PhantomData<&'a ()>,
}

impl<'a, N: NodeView<'a>> InOrder<'a, N> {
    /// Starts a traversal at `root`; `None` yields nothing.
    pub fn new(root: Option<N>) -> Self {
        Self {
            pending: Stack::new(),
            descend: root,
            _marker: PhantomData,
        }
    }
}

impl<'a, N: NodeView<'a>> Iterator for InOrder<'a, N> {
    type Item = (&'a N::Key, Option<&'a N::Payload>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.descend {
            self.pending.push(node);
            self.descend = node.left();
        }
        let node = self.pending.pop()?;
        self.descend = node.right();
        Some(node.entry())
    }
}

impl<'a, N: NodeView<'a>> FusedIterator for InOrder<'a, N> {}

/// Left subtree, then the right subtree, then the node.
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct PostOrder<'a, N> {
    // `true` once the node's children have been pushed.
    pending: Stack<(N, bool)>,
    _marker: PhantomData<&'a ()>,
}

impl<'a, N: NodeView<'a>> PostOrder<'a, N> {
    /// Starts a traversal at `root`; `None` yields nothing.
    pub fn new(root: Option<N>) -> Self {
        Self {
            pending: root.map(|node| (node, false)).into_iter().collect(),
            _marker: PhantomData,
        }
    }
}

impl<'a, N: NodeView<'a>> Iterator for PostOrder<'a, N> {
    type Item = (&'a N::Key, Option<&'a N::Payload>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, expanded)) = self.pending.pop() {
            if expanded {
                return Some(node.entry());
            }
            self.pending.push((node, true));
            self.pending.extend(node.right().map(|child| (child, false)));
            self.pending.extend(node.left().map(|child| (child, false)));
        }
        None
    }
}

impl<'a, N: NodeView<'a>> FusedIterator for PostOrder<'a, N> {}
