use super::handle::Handle;

/// Which child link of a parent a node hangs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A binary search tree node.
///
/// Links are handles into the owning tree's arena. `parent` is `None` only for
/// the root.
#[derive(Clone)]
pub(crate) struct TreeNode<K, D> {
    key: K,
    payload: Option<D>,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<K, D> TreeNode<K, D> {
    /// Creates an unlinked leaf hanging from `parent`.
    pub(crate) fn leaf(key: K, payload: Option<D>, parent: Option<Handle>) -> Self {
        Self {
            key,
            payload,
            parent,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn payload(&self) -> Option<&D> {
        self.payload.as_ref()
    }

    /// Replaces the payload, reporting whether it actually changed.
    pub(crate) fn update_payload(&mut self, payload: Option<D>) -> bool
    where
        D: PartialEq,
    {
        if self.payload == payload {
            return false;
        }
        self.payload = payload;
        true
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Returns the side `child` hangs from, if it is a child of this node.
    pub(crate) fn side_of(&self, child: Handle) -> Option<Side> {
        if self.left == Some(child) {
            Some(Side::Left)
        } else if self.right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Returns the only child when exactly one link is set.
    pub(crate) fn only_child(&self) -> Option<Handle> {
        match (self.left, self.right) {
            (Some(child), None) | (None, Some(child)) => Some(child),
            _ => None,
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Consumes the node, keeping only its entry.
    pub(crate) fn into_entry(self) -> (K, Option<D>) {
        (self.key, self.payload)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn payload_update_reports_change() {
        let mut node: TreeNode<u8, &str> = TreeNode::leaf(1, None, None);
        assert!(!node.update_payload(None));
        assert!(node.update_payload(Some("a")));
        assert!(!node.update_payload(Some("a")));
        assert!(node.update_payload(None));
        assert_eq!(node.payload(), None);
    }

    #[test]
    fn child_links() {
        let parent = Handle::from_slot(0);
        let a = Handle::from_slot(1);
        let b = Handle::from_slot(2);
        let mut node: TreeNode<u8, ()> = TreeNode::leaf(5, None, Some(parent));
        assert!(node.is_leaf());

        node.set_child(Side::Right, Some(b));
        assert_eq!(node.only_child(), Some(b));
        assert_eq!(node.side_of(b), Some(Side::Right));
        assert_eq!(node.side_of(a), None);

        node.set_child(Side::Left, Some(a));
        assert_eq!(node.only_child(), None);
        assert_eq!(node.child(Side::Left), Some(a));
        assert_eq!(node.parent(), Some(parent));
    }
}
