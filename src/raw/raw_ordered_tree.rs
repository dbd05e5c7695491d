use core::borrow::Borrow;
use core::cmp::Ordering;

use log::trace;
use smallvec::{SmallVec, smallvec};

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Side, TreeNode};

const LOG_TARGET: &str = "ordered_tree";

/// The unbalanced binary search tree backing `OrderedTree`.
#[derive(Clone)]
pub(crate) struct RawOrderedTree<K, D> {
    /// Arena owning every node; links between nodes are handles into it.
    nodes: Arena<TreeNode<K, D>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

/// Outcome of descending the tree for a key.
enum Search {
    /// The key is stored at this node.
    Found(Handle),
    /// The key is absent; a new leaf for it belongs on `side` of `parent`
    /// (or at the root when `parent` is `None`).
    Vacant { parent: Option<Handle>, side: Side },
}

impl<K, D> RawOrderedTree<K, D> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn node(&self, handle: Handle) -> &TreeNode<K, D> {
        self.nodes.get(handle)
    }

    /// Number of nodes on the longest root-to-leaf path; 0 when empty.
    ///
    /// Walks with an explicit stack: an unbalanced tree can be as deep as it
    /// is long.
    pub(crate) fn height(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };

        let mut height = 0;
        let mut pending: SmallVec<[(Handle, usize); 32]> = smallvec![(root, 1)];
        while let Some((handle, depth)) = pending.pop() {
            height = height.max(depth);
            let node = self.nodes.get(handle);
            pending.extend([node.left(), node.right()].into_iter().flatten().map(|child| (child, depth + 1)));
        }
        height
    }

    /// Follows `side` links from `start` to the end, counting `start` as one hop.
    fn outermost(&self, start: Handle, side: Side) -> (Handle, usize) {
        let mut current = start;
        let mut hops = 1;
        while let Some(next) = self.nodes.get(current).child(side) {
            current = next;
            hops += 1;
        }
        (current, hops)
    }

    /// Handle of the node holding the smallest key.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.outermost(root, Side::Left).0)
    }

    /// Handle of the node holding the largest key.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.outermost(root, Side::Right).0)
    }

    /// Points whichever link of `parent` held `old` at `new` instead (the root
    /// link when `parent` is `None`) and re-parents `new`.
    fn relink(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent_node = self.nodes.get_mut(parent);
                let side = parent_node
                    .side_of(old)
                    .expect("`RawOrderedTree::relink()` - `old` is not a child of `parent`!");
                parent_node.set_child(side, new);
            }
        }
        if let Some(new) = new {
            self.nodes.get_mut(new).set_parent(parent);
        }
    }

    /// Unlinks `target`, which has both children, by moving its in-order
    /// predecessor or successor into its place, whichever is fewer hops away.
    fn replace_with_neighbour(&mut self, target: Handle) {
        let node = self.nodes.get(target);
        let parent = node.parent();
        let (Some(left), Some(right)) = (node.left(), node.right()) else {
            unreachable!("`RawOrderedTree::replace_with_neighbour()` - `target` needs two children");
        };

        let (predecessor, predecessor_hops) = self.outermost(left, Side::Right);
        let (successor, successor_hops) = self.outermost(right, Side::Left);

        // `inner` is the subtree of `target` the replacement is taken from.
        let (replacement, inner, inner_root, outer_root) = if predecessor_hops < successor_hops {
            (predecessor, Side::Left, left, right)
        } else {
            (successor, Side::Right, right, left)
        };
        trace!(
            target: LOG_TARGET,
            "replacing {target} with {replacement} (predecessor {predecessor_hops} hops, successor {successor_hops} hops)"
        );

        if replacement != inner_root {
            // The replacement is the outermost node of the inner subtree, so
            // at most one child remains to hand over to its old parent.
            let old_parent = self
                .nodes
                .get(replacement)
                .parent()
                .expect("`RawOrderedTree::replace_with_neighbour()` - replacement has no parent!");
            let orphan = self.nodes.get(replacement).child(inner);
            self.relink(Some(old_parent), replacement, orphan);

            self.nodes.get_mut(replacement).set_child(inner, Some(inner_root));
            self.nodes.get_mut(inner_root).set_parent(Some(replacement));
        }

        let outer = inner.opposite();
        self.nodes.get_mut(replacement).set_child(outer, Some(outer_root));
        self.nodes.get_mut(outer_root).set_parent(Some(replacement));

        self.relink(parent, target, Some(replacement));
    }
}

impl<K: Ord, D> RawOrderedTree<K, D> {
    fn search<Q>(&self, key: &Q) -> Search
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            side = match key.cmp(node.key().borrow()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Search::Found(handle),
            };
            parent = Some(handle);
            current = node.child(side);
        }

        Search::Vacant { parent, side }
    }

    /// Returns the handle of the node holding `key`.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.search(key) {
            Search::Found(handle) => Some(handle),
            Search::Vacant { .. } => None,
        }
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&TreeNode<K, D>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find(key).map(|handle| self.nodes.get(handle))
    }

    /// Inserts `key`, or overwrites its payload if it is already present.
    ///
    /// Returns `false` only when the key was present with an equal payload.
    pub(crate) fn insert(&mut self, key: K, payload: Option<D>) -> bool
    where
        D: PartialEq,
    {
        match self.search(&key) {
            Search::Found(handle) => self.nodes.get_mut(handle).update_payload(payload),
            Search::Vacant { parent, side } => {
                let handle = self.nodes.insert(TreeNode::leaf(key, payload, parent));
                match parent {
                    None => self.root = Some(handle),
                    Some(parent) => self.nodes.get_mut(parent).set_child(side, Some(handle)),
                }
                trace!(target: LOG_TARGET, "attached leaf {handle} under {parent:?}");
                true
            }
        }
    }

    /// Removes `key` and returns its entry, leaving no link to the freed node.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, Option<D>)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let target = self.find(key)?;
        let node = self.nodes.get(target);
        let parent = node.parent();

        if node.is_leaf() {
            trace!(target: LOG_TARGET, "detaching leaf {target}");
            self.relink(parent, target, None);
        } else if let Some(child) = node.only_child() {
            trace!(target: LOG_TARGET, "splicing {child} into the place of {target}");
            self.relink(parent, target, Some(child));
        } else {
            self.replace_with_neighbour(target);
        }

        Some(self.nodes.remove(target).into_entry())
    }
}
