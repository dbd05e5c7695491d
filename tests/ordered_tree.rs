use std::collections::BTreeMap;

use keyed_trees::{NodeView, OrderedTree, TreeNodeRef};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

fn key_strategy() -> impl Strategy<Value = i64> {
    // Narrow enough that inserts and removes collide often.
    -500i64..500i64
}

fn payload_strategy() -> impl Strategy<Value = Option<u8>> {
    proptest::option::of(0u8..4)
}

/// Walks the whole tree through its node views, checking key order and that
/// every child points back at its parent. Returns the number of nodes seen.
fn assert_search_tree<K: Ord + std::fmt::Debug, D>(tree: &OrderedTree<K, D>) -> usize {
    let Some(root) = tree.root() else {
        assert!(tree.is_empty());
        return 0;
    };
    assert!(root.parent().is_none(), "root has a parent");

    let mut seen = 0;
    let mut pending: Vec<(TreeNodeRef<'_, K, D>, Option<&K>, Option<&K>)> = vec![(root, None, None)];
    while let Some((node, low, high)) = pending.pop() {
        seen += 1;
        let key = node.key();
        assert!(low.is_none_or(|low| low < key), "{key:?} not above {low:?}");
        assert!(high.is_none_or(|high| key < high), "{key:?} not below {high:?}");
        for (child, child_low, child_high) in [(node.left(), low, Some(key)), (node.right(), Some(key), high)] {
            if let Some(child) = child {
                let parent = child.parent().expect("child without parent");
                assert_eq!(parent.key(), key, "parent link of {:?}", child.key());
                pending.push((child, child_low, child_high));
            }
        }
    }
    assert_eq!(seen, tree.len());
    seen
}

fn keys<K: Copy, D>(tree: &OrderedTree<K, D>) -> Vec<K> {
    tree.in_order().map(|(key, _)| *key).collect()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(i64, Option<u8>),
    Remove(i64),
    Get(i64),
    ContainsKey(i64),
    ContainsKeys(Vec<i64>),
    RemoveKeys(Vec<i64>),
}

fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        6 => (key_strategy(), payload_strategy()).prop_map(|(k, p)| TreeOp::Insert(k, p)),
        4 => key_strategy().prop_map(TreeOp::Remove),
        2 => key_strategy().prop_map(TreeOp::Get),
        1 => key_strategy().prop_map(TreeOp::ContainsKey),
        1 => proptest::collection::vec(key_strategy(), 0..4).prop_map(TreeOp::ContainsKeys),
        1 => proptest::collection::vec(key_strategy(), 0..6).prop_map(TreeOp::RemoveKeys),
    ]
}

// ─── Randomized operations ───────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays random operations on both OrderedTree and BTreeMap, checking
    /// results and the search tree shape after every step.
    #[test]
    fn tree_ops_match_btreemap(ops in proptest::collection::vec(tree_op_strategy(), TEST_SIZE)) {
        let mut tree: OrderedTree<i64, u8> = OrderedTree::new();
        let mut model: BTreeMap<i64, Option<u8>> = BTreeMap::new();

        for op in &ops {
            match op {
                TreeOp::Insert(k, p) => {
                    let changed = model.insert(*k, *p) != Some(*p);
                    prop_assert_eq!(tree.insert(*k, *p), changed, "insert({}, {:?})", k, p);
                }
                TreeOp::Remove(k) => {
                    prop_assert_eq!(tree.remove(k), model.remove(k).is_some(), "remove({})", k);
                }
                TreeOp::Get(k) => {
                    prop_assert_eq!(tree.get(k), model.get(k).and_then(Option::as_ref), "get({})", k);
                }
                TreeOp::ContainsKey(k) => {
                    prop_assert_eq!(tree.contains_key(k), model.contains_key(k), "contains_key({})", k);
                }
                TreeOp::ContainsKeys(ks) => {
                    let all = ks.iter().all(|k| model.contains_key(k));
                    prop_assert_eq!(tree.contains_keys(ks), all, "contains_keys({:?})", ks);
                }
                TreeOp::RemoveKeys(ks) => {
                    let mut all = true;
                    for k in ks {
                        all &= model.remove(k).is_some();
                    }
                    prop_assert_eq!(tree.remove_keys(ks), all, "remove_keys({:?})", ks);
                }
            }
            assert_search_tree(&tree);
            prop_assert_eq!(tree.len(), model.len(), "len mismatch after {:?}", op);
        }

        let expected: Vec<(&i64, Option<&u8>)> = model.iter().map(|(k, p)| (k, p.as_ref())).collect();
        let actual: Vec<(&i64, Option<&u8>)> = tree.in_order().collect();
        prop_assert_eq!(actual, expected);
    }

    /// Heights follow the recursive definition 1 + max(left, right).
    #[test]
    fn height_matches_recursive_definition(keys in proptest::collection::vec(key_strategy(), 0..300)) {
        fn recursive_height<'a>(node: Option<TreeNodeRef<'a, i64, ()>>) -> usize {
            node.map_or(0, |node| 1 + recursive_height(node.left()).max(recursive_height(node.right())))
        }

        let tree: OrderedTree<i64, ()> = OrderedTree::from_keys(keys);
        prop_assert_eq!(tree.height(), recursive_height(tree.root()));
    }

    /// Removing every key, in any order, empties the tree.
    #[test]
    fn remove_all_in_random_order(keys in proptest::collection::vec(key_strategy(), 1..300), seed in any::<u64>()) {
        let mut tree: OrderedTree<i64, ()> = OrderedTree::from_keys(keys.iter().copied());
        let mut order: Vec<i64> = keys.clone();
        order.sort_unstable();
        order.dedup();
        // Deterministic shuffle.
        let mut x = seed | 1;
        for i in (1..order.len()).rev() {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            order.swap(i, (x >> 33) as usize % (i + 1));
        }

        for key in &order {
            prop_assert!(tree.remove(key));
            assert_search_tree(&tree);
        }
        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.height(), 0);
        prop_assert!(tree.root().is_none());
    }
}

// ─── Specific shapes ─────────────────────────────────────────────────────────

#[test]
fn insert_is_idempotent_per_payload() {
    let mut tree = OrderedTree::new();
    assert!(tree.insert(7, Some("a")));
    assert!(!tree.insert(7, Some("a")));
    assert_eq!(tree.len(), 1);

    assert!(tree.insert(7, Some("b")));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.get(&7), Some(&"b"));

    assert!(tree.insert(7, None));
    assert_eq!(tree.get_key_value(&7), Some((&7, None)));
}

#[test]
fn remove_node_with_one_child_keeps_the_rest() {
    let mut tree: OrderedTree<i32, ()> = OrderedTree::from_keys([5, 3, 8, 1, 4]);
    assert_eq!(tree.height(), 3);

    assert!(tree.remove(&3));
    assert_search_tree(&tree);
    for key in [5, 8, 1, 4] {
        assert!(tree.contains_key(&key), "{key} went missing");
    }
    assert!(!tree.contains_key(&3));
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.height(), 3);
}

#[test]
fn remove_root_with_two_children() {
    let mut tree: OrderedTree<i32, ()> = OrderedTree::from_keys([50, 30, 70, 20, 40, 60, 80]);
    assert!(tree.remove(&50));
    assert_search_tree(&tree);
    assert_eq!(keys(&tree), [20, 30, 40, 60, 70, 80]);
    assert_eq!(tree.height(), 3);
}

#[test]
fn remove_from_empty_tree() {
    let mut tree: OrderedTree<i32, String> = OrderedTree::new();
    assert!(!tree.remove(&1));
    assert_eq!(tree.remove_entry(&1), None);
    assert!(!tree.remove_keys([1, 2]));
    assert!(tree.is_empty());
}

#[test]
fn shallow_tree_only_loses_the_requested_key() {
    let mut tree: OrderedTree<i32, ()> = OrderedTree::from_keys([1]);
    assert!(!tree.remove(&2));
    assert_eq!(keys(&tree), [1]);

    let mut tree: OrderedTree<i32, ()> = OrderedTree::from_keys([2, 1, 3]);
    assert!(tree.remove(&1));
    assert_eq!(keys(&tree), [2, 3]);
}

#[test]
fn bulk_insert_reports_unchanged_keys() {
    let mut tree: OrderedTree<i32, ()> = OrderedTree::new();
    assert!(tree.insert_keys([4, 2, 6]));
    assert!(!tree.insert_keys([1, 2, 3]));
    assert_eq!(keys(&tree), [1, 2, 3, 4, 6]);
}

#[test]
fn bulk_remove_applies_present_keys() {
    let mut tree: OrderedTree<i32, ()> = OrderedTree::from_keys([4, 2, 6, 1]);
    assert!(!tree.remove_keys([2, 9, 6]));
    assert_eq!(keys(&tree), [1, 4]);
    assert!(tree.remove_keys(&[1, 4]));
    assert!(tree.is_empty());
}

#[test]
fn bulk_membership_needs_every_key() {
    let tree: OrderedTree<i32, ()> = OrderedTree::from_keys([4, 2, 6, 1]);
    assert!(tree.contains_keys([1, 6]));
    assert!(!tree.contains_keys([1, 9, 6]));
    assert!(!tree.contains_keys([9]));
    assert!(tree.contains_keys(Vec::<i32>::new()));

    let empty: OrderedTree<i32, ()> = OrderedTree::new();
    assert!(!empty.contains_keys(&[1]));
    assert!(empty.contains_keys(Vec::<i32>::new()));
}

#[test]
fn degenerate_tree_is_handled_without_recursion() {
    let mut tree: OrderedTree<u32, ()> = OrderedTree::with_capacity(20_000);
    assert!(tree.insert_keys(0..20_000));
    assert_eq!(tree.height(), 20_000);
    assert_eq!(tree.in_order().count(), 20_000);
    assert_eq!(tree.post_order().next(), Some((&19_999, None)));
    assert!(tree.remove(&0));
    assert_eq!(tree.root().map(|root| *root.key()), Some(1));
}

#[test]
fn first_and_last_entries() {
    let mut tree: OrderedTree<i32, char> = OrderedTree::new();
    assert_eq!(tree.first_key_value(), None);
    tree.extend([(5, Some('e')), (2, None), (9, Some('i'))]);
    assert_eq!(tree.first_key_value(), Some((&2, None)));
    assert_eq!(tree.last_key_value(), Some((&9, Some(&'i'))));
}

#[test]
fn borrowed_key_lookup() {
    let mut tree: OrderedTree<String, u32> = OrderedTree::new();
    tree.insert("beta".to_string(), Some(2));
    tree.insert("alpha".to_string(), Some(1));
    assert_eq!(tree.get("alpha"), Some(&1));
    assert!(tree.remove("beta"));
    assert!(!tree.contains_key("beta"));
}

#[test]
fn clone_and_clear_are_independent() {
    let mut tree: OrderedTree<i32, &str> = [(1, Some("one")), (2, None)].into_iter().collect();
    let copy = tree.clone();
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(format!("{copy:?}"), r#"{1: Some("one"), 2: None}"#);

    // Storage freed by `clear` is reused.
    assert!(tree.insert(3, None));
    assert_eq!(keys(&tree), [3]);
}
