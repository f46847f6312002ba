use std::collections::BTreeMap;

use bst_arena::{DuplicatePolicy, OrderedTree, TreeConfig, TreeError};
use proptest::{
    collection::{btree_map, vec},
    prelude::*,
};
use test_strategy::proptest;

/// One step of a mixed workload: insert `(key, key * 10)` or remove `key`.
#[derive(Debug, Clone, Copy)]
enum Op {
    Insert(i32),
    Remove(i32),
}

fn ops(size: usize) -> impl Strategy<Value = Vec<Op>> {
    vec(
        prop_oneof![
            (0i32..64).prop_map(Op::Insert),
            (0i32..64).prop_map(Op::Remove),
        ],
        0..size,
    )
}

fn entries() -> impl Strategy<Value = BTreeMap<i32, i64>> {
    btree_map(any::<i32>(), any::<i64>(), 0..128)
}

fn build(entries: &BTreeMap<i32, i64>, order: &[usize]) -> OrderedTree<i32, i64> {
    let pairs: Vec<_> = entries.iter().collect();
    let mut tree = OrderedTree::new();
    for &i in order {
        let (&key, &value) = pairs[i];
        tree.insert(key, value).unwrap();
    }
    tree
}

/// Insertion order drawn from a shuffle so the trees are not always chains.
fn shuffled(len: usize) -> impl Strategy<Value = Vec<usize>> {
    Just((0..len).collect::<Vec<_>>()).prop_shuffle()
}

fn tree_and_entries() -> impl Strategy<Value = (BTreeMap<i32, i64>, OrderedTree<i32, i64>)> {
    entries().prop_flat_map(|entries| {
        let len = entries.len();
        (Just(entries), shuffled(len))
            .prop_map(|(entries, order)| {
                let tree = build(&entries, &order);
                (entries, tree)
            })
    })
}

fn sorted(mut values: Vec<i64>) -> Vec<i64> {
    values.sort_unstable();
    values
}

#[proptest]
fn find_returns_every_inserted_value(
    #[strategy(tree_and_entries())] input: (BTreeMap<i32, i64>, OrderedTree<i32, i64>),
) {
    let (entries, tree) = input;

    prop_assert_eq!(tree.len(), entries.len());
    for (key, value) in &entries {
        prop_assert_eq!(tree.find(key), Ok(value));
    }
}

#[proptest]
fn in_order_matches_sorted_keys(
    #[strategy(tree_and_entries())] input: (BTreeMap<i32, i64>, OrderedTree<i32, i64>),
) {
    let (entries, tree) = input;

    let expected: Vec<&i64> = entries.values().collect();
    prop_assert_eq!(tree.dfs_in_order(), expected);
    prop_assert!(tree.is_bst());
}

#[proptest]
fn invariants_hold_after_every_mutation(#[strategy(ops(256))] ops: Vec<Op>) {
    let mut tree = OrderedTree::new();
    let mut model = BTreeMap::new();

    for op in ops {
        match op {
            Op::Insert(key) => {
                prop_assert_eq!(tree.insert(key, key * 10), Ok(model.insert(key, key * 10)));
            }
            Op::Remove(key) => match model.remove(&key) {
                Some(value) => prop_assert_eq!(tree.remove(&key), Ok(value)),
                None => prop_assert_eq!(tree.remove(&key), Err(TreeError::KeyNotFound)),
            },
        }

        prop_assert!(tree.is_bst());
        prop_assert_eq!(tree.len(), model.len());
        prop_assert_eq!(tree.keys_in_order(), model.keys().collect::<Vec<_>>());
    }
}

#[proptest]
fn removed_key_is_not_found(
    #[strategy(tree_and_entries())] input: (BTreeMap<i32, i64>, OrderedTree<i32, i64>),
    pick: prop::sample::Index,
) {
    let (entries, mut tree) = input;
    prop_assume!(!entries.is_empty());

    let keys: Vec<i32> = entries.keys().copied().collect();
    let key = *pick.get(&keys);
    prop_assert_eq!(tree.remove(&key), Ok(entries[&key]));
    prop_assert_eq!(tree.find(&key), Err(TreeError::KeyNotFound));
    prop_assert_eq!(tree.len(), entries.len() - 1);
    prop_assert!(tree.is_bst());
}

#[proptest]
fn removing_missing_key_changes_nothing(
    #[strategy(tree_and_entries())] input: (BTreeMap<i32, i64>, OrderedTree<i32, i64>),
    probe: i32,
) {
    let (entries, mut tree) = input;
    prop_assume!(!entries.contains_key(&probe));

    let before: Vec<i64> = tree.dfs_in_order().into_iter().copied().collect();
    prop_assert_eq!(tree.remove(&probe), Err(TreeError::KeyNotFound));
    let after: Vec<i64> = tree.dfs_in_order().into_iter().copied().collect();
    prop_assert_eq!(before, after);
}

#[proptest]
fn traversals_are_permutations(
    #[strategy(tree_and_entries())] input: (BTreeMap<i32, i64>, OrderedTree<i32, i64>),
) {
    let (entries, tree) = input;
    let expected = sorted(entries.values().copied().collect());

    for values in [
        tree.dfs_in_order(),
        tree.dfs_pre_order(),
        tree.dfs_post_order(),
        tree.bfs(),
    ] {
        prop_assert_eq!(values.len(), entries.len());
        prop_assert_eq!(sorted(values.into_iter().copied().collect()), expected.clone());
    }
}

#[proptest]
fn height_is_bounded_by_len(
    #[strategy(tree_and_entries())] input: (BTreeMap<i32, i64>, OrderedTree<i32, i64>),
) {
    let (entries, tree) = input;
    prop_assume!(!entries.is_empty());

    let height = tree.height();
    prop_assert!(height < entries.len());
    // a binary tree of height h holds at most 2^(h+1) - 1 nodes
    prop_assert!(entries.len() < 1usize << (height + 1).min(63));
}

#[proptest]
fn sorted_insertion_degenerates_to_chain(#[strategy(1usize..300)] n: usize) {
    let mut tree = OrderedTree::new();
    for key in 0..n {
        tree.insert(key, key).unwrap();
    }
    prop_assert_eq!(tree.height(), n - 1);
}

#[proptest]
fn kth_largest_bounds(
    #[strategy(tree_and_entries())] input: (BTreeMap<i32, i64>, OrderedTree<i32, i64>),
) {
    let (entries, tree) = input;
    let n = entries.len();
    prop_assume!(n > 0);

    let max = entries.values().last().unwrap();
    let min = entries.values().next().unwrap();
    prop_assert_eq!(tree.find_kth_largest_value(1), Ok(max));
    prop_assert_eq!(tree.find_kth_largest_value(n), Ok(min));
    prop_assert_eq!(
        tree.find_kth_largest_value(n + 1),
        Err(TreeError::IndexOutOfRange { k: n + 1, len: n })
    );
}

#[proptest]
fn rejecting_duplicates_keeps_first_value(#[strategy(vec(0i32..16, 0..64))] keys: Vec<i32>) {
    let config = TreeConfig::default().with_duplicates(DuplicatePolicy::Reject);
    let mut tree = OrderedTree::with_config(config);
    let mut model = BTreeMap::new();

    for (i, key) in keys.into_iter().enumerate() {
        let result = tree.insert(key, i);
        if model.contains_key(&key) {
            prop_assert_eq!(result, Err(TreeError::DuplicateKey));
        } else {
            model.insert(key, i);
            prop_assert_eq!(result, Ok(None));
        }
    }

    prop_assert_eq!(tree.dfs_in_order(), model.values().collect::<Vec<_>>());
}

#[proptest]
fn allow_right_keeps_every_copy(#[strategy(vec(0i32..8, 0..64))] keys: Vec<i32>) {
    let config = TreeConfig::default().with_duplicates(DuplicatePolicy::AllowRight);
    let mut tree = OrderedTree::with_config(config);
    for &key in &keys {
        tree.insert(key, key).unwrap();
    }

    let mut expected = keys.clone();
    expected.sort_unstable();
    prop_assert_eq!(tree.keys_in_order().into_iter().copied().collect::<Vec<_>>(), expected);
    prop_assert!(tree.is_bst());

    for key in keys {
        prop_assert_eq!(tree.remove(&key), Ok(key));
        prop_assert!(tree.is_bst());
    }
    prop_assert!(tree.is_empty());
}

#[test]
fn scenario_from_sample_keys() {
    let mut tree = OrderedTree::new();
    for key in [5, 3, 8, 1, 4, 7, 9] {
        tree.insert(key, key).unwrap();
    }

    assert_eq!(tree.height(), 2);
    assert_eq!(tree.dfs_in_order(), vec![&1, &3, &4, &5, &7, &8, &9]);

    tree.remove(&3).unwrap();
    assert_eq!(tree.dfs_in_order(), vec![&1, &4, &5, &7, &8, &9]);
    assert_eq!(tree.find(&8), Ok(&8));
    assert_eq!(tree.find_kth_largest_value(2), Ok(&8));
}
