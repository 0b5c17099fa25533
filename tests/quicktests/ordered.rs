use ordered_tree::{OrderedTree, TreeError};

use std::collections::HashSet;

use crate::Op;

/// Applies a set of operations to a tree and to a plain sorted `Vec`.
/// This way we can ensure that after a random smattering of inserts
/// and removals we have the same values in both, and that every removal
/// either succeeds or fails exactly when the model says it should.
fn do_ops(ops: &[Op<i8>], tree: &mut OrderedTree<i8>, model: &mut Vec<i8>) -> bool {
    for op in ops {
        match op {
            Op::Insert(x) => {
                tree.insert(*x);
                let pos = model.partition_point(|y| y <= x);
                model.insert(pos, *x);
            }
            Op::Remove(x) => match model.iter().position(|y| y == x) {
                Some(pos) => {
                    model.remove(pos);
                    if tree.remove_value(x) != Ok(*x) {
                        return false;
                    }
                }
                None => {
                    if tree.remove_value(x) != Err(TreeError::NotFound) {
                        return false;
                    }
                }
            },
            Op::Check => {
                if !tree.in_order().into_iter().eq(model.iter()) {
                    return false;
                }
            }
        }

        if !tree.is_valid() || tree.len() != model.len() || tree.is_empty() != model.is_empty() {
            return false;
        }
    }

    true
}

#[quickcheck]
fn fuzz_multiple_operations_i8(first: i8, ops: Vec<Op<i8>>) -> bool {
    let mut tree = OrderedTree::new([first]).unwrap();
    let mut model = vec![first];

    do_ops(&ops, &mut tree, &mut model) && tree.in_order().into_iter().eq(model.iter())
}

#[quickcheck]
fn in_order_is_sorted_input(xs: Vec<i8>) -> bool {
    match OrderedTree::new(xs.clone()) {
        Ok(tree) => {
            let mut sorted = xs;
            sorted.sort_unstable();
            tree.is_valid() && tree.in_order().into_iter().eq(sorted.iter())
        }
        Err(e) => xs.is_empty() && e == TreeError::InvalidArgument,
    }
}

/// Equal keys always go right so, without removals, values sharing a key come out of the
/// traversal in the order they went in.
#[quickcheck]
fn equal_keys_keep_insertion_order(first: (i8, u8), xs: Vec<(i8, u8)>) -> bool {
    let mut values = vec![first];
    values.extend(xs);
    let tree = OrderedTree::with_key(values.clone(), |pair: &(i8, u8)| pair.0).unwrap();

    values.sort_by_key(|pair| pair.0);
    tree.in_order().into_iter().eq(values.iter())
}

#[quickcheck]
fn contains(first: i8, xs: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new([first]).unwrap();
    tree.extend(xs.iter().copied());

    tree.has_value(&first) && xs.iter().all(|x| tree.has_key(x))
}

#[quickcheck]
fn contains_not(first: i8, xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new([first]).unwrap();
    tree.extend(xs.iter().copied());

    let mut added: HashSet<_> = xs.into_iter().collect();
    added.insert(first);
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.has_key(x))
}

/// Removing every value, in an order picked by quickcheck, empties the tree and each step in
/// between stays sorted and one value shorter.
#[quickcheck]
fn remove_everything(first: i8, xs: Vec<i8>, picks: Vec<usize>) -> bool {
    let mut tree = OrderedTree::new([first]).unwrap();
    tree.extend(xs.iter().copied());

    let mut remaining = xs;
    remaining.push(first);
    let mut picks = picks.into_iter();
    while !remaining.is_empty() {
        let pick = picks.next().unwrap_or(0) % remaining.len();
        let value = remaining.swap_remove(pick);

        let before = tree.in_order().len();
        if tree.remove_value(&value) != Ok(value) {
            return false;
        }
        if tree.in_order().len() != before - 1 || !tree.is_valid() {
            return false;
        }
    }

    tree.is_empty() && tree.root().is_none() && tree.min_max_height() == (0, 0)
}

#[quickcheck]
fn heights_are_consistent(first: i8, xs: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new([first]).unwrap();
    tree.extend(xs);
    let (min, max) = tree.min_max_height();

    1 <= min && min <= max && max <= tree.len() && tree.is_balanced() == (max - min <= 1)
}
