//! A mutable, unbalanced BST ordered by a key function. Values are compared through a key
//! extracted from each value (the value itself by default), equal keys are sent to the right so
//! duplicates can be stored side by side, and nothing ever rotates: the shape of the tree is
//! purely a function of insertion order. [`OrderedTree::min_max_height`] and
//! [`OrderedTree::is_balanced`] are there to observe that shape, not to correct it.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{OrderedTree, TreeError};
//!
//! let mut tree = OrderedTree::new([50, 30, 70, 60, 80, 65]).unwrap();
//! assert_eq!(tree.in_order(), [&30, &50, &60, &65, &70, &80]);
//!
//! // Removing the root promotes its in-order successor.
//! assert_eq!(tree.remove_value(&50), Ok(50));
//! assert_eq!(tree.root(), Some(&60));
//! assert!(tree.is_valid());
//!
//! // Removing something that isn't there is an error and changes nothing.
//! assert_eq!(tree.remove_value(&50), Err(TreeError::NotFound));
//! assert_eq!(tree.len(), 5);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::mem;

use tracing::{debug, trace};

use crate::error::TreeError;
use crate::util::RemovalCase;

type Link<V> = Option<Box<Node<V>>>;

/// A Binary Search Tree holding values of type `V` ordered by keys of type `K`, which `F`
/// extracts from each value.
///
/// For every node, every key in its left subtree is less than the node's key and every key in
/// its right subtree is greater than or equal to it.
pub struct OrderedTree<V, K = V, F = fn(&V) -> K> {
    root: Link<V>,
    len: usize,
    key_fn: F,
    _key: PhantomData<fn() -> K>,
}

fn identity<V: Clone>(value: &V) -> V {
    value.clone()
}

impl<V> OrderedTree<V>
where
    V: Clone + Ord,
{
    /// Builds a tree whose values are their own keys. The first value becomes the root and the
    /// rest are inserted one at a time in order.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidArgument`] if `values` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree = OrderedTree::new([2, 1, 3]).unwrap();
    /// assert_eq!(tree.root(), Some(&2));
    /// assert_eq!(tree.in_order(), [&1, &2, &3]);
    /// ```
    pub fn new<I>(values: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = V>,
    {
        Self::with_key(values, identity)
    }
}

impl<V, K, F> OrderedTree<V, K, F> {
    fn empty(key_fn: F) -> Self {
        Self {
            root: None,
            len: 0,
            key_fn,
            _key: PhantomData,
        }
    }

    /// Whether every value has been removed.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of values in the tree, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The value stored at the root, if any.
    pub fn root(&self) -> Option<&V> {
        self.root.as_ref().map(|root| &root.value)
    }

    /// Drops every node. The tree stays usable: the next insert seeds a new root.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new([1, 2, 3]).unwrap();
    /// tree.clear();
    /// assert!(tree.is_empty());
    ///
    /// tree.insert(7);
    /// assert_eq!(tree.root(), Some(&7));
    /// ```
    pub fn clear(&mut self) {
        // Explicit stack: a list shaped tree would overflow the recursive `Box` drop.
        let mut stack: Vec<Box<Node<V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
    }

    /// Every value in ascending key order: left subtree, then the node, then the right subtree.
    /// The whole list is built on each call.
    pub fn in_order(&self) -> Vec<&V> {
        let mut values = Vec::with_capacity(self.len);
        // Nodes whose left subtree is being visited.
        let mut stack = Vec::new();
        let mut link = self.root.as_deref();
        loop {
            while let Some(node) = link {
                stack.push(node);
                link = node.left.as_deref();
            }
            let Some(node) = stack.pop() else {
                break;
            };
            values.push(&node.value);
            link = node.right.as_deref();
        }
        values
    }

    /// Returns the depth of the shallowest and of the deepest node reached by following children
    /// from the root, where a missing child counts as depth 0. So a node with only one child is
    /// at the bottom of a "short" path. An empty tree has no node to measure and reports `(0, 0)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree = OrderedTree::new([2, 1, 3]).unwrap();
    /// assert_eq!(tree.min_max_height(), (2, 2));
    ///
    /// let tree = OrderedTree::new([1, 2, 3]).unwrap();
    /// assert_eq!(tree.min_max_height(), (1, 3));
    /// ```
    pub fn min_max_height(&self) -> (usize, usize) {
        // Post-order walk: a node is pushed again as `expanded` under its children, and by the
        // time it comes back up their heights sit on top of `heights`.
        let mut pending: Vec<(&Node<V>, bool)> =
            self.root.as_deref().map(|root| (root, false)).into_iter().collect();
        let mut heights: Vec<(usize, usize)> = Vec::new();
        while let Some((node, expanded)) = pending.pop() {
            if !expanded {
                pending.push((node, true));
                pending.extend(node.right.as_deref().map(|right| (right, false)));
                pending.extend(node.left.as_deref().map(|left| (left, false)));
                continue;
            }

            let (right_min, right_max) = node
                .right
                .as_ref()
                .and_then(|_| heights.pop())
                .unwrap_or((0, 0));
            let (left_min, left_max) = node
                .left
                .as_ref()
                .and_then(|_| heights.pop())
                .unwrap_or((0, 0));
            heights.push((1 + left_min.min(right_min), 1 + left_max.max(right_max)));
        }
        heights.pop().unwrap_or((0, 0))
    }

    /// Whether the two heights from [`min_max_height`][Self::min_max_height] are at most one
    /// apart. This is a single global measure: one short branch anywhere is enough to fail it,
    /// even if every subtree on its own would pass an AVL style check.
    pub fn is_balanced(&self) -> bool {
        let (min, max) = self.min_max_height();
        max - min <= 1
    }
}

impl<V, K, F> OrderedTree<V, K, F>
where
    K: Ord,
    F: Fn(&V) -> K,
{
    /// Builds a tree ordered by `key_fn`. The first value becomes the root and the rest are
    /// inserted one at a time in order, so the order of `values` decides the shape of the tree
    /// but not its contents.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidArgument`] if `values` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let words = ["pear", "fig", "banana"];
    /// let tree = OrderedTree::with_key(words, |word: &&str| word.len()).unwrap();
    ///
    /// assert_eq!(tree.in_order(), [&"fig", &"pear", &"banana"]);
    /// assert!(tree.has_key(&6));
    /// assert!(tree.has_value(&"kiwi"));
    /// ```
    pub fn with_key<I>(values: I, key_fn: F) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = V>,
    {
        let mut tree = Self::empty(key_fn);
        tree.set_values(values)?;
        Ok(tree)
    }

    /// Replaces the contents of the tree with a fresh build from `values`, exactly as
    /// [`with_key`][Self::with_key] would do.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidArgument`] if `values` is empty, in which case the tree is left as it
    /// was.
    pub fn set_values<I>(&mut self, values: I) -> Result<(), TreeError>
    where
        I: IntoIterator<Item = V>,
    {
        let mut values = values.into_iter();
        let Some(first) = values.next() else {
            debug!("refusing to build a tree from an empty sequence");
            return Err(TreeError::InvalidArgument);
        };

        self.clear();
        self.insert(first);
        for value in values {
            self.insert(value);
        }
        Ok(())
    }

    /// Inserts `value` as a new leaf. Values whose key is less than a node's go left, everything
    /// else (equal keys included) goes right. Nothing is rebalanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new([5]).unwrap();
    /// tree.insert(5);
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.len(), 3);
    /// assert_eq!(tree.in_order(), [&1, &5, &5]);
    /// ```
    pub fn insert(&mut self, value: V) {
        let key = (self.key_fn)(&value);
        let mut link = &mut self.root;
        let mut depth = 0;
        while let Some(node) = link {
            link = if key < (self.key_fn)(&node.value) {
                &mut node.left
            } else {
                &mut node.right
            };
            depth += 1;
        }

        *link = Some(Node::new_boxed(value));
        self.len += 1;
        trace!(depth, len = self.len, "inserted value");
    }

    /// Whether some node's key equals `key`.
    pub fn has_key(&self, key: &K) -> bool {
        let mut link = &self.root;
        while let Some(node) = link {
            match key.cmp(&(self.key_fn)(&node.value)) {
                Ordering::Less => link = &node.left,
                Ordering::Equal => return true,
                Ordering::Greater => link = &node.right,
            }
        }
        false
    }

    /// Whether some node's key equals the key of `value`. The values themselves are never
    /// compared, so any value with the same key matches.
    pub fn has_value(&self, value: &V) -> bool {
        self.has_key(&(self.key_fn)(value))
    }

    /// Removes the first node found on the way down from the root whose key equals `key` and
    /// returns its value.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFound`] if no node has that key. The tree is untouched. Keys must be
    /// `Debug` so misses can be logged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{OrderedTree, TreeError};
    ///
    /// let mut tree = OrderedTree::with_key([(1, 'a'), (2, 'b')], |pair: &(u8, char)| pair.0).unwrap();
    ///
    /// assert_eq!(tree.remove_key(&2), Ok((2, 'b')));
    /// assert_eq!(tree.remove_key(&2), Err(TreeError::NotFound));
    /// ```
    pub fn remove_key(&mut self, key: &K) -> Result<V, TreeError>
    where
        K: fmt::Debug,
    {
        let Some((value, case, depth)) = Node::remove(&mut self.root, key, &self.key_fn) else {
            debug!(?key, len = self.len, "no node to remove");
            return Err(TreeError::NotFound);
        };

        self.len -= 1;
        trace!(?key, %case, depth, len = self.len, "removed value");
        Ok(value)
    }

    /// Removes the node holding the key of `value`, see [`remove_key`][Self::remove_key].
    ///
    /// A leaf is simply detached and a node with a single child is replaced by that child. A node
    /// with two children takes the value of its in-order successor (the leftmost node of its
    /// right subtree) and the successor's right subtree moves up into the successor's place.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFound`] if no node has that key.
    pub fn remove_value(&mut self, value: &V) -> Result<V, TreeError>
    where
        K: fmt::Debug,
    {
        let key = (self.key_fn)(value);
        self.remove_key(&key)
    }

    /// Whether [`in_order`][Self::in_order] is sorted by key. This only checks the order of the
    /// values, not the shape of the tree.
    pub fn is_valid(&self) -> bool {
        let keys: Vec<K> = self
            .in_order()
            .into_iter()
            .map(|value| (self.key_fn)(value))
            .collect();
        keys.windows(2).all(|pair| pair[0] <= pair[1])
    }
}

impl<V, K, F> Drop for OrderedTree<V, K, F> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<V, K, F> Clone for OrderedTree<V, K, F>
where
    V: Clone,
    F: Clone,
{
    fn clone(&self) -> Self {
        let mut root = None;
        {
            // Each original node paired with the empty slot its copy goes into.
            let mut stack: Vec<(&Node<V>, &mut Link<V>)> = Vec::new();
            if let Some(original) = self.root.as_deref() {
                stack.push((original, &mut root));
            }
            while let Some((original, slot)) = stack.pop() {
                let copy = slot.insert(Node::new_boxed(original.value.clone()));
                if let Some(left) = original.left.as_deref() {
                    stack.push((left, &mut copy.left));
                }
                if let Some(right) = original.right.as_deref() {
                    stack.push((right, &mut copy.right));
                }
            }
        }

        Self {
            root,
            len: self.len,
            key_fn: self.key_fn.clone(),
            _key: PhantomData,
        }
    }
}

impl<V, K, F> fmt::Debug for OrderedTree<V, K, F>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedTree")
            .field("len", &self.len)
            .field("root", &self.root())
            .field("values", &self.in_order())
            .finish()
    }
}

impl<V, K, F> Extend<V> for OrderedTree<V, K, F>
where
    K: Ord,
    F: Fn(&V) -> K,
{
    fn extend<I: IntoIterator<Item = V>>(&mut self, values: I) {
        for value in values {
            self.insert(value);
        }
    }
}

struct Node<V> {
    value: V,
    left: Link<V>,
    right: Link<V>,
}

impl<V> Node<V> {
    fn new_boxed(value: V) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
        })
    }

    /// Walks down from `link` to the slot holding the given key and replaces that node with
    /// whatever should take its place. Also returns how many levels below `link` it was.
    fn remove<K, F>(
        mut link: &mut Link<V>,
        key: &K,
        key_fn: &F,
    ) -> Option<(V, RemovalCase, usize)>
    where
        K: Ord,
        F: Fn(&V) -> K,
    {
        let mut depth = 0;
        loop {
            link = match key.cmp(&key_fn(&link.as_ref()?.value)) {
                Ordering::Less => &mut link.as_mut()?.left,
                Ordering::Equal => break,
                Ordering::Greater => &mut link.as_mut()?.right,
            };
            depth += 1;
        }

        let (value, replacement, case) = link.take()?.unlink();
        *link = replacement;
        Some((value, case, depth))
    }

    /// Takes this node apart, returning its value and the subtree that should take its place.
    fn unlink(mut self: Box<Self>) -> (V, Link<V>, RemovalCase) {
        match (self.left.take(), self.right.take()) {
            (None, None) => (self.value, None, RemovalCase::Leaf),
            (Some(child), None) | (None, Some(child)) => {
                (self.value, Some(child), RemovalCase::SingleChild)
            }
            (Some(left), Some(mut right)) => match right.pop_leftmost() {
                // The right child is the successor. It moves up and adopts our left subtree.
                None => {
                    right.left = Some(left);
                    (self.value, Some(right), RemovalCase::RightChild)
                }
                Some(successor) => {
                    let value = mem::replace(&mut self.value, successor);
                    self.left = Some(left);
                    self.right = Some(right);
                    (value, Some(self), RemovalCase::Successor)
                }
            },
        }
    }

    /// Removes the leftmost node below this node's left child, splicing its right subtree into
    /// its place. Returns `None` when there is no left child.
    fn pop_leftmost(&mut self) -> Option<V> {
        let mut link = &mut self.left;
        while link.as_ref()?.left.is_some() {
            link = &mut link.as_mut()?.left;
        }

        let Node { value, right, .. } = *link.take()?;
        *link = right;
        Some(value)
    }
}
