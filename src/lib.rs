//! This crate exposes [`OrderedTree`], a plain mutable Binary Search Tree (BST) ordered by a
//! user supplied key function.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores the value that
//! was inserted and will sometimes have child `Node`s. The invariants of this
//! BST are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have a key less
//!    than its own key.
//! 2. For every `Node`, all the `Node`s in its right subtree have a key greater
//!    than or equal to its own key. Values with equal keys are all kept.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Because equal keys always continue to the right, values sharing a key end up
//! on one rightward chain in the order they were inserted, and a lookup or
//! removal stops at the first of them it meets on the way down. Nothing is ever
//! rotated, so insertion order alone decides how deep that way down is: sorted
//! input builds a single chain as long as the tree itself. Every walk over the
//! tree (traversal, heights, copies, drops) uses an explicit stack, so such
//! chains cost time but never call stack.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod ordered;
mod util;

pub use error::TreeError;
pub use ordered::OrderedTree;
