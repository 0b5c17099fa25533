//! Errors reported by [`OrderedTree`][crate::OrderedTree].

use thiserror::Error;

/// The ways an [`OrderedTree`][crate::OrderedTree] operation can fail.
///
/// # Examples
///
/// ```
/// use ordered_tree::{OrderedTree, TreeError};
///
/// let empty: Vec<i32> = Vec::new();
/// assert_eq!(OrderedTree::new(empty).unwrap_err(), TreeError::InvalidArgument);
///
/// let mut tree = OrderedTree::new([1]).unwrap();
/// assert_eq!(tree.remove_value(&2), Err(TreeError::NotFound));
/// assert_eq!(TreeError::NotFound.to_string(), "value is not present in the tree");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A tree was built from an empty sequence. The first value seeds the root so at least one
    /// is required.
    #[error("cannot build a tree from an empty sequence of values")]
    InvalidArgument,
    /// No node holds the key that was asked to be removed.
    #[error("value is not present in the tree")]
    NotFound,
}
