use std::fmt;

/// Which shape of node a removal had to unlink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RemovalCase {
    /// The node had no children and was simply detached.
    Leaf,
    /// The node had one child which took its place.
    SingleChild,
    /// The node had two children and its right child, having no left child, was its successor.
    RightChild,
    /// The node had two children and its successor was found by descending left from the right
    /// child.
    Successor,
}

impl fmt::Display for RemovalCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Leaf => "leaf",
            Self::SingleChild => "single child",
            Self::RightChild => "right child successor",
            Self::Successor => "leftmost successor",
        };
        f.write_str(name)
    }
}
