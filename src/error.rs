use thiserror::Error;

use crate::NodeHandle;

/// A broken structural property found by
/// [`OSRBTree::check_invariants`](crate::OSRBTree::check_invariants).
///
/// None of these can be produced through the public API with a consistent
/// comparator; seeing one means the comparator is not a total order or the
/// tree itself has a bug.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum InvariantViolation {
    /// The root is red.
    #[error("root {node:?} is red")]
    RedRoot {
        /// The root.
        node: NodeHandle,
    },

    /// A red node has a red child.
    #[error("red node {node:?} has a red child")]
    RedChildOfRed {
        /// The red parent.
        node: NodeHandle,
    },

    /// The two subtrees of a node have different black heights.
    #[error("black height differs below {node:?}: left {left}, right {right}")]
    BlackHeightMismatch {
        /// The node whose subtrees disagree.
        node: NodeHandle,
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },

    /// A stored subtree size disagrees with the subtree it describes.
    #[error("subtree size of {node:?} is {recorded}, expected {actual}")]
    SizeMismatch {
        /// The node with the stale counter.
        node: NodeHandle,
        /// The stored counter.
        recorded: usize,
        /// The number of nodes actually below (and including) `node`.
        actual: usize,
    },

    /// A child does not point back at its parent, or the root has a parent.
    #[error("parent link of {node:?} is inconsistent")]
    ParentLink {
        /// The node whose parent link is wrong.
        node: NodeHandle,
    },

    /// An in-order neighbour compares greater than the node that follows it.
    #[error("{node:?} is ordered before a smaller key")]
    OutOfOrder {
        /// The earlier of the two misordered nodes.
        node: NodeHandle,
    },

    /// The number of reachable nodes differs from the number allocated.
    #[error("{reachable} nodes reachable from the root, {allocated} allocated")]
    LengthMismatch {
        /// Nodes found by walking from the root.
        reachable: usize,
        /// Nodes held by the tree's storage.
        allocated: usize,
    },
}
