//! Read-only access to the tree's shape, for renderers and audits.

use core::iter::FusedIterator;

use alloc::collections::VecDeque;

use super::{NodeHandle, OSRBTree};
use crate::color::Color;
use crate::raw::{Handle, RawRBTree};

/// A breadth-first iterator over the nodes of an `OSRBTree`.
///
/// Yields `(depth, node)` pairs, the root at depth 0, each level left to right.
///
/// This `struct` is created by the [`level_order`] method on [`OSRBTree`].
///
/// [`level_order`]: OSRBTree::level_order
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct LevelOrder<'a, K, C> {
    tree: &'a RawRBTree<K, C>,
    queue: VecDeque<(usize, Handle)>,
}

impl<K, C> OSRBTree<K, C> {
    /// Returns the root node, or `None` if the tree is empty.
    #[must_use]
    pub fn root(&self) -> Option<NodeHandle> {
        self.raw.root().map(NodeHandle::from_raw)
    }

    /// Returns the color of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is stale.
    #[must_use]
    pub fn color(&self, node: NodeHandle) -> Color {
        self.raw.color(node.raw())
    }

    /// Returns the left child of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is stale.
    #[must_use]
    pub fn left(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.raw.left(node.raw()).map(NodeHandle::from_raw)
    }

    /// Returns the right child of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is stale.
    #[must_use]
    pub fn right(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.raw.right(node.raw()).map(NodeHandle::from_raw)
    }

    /// Returns the parent of `node`, or `None` for the root.
    ///
    /// # Panics
    ///
    /// Panics if `node` is stale.
    #[must_use]
    pub fn parent(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.raw.parent(node.raw()).map(NodeHandle::from_raw)
    }

    /// Returns the number of nodes in the subtree rooted at `node`, itself included.
    ///
    /// # Panics
    ///
    /// Panics if `node` is stale.
    #[must_use]
    pub fn subtree_size(&self, node: NodeHandle) -> usize {
        self.raw.subtree_size(node.raw())
    }

    /// Walks the tree level by level.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Color, OSRBTree};
    ///
    /// let tree = OSRBTree::from([1, 2, 3]);
    /// let levels: Vec<(usize, i32, Color)> = tree
    ///     .level_order()
    ///     .map(|(depth, node)| (depth, *tree.key(node), tree.color(node)))
    ///     .collect();
    ///
    /// assert_eq!(levels, [(0, 2, Color::Black), (1, 1, Color::Red), (1, 3, Color::Red)]);
    /// ```
    pub fn level_order(&self) -> LevelOrder<'_, K, C> {
        LevelOrder {
            tree: &self.raw,
            queue: self.raw.root().map(|root| (0, root)).into_iter().collect(),
        }
    }
}

impl<K, C> Iterator for LevelOrder<'_, K, C> {
    type Item = (usize, NodeHandle);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, handle) = self.queue.pop_front()?;
        let node = self.tree.node(handle);
        self.queue.extend(node.left.map(|left| (depth + 1, left)));
        self.queue.extend(node.right.map(|right| (depth + 1, right)));
        Some((depth, NodeHandle::from_raw(handle)))
    }
}

impl<K, C> FusedIterator for LevelOrder<'_, K, C> {}
