use core::ops::Index;

use super::{NodeHandle, OSRBTree};
use crate::Rank;
use crate::comparator::Comparator;

impl<K, C> OSRBTree<K, C> {
    /// Returns the node at zero-based position `rank` in sorted order.
    ///
    /// # Panics
    ///
    /// Panics if `rank >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([30, 10, 20]);
    /// assert_eq!(tree.key(tree.select(1)), &20);
    /// ```
    #[must_use]
    pub fn select(&self, rank: usize) -> NodeHandle {
        match self.raw.select(rank) {
            Some(handle) => NodeHandle::from_raw(handle),
            None => panic!("`OSRBTree::select()` - rank {rank} out of bounds for length {}", self.len()),
        }
    }

    /// Returns the key at zero-based position `rank` in sorted order, or `None`
    /// if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from(["b", "a", "c"]);
    /// assert_eq!(tree.get_by_rank(0), Some(&"a"));
    /// assert_eq!(tree.get_by_rank(3), None);
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&K> {
        self.raw.select(rank).map(|handle| self.raw.key(handle))
    }

    /// Returns the zero-based position of `node` in sorted order.
    ///
    /// # Panics
    ///
    /// Panics if `node` is stale.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::from([5, 1, 9]);
    /// let node = tree.insert(3);
    /// assert_eq!(tree.rank_of(node), 1);
    /// ```
    #[must_use]
    pub fn rank_of(&self, node: NodeHandle) -> usize {
        self.raw.rank_of_node(node.raw())
    }
}

impl<K, C: Comparator<K>> OSRBTree<K, C> {
    /// Returns the number of stored keys strictly less than `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([1, 2, 2, 3]);
    /// assert_eq!(tree.rank_less(&2), 1);
    /// assert_eq!(tree.rank_less(&0), 0);
    /// assert_eq!(tree.rank_less(&4), 4);
    /// ```
    #[must_use]
    pub fn rank_less(&self, key: &K) -> usize {
        self.raw.rank_less(key)
    }

    /// Returns the number of stored keys less than or equal to `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([1, 2, 2, 3]);
    /// assert_eq!(tree.rank_less_eq(&2), 3);
    /// ```
    #[must_use]
    pub fn rank_less_eq(&self, key: &K) -> usize {
        self.raw.rank_less_eq(key)
    }
}

/// Indexes into the tree by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTree, Rank};
///
/// let tree = OSRBTree::from([20, 10]);
/// assert_eq!(tree[Rank(0)], 10);
/// ```
impl<K, C> Index<Rank> for OSRBTree<K, C> {
    type Output = K;

    fn index(&self, rank: Rank) -> &Self::Output {
        match self.get_by_rank(rank.0) {
            Some(key) => key,
            None => panic!("`OSRBTree::index()` - rank {} out of bounds for length {}", rank.0, self.len()),
        }
    }
}
