use super::OSRBTree;
use crate::comparator::Natural;
use crate::raw::RawRBTree;

impl<K> OSRBTree<K, Natural> {
    /// Creates an empty tree ordered by [`Ord`] with room for at least `capacity`
    /// nodes before reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree: OSRBTree<u64> = OSRBTree::with_capacity(32);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<K, C> OSRBTree<K, C> {
    /// Creates an empty tree ordered by `comparator` with room for at least
    /// `capacity` nodes before reallocating.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        OSRBTree {
            raw: RawRBTree::with_capacity(capacity, comparator),
        }
    }

    /// Returns the number of nodes the tree can hold without reallocating.
    ///
    /// Slots freed by removals are reused before the storage grows.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
