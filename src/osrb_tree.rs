use core::fmt;
use core::iter::FusedIterator;

use alloc::vec::IntoIter as VecIntoIter;

use crate::comparator::{Comparator, Natural};
use crate::error::InvariantViolation;
use crate::raw::{Handle, RawRBTree};

mod capacity;
mod inspect;
mod order_statistic;

pub use inspect::LevelOrder;

/// An ordered multiset based on a red-black tree with order statistics.
///
/// Keys are ordered by a [`Comparator`] fixed at construction ([`Natural`],
/// i.e. [`Ord`], by default). Equal keys may be inserted more than once; they
/// are kept next to each other in the order they were placed.
///
/// Every node carries the size of its subtree, so besides the usual ordered
/// lookups ([`find`], [`lower_bound`], [`upper_bound`]) the tree answers
/// [`rank_less`], [`rank_less_eq`] and [`select`] in O(log n).
///
/// Insertion returns a [`NodeHandle`] naming the new node. Handles are plain
/// indices; see [`NodeHandle`] for how long they stay meaningful.
///
/// # Examples
///
/// ```
/// use osrb_tree::OSRBTree;
///
/// let mut tree = OSRBTree::new();
/// for key in [10, 20, 5, 15, 25] {
///     tree.insert(key);
/// }
///
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [5, 10, 15, 20, 25]);
/// assert_eq!(tree.rank_less(&15), 2);
/// assert_eq!(tree.key(tree.select(0)), &5);
///
/// tree.remove(&10);
/// assert_eq!(tree.len(), 4);
/// assert!(tree.find(&10).is_none());
/// ```
///
/// [`find`]: OSRBTree::find
/// [`lower_bound`]: OSRBTree::lower_bound
/// [`upper_bound`]: OSRBTree::upper_bound
/// [`rank_less`]: OSRBTree::rank_less
/// [`rank_less_eq`]: OSRBTree::rank_less_eq
/// [`select`]: OSRBTree::select
pub struct OSRBTree<K, C = Natural> {
    raw: RawRBTree<K, C>,
}

/// Names one node of an [`OSRBTree`].
///
/// A handle stays valid until the node it names is removed. Removing a key
/// whose node has two children does not move the removed key: the node
/// holding its in-order successor is relocated into the removed node's
/// position and keeps its own handle, while the removed node's handle goes
/// stale. Passing a stale handle to the tree panics, unless a later insert
/// has reused the slot, in which case the handle names that new node.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeHandle(Handle);

impl NodeHandle {
    #[inline]
    pub(crate) const fn from_raw(handle: Handle) -> Self {
        Self(handle)
    }

    #[inline]
    pub(crate) const fn raw(self) -> Handle {
        self.0
    }
}

/// An iterator over the keys of an `OSRBTree`, in order.
///
/// This `struct` is created by the [`iter`] method on [`OSRBTree`].
///
/// [`iter`]: OSRBTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, C> {
    tree: &'a RawRBTree<K, C>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An owning iterator over the keys of an `OSRBTree`, in order.
///
/// This `struct` is created by the `into_iter` method on [`OSRBTree`]
/// (provided by the [`IntoIterator`] trait).
pub struct IntoIter<K> {
    inner: VecIntoIter<K>,
}

impl<K> OSRBTree<K, Natural> {
    /// Makes a new, empty `OSRBTree` ordered by [`Ord`].
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::new();
    /// tree.insert(1);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, C> OSRBTree<K, C> {
    /// Makes a new, empty `OSRBTree` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut by_len: OSRBTree<&str, _> = OSRBTree::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    /// by_len.insert("ccc");
    /// by_len.insert("a");
    ///
    /// assert_eq!(by_len.first(), Some(&"a"));
    /// ```
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        OSRBTree {
            raw: RawRBTree::new(comparator),
        }
    }

    /// Returns the comparator ordering this tree.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Returns the number of keys in the tree, counting duplicates.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every key. All handles become stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::from([1, 2, 3]);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the key stored in `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is stale.
    #[must_use]
    pub fn key(&self, node: NodeHandle) -> &K {
        self.raw.key(node.raw())
    }

    /// Returns `true` if `node` names a live node of this tree.
    #[must_use]
    pub fn is_live(&self, node: NodeHandle) -> bool {
        self.raw.contains_handle(node.raw())
    }

    /// Returns the node holding the smallest key, or `None` if empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn min(&self) -> Option<NodeHandle> {
        self.raw.first().map(NodeHandle::from_raw)
    }

    /// Returns the node holding the largest key, or `None` if empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn max(&self) -> Option<NodeHandle> {
        self.raw.last().map(NodeHandle::from_raw)
    }

    /// Returns the smallest key, or `None` if empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([3, 1, 2]);
    /// assert_eq!(tree.first(), Some(&1));
    /// assert_eq!(tree.last(), Some(&3));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.raw.first().map(|h| self.raw.key(h))
    }

    /// Returns the largest key, or `None` if empty.
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.raw.last().map(|h| self.raw.key(h))
    }

    /// Returns the node after `node` in sorted order, or `None` if `node` holds the
    /// largest key.
    ///
    /// # Panics
    ///
    /// Panics if `node` is stale.
    ///
    /// # Complexity
    ///
    /// O(log n), amortized O(1) over a full traversal.
    #[must_use]
    pub fn successor(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.raw.successor(node.raw()).map(NodeHandle::from_raw)
    }

    /// Returns the node before `node` in sorted order, or `None` if `node` holds the
    /// smallest key.
    ///
    /// # Panics
    ///
    /// Panics if `node` is stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([1, 2, 3]);
    /// let three = tree.max().unwrap();
    /// let two = tree.predecessor(three).unwrap();
    ///
    /// assert_eq!(tree.key(two), &2);
    /// assert_eq!(tree.successor(two), Some(three));
    /// assert_eq!(tree.predecessor(tree.min().unwrap()), None);
    /// ```
    #[must_use]
    pub fn predecessor(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.raw.predecessor(node.raw()).map(NodeHandle::from_raw)
    }

    /// Gets an iterator over the keys of the tree, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([3, 1, 2]);
    /// let mut iter = tree.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next_back(), Some(&3));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, C> {
        Iter {
            tree: &self.raw,
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Number of nodes on the longest root-to-leaf path; 0 when empty.
    ///
    /// Never exceeds `2 * log2(len + 1)`.
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Number of black nodes on every root-to-leaf path; 0 when empty.
    #[must_use]
    pub fn black_height(&self) -> usize {
        self.raw.black_height()
    }

    /// Removes every key and returns them in sorted order.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn into_sorted_vec(mut self) -> alloc::vec::Vec<K> {
        self.raw.drain_sorted()
    }
}

impl<K, C: Comparator<K>> OSRBTree<K, C> {
    /// Adds a key to the tree and returns the node now holding it.
    ///
    /// Keys equal to ones already present are kept; the new one is placed after
    /// the equal keys its descent passed.
    ///
    /// # Panics
    ///
    /// Panics if the tree already holds the maximum number of nodes.
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
    /// let mut tree = OSRBTree::new();
    /// let node = tree.insert(7);
    /// tree.insert(7);
    ///
    /// assert_eq!(tree.key(node), &7);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, key: K) -> NodeHandle {
        NodeHandle::from_raw(self.raw.insert(key))
    }

    /// Removes one key equal to `key` and returns it, or `None` if there is none.
    ///
    /// A missing key is not an error; the tree is left untouched.
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
    /// let mut tree = OSRBTree::from([1, 2, 3]);
    /// assert_eq!(tree.remove(&2), Some(2));
    /// assert_eq!(tree.remove(&2), None);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<K> {
        self.raw.remove(key)
    }

    /// Removes the node `node` and returns its key.
    ///
    /// # Panics
    ///
    /// Panics if `node` is stale.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove_node(&mut self, node: NodeHandle) -> K {
        self.raw.remove_node(node.raw())
    }

    /// Returns a node whose key equals `key`, or `None`.
    ///
    /// When several equal keys are stored, any one of them may be returned.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn find(&self, key: &K) -> Option<NodeHandle> {
        self.raw.find(key).map(NodeHandle::from_raw)
    }

    /// Returns `true` if a key equal to `key` is stored.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.raw.find(key).is_some()
    }

    /// Returns the first node whose key is not less than `key`, or `None`.
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
    /// let tree = OSRBTree::from([10, 20, 30]);
    /// assert_eq!(tree.lower_bound(&20).map(|n| tree.key(n)), Some(&20));
    /// assert_eq!(tree.lower_bound(&21).map(|n| tree.key(n)), Some(&30));
    /// assert_eq!(tree.lower_bound(&31), None);
    /// ```
    #[must_use]
    pub fn lower_bound(&self, key: &K) -> Option<NodeHandle> {
        self.raw.lower_bound(key).map(NodeHandle::from_raw)
    }

    /// Returns the first node whose key is greater than `key`, or `None`.
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
    /// let tree = OSRBTree::from([10, 20, 30]);
    /// assert_eq!(tree.upper_bound(&20).map(|n| tree.key(n)), Some(&30));
    /// assert_eq!(tree.upper_bound(&30), None);
    /// ```
    #[must_use]
    pub fn upper_bound(&self, key: &K) -> Option<NodeHandle> {
        self.raw.upper_bound(key).map(NodeHandle::from_raw)
    }

    /// Checks every structural property of the tree.
    ///
    /// The tree maintains these itself; this is a diagnostic for tests and for
    /// detecting a comparator that is not a total order.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.raw.check_invariants()
    }
}

impl<K: Clone, C: Clone> Clone for OSRBTree<K, C> {
    fn clone(&self) -> Self {
        OSRBTree { raw: self.raw.clone() }
    }
}

impl<K: PartialEq, C> PartialEq for OSRBTree<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, C> Eq for OSRBTree<K, C> {}

impl<K: fmt::Debug, C> fmt::Debug for OSRBTree<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, C: Default> Default for OSRBTree<K, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: Ord> FromIterator<K> for OSRBTree<K, Natural> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = OSRBTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K, C: Comparator<K>> Extend<K> for OSRBTree<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K: Copy + 'a, C: Comparator<K>> Extend<&'a K> for OSRBTree<K, C> {
    fn extend<I: IntoIterator<Item = &'a K>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<K: Ord, const N: usize> From<[K; N]> for OSRBTree<K, Natural> {
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<'a, K, C> IntoIterator for &'a OSRBTree<K, C> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K, C>;

    fn into_iter(self) -> Iter<'a, K, C> {
        self.iter()
    }
}

impl<K, C> IntoIterator for OSRBTree<K, C> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> IntoIter<K> {
        IntoIter {
            inner: self.into_sorted_vec().into_iter(),
        }
    }
}

impl<'a, K: 'a, C> Iterator for Iter<'a, K, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        self.front = self.tree.successor(handle);
        Some(self.tree.key(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a K> {
        self.next_back()
    }
}

impl<'a, K: 'a, C> DoubleEndedIterator for Iter<'a, K, C> {
    fn next_back(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        self.back = self.tree.predecessor(handle);
        Some(self.tree.key(handle))
    }
}

impl<K, C> ExactSizeIterator for Iter<'_, K, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, C> FusedIterator for Iter<'_, K, C> {}

impl<K, C> Clone for Iter<'_, K, C> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, C> fmt::Debug for Iter<'_, K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for IntoIter<K> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back()
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K> FusedIterator for IntoIter<K> {}

impl<K: fmt::Debug> fmt::Debug for IntoIter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner.as_slice()).finish()
    }
}
