use core::cmp::Ordering::{Equal, Greater, Less};

use alloc::vec::Vec;
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{RbNode, Side};
use super::size::Size;
use crate::color::Color;
use crate::comparator::Comparator;
use crate::error::InvariantViolation;
use crate::osrb_tree::NodeHandle;

/// Explicit traversal stack. Red-black height is at most `2 * log2(n + 1)`,
/// so this stays inline for any tree an arena can address.
type Stack<T> = SmallVec<[T; 64]>;

/// The red-black engine backing `OSRBTree`.
#[derive(Clone)]
pub(crate) struct RawRBTree<K, C> {
    /// Every live node, addressed by handle.
    nodes: Arena<RbNode<K>>,
    /// Root link; `None` when empty.
    root: Option<Handle>,
    /// Total order over keys.
    comparator: C,
}

impl<K, C> RawRBTree<K, C> {
    /// Creates a new, empty tree.
    pub(crate) const fn new(comparator: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            comparator,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize, comparator: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            comparator,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Releases every node.
    pub(crate) fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(len = self.len(), "clear");

        self.nodes.clear();
        self.root = None;
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns true if `handle` names a live node.
    pub(crate) fn contains_handle(&self, handle: Handle) -> bool {
        self.nodes.contains(handle)
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &RbNode<K> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut RbNode<K> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    pub(crate) fn key(&self, handle: Handle) -> &K {
        &self.node(handle).key
    }

    #[inline]
    pub(crate) fn color(&self, handle: Handle) -> Color {
        self.node(handle).color
    }

    #[inline]
    pub(crate) fn parent(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).parent
    }

    #[inline]
    pub(crate) fn left(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).left
    }

    #[inline]
    pub(crate) fn right(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).right
    }

    #[inline]
    fn child(&self, handle: Handle, side: Side) -> Option<Handle> {
        self.node(handle).child(side)
    }

    /// Color of a link; absent links are black.
    #[inline]
    fn color_of(&self, link: Option<Handle>) -> Color {
        link.map_or(Color::Black, |h| self.color(h))
    }

    #[inline]
    fn is_red(&self, link: Option<Handle>) -> bool {
        self.color_of(link).is_red()
    }

    /// Subtree size of a link; absent links count zero.
    #[inline]
    fn size_of(&self, link: Option<Handle>) -> Size {
        link.map_or(Size::ZERO, |h| self.node(h).size)
    }

    #[inline]
    pub(crate) fn subtree_size(&self, handle: Handle) -> usize {
        self.node(handle).size.to_usize()
    }

    #[inline]
    fn set_color(&mut self, handle: Handle, color: Color) {
        self.node_mut(handle).color = color;
    }

    #[inline]
    fn set_parent(&mut self, link: Option<Handle>, parent: Option<Handle>) {
        if let Some(child) = link {
            self.node_mut(child).parent = parent;
        }
    }

    /// Points whichever slot of `parent` holds `old` (or the root) at `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.node(parent).side_of(Some(old));
                self.node_mut(parent).set_child(side, new);
            }
        }
    }

    /// Moves the subtree at `link` into the position `node` occupies.
    fn transplant(&mut self, node: Handle, link: Option<Handle>) {
        let parent = self.parent(node);
        self.replace_child(parent, node, link);
        self.set_parent(link, parent);
    }

    /// Decrements every subtree size from `from` upwards, stopping before `stop`.
    fn shrink_path(&mut self, from: Option<Handle>, stop: Option<Handle>) {
        let mut cursor = from;
        while cursor != stop {
            let Some(handle) = cursor else { break };
            let node = self.node_mut(handle);
            node.size.decrement();
            cursor = node.parent;
        }
    }

    /// Rotates `pivot` down towards `side`; its child on the other side takes its place.
    /// `Side::Left` is a left rotation, `Side::Right` a right rotation.
    ///
    /// # Panics
    ///
    /// Panics if `pivot` has no child opposite `side`.
    pub(crate) fn rotate(&mut self, pivot: Handle, side: Side) {
        let rising = side.opposite();
        let Some(top) = self.child(pivot, rising) else {
            panic!("`RawRBTree::rotate()` - pivot has no {rising:?} child!");
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(?pivot, ?top, ?side, "rotate");

        let inner = self.child(top, side);
        self.node_mut(pivot).set_child(rising, inner);
        self.set_parent(inner, Some(pivot));

        let grandparent = self.parent(pivot);
        self.node_mut(top).parent = grandparent;
        self.replace_child(grandparent, pivot, Some(top));

        self.node_mut(top).set_child(side, Some(pivot));
        self.node_mut(pivot).parent = Some(top);

        // Only these two nodes gained or lost descendants.
        let size = self.node(pivot).size;
        self.node_mut(top).size = size;
        let pivot_size = Size::joined(self.size_of(self.left(pivot)), self.size_of(self.right(pivot)));
        self.node_mut(pivot).size = pivot_size;
    }

    /// Leftmost node of the subtree at `handle`.
    pub(crate) fn min_in(&self, handle: Handle) -> Handle {
        let mut cursor = handle;
        while let Some(left) = self.left(cursor) {
            cursor = left;
        }
        cursor
    }

    /// Rightmost node of the subtree at `handle`.
    pub(crate) fn max_in(&self, handle: Handle) -> Handle {
        let mut cursor = handle;
        while let Some(right) = self.right(cursor) {
            cursor = right;
        }
        cursor
    }

    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.min_in(root))
    }

    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.max_in(root))
    }

    /// In-order neighbour of `handle` towards `side`.
    fn neighbour(&self, handle: Handle, side: Side) -> Option<Handle> {
        if let Some(child) = self.child(handle, side) {
            return Some(match side {
                Side::Left => self.max_in(child),
                Side::Right => self.min_in(child),
            });
        }

        let mut node = handle;
        let mut ancestor = self.parent(handle);
        while let Some(up) = ancestor {
            if self.child(up, side) != Some(node) {
                break;
            }
            node = up;
            ancestor = self.parent(up);
        }
        ancestor
    }

    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        self.neighbour(handle, Side::Right)
    }

    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        self.neighbour(handle, Side::Left)
    }

    /// Returns the node at zero-based position `rank`, or `None` if out of bounds.
    pub(crate) fn select(&self, rank: usize) -> Option<Handle> {
        if rank >= self.len() {
            return None;
        }

        let mut remaining = rank;
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = self.node(handle);
            let left_size = self.size_of(node.left).to_usize();
            match remaining.cmp(&left_size) {
                Less => cursor = node.left,
                Equal => return Some(handle),
                Greater => {
                    remaining -= left_size + 1;
                    cursor = node.right;
                }
            }
        }
        None
    }

    /// Zero-based position of the node `handle` in sorted order.
    pub(crate) fn rank_of_node(&self, handle: Handle) -> usize {
        let mut rank = self.size_of(self.left(handle)).to_usize();
        let mut node = handle;
        while let Some(parent) = self.parent(node) {
            if self.right(parent) == Some(node) {
                rank += self.size_of(self.left(parent)).to_usize() + 1;
            }
            node = parent;
        }
        rank
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Stack<(Handle, usize)> = SmallVec::new();
        stack.extend(self.root.map(|root| (root, 1)));
        while let Some((handle, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.node(handle);
            stack.extend(node.left.map(|left| (left, depth + 1)));
            stack.extend(node.right.map(|right| (right, depth + 1)));
        }
        height
    }

    /// Black nodes on any root-to-leaf path, counting the root.
    pub(crate) fn black_height(&self) -> usize {
        let mut height = 0;
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            height += usize::from(self.color(handle).is_black());
            cursor = self.left(handle);
        }
        height
    }

    /// Removes every key, returning them in sorted order.
    pub(crate) fn drain_sorted(&mut self) -> Vec<K> {
        let mut order = Vec::with_capacity(self.len());
        let mut cursor = self.first();
        while let Some(handle) = cursor {
            order.push(handle);
            cursor = self.successor(handle);
        }

        let keys: Vec<K> = order.into_iter().map(|handle| self.nodes.remove(handle).key).collect();
        self.clear();
        keys
    }
}

impl<K, C: Comparator<K>> RawRBTree<K, C> {
    /// Returns some node whose key compares equal to `key`.
    pub(crate) fn find(&self, key: &K) -> Option<Handle> {
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = self.node(handle);
            match self.comparator.compare(key, &node.key) {
                Less => cursor = node.left,
                Greater => cursor = node.right,
                Equal => return Some(handle),
            }
        }
        None
    }

    /// Least node whose key is `>= key` (or `> key` when `strict`).
    fn bound(&self, key: &K, strict: bool) -> Option<Handle> {
        let mut best = None;
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = self.node(handle);
            let above = match self.comparator.compare(&node.key, key) {
                Greater => true,
                Equal => !strict,
                Less => false,
            };
            if above {
                best = Some(handle);
                cursor = node.left;
            } else {
                cursor = node.right;
            }
        }
        best
    }

    pub(crate) fn lower_bound(&self, key: &K) -> Option<Handle> {
        self.bound(key, false)
    }

    pub(crate) fn upper_bound(&self, key: &K) -> Option<Handle> {
        self.bound(key, true)
    }

    /// Number of keys `< key` (or `<= key` when `inclusive`).
    fn rank(&self, key: &K, inclusive: bool) -> usize {
        let mut rank = 0;
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = self.node(handle);
            let go_right = match self.comparator.compare(key, &node.key) {
                Greater => true,
                Equal => inclusive,
                Less => false,
            };
            if go_right {
                rank += self.size_of(node.left).to_usize() + 1;
                cursor = node.right;
            } else {
                cursor = node.left;
            }
        }
        rank
    }

    pub(crate) fn rank_less(&self, key: &K) -> usize {
        self.rank(key, false)
    }

    pub(crate) fn rank_less_eq(&self, key: &K) -> usize {
        self.rank(key, true)
    }

    /// Inserts `key` as a new node and returns its handle. Equal keys go right.
    pub(crate) fn insert(&mut self, key: K) -> Handle {
        // Allocate before touching any link so a failed allocation leaves the tree intact.
        let new = self.nodes.insert(RbNode::new(key));

        let mut parent = None;
        let mut side = Side::Left;
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let ordering = self.comparator.compare(&self.node(new).key, &self.node(handle).key);
            side = if ordering == Less { Side::Left } else { Side::Right };

            let node = self.node_mut(handle);
            node.size.increment();
            cursor = node.child(side);
            parent = Some(handle);
        }

        self.node_mut(new).parent = parent;
        match parent {
            None => self.root = Some(new),
            Some(parent) => self.node_mut(parent).set_child(side, Some(new)),
        }

        self.insert_fixup(new);
        new
    }

    fn insert_fixup(&mut self, inserted: Handle) {
        let mut node = inserted;
        loop {
            let Some(parent) = self.parent(node) else { break };
            if self.color(parent).is_black() {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let Some(grandparent) = self.parent(parent) else { break };
            let side = self.node(grandparent).side_of(Some(parent));
            let uncle = self.child(grandparent, side.opposite());

            if let Some(uncle) = uncle.filter(|&u| self.color(u).is_red()) {
                #[cfg(feature = "tracing")]
                tracing::trace!(?node, "insert fixup: red uncle");

                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            let parent = if self.node(parent).side_of(Some(node)) == side {
                parent
            } else {
                #[cfg(feature = "tracing")]
                tracing::trace!(?node, "insert fixup: inner child");

                node = parent;
                self.rotate(node, side);
                let Some(rotated) = self.parent(node) else { break };
                rotated
            };

            #[cfg(feature = "tracing")]
            tracing::trace!(?node, "insert fixup: outer child");

            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    /// Removes one node whose key equals `key` and returns its key.
    pub(crate) fn remove(&mut self, key: &K) -> Option<K> {
        let handle = self.find(key)?;
        Some(self.remove_node(handle))
    }

    /// Unlinks and frees `target`, returning its key.
    ///
    /// When `target` has two children its in-order successor is moved into its
    /// place, keeping the successor's own handle and key.
    pub(crate) fn remove_node(&mut self, target: Handle) -> K {
        let node = self.node(target);
        let (left, right, parent, color, size) = (node.left, node.right, node.parent, node.color, node.size);

        let (deficient, deficient_parent, removed_color) = match (left, right) {
            (Some(left), Some(right)) => {
                let successor = self.min_in(right);
                let removed_color = self.color(successor);
                let lifted = self.right(successor);
                let successor_parent = self.parent(successor);

                let lifted_parent = if successor_parent == Some(target) {
                    Some(successor)
                } else {
                    self.transplant(successor, lifted);
                    self.node_mut(successor).right = Some(right);
                    self.node_mut(right).parent = Some(successor);
                    // Everything between the successor's old slot and its new one lost a node.
                    self.shrink_path(successor_parent, Some(successor));
                    successor_parent
                };

                self.transplant(target, Some(successor));
                let moved = self.node_mut(successor);
                moved.left = Some(left);
                moved.color = color;
                moved.size = size;
                moved.size.decrement();
                self.node_mut(left).parent = Some(successor);
                self.shrink_path(parent, None);

                (lifted, lifted_parent, removed_color)
            }
            (only, None) | (None, only) => {
                self.transplant(target, only);
                self.shrink_path(parent, None);
                (only, parent, color)
            }
        };

        if removed_color.is_black() {
            self.delete_fixup(deficient, deficient_parent);
        }

        self.nodes.remove(target).key
    }

    fn delete_fixup(&mut self, deficient: Option<Handle>, parent: Option<Handle>) {
        let mut node = deficient;
        let mut parent = parent;

        while node != self.root && !self.is_red(node) {
            let Some(up) = parent else { break };
            let side = self.node(up).side_of(node);
            let far = side.opposite();
            // The deficient side is one black short, so the sibling exists.
            let Some(mut sibling) = self.child(up, far) else { break };

            if self.color(sibling).is_red() {
                #[cfg(feature = "tracing")]
                tracing::trace!(?up, "delete fixup: red sibling");

                self.set_color(sibling, Color::Black);
                self.set_color(up, Color::Red);
                self.rotate(up, side);
                let Some(next) = self.child(up, far) else { break };
                sibling = next;
            }

            let near_child = self.child(sibling, side);
            let far_child = self.child(sibling, far);

            if !self.is_red(near_child) && !self.is_red(far_child) {
                #[cfg(feature = "tracing")]
                tracing::trace!(?up, "delete fixup: black nephews");

                self.set_color(sibling, Color::Red);
                node = Some(up);
                parent = self.parent(up);
                continue;
            }

            if !self.is_red(far_child) {
                #[cfg(feature = "tracing")]
                tracing::trace!(?up, "delete fixup: red near nephew");

                if let Some(near_child) = near_child {
                    self.set_color(near_child, Color::Black);
                }
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, far);
                let Some(next) = self.child(up, far) else { break };
                sibling = next;
            }

            #[cfg(feature = "tracing")]
            tracing::trace!(?up, "delete fixup: red far nephew");

            let parent_color = self.color(up);
            self.set_color(sibling, parent_color);
            self.set_color(up, Color::Black);
            if let Some(far_child) = self.child(sibling, far) {
                self.set_color(far_child, Color::Black);
            }
            self.rotate(up, side);
            node = self.root;
            parent = None;
        }

        if let Some(node) = node {
            self.set_color(node, Color::Black);
        }
    }

    /// Verifies every red-black and size invariant, plus key order.
    pub(crate) fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if let Some(root) = self.root {
            if self.color(root).is_red() {
                return Err(InvariantViolation::RedRoot { node: NodeHandle::from_raw(root) });
            }
            if self.parent(root).is_some() {
                return Err(InvariantViolation::ParentLink { node: NodeHandle::from_raw(root) });
            }
        }

        let (_, reachable) = self.check_subtree(self.root)?;
        if reachable != self.len() {
            return Err(InvariantViolation::LengthMismatch {
                reachable,
                allocated: self.len(),
            });
        }

        let mut cursor = self.first();
        while let Some(handle) = cursor {
            let next = self.successor(handle);
            if let Some(next) = next {
                if self.comparator.compare(self.key(handle), self.key(next)) == Greater {
                    return Err(InvariantViolation::OutOfOrder { node: NodeHandle::from_raw(handle) });
                }
            }
            cursor = next;
        }

        Ok(())
    }

    /// Returns `(black height, node count)` of the subtree at `link`.
    fn check_subtree(&self, link: Option<Handle>) -> Result<(usize, usize), InvariantViolation> {
        let Some(handle) = link else { return Ok((0, 0)) };
        let node = self.node(handle);
        let at = NodeHandle::from_raw(handle);

        for child in [node.left, node.right].into_iter().flatten() {
            if self.parent(child) != Some(handle) {
                return Err(InvariantViolation::ParentLink { node: NodeHandle::from_raw(child) });
            }
        }

        if node.color.is_red() && (self.is_red(node.left) || self.is_red(node.right)) {
            return Err(InvariantViolation::RedChildOfRed { node: at });
        }

        let (left_black, left_count) = self.check_subtree(node.left)?;
        let (right_black, right_count) = self.check_subtree(node.right)?;
        if left_black != right_black {
            return Err(InvariantViolation::BlackHeightMismatch {
                node: at,
                left: left_black,
                right: right_black,
            });
        }

        let actual = 1 + left_count + right_count;
        if node.size != Size::from_usize(actual) {
            return Err(InvariantViolation::SizeMismatch {
                node: at,
                recorded: node.size.to_usize(),
                actual,
            });
        }

        Ok((left_black + usize::from(node.color.is_black()), actual))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::comparator::Natural;
    use proptest::prelude::*;

    fn build(keys: &[i32]) -> RawRBTree<i32, Natural> {
        let mut tree = RawRBTree::new(Natural);
        for &key in keys {
            tree.insert(key);
            assert_eq!(tree.check_invariants(), Ok(()), "after inserting {key}");
        }
        tree
    }

    fn in_order(tree: &RawRBTree<i32, Natural>) -> Vec<i32> {
        let mut keys = Vec::new();
        let mut cursor = tree.first();
        while let Some(handle) = cursor {
            keys.push(*tree.key(handle));
            cursor = tree.successor(handle);
        }
        keys
    }

    #[test]
    fn empty_tree_has_no_extremes() {
        let tree = build(&[]);
        assert!(tree.is_empty());
        assert_eq!(tree.first(), None);
        assert_eq!(tree.last(), None);
        assert_eq!(tree.select(0), None);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.black_height(), 0);
        assert_eq!(tree.check_invariants(), Ok(()));
    }

    #[test]
    fn rotations_keep_order_and_sizes() {
        let mut tree = build(&[2, 1, 3]);
        let Some(root) = tree.root() else { panic!("tree is empty") };
        assert_eq!(*tree.key(root), 2);

        tree.rotate(root, Side::Left);
        let Some(top) = tree.root() else { panic!("tree is empty") };
        assert_eq!(*tree.key(top), 3);
        assert_eq!(tree.left(top), Some(root));
        assert_eq!(tree.parent(root), Some(top));
        assert_eq!(tree.subtree_size(top), 3);
        assert_eq!(tree.subtree_size(root), 2);
        assert_eq!(in_order(&tree), [1, 2, 3]);

        tree.rotate(top, Side::Right);
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.subtree_size(root), 3);
        assert_eq!(tree.subtree_size(top), 1);
        assert_eq!(in_order(&tree), [1, 2, 3]);
        assert_eq!(tree.check_invariants(), Ok(()));
    }

    #[test]
    #[should_panic(expected = "`RawRBTree::rotate()` - pivot has no Right child!")]
    fn rotating_without_a_rising_child_panics() {
        let mut tree = build(&[1]);
        let Some(root) = tree.root() else { panic!("tree is empty") };
        tree.rotate(root, Side::Left);
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let keys: Vec<i32> = (0..512).collect();
        let tree = build(&keys);
        // 2 * log2(n + 1) bounds the height of a red-black tree.
        assert!(tree.height() <= 2 * 10);
        assert_eq!(in_order(&tree), keys);
    }

    #[test]
    fn two_child_removal_moves_the_successor_node() {
        let mut tree = build(&[1, 2, 3, 4, 5, 6, 7]);
        let Some(four) = tree.find(&4) else { panic!("4 missing") };
        let Some(five) = tree.find(&5) else { panic!("5 missing") };
        assert!(tree.left(four).is_some() && tree.right(four).is_some());

        let old_parent = tree.parent(four);
        assert_eq!(tree.remove(&4), Some(4));

        assert!(!tree.contains_handle(four));
        assert_eq!(tree.find(&5), Some(five));
        assert_eq!(tree.parent(five), old_parent);
        assert_eq!(in_order(&tree), [1, 2, 3, 5, 6, 7]);
        assert_eq!(tree.check_invariants(), Ok(()));
    }

    #[test]
    fn removal_with_a_deep_successor_updates_both_paths() {
        let mut tree = build(&[50, 20, 80, 10, 30, 70, 90, 60, 75, 65]);
        let Some(root) = tree.root() else { panic!("tree is empty") };
        let root_key = *tree.key(root);

        assert_eq!(tree.remove(&root_key), Some(root_key));
        assert_eq!(tree.check_invariants(), Ok(()));
        assert_eq!(tree.len(), 9);
        let Some(root) = tree.root() else { panic!("tree is empty") };
        assert_eq!(tree.subtree_size(root), 9);
    }

    #[test]
    fn removing_an_absent_key_is_a_no_op() {
        let mut tree = build(&[3, 1, 2]);
        let before: Vec<_> = [1, 2, 3].iter().map(|k| tree.find(k)).collect();
        assert_eq!(tree.remove(&9), None);
        let after: Vec<_> = [1, 2, 3].iter().map(|k| tree.find(k)).collect();
        assert_eq!(before, after);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn duplicates_are_kept_side_by_side() {
        let mut tree = build(&[5, 5, 5, 1, 9]);
        assert_eq!(in_order(&tree), [1, 5, 5, 5, 9]);
        assert_eq!(tree.rank_less(&5), 1);
        assert_eq!(tree.rank_less_eq(&5), 4);
        assert_eq!(tree.lower_bound(&5).map(|h| tree.rank_of_node(h)), Some(1));
        assert_eq!(tree.upper_bound(&5).map(|h| *tree.key(h)), Some(9));

        assert_eq!(tree.remove(&5), Some(5));
        assert_eq!(in_order(&tree), [1, 5, 5, 9]);
        assert_eq!(tree.check_invariants(), Ok(()));
    }

    #[test]
    fn drain_returns_sorted_keys_and_empties() {
        let mut tree = build(&[4, 2, 8, 6]);
        assert_eq!(tree.drain_sorted(), [2, 4, 6, 8]);
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn check_reports_corrupted_sizes() {
        let mut tree = build(&[2, 1, 3]);
        let Some(root) = tree.root() else { panic!("tree is empty") };
        tree.node_mut(root).size.increment();
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::SizeMismatch {
                node: NodeHandle::from_raw(root),
                recorded: 4,
                actual: 3,
            })
        );
    }

    #[test]
    fn check_reports_red_root() {
        let mut tree = build(&[1]);
        let Some(root) = tree.root() else { panic!("tree is empty") };
        tree.set_color(root, Color::Red);
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::RedRoot { node: NodeHandle::from_raw(root) })
        );
    }

    proptest! {
        #[test]
        fn random_inserts_and_removes_hold_invariants(
            ops in prop::collection::vec((any::<bool>(), -64i32..64), 0..400)
        ) {
            let mut tree = RawRBTree::new(Natural);
            let mut model: Vec<i32> = Vec::new();

            for (insert, key) in ops {
                if insert {
                    tree.insert(key);
                    let at = model.partition_point(|&k| k <= key);
                    model.insert(at, key);
                } else {
                    let removed = tree.remove(&key);
                    match model.binary_search(&key) {
                        Ok(at) => {
                            model.remove(at);
                            prop_assert_eq!(removed, Some(key));
                        }
                        Err(_) => {
                            prop_assert_eq!(removed, None);
                        }
                    }
                }

                prop_assert_eq!(tree.check_invariants(), Ok(()));
                prop_assert_eq!(tree.len(), model.len());
            }

            prop_assert_eq!(in_order(&tree), model.clone());
            for (rank, key) in model.iter().enumerate() {
                let Some(handle) = tree.select(rank) else { panic!("rank {rank} missing") };
                prop_assert_eq!(tree.key(handle), key);
                prop_assert_eq!(tree.rank_of_node(handle), rank);
            }
        }
    }
}
