use super::handle::Handle;
use super::size::Size;
use crate::color::Color;

/// Which child slot of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

// A single key with its balancing and order-statistic bookkeeping.
// `None` links play the role of the black, size-zero sentinel.
#[derive(Clone, Debug)]
pub(crate) struct RbNode<K> {
    pub(crate) key: K,
    pub(crate) color: Color,
    // Number of nodes in the subtree rooted here, this one included.
    pub(crate) size: Size,
    pub(crate) parent: Option<Handle>,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
}

impl<K> RbNode<K> {
    /// Creates a detached red leaf.
    pub(crate) const fn new(key: K) -> Self {
        Self {
            key,
            color: Color::Red,
            size: Size::ONE,
            parent: None,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Returns which slot holds `child`. Anything that is not the left child is
    /// reported as the right one.
    #[inline]
    pub(crate) fn side_of(&self, child: Option<Handle>) -> Side {
        if self.left == child { Side::Left } else { Side::Right }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_a_red_leaf_of_size_one() {
        let node = RbNode::new("k");
        assert_eq!(node.color, Color::Red);
        assert_eq!(node.size, Size::ONE);
        assert!(node.left.is_none() && node.right.is_none());
        assert!(node.parent.is_none());
    }

    #[test]
    fn child_slots_follow_side() {
        let mut node = RbNode::new(0_u8);
        let a = Handle::new(3);
        let b = Handle::new(9);

        node.set_child(Side::Left, Some(a));
        node.set_child(Side::Right.opposite().opposite(), Some(b));

        assert_eq!(node.child(Side::Left), Some(a));
        assert_eq!(node.child(Side::Right), Some(b));
        assert_eq!(node.side_of(Some(a)), Side::Left);
        assert_eq!(node.side_of(Some(b)), Side::Right);
    }
}
