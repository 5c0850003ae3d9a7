use core::cmp::Ordering;

/// A total order over keys, supplied when the tree is created.
///
/// The tree never looks at a key except through its comparator. The order
/// must be total and must not change while keys are stored; an inconsistent
/// comparator does not cause undefined behavior but leaves the index in an
/// unspecified (wrongly ordered) state.
///
/// Any `Fn(&K, &K) -> Ordering` closure is a comparator.
///
/// # Examples
///
/// ```
/// use osrb_tree::OSRBTree;
///
/// // Largest first.
/// let mut tree: OSRBTree<i32, _> = OSRBTree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// tree.insert(1);
/// tree.insert(3);
/// tree.insert(2);
///
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
/// ```
pub trait Comparator<K: ?Sized> {
    /// Returns how `a` is ordered relative to `b`.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their [`Ord`] implementation. This is the default comparator.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

/// Adapts a boolean "is less than" predicate into a [`Comparator`].
///
/// Two keys are equal when neither is less than the other, so the predicate
/// must describe a strict weak order.
///
/// # Examples
///
/// ```
/// use osrb_tree::{LessThan, OSRBTree};
///
/// let mut tree: OSRBTree<u8, _> = OSRBTree::with_comparator(LessThan(|a: &u8, b: &u8| a < b));
/// tree.insert(5);
/// tree.insert(2);
///
/// assert!(tree.contains(&5));
/// assert_eq!(tree.first(), Some(&2));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct LessThan<F>(pub F);

impl<K: ?Sized, F> Comparator<K> for LessThan<F>
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        if (self.0)(a, b) {
            Ordering::Less
        } else if (self.0)(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}
