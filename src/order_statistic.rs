/// A zero-based position in the sorted order of an [`OSRBTree`](crate::OSRBTree).
///
/// Indexing a tree by `Rank` is the panicking form of
/// [`get_by_rank`](crate::OSRBTree::get_by_rank).
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTree, Rank};
///
/// let tree = OSRBTree::from(["pear", "apple", "fig"]);
///
/// assert_eq!(tree[Rank(0)], "apple");
/// assert_eq!(tree[Rank(2)], "pear");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
