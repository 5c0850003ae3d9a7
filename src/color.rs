/// The color of a node in an [`OSRBTree`](crate::OSRBTree).
///
/// Exposed so that callers can render or audit the tree; the collection never
/// lets a caller change it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    /// May not have a red child.
    Red,
    /// Counts towards the black height. Absent children are black.
    Black,
}

impl Color {
    /// Returns `true` for [`Color::Red`].
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Color::Red)
    }

    /// Returns `true` for [`Color::Black`].
    #[must_use]
    pub const fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }
}
