use super::handle::Handle;

/// Number of live nodes in a subtree, the node itself included.
///
/// Never exceeds the number of addressable handles, so it is kept as narrow as
/// a handle instead of a `usize`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
#[repr(transparent)]
pub(crate) struct Size(u32);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX;
    pub(crate) const ZERO: Self = Self(0);
    pub(crate) const ONE: Self = Self(1);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        let size = size as u32;
        Self(size)
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0 as usize
    }

    /// Size of a node whose children have sizes `left` and `right`.
    #[inline]
    pub(crate) const fn joined(left: Self, right: Self) -> Self {
        Self(1 + left.0 + right.0)
    }

    #[inline]
    pub(crate) fn increment(&mut self) {
        debug_assert!(self.to_usize() < Self::MAX, "`Size::increment()` - overflow!");
        self.0 += 1;
    }

    #[inline]
    pub(crate) fn decrement(&mut self) {
        assert!(self.0 > 0, "`Size::decrement()` - size is already zero!");
        self.0 -= 1;
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(Size, u32);

    #[test]
    #[should_panic(expected = "`Size::from_usize()` - `size` > `Size::MAX`!")]
    fn size_past_max_panics() {
        let _ = Size::from_usize(Size::MAX + 1);
    }

    #[test]
    #[should_panic(expected = "`Size::decrement()` - size is already zero!")]
    fn decrement_zero_panics() {
        let mut size = Size::ZERO;
        size.decrement();
    }

    #[test]
    fn joined_counts_the_node_itself() {
        assert_eq!(Size::joined(Size::ZERO, Size::ZERO), Size::ONE);
        assert_eq!(Size::joined(Size::from_usize(3), Size::from_usize(4)).to_usize(), 8);
    }

    proptest! {
        #[test]
        fn increment_then_decrement_is_identity(size in 0..Size::MAX) {
            let mut counter = Size::from_usize(size);
            counter.increment();
            prop_assert_eq!(counter.to_usize(), size + 1);
            counter.decrement();
            prop_assert_eq!(counter.to_usize(), size);
        }
    }
}
