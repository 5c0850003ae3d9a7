use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage for tree nodes.
///
/// Vacated slots are recycled before the backing vector grows, so a handle may
/// be handed out again after the node it named was removed.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    vacant: Vec<Handle>,
    live: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
            live: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            vacant: Vec::new(),
            live: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.live
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub(crate) fn insert(&mut self, element: T) -> Handle {
        let handle = if let Some(handle) = self.vacant.pop() {
            self.slots[handle.index()] = Some(element);
            handle
        } else {
            // Every live element needs a distinct handle, and a handle can index at most
            // `Handle::MAX + 1` slots; stopping at `Handle::MAX` keeps sizes within `Size::MAX`.
            assert!(
                self.slots.len() < Handle::MAX,
                "`Arena::insert()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.slots.push(Some(element));
            Handle::new(self.slots.len() - 1)
        };
        self.live += 1;
        handle
    }

    #[inline]
    pub(crate) fn contains(&self, handle: Handle) -> bool {
        matches!(self.slots.get(handle.index()), Some(Some(_)))
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        match self.slots.get(handle.index()) {
            Some(Some(element)) => element,
            _ => panic!("`Arena::get()` - `handle` is stale or invalid!"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        match self.slots.get_mut(handle.index()) {
            Some(Some(element)) => element,
            _ => panic!("`Arena::get_mut()` - `handle` is stale or invalid!"),
        }
    }

    pub(crate) fn remove(&mut self, handle: Handle) -> T {
        let Some(element) = self.slots.get_mut(handle.index()).and_then(Option::take) else {
            panic!("`Arena::remove()` - `handle` is stale or invalid!");
        };
        self.vacant.push(handle);
        self.live -= 1;
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.vacant.clear();
        self.live = 0;
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reserves_requested_capacity() {
        let arena: Arena<u8> = Arena::with_capacity(12);
        assert!(arena.capacity() >= 12);
        assert!(arena.is_empty());
    }

    #[test]
    fn vacated_slot_is_reused() {
        let mut arena = Arena::new();
        let a = arena.insert('a');
        let _b = arena.insert('b');
        assert_eq!(arena.remove(a), 'a');
        assert!(!arena.contains(a));
        let c = arena.insert('c');
        assert_eq!(c, a);
        assert_eq!(*arena.get(c), 'c');
        assert_eq!(arena.len(), 2);
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is stale or invalid!")]
    fn stale_handle_panics() {
        let mut arena = Arena::new();
        let h = arena.insert(7_u32);
        arena.remove(h);
        let _ = arena.get(h);
    }

    #[test]
    #[should_panic(expected = "`Arena::remove()` - `handle` is stale or invalid!")]
    fn double_remove_panics() {
        let mut arena = Arena::new();
        let h = arena.insert(7_u32);
        arena.remove(h);
        arena.remove(h);
    }

    #[derive(Clone, Debug)]
    enum Step {
        Insert(u32),
        Overwrite(usize, u32),
        Remove(usize),
        Clear,
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            12 => any::<u32>().prop_map(Step::Insert),
            4 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Step::Overwrite(which, value)),
            6 => any::<usize>().prop_map(Step::Remove),
            1 => Just(Step::Clear),
        ]
    }

    proptest! {
        #[test]
        fn tracks_live_elements(steps in prop::collection::vec(step(), 0..256)) {
            let mut live: Vec<(Handle, u32)> = Vec::new();
            let mut arena = Arena::new();

            for step in steps {
                match step {
                    Step::Insert(value) => {
                        let handle = arena.insert(value);
                        prop_assert!(live.iter().all(|&(h, _)| h != handle));
                        live.push((handle, value));
                    }
                    Step::Overwrite(which, value) if !live.is_empty() => {
                        let slot = which % live.len();
                        *arena.get_mut(live[slot].0) = value;
                        live[slot].1 = value;
                    }
                    Step::Remove(which) if !live.is_empty() => {
                        let (handle, value) = live.swap_remove(which % live.len());
                        prop_assert_eq!(arena.remove(handle), value);
                        prop_assert!(!arena.contains(handle));
                    }
                    Step::Clear => {
                        arena.clear();
                        live.clear();
                    }
                    Step::Overwrite(..) | Step::Remove(_) => {}
                }

                prop_assert_eq!(arena.len(), live.len());
                for &(handle, value) in &live {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }
}
