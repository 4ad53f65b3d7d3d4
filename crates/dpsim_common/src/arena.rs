//! Append-only arena for dense, ID-indexed storage.
//!
//! Signals and scope nodes are allocated once at model construction and never
//! removed individually, so a `Vec` addressed by opaque `u32` IDs gives stable
//! handles without any ownership links between entries.

use std::marker::PhantomData;

/// Trait for opaque ID types used as arena keys.
pub trait ArenaId: Copy {
    /// Creates an ID from a raw `u32` index.
    fn from_raw(index: u32) -> Self;

    /// Returns the raw `u32` index.
    fn as_raw(self) -> u32;
}

/// Declares a `u32` newtype ID that can key an [`Arena`].
///
/// The generated type is `Copy`, `Hash`, `Ord` and serde-serializable.
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl $crate::arena::ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }
    };
}

/// A dense container whose entries are addressed by an [`ArenaId`].
///
/// Entries are only ever appended, so an ID handed out by [`alloc`](Arena::alloc)
/// stays valid until the arena itself is dropped.
#[derive(Debug, Clone)]
pub struct Arena<I: ArenaId, T> {
    items: Vec<T>,
    _marker: PhantomData<I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Creates a new, empty arena.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Appends an item and returns its ID.
    pub fn alloc(&mut self, item: T) -> I {
        let id = I::from_raw(self.items.len() as u32);
        self.items.push(item);
        id
    }

    /// Returns the item with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID was not allocated by this arena.
    pub fn get(&self, id: I) -> &T {
        &self.items[id.as_raw() as usize]
    }

    /// Returns the item with the given ID mutably.
    ///
    /// # Panics
    ///
    /// Panics if the ID was not allocated by this arena.
    pub fn get_mut(&mut self, id: I) -> &mut T {
        &mut self.items[id.as_raw() as usize]
    }

    /// Returns the item with the given ID, or `None` for a foreign ID.
    pub fn try_get(&self, id: I) -> Option<&T> {
        self.items.get(id.as_raw() as usize)
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been allocated.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over `(ID, &T)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (I::from_raw(i as u32), item))
    }

    /// Iterates over the items in allocation order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    define_id!(
        /// Test-only ID.
        TestId
    );

    #[test]
    fn alloc_hands_out_sequential_ids() {
        let mut arena: Arena<TestId, &str> = Arena::new();
        let a = arena.alloc("a");
        let b = arena.alloc("b");
        assert_eq!(a.as_raw(), 0);
        assert_eq!(b.as_raw(), 1);
        assert_eq!(*arena.get(b), "b");
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn get_mut_modifies_in_place() {
        let mut arena: Arena<TestId, u32> = Arena::new();
        let id = arena.alloc(7);
        *arena.get_mut(id) += 1;
        assert_eq!(*arena.get(id), 8);
    }

    #[test]
    fn try_get_rejects_foreign_id() {
        let arena: Arena<TestId, u32> = Arena::new();
        assert!(arena.try_get(TestId::from_raw(3)).is_none());
        assert!(arena.is_empty());
    }

    #[test]
    fn iteration_is_in_allocation_order() {
        let mut arena: Arena<TestId, char> = Arena::new();
        for c in ['x', 'y', 'z'] {
            arena.alloc(c);
        }
        let collected: Vec<_> = arena.iter().map(|(id, c)| (id.as_raw(), *c)).collect();
        assert_eq!(collected, vec![(0, 'x'), (1, 'y'), (2, 'z')]);
        assert_eq!(arena.values().count(), 3);
    }

    #[test]
    fn ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&TestId::from_raw(42)).unwrap();
        assert_eq!(json, "42");
    }
}
