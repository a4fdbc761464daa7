//! The capability a [`ReadOnlyView`](crate::ReadOnlyView) needs from a mapping.

mod std_maps;

use core::ops::Deref;

use crate::ViewError;

/// A key-value mapping that can be counted and walked.
///
/// Lookups live in [`Lookup`], which is generic over the borrowed form of the key.
///
/// # Structural modification
///
/// Cursors report [`ViewError::ConcurrentModification`] when the key set changes
/// while they are open. Detection belongs to the mapping, not to the view:
///
/// - `HashMap`, `BTreeMap` and `hashbrown::HashMap` cannot be modified at all while
///   a view borrows them, so their cursors are [`Unchecked`] and never fail.
/// - [`TrackedMap`](crate::TrackedMap) can be modified through `&self` and detects
///   it at run time.
///
/// An implementation with interior mutability and no detection of its own would
/// silently miss such changes. Don't write one.
pub trait Mapping {
    type Key;
    type Value;

    /// Handle to a value returned by [`Lookup::lookup`].
    type Found<'a>: Deref<Target = Self::Value>
    where
        Self: 'a;

    /// What a cursor yields for each entry.
    type Entry<'a>
    where
        Self: 'a;

    type Cursor<'a>: Iterator<Item = Result<Self::Entry<'a>, ViewError>> + 'a
    where
        Self: 'a;

    /// Current number of entries.
    fn count(&self) -> usize;

    /// Opens a cursor over the entries, in the mapping's own iteration order.
    fn cursor(&self) -> Self::Cursor<'_>;
}

/// Key lookups by any borrowed form `Q` of the mapping's key, e.g. `str` for
/// `String` keys, the way the maps' own `get` works.
pub trait Lookup<Q: ?Sized>: Mapping {
    fn lookup(&self, key: &Q) -> Option<Self::Found<'_>>;

    fn contains_key(&self, key: &Q) -> bool;
}

/// Cursor over a mapping that cannot change while it is borrowed.
#[derive(Clone, Debug)]
pub struct Unchecked<I> {
    inner: I,
}

impl<I> Unchecked<I> {
    pub fn new(inner: I) -> Self {
        Unchecked { inner }
    }
}

impl<I: Iterator> Iterator for Unchecked<I> {
    type Item = Result<I::Item, ViewError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Ok)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I: ExactSizeIterator> ExactSizeIterator for Unchecked<I> {}
