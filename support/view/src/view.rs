use core::fmt;
use core::ptr;

use shroud_opaque_seq::{OpaqueIter, OpaqueSeq, SequenceSource, as_opaque_sequence};

use crate::{Lookup, Mapping, ViewError};

/// A read-only, live window onto a [`Mapping`].
///
/// The view is a single borrowed pointer: it copies nothing, and every call reads
/// the mapping as it is right now. It has no method that inserts, removes or
/// updates entries.
///
/// ```
/// use std::collections::HashMap;
/// use shroud_view::as_read_only_view;
///
/// let scores = HashMap::from([("ada", 10), ("bob", 20)]);
/// let view = as_read_only_view(&scores);
///
/// assert_eq!(view.try_get(&"ada"), Some(&10));
/// assert_eq!(view.try_get(&"eve"), None);
/// assert_eq!(view.len(), 2);
/// assert!(std::ptr::eq(view.underlying(), &scores));
/// ```
pub struct ReadOnlyView<'m, M> {
    mapping: &'m M,
}

static_assertions::assert_eq_size!(ReadOnlyView<'static, std::collections::HashMap<u8, u8>>, usize);
static_assertions::assert_impl_all!(
    ReadOnlyView<'static, std::collections::HashMap<u8, u8>>: Copy, Send, Sync
);
static_assertions::assert_not_impl_any!(
    ReadOnlyView<'static, std::collections::HashMap<u8, u8>>:
        Iterator,
        core::ops::Deref,
        core::ops::DerefMut,
        Extend<(u8, u8)>,
        AsRef<std::collections::HashMap<u8, u8>>,
        AsMut<std::collections::HashMap<u8, u8>>
);

impl<'m, M: Mapping> ReadOnlyView<'m, M> {
    pub fn new(mapping: &'m M) -> Self {
        ReadOnlyView { mapping }
    }

    /// Looks `key` up. Absence is `None`, never a default value.
    ///
    /// `key` may be any borrowed form the mapping accepts, e.g. `&str` for a map
    /// keyed by `String`.
    pub fn try_get<Q>(&self, key: &Q) -> Option<M::Found<'m>>
    where
        Q: ?Sized,
        M: Lookup<Q>,
    {
        self.mapping.lookup(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized,
        M: Lookup<Q>,
    {
        self.mapping.contains_key(key)
    }

    /// Number of entries in the mapping at the time of the call.
    pub fn len(&self) -> usize {
        self.mapping.count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries of the mapping, in its own iteration order.
    ///
    /// Each pass over the returned sequence opens a new cursor on the mapping.
    /// A cursor yields [`ViewError::ConcurrentModification`] if the key set changes
    /// while it is open and the mapping is able to detect it (see [`Mapping`]).
    pub fn iter(&self) -> OpaqueSeq<'m, Result<M::Entry<'m>, ViewError>> {
        as_opaque_sequence(Entries {
            mapping: self.mapping,
        })
    }

    /// The wrapped mapping itself, not a copy.
    ///
    /// This is the one way to get from a view back to its mapping. The reference
    /// lives exactly as long as the borrow the view was created from.
    pub fn underlying(&self) -> &'m M {
        self.mapping
    }

    /// Whether this view wraps `other` (by address).
    pub fn ptr_eq(&self, other: &M) -> bool {
        ptr::eq(self.mapping, other)
    }
}

/// Wraps `mapping` in a [`ReadOnlyView`].
pub fn as_read_only_view<M: Mapping>(mapping: &M) -> ReadOnlyView<'_, M> {
    ReadOnlyView::new(mapping)
}

impl<'m, M: Mapping> From<&'m M> for ReadOnlyView<'m, M> {
    fn from(mapping: &'m M) -> Self {
        ReadOnlyView::new(mapping)
    }
}

impl<M> Clone for ReadOnlyView<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for ReadOnlyView<'_, M> {}

impl<M: Mapping> fmt::Debug for ReadOnlyView<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadOnlyView")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<'m, M: Mapping> IntoIterator for ReadOnlyView<'m, M> {
    type Item = Result<M::Entry<'m>, ViewError>;
    type IntoIter = OpaqueIter<'m, Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter().into_iter()
    }
}

impl<'m, M: Mapping> IntoIterator for &ReadOnlyView<'m, M> {
    type Item = Result<M::Entry<'m>, ViewError>;
    type IntoIter = OpaqueIter<'m, Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter().into_iter()
    }
}

// Source behind `ReadOnlyView::iter`: one mapping cursor per pass.
struct Entries<'m, M> {
    mapping: &'m M,
}

impl<'m, M: Mapping> SequenceSource for Entries<'m, M> {
    type Item = Result<M::Entry<'m>, ViewError>;
    type Cursor = M::Cursor<'m>;

    fn cursor(&self) -> M::Cursor<'m> {
        self.mapping.cursor()
    }
}
