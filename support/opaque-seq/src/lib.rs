//! Opaque sequences: restartable iteration that hides where the elements come from.
//!
//! An [`OpaqueSeq<T>`] wraps any [`SequenceSource`] behind a type-erased box. Its
//! type only mentions the element type, so a holder cannot name, downcast to, or
//! otherwise recover the concrete collection that produces the elements, nor
//! reach any of that collection's other operations.
//!
//! ```text
//! Vec<T>::IntoIter ─┐
//! Range<usize>     ─┼──▶ OpaqueSeq<'a, T> ──iter()──▶ OpaqueIter<'a, T>
//! Restart<F>       ─┘        (2 words)                  (fresh cursor)
//! ```
//!
//! Properties:
//!
//! - **Restartable**: every [`OpaqueSeq::iter`] opens a fresh cursor with its own
//!   position. Cursors never interfere with each other.
//! - **Lazy**: nothing is pulled from the source until a cursor is advanced.
//! - **Pass-through**: elements are yielded exactly as the source produces them.
//!   Fallible sources (`Item = Result<T, E>`) surface their errors unchanged.
//!
//! # Example
//!
//! ```
//! use shroud_opaque_seq::as_opaque_sequence;
//!
//! let letters = vec!['a', 'b', 'c'];
//! let seq = as_opaque_sequence(letters.iter().copied());
//!
//! assert_eq!(seq.iter().collect::<String>(), "abc");
//! // A second pass starts from the beginning again.
//! assert_eq!(seq.iter().count(), 3);
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

use alloc::boxed::Box;
use core::fmt;

/// Something that can open independent cursors over a sequence of elements.
///
/// Implemented for every `Iterator + Clone` (a cursor is a clone of the pristine
/// iterator) and for [`Restart`] factories built with [`from_fn`].
pub trait SequenceSource {
    type Item;
    type Cursor: Iterator<Item = Self::Item>;

    /// Opens a new cursor positioned before the first element.
    fn cursor(&self) -> Self::Cursor;
}

impl<I> SequenceSource for I
where
    I: Iterator + Clone,
{
    type Item = I::Item;
    type Cursor = I;

    fn cursor(&self) -> I {
        self.clone()
    }
}

/// A source that calls a factory each time a cursor is opened.
///
/// Created by [`from_fn`].
#[derive(Clone, Copy)]
pub struct Restart<F> {
    factory: F,
}

/// Builds a [`SequenceSource`] that runs `factory` once per cursor.
///
/// Useful when the source is not a cloneable iterator, e.g. a sequence that is
/// recomputed or re-read on every pass.
///
/// ```
/// use shroud_opaque_seq::{as_opaque_sequence, from_fn};
///
/// let seq = as_opaque_sequence(from_fn(|| (1..=3).map(|n| n * n)));
/// assert_eq!(seq.iter().collect::<Vec<_>>(), vec![1, 4, 9]);
/// ```
pub fn from_fn<F, C>(factory: F) -> Restart<F>
where
    F: Fn() -> C,
    C: IntoIterator,
{
    Restart { factory }
}

impl<F, C> SequenceSource for Restart<F>
where
    F: Fn() -> C,
    C: IntoIterator,
{
    type Item = C::Item;
    type Cursor = C::IntoIter;

    fn cursor(&self) -> C::IntoIter {
        (self.factory)().into_iter()
    }
}

impl<F> fmt::Debug for Restart<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Restart").finish_non_exhaustive()
    }
}

// Object-safe face of `SequenceSource`. Keeps the source's type out of `OpaqueSeq`.
trait ErasedSource<'a, T> {
    fn open(&self) -> Box<dyn Iterator<Item = T> + 'a>;
}

impl<'a, S> ErasedSource<'a, S::Item> for S
where
    S: SequenceSource,
    S::Cursor: 'a,
{
    fn open(&self) -> Box<dyn Iterator<Item = S::Item> + 'a> {
        Box::new(self.cursor())
    }
}

/// A restartable sequence whose concrete source is hidden.
///
/// The only thing an `OpaqueSeq` can do is open cursors. There is no accessor for
/// the source, and its `Debug` output does not describe it either.
///
/// See [crate-level docs](crate) for examples.
pub struct OpaqueSeq<'a, T> {
    source: Box<dyn ErasedSource<'a, T> + 'a>,
}

static_assertions::assert_eq_size!(OpaqueSeq<'static, u64>, [usize; 2]);
static_assertions::assert_not_impl_any!(
    OpaqueSeq<'static, u8>: Iterator, Clone, Extend<u8>, core::ops::Deref, AsRef<[u8]>
);

impl<'a, T> OpaqueSeq<'a, T> {
    /// Wraps `source`. Does not touch the source beyond moving it.
    pub fn new<S>(source: S) -> Self
    where
        S: SequenceSource<Item = T> + 'a,
        S::Cursor: 'a,
    {
        OpaqueSeq {
            source: Box::new(source),
        }
    }

    /// Opens a fresh cursor over the sequence.
    ///
    /// Each call is independent: advancing one cursor never moves another.
    pub fn iter(&self) -> OpaqueIter<'a, T> {
        OpaqueIter {
            cursor: self.source.open(),
        }
    }
}

/// Wraps `source` into an [`OpaqueSeq`].
pub fn as_opaque_sequence<'a, S>(source: S) -> OpaqueSeq<'a, S::Item>
where
    S: SequenceSource + 'a,
    S::Cursor: 'a,
{
    OpaqueSeq::new(source)
}

impl<T> fmt::Debug for OpaqueSeq<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueSeq").finish_non_exhaustive()
    }
}

impl<'a, T> IntoIterator for &OpaqueSeq<'a, T> {
    type Item = T;
    type IntoIter = OpaqueIter<'a, T>;

    fn into_iter(self) -> OpaqueIter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for OpaqueSeq<'a, T> {
    type Item = T;
    type IntoIter = OpaqueIter<'a, T>;

    fn into_iter(self) -> OpaqueIter<'a, T> {
        self.iter()
    }
}

/// A cursor over an [`OpaqueSeq`], with its own private position.
pub struct OpaqueIter<'a, T> {
    cursor: Box<dyn Iterator<Item = T> + 'a>,
}

static_assertions::assert_eq_size!(OpaqueIter<'static, u64>, [usize; 2]);
static_assertions::assert_not_impl_any!(OpaqueIter<'static, u8>: Clone, core::ops::Deref);

impl<T> Iterator for OpaqueIter<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.cursor.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

impl<T> fmt::Debug for OpaqueIter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueIter").finish_non_exhaustive()
    }
}
