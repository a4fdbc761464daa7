//! Shroud - publish collection state without giving it away
//!
//! # Overview
//!
//! Library code regularly needs to show callers what is inside its collections while
//! keeping the right to change them. Shroud provides two small adapters for that:
//!
//! - [`ReadOnlyView`]: a live, non-copying, read-only window onto a key-value
//!   [`Mapping`], created with [`as_read_only_view`].
//! - [`OpaqueSeq`]: a restartable sequence that hides its source's concrete type,
//!   created with [`as_opaque_sequence`].
//!
//! A view's iteration is an [`OpaqueSeq`], so neither the mapping nor its iterator
//! types leak through it. The one deliberate exception is
//! [`ReadOnlyView::underlying`], which returns the wrapped mapping itself.
//!
//! # Quick Start
//!
//! ```
//! use std::collections::BTreeMap;
//! use shroud::{as_opaque_sequence, as_read_only_view};
//!
//! let inventory = BTreeMap::from([("apples", 3), ("pears", 0)]);
//! let view = as_read_only_view(&inventory);
//!
//! assert_eq!(view.try_get(&"pears"), Some(&0));
//! assert_eq!(view.try_get(&"plums"), None);
//!
//! let names: Vec<&str> = view
//!     .iter()
//!     .into_iter()
//!     .map(|entry| *entry.unwrap().0)
//!     .collect();
//! assert_eq!(names, ["apples", "pears"]);
//!
//! let evens = as_opaque_sequence((0..10).step_by(2));
//! assert_eq!(evens.iter().collect::<Vec<_>>(), [0, 2, 4, 6, 8]);
//! ```
//!
//! # Live mutation
//!
//! A view over a `std` map freezes the map for as long as the view lives (it is a
//! shared borrow). [`TrackedMap`] can be changed through `&self` instead, and
//! cursors that were open during a change to its key set report
//! [`ViewError::ConcurrentModification`]:
//!
//! ```
//! use shroud::{TrackedMap, ViewError, as_read_only_view};
//!
//! let map: TrackedMap<&str, u32> = [("a", 1), ("b", 2)].into_iter().collect();
//! let view = as_read_only_view(&map);
//! let mut cursor = view.into_iter();
//! cursor.next();
//!
//! map.remove(&"b");
//! assert_eq!(view.len(), 1);
//! assert!(matches!(cursor.next(), Some(Err(ViewError::ConcurrentModification { .. }))));
//! ```

pub use shroud_opaque_seq::{
    OpaqueIter, OpaqueSeq, Restart, SequenceSource, as_opaque_sequence, from_fn,
};
pub use shroud_view::{
    Lookup, Mapping, ReadOnlyView, TrackedCursor, TrackedMap, Unchecked, ViewError,
    as_read_only_view,
};
