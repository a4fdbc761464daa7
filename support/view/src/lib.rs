//! Read-only views over key-value mappings.
//!
//! Library code often owns a map it needs to show to callers without letting them
//! change it, and without paying for a copy. [`as_read_only_view`] wraps a borrowed
//! [`Mapping`] in a [`ReadOnlyView`]:
//!
//! - **Live**: lookups, `len` and iteration always read the mapping's current state.
//! - **Read-only**: the view has no insert/remove/update operations.
//! - **Opaque iteration**: [`ReadOnlyView::iter`] returns an
//!   [`OpaqueSeq`](shroud_opaque_seq::OpaqueSeq), so the concrete cursor type of the
//!   mapping does not leak either.
//! - **Escape hatch**: [`ReadOnlyView::underlying`] hands back the very mapping the
//!   view was made from, for identity checks and interop.
//!
//! [`Mapping`] is implemented for `std` and `hashbrown` hash maps, `BTreeMap`, and
//! [`TrackedMap`], a map that can change behind a live view and reports
//! [`ViewError::ConcurrentModification`] to cursors that were open at the time.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use shroud_view::{TrackedMap, ViewError, as_read_only_view};
//!
//! let map: TrackedMap<u32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
//! let view = as_read_only_view(&map);
//!
//! let mut cursor = view.into_iter();
//! assert_eq!(cursor.next(), Some(Ok((1, Rc::new("one")))));
//!
//! map.insert(3, "three");
//! assert_eq!(view.len(), 3);
//! assert!(matches!(
//!     cursor.next(),
//!     Some(Err(ViewError::ConcurrentModification { .. }))
//! ));
//! ```

mod error;
mod mapping;
mod tracked;
mod view;

pub use error::ViewError;
pub use mapping::{Lookup, Mapping, Unchecked};
pub use tracked::{TrackedCursor, TrackedMap};
pub use view::{ReadOnlyView, as_read_only_view};

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub(crate) mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
