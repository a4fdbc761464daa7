use thiserror::Error;

/// Errors originated by view cursors.
///
/// A missing key is not an error: [`ReadOnlyView::try_get`](crate::ReadOnlyView::try_get)
/// reports it as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ViewError {
    /// The mapping's key set changed after the cursor was opened.
    #[error(
        "mapping was structurally modified during iteration (opened at epoch {opened_at}, now at {observed})"
    )]
    ConcurrentModification { opened_at: u64, observed: u64 },
}
