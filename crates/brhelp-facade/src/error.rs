//! Error type for the facade layer.

use thiserror::Error;

/// Errors surfaced by [`crate::operations`].
///
/// Unknown ids are not represented here — they are `None` per the
/// `LookupFailure` policy. This enum covers only failures that propagate
/// from the underlying indexer/search engine.
#[derive(Debug, Error)]
pub enum FacadeError {
    /// The search engine rejected a query (storage failure, or closed).
    #[error("search failed: {0}")]
    Search(#[source] brhelp_index::IndexError),
}
