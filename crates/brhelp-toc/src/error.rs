//! Error types for TOC parsing.

use thiserror::Error;

/// Errors that can occur while reading a table-of-contents document.
///
/// This does not cover "not found" style lookups on an already-built
/// [`crate::PageGraph`] — those return `Option::None` per the lookup-failure
/// policy, never an `Err`.
#[derive(Debug, Error)]
pub enum TocError {
    /// The XML was not well-formed.
    #[error("malformed TOC XML at byte {position}: {source}")]
    Malformed {
        /// Approximate byte offset of the failing event.
        position: usize,
        /// Underlying parser error.
        source: quick_xml::Error,
    },

    /// The document contained no `Section`/`Page` elements at all.
    #[error("TOC document contains no pages")]
    Empty,
}
