//! Error types for the brhelp-index crate.
//!
//! Mirrors the four-kind error policy: `SourceMissing`/`SourceMalformed` are
//! fatal to the content indexer (C3); `Storage` is fatal to the search
//! engine (C4) only, and transitions it to `Closed`. Lookup failures are
//! never represented here — they are `Option::None` at the call site.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when parsing the TOC or building/querying the search index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// `brhelpcontent.xml` does not exist under the help root.
    #[error("TOC file missing at {path}")]
    SourceMissing {
        /// Expected path to the TOC file.
        path: PathBuf,
    },

    /// The TOC file exists but C2 could not extract any pages from it.
    #[error("TOC file at {path} is malformed: {source}")]
    SourceMalformed {
        /// Path to the TOC file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: brhelp_toc::TocError,
    },

    /// The index database could not be opened, written, or queried.
    #[error("search index storage failure at {path}: {message}")]
    Storage {
        /// Path to the index directory.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// An operation was attempted while the component was not in a state that permits it
    /// (`Uninitialized`/`Closed` for lookups, or a closed search engine for queries).
    #[error("not ready: {0}")]
    NotReady(&'static str),

    /// I/O error unrelated to the above (reading the help root, an HTML page, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl IndexError {
    /// Creates a `Storage` error from a path and Tantivy error.
    pub(crate) fn storage(path: PathBuf, source: &tantivy::TantivyError) -> Self {
        Self::Storage {
            path,
            message: source.to_string(),
        }
    }
}
