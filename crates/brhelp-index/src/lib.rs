//! Content indexing and full-text search for brhelp's vendor help tree.
//!
//! This crate owns the two stateful components built on top of the TOC
//! parser ([`brhelp_toc`]) and HTML text extractor ([`brhelp_html`]):
//!
//! - [`ContentIndexer`] (C3) parses `brhelpcontent.xml` into a page graph
//!   and serves id / HelpID / breadcrumb lookups over it.
//! - [`SearchEngine`] (C4) builds a persistent Tantivy index over page
//!   content and serves ranked, optionally category-filtered, full-text
//!   queries against it.
//!
//! # Indexing
//!
//! ```ignore
//! use brhelp_index::{ContentIndexer, SearchEngine};
//!
//! let indexer = ContentIndexer::new(help_root);
//! indexer.parse_xml_structure()?;
//! let engine = SearchEngine::open(&db_path, &indexer, false)?;
//! ```
//!
//! # Searching
//!
//! ```ignore
//! let results = engine.search("move absolute", None, 20)?;
//! ```

#![warn(missing_docs)]

mod analyzer;
mod content_indexer;
mod error;
mod fingerprint;
mod schema;
mod search_engine;

pub use content_indexer::ContentIndexer;
pub use error::IndexError;
pub use fingerprint::Fingerprint;
pub use schema::IndexSchema;
pub use search_engine::{SearchEngine, SearchResult};
