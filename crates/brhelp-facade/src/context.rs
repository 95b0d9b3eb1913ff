//! The facade's application context: immutable, explicitly passed handles
//! to the indexer and search engine plus display configuration.

use std::path::PathBuf;
use std::sync::Arc;

use brhelp_config::Config;

use crate::traits::{PageLookup, SearchIndex};

/// Bundles thread-safe handles to C3 and C4 with the display configuration
/// `brhelp-facade` operations need (product version, online help base URL,
/// default search limit).
///
/// Constructed once and handed to each operation as a normal function
/// parameter — there is no thread-local or singleton access to it.
#[derive(Clone)]
pub struct AppContext {
    /// Handle to the content indexer (C3).
    pub indexer: Arc<dyn PageLookup>,
    /// Handle to the search engine (C4).
    pub search: Arc<dyn SearchIndex>,
    /// Directory containing the TOC and HTML pages, for fresh-from-disk
    /// `plain_text` extraction.
    pub help_root: PathBuf,
    /// Product version string, embedded in `online_help_url`.
    pub as_version: String,
    /// Prefix for derived online help URLs.
    pub online_help_base_url: String,
    /// Default result count when a caller omits `limit` from `search_help`.
    pub search_limit_default: usize,
}

impl AppContext {
    /// Builds a context from a loaded config and the two component handles.
    pub fn new(indexer: Arc<dyn PageLookup>, search: Arc<dyn SearchIndex>, config: &Config) -> Self {
        Self {
            indexer,
            search,
            help_root: config.help_root.clone(),
            as_version: config.as_version.clone(),
            online_help_base_url: config.online_help_base_url.clone(),
            search_limit_default: config.search_limit_default,
        }
    }
}
