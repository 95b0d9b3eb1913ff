//! Narrow capability interfaces over C3 and C4, so tests can substitute
//! in-memory fakes for either side independently of the other.

use brhelp_index::{IndexError, SearchEngine, SearchResult};
use brhelp_toc::Page;

/// Id/category lookups and browsing over the parsed page graph (C3).
pub trait PageLookup: Breadcrumbs {
    /// See [`brhelp_index::ContentIndexer::get_page_by_id`].
    fn get_page_by_id(&self, id: &str) -> Option<Page>;
    /// See [`brhelp_index::ContentIndexer::get_page_by_help_id`].
    fn get_page_by_help_id(&self, help_id: &str) -> Option<Page>;
    /// See [`brhelp_index::ContentIndexer::get_categories`].
    fn get_categories(&self) -> Vec<Page>;
    /// See [`brhelp_index::ContentIndexer::browse`].
    fn browse(&self, section_id: &str) -> Option<Vec<Page>>;
}

/// Breadcrumb derivation over the parsed page graph (C3).
pub trait Breadcrumbs: Send + Sync {
    /// See [`brhelp_index::ContentIndexer::get_breadcrumb`].
    fn get_breadcrumb(&self, id: &str) -> Option<Vec<Page>>;
    /// See [`brhelp_index::ContentIndexer::get_breadcrumb_string`].
    fn get_breadcrumb_string(&self, id: &str) -> Option<String>;
}

/// Full-text search over the persistent index (C4).
pub trait SearchIndex: Send + Sync {
    /// See [`brhelp_index::SearchEngine::search`].
    fn search(&self, query: &str, category: Option<&str>, limit: usize) -> Result<Vec<SearchResult>, IndexError>;
}

impl Breadcrumbs for brhelp_index::ContentIndexer {
    fn get_breadcrumb(&self, id: &str) -> Option<Vec<Page>> {
        brhelp_index::ContentIndexer::get_breadcrumb(self, id)
    }

    fn get_breadcrumb_string(&self, id: &str) -> Option<String> {
        brhelp_index::ContentIndexer::get_breadcrumb_string(self, id)
    }
}

impl PageLookup for brhelp_index::ContentIndexer {
    fn get_page_by_id(&self, id: &str) -> Option<Page> {
        brhelp_index::ContentIndexer::get_page_by_id(self, id)
    }

    fn get_page_by_help_id(&self, help_id: &str) -> Option<Page> {
        brhelp_index::ContentIndexer::get_page_by_help_id(self, help_id)
    }

    fn get_categories(&self) -> Vec<Page> {
        brhelp_index::ContentIndexer::get_categories(self)
    }

    fn browse(&self, section_id: &str) -> Option<Vec<Page>> {
        brhelp_index::ContentIndexer::browse(self, section_id)
    }
}

impl SearchIndex for SearchEngine {
    fn search(&self, query: &str, category: Option<&str>, limit: usize) -> Result<Vec<SearchResult>, IndexError> {
        SearchEngine::search(self, query, category, limit)
    }
}
