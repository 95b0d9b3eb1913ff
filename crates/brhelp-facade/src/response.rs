//! Plain `serde::Serialize` response shapes returned by [`crate::operations`].
//!
//! Kept as bare structs, not wrapped transport envelopes, so an embedding
//! binary can re-serialize them over whatever protocol it speaks (JSON-RPC,
//! MCP tool results, ...) without field renaming.

use serde::Serialize;

/// One search hit, as returned inside a [`SearchResponse`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultDto {
    /// Id of the matching page.
    pub page_id: String,
    /// Page title.
    pub title: String,
    /// Relative path to the page's HTML file.
    pub file_path: String,
    /// HelpID, if the page had one.
    pub help_id: Option<String>,
    /// Breadcrumb string, root-first.
    pub breadcrumb_path: String,
    /// Top-level ancestor text.
    pub category: String,
    /// Short extract of the page's body text around a matching token.
    pub snippet: String,
    /// Relevance score; higher is more relevant.
    pub score: f32,
}

/// Response for `search_help`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    /// Number of results returned.
    pub total: usize,
    /// The results themselves, already in ranked order.
    pub results: Vec<SearchResultDto>,
}

/// A category or browsable child, as returned by `get_categories` / `browse_section`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    /// Page id.
    pub id: String,
    /// Page title.
    pub title: String,
    /// True if this node can itself be browsed (has children).
    pub is_section: bool,
    /// Online help mirror URL for this page.
    pub online_help_url: String,
}

/// Response for `get_categories`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoriesResponse {
    /// Number of categories returned.
    pub total: usize,
    /// Root-level pages, in document order.
    pub categories: Vec<Category>,
}

/// Response for `browse_section`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowseResponse {
    /// Number of children returned.
    pub total: usize,
    /// Direct children of the requested section, in document order.
    pub children: Vec<Category>,
}

/// Response for `get_page_by_id` / `get_page_by_help_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageContent {
    /// Page id.
    pub page_id: String,
    /// Page title.
    pub title: String,
    /// Body text extracted fresh from the backing HTML file at request time.
    pub plain_text: String,
    /// Ancestor titles, root-first, inclusive of this page.
    pub breadcrumb: Vec<String>,
    /// Online help mirror URL for this page.
    pub online_help_url: String,
    /// HelpID, if the page had one.
    pub help_id: Option<String>,
    /// Relative path to the page's HTML file.
    pub file_path: String,
}
