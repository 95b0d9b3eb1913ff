//! Query facade (C5): the five operations brhelp exposes to external
//! transports (IDE plugins, MCP tool handlers, ...), built on top of the
//! content indexer and search engine from [`brhelp_index`].
//!
//! An [`AppContext`] bundles thread-safe handles to both components plus
//! display configuration, and is passed explicitly into each operation —
//! never reached for through a thread-local or global singleton. C3 and C4
//! are exposed through the narrow [`PageLookup`]/[`Breadcrumbs`]/[`SearchIndex`]
//! traits so tests can substitute in-memory fakes for either side.

#![warn(missing_docs)]

mod context;
mod error;
mod operations;
mod response;
mod traits;
mod url;

pub use context::AppContext;
pub use error::FacadeError;
pub use operations::{browse_section, get_categories, get_page_by_help_id, get_page_by_id, search_help};
pub use response::{BrowseResponse, Category, CategoriesResponse, PageContent, SearchResponse, SearchResultDto};
pub use traits::{Breadcrumbs, PageLookup, SearchIndex};
pub use url::online_help_url;
