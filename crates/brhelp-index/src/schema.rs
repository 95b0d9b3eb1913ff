//! Index schema definition for the brhelp search index.
//!
//! One record per page (see the data model): `title` is indexed with a
//! high positional weight, `plain_text` medium, `breadcrumb_path` low.
//! `page_id`, `file_path`, `help_id`, and `category` are stored but not
//! tokenized — they're looked up or filtered on exactly, never searched.

use tantivy::schema::{Field, FAST, STORED, STRING, Schema, TextFieldIndexing, TextOptions};

use crate::analyzer::BRHELP_TOKENIZER;

/// Handles to all fields in the index schema.
#[derive(Debug, Clone)]
pub struct IndexSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Unique page identifier, matching [`brhelp_toc::Page::id`]. Stored, exact-match.
    pub page_id: Field,
    /// Page title (`Page::text`), tokenized and stored. Highest search weight.
    pub title: Field,
    /// Extracted body text from the HTML page, tokenized and stored. Medium weight.
    pub plain_text: Field,
    /// Breadcrumb string, tokenized and stored. Lowest search weight.
    pub breadcrumb_path: Field,
    /// Relative path to the backing HTML file, stored only.
    pub file_path: Field,
    /// HelpID, stored only (empty string when the page has none).
    pub help_id: Field,
    /// Category (top-level ancestor text), stored only, exact-match filter.
    pub category: Field,
    /// Position of the page in TOC document order, used only as the final
    /// ranking tie-breaker.
    pub doc_order: Field,
}

impl IndexSchema {
    /// Creates a new index schema with all fields configured.
    pub fn new() -> Self {
        let mut builder = Schema::builder();

        let page_id = builder.add_text_field("page_id", STRING | STORED);

        let title_options = TextOptions::default()
            .set_indexing_options(TextFieldIndexing::default().set_tokenizer(BRHELP_TOKENIZER))
            .set_stored();
        let title = builder.add_text_field("title", title_options);

        let plain_text_options = TextOptions::default()
            .set_indexing_options(TextFieldIndexing::default().set_tokenizer(BRHELP_TOKENIZER))
            .set_stored();
        let plain_text = builder.add_text_field("plain_text", plain_text_options);

        let breadcrumb_options = TextOptions::default()
            .set_indexing_options(TextFieldIndexing::default().set_tokenizer(BRHELP_TOKENIZER))
            .set_stored();
        let breadcrumb_path = builder.add_text_field("breadcrumb_path", breadcrumb_options);

        let file_path = builder.add_text_field("file_path", STORED);
        let help_id = builder.add_text_field("help_id", STRING | STORED);
        let category = builder.add_text_field("category", STRING | STORED);
        let doc_order = builder.add_u64_field("doc_order", STORED | FAST);

        let schema = builder.build();

        Self {
            schema,
            page_id,
            title,
            plain_text,
            breadcrumb_path,
            file_path,
            help_id,
            category,
            doc_order,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self::new()
    }
}
