//! The search engine (C4): builds and queries a persistent Tantivy index
//! over page titles, extracted body text, and breadcrumb paths.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tantivy::collector::TopDocs;
use tantivy::directory::MmapDirectory;
use tantivy::query::{BooleanQuery, BoostQuery, Occur, Query, RegexQuery, TermQuery};
use tantivy::schema::{IndexRecordOption, Value};
use tantivy::{Index, IndexWriter, TantivyDocument, Term};

use crate::analyzer::{BRHELP_TOKENIZER, build_analyzer};
use crate::content_indexer::ContentIndexer;
use crate::error::IndexError;
use crate::fingerprint::Fingerprint;
use crate::schema::IndexSchema;

/// Minimum token length honored by [`SearchEngine::search`]; shorter tokens
/// are dropped before query construction.
const MIN_PREFIX_LEN: usize = 2;

/// Maximum snippet length, in bytes, returned in [`SearchResult::snippet`].
const SNIPPET_MAX_LEN: usize = 200;

/// Query-time boost applied to matches in `title`.
const WEIGHT_TITLE: f32 = 3.0;
/// Query-time boost applied to matches in `plain_text`.
const WEIGHT_PLAIN_TEXT: f32 = 2.0;
/// Query-time boost applied to matches in `breadcrumb_path`.
const WEIGHT_BREADCRUMB: f32 = 1.0;

const DEFAULT_WRITER_HEAP_BYTES: usize = 50_000_000;

/// One page's full-text record, as inserted into the index during a build.
#[derive(Debug, Clone)]
struct SearchRecord {
    page_id: String,
    title: String,
    plain_text: String,
    breadcrumb_path: String,
    file_path: String,
    help_id: String,
    category: String,
    doc_order: u64,
}

/// A single search hit, as returned by [`SearchEngine::search`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Id of the matching page.
    pub page_id: String,
    /// Page title.
    pub title: String,
    /// Relative path to the page's HTML file, if it had one.
    pub file_path: String,
    /// HelpID, if the page had one.
    pub help_id: Option<String>,
    /// Breadcrumb string, root-first.
    pub breadcrumb_path: String,
    /// Top-level ancestor text.
    pub category: String,
    /// A short extract of `plain_text` centered on a matching token, the
    /// token bracketed as `[token]`; empty if no `plain_text` match.
    pub snippet: String,
    /// Relevance score; higher is more relevant.
    pub score: f32,
}

enum EngineState {
    Open { index: Index, writer: IndexWriter },
    Closed,
}

/// Builds and queries the persistent full-text index over a help tree's
/// pages (C4).
pub struct SearchEngine {
    db_path: PathBuf,
    schema: IndexSchema,
    state: Mutex<EngineState>,
}

impl SearchEngine {
    /// Opens (building if necessary) the search index at `db_path` for the
    /// pages currently held by `indexer`.
    ///
    /// Rebuilds when `force_rebuild` is set, the stored fingerprint is
    /// absent, or it differs from `indexer`'s current fingerprint. A fresh
    /// build drops and recreates the index tables, walks `indexer`'s pages
    /// in document order extracting content via `brhelp_html`, and writes
    /// the new fingerprint only after every record has committed — so a
    /// crash mid-rebuild leaves the old (mismatching) fingerprint in place
    /// and is retried on the next open.
    pub fn open(db_path: &Path, indexer: &ContentIndexer, force_rebuild: bool) -> Result<Self, IndexError> {
        std::fs::create_dir_all(db_path).map_err(IndexError::Io)?;

        let schema = IndexSchema::new();
        let dir = MmapDirectory::open(db_path).map_err(|e| {
            let err: tantivy::TantivyError = e.into();
            IndexError::storage(db_path.to_path_buf(), &err)
        })?;
        let index = Index::open_or_create(dir, schema.schema().clone())
            .map_err(|e| IndexError::storage(db_path.to_path_buf(), &e))?;
        index.tokenizers().register(BRHELP_TOKENIZER, build_analyzer());

        let current_fingerprint = indexer.fingerprint();
        let stored_fingerprint = Fingerprint::read(db_path);
        let needs_build = force_rebuild
            || stored_fingerprint.is_none()
            || match (&stored_fingerprint, &current_fingerprint) {
                (Some(stored), Some(current)) => !stored.matches(current),
                _ => true,
            };

        let writer: IndexWriter = index
            .writer(DEFAULT_WRITER_HEAP_BYTES)
            .map_err(|e| IndexError::storage(db_path.to_path_buf(), &e))?;

        let engine = Self {
            db_path: db_path.to_path_buf(),
            schema,
            state: Mutex::new(EngineState::Open { index, writer }),
        };

        if needs_build {
            engine.rebuild(indexer, current_fingerprint)?;
        }

        Ok(engine)
    }

    fn rebuild(&self, indexer: &ContentIndexer, fingerprint: Option<Fingerprint>) -> Result<(), IndexError> {
        let records = self.collect_records(indexer);

        let mut guard = self.state.lock().expect("search engine lock poisoned");
        let EngineState::Open { writer, .. } = &mut *guard else {
            return Err(IndexError::NotReady("search engine is closed"));
        };

        writer
            .delete_all_documents()
            .map_err(|e| IndexError::storage(self.db_path.clone(), &e))?;
        for record in &records {
            writer
                .add_document(self.to_document(record))
                .map_err(|e| IndexError::storage(self.db_path.clone(), &e))?;
        }
        writer.commit().map_err(|e| IndexError::storage(self.db_path.clone(), &e))?;
        drop(guard);

        if let Some(fingerprint) = fingerprint {
            fingerprint.write(&self.db_path)?;
        }
        Ok(())
    }

    fn collect_records(&self, indexer: &ContentIndexer) -> Vec<SearchRecord> {
        indexer
            .pages_in_document_order()
            .into_iter()
            .enumerate()
            .map(|(doc_order, page)| {
                let (title, plain_text) = match &page.file_path {
                    Some(file_path) => {
                        let full_path = indexer.help_root().join(file_path);
                        match std::fs::read(&full_path) {
                            Ok(bytes) => {
                                let extracted = brhelp_html::extract(&bytes);
                                if extracted.title.is_empty() {
                                    (page.text.clone(), extracted.plain_text)
                                } else {
                                    (extracted.title, extracted.plain_text)
                                }
                            }
                            Err(_) => {
                                tracing::warn!(page_id = %page.id, path = %full_path.display(), "page file unreadable, indexing with empty content");
                                (page.text.clone(), String::new())
                            }
                        }
                    }
                    None => (page.text.clone(), String::new()),
                };

                let breadcrumb_path = indexer.get_breadcrumb_string(&page.id).unwrap_or_else(|| page.text.clone());
                let category = indexer.get_category(&page.id).unwrap_or_else(|| page.text.clone());

                SearchRecord {
                    page_id: page.id,
                    title,
                    plain_text,
                    breadcrumb_path,
                    file_path: page.file_path.unwrap_or_default(),
                    help_id: page.help_id.unwrap_or_default(),
                    category,
                    doc_order: doc_order as u64,
                }
            })
            .collect()
    }

    fn to_document(&self, record: &SearchRecord) -> TantivyDocument {
        let mut doc = TantivyDocument::new();
        doc.add_text(self.schema.page_id, &record.page_id);
        doc.add_text(self.schema.title, &record.title);
        doc.add_text(self.schema.plain_text, &record.plain_text);
        doc.add_text(self.schema.breadcrumb_path, &record.breadcrumb_path);
        doc.add_text(self.schema.file_path, &record.file_path);
        doc.add_text(self.schema.help_id, &record.help_id);
        doc.add_text(self.schema.category, &record.category);
        doc.add_u64(self.schema.doc_order, record.doc_order);
        doc
    }

    /// Searches the index for `query`, optionally constrained to `category`,
    /// returning at most `limit` results ordered by descending score.
    ///
    /// An empty or whitespace-only query, or one whose tokens are all
    /// shorter than the minimum prefix length, returns an empty sequence
    /// without touching the index. Returns [`IndexError::NotReady`] if the
    /// engine has been closed.
    pub fn search(&self, query: &str, category: Option<&str>, limit: usize) -> Result<Vec<SearchResult>, IndexError> {
        let tokens: Vec<String> = query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .filter(|t| t.len() >= MIN_PREFIX_LEN)
            .collect();
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let guard = self.state.lock().expect("search engine lock poisoned");
        let EngineState::Open { index, .. } = &*guard else {
            return Err(IndexError::NotReady("search engine is closed"));
        };
        let reader = index.reader().map_err(|e| IndexError::storage(self.db_path.clone(), &e))?;
        let searcher = reader.searcher();

        let tantivy_query = self.build_query(&tokens, category);
        // Over-fetch before the tie-break re-sort below, since Tantivy's own
        // BM25 ordering doesn't know about the exact/begins-with/doc_order rules.
        let fetch_limit = limit.max(1).saturating_mul(4);
        let top_docs = searcher
            .search(&tantivy_query, &TopDocs::with_limit(fetch_limit))
            .map_err(|e| IndexError::storage(self.db_path.clone(), &e))?;

        let mut results: Vec<(SearchResult, u64)> = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let doc: TantivyDocument = searcher
                .doc(address)
                .map_err(|e| IndexError::storage(self.db_path.clone(), &e))?;
            let result = self.to_result(&doc, score, &tokens);
            let doc_order = field_u64(&doc, self.schema.doc_order);
            results.push((result, doc_order));
        }

        let query_lower = query.trim().to_lowercase();
        results.sort_by(|(a, a_order), (b, b_order)| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| rank_key(a, &query_lower).cmp(&rank_key(b, &query_lower)))
                .then_with(|| a.title.len().cmp(&b.title.len()))
                .then_with(|| a_order.cmp(b_order))
        });

        results.truncate(limit);
        Ok(results.into_iter().map(|(result, _)| result).collect())
    }

    fn build_query(&self, tokens: &[String], category: Option<&str>) -> BooleanQuery {
        let mut must: Vec<(Occur, Box<dyn Query>)> = Vec::new();

        for token in tokens {
            let per_field: Vec<(Occur, Box<dyn Query>)> = [
                (self.schema.title, WEIGHT_TITLE),
                (self.schema.plain_text, WEIGHT_PLAIN_TEXT),
                (self.schema.breadcrumb_path, WEIGHT_BREADCRUMB),
            ]
            .into_iter()
            .filter_map(|(field, weight)| {
                let pattern = format!("{}.*", escape_regex_literal(token));
                let regex_query = RegexQuery::from_pattern(&pattern, field).ok()?;
                let boosted: Box<dyn Query> = Box::new(BoostQuery::new(Box::new(regex_query), weight));
                Some((Occur::Should, boosted))
            })
            .collect();
            must.push((Occur::Must, Box::new(BooleanQuery::new(per_field))));
        }

        if let Some(category) = category {
            let term = Term::from_field_text(self.schema.category, category);
            let term_query = TermQuery::new(term, IndexRecordOption::Basic);
            must.push((Occur::Must, Box::new(term_query)));
        }

        BooleanQuery::new(must)
    }

    fn to_result(&self, doc: &TantivyDocument, score: f32, tokens: &[String]) -> SearchResult {
        let title = field_text(doc, self.schema.title);
        let plain_text = field_text(doc, self.schema.plain_text);
        let help_id = field_text(doc, self.schema.help_id);
        SearchResult {
            page_id: field_text(doc, self.schema.page_id),
            title: title.clone(),
            file_path: field_text(doc, self.schema.file_path),
            help_id: if help_id.is_empty() { None } else { Some(help_id) },
            breadcrumb_path: field_text(doc, self.schema.breadcrumb_path),
            category: field_text(doc, self.schema.category),
            snippet: build_snippet(&plain_text, tokens),
            score,
        }
    }

    /// Releases the index handle. Idempotent; subsequent `search` calls
    /// return [`IndexError::NotReady`].
    pub fn close(&self) {
        let mut guard = self.state.lock().expect("search engine lock poisoned");
        *guard = EngineState::Closed;
    }
}

/// Relative ranking key for the tie-break chain: lower sorts first.
/// (a) exact case-insensitive title match, (b) title begins-with match.
fn rank_key(result: &SearchResult, query_lower: &str) -> u8 {
    let title_lower = result.title.to_lowercase();
    if title_lower == query_lower {
        0
    } else if title_lower.starts_with(query_lower) {
        1
    } else {
        2
    }
}

fn build_snippet(plain_text: &str, tokens: &[String]) -> String {
    let lower = plain_text.to_lowercase();
    let Some((start, matched_len)) = tokens.iter().find_map(|token| lower.find(token.as_str()).map(|pos| (pos, token.len()))) else {
        return String::new();
    };

    let half_window = SNIPPET_MAX_LEN / 2;
    let window_start = start.saturating_sub(half_window);
    let window_end = (start + matched_len + half_window).min(plain_text.len());

    let window_start = floor_char_boundary(plain_text, window_start);
    let window_end = ceil_char_boundary(plain_text, window_end);

    let before = &plain_text[window_start..start];
    let matched = &plain_text[start..start + matched_len];
    let after = &plain_text[start + matched_len..window_end];

    format!("{before}[{matched}]{after}")
}

/// Escapes regex metacharacters in a token so it can be embedded in a
/// prefix pattern without the query author controlling the regex grammar.
fn escape_regex_literal(token: &str) -> String {
    let mut escaped = String::with_capacity(token.len());
    for ch in token.chars() {
        if "\\.+*?()|[]{}^$".contains(ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_char_boundary(s: &str, mut idx: usize) -> usize {
    while idx < s.len() && !s.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

fn field_text(doc: &TantivyDocument, field: tantivy::schema::Field) -> String {
    doc.get_first(field).and_then(|v| v.as_str()).unwrap_or_default().to_string()
}

fn field_u64(doc: &TantivyDocument, field: tantivy::schema::Field) -> u64 {
    doc.get_first(field).and_then(|v| v.as_u64()).unwrap_or(0)
}
