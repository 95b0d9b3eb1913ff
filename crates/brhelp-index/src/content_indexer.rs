//! The content indexer (C3): owns the parsed page graph and its derived
//! id / HelpID / breadcrumb indexes, and tracks freshness of the TOC source.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use brhelp_toc::{Page, PageGraph, TocError};
use tracing::info;

use crate::error::IndexError;
use crate::fingerprint::Fingerprint;

const TOC_FILENAME: &str = "brhelpcontent.xml";

/// Lifecycle state of a [`ContentIndexer`].
///
/// `Stale` from the design's state diagram is not tracked here as a
/// distinct variant — staleness is the query [`ContentIndexer::needs_reindex`],
/// not a state the indexer transitions into on its own; a `Ready` indexer
/// answers `needs_reindex() == true` without changing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Uninitialized,
    Ready,
    Closed,
}

struct Inner {
    state: State,
    graph: PageGraph,
    fingerprint: Option<Fingerprint>,
}

/// Owns the help-page graph and its derived lookup indexes (C3).
///
/// Parsing populates the graph once; subsequent lookups are read-only and
/// safe for any number of concurrent callers. Re-parsing (permitted from
/// `Ready`) replaces the graph wholesale under the same lock.
pub struct ContentIndexer {
    help_root: PathBuf,
    inner: RwLock<Inner>,
}

impl ContentIndexer {
    /// Creates an indexer over `help_root`. The graph is empty and the
    /// indexer is `Uninitialized` until [`ContentIndexer::parse_xml_structure`]
    /// succeeds.
    pub fn new(help_root: impl Into<PathBuf>) -> Self {
        Self {
            help_root: help_root.into(),
            inner: RwLock::new(Inner {
                state: State::Uninitialized,
                graph: PageGraph::default(),
                fingerprint: None,
            }),
        }
    }

    /// Path to the TOC file this indexer expects under its help root.
    pub fn toc_path(&self) -> PathBuf {
        self.help_root.join(TOC_FILENAME)
    }

    /// The help root this indexer was constructed with.
    pub fn help_root(&self) -> &Path {
        &self.help_root
    }

    /// Locates `brhelpcontent.xml`, parses it, and (re)populates the page
    /// graph and fingerprint. Fails with [`IndexError::SourceMissing`] if
    /// the TOC file doesn't exist, [`IndexError::SourceMalformed`] if it
    /// exists but C2 reports no pages or a parse error. On failure, the
    /// previously published graph (if any) is left untouched — no partial
    /// graph is ever published.
    pub fn parse_xml_structure(&self) -> Result<(), IndexError> {
        let toc_path = self.toc_path();
        let toc_bytes = fs::read(&toc_path).map_err(|_| IndexError::SourceMissing { path: toc_path.clone() })?;

        let pages = brhelp_toc::parse_toc(&toc_bytes).map_err(|source| IndexError::SourceMalformed {
            path: toc_path.clone(),
            source,
        })?;

        let graph = PageGraph::build(pages);
        let fingerprint = Fingerprint::compute(&toc_bytes, &self.help_root).map_err(IndexError::Io)?;

        info!(help_root = %self.help_root.display(), pages = graph.len(), "parsed TOC structure");

        let mut inner = self.inner.write().expect("content indexer lock poisoned");
        inner.graph = graph;
        inner.fingerprint = Some(fingerprint);
        inner.state = State::Ready;
        Ok(())
    }

    /// True once [`ContentIndexer::parse_xml_structure`] has succeeded and
    /// [`ContentIndexer::close`] has not been called since.
    pub fn is_ready(&self) -> bool {
        self.inner.read().expect("content indexer lock poisoned").state == State::Ready
    }

    /// Releases this indexer's held state. Idempotent; lookups after close
    /// behave as if the indexer were never parsed (empty results).
    pub fn close(&self) {
        let mut inner = self.inner.write().expect("content indexer lock poisoned");
        inner.state = State::Closed;
        inner.graph = PageGraph::default();
    }

    /// True iff the TOC file on disk has changed since this indexer's last
    /// successful parse (or if it has never been parsed at all — an
    /// unparsed indexer is always stale by definition). A TOC that has
    /// become unreadable since the last parse also counts as needing
    /// reindexing.
    pub fn needs_reindex(&self) -> bool {
        let inner = self.inner.read().expect("content indexer lock poisoned");
        let Some(last) = &inner.fingerprint else {
            return true;
        };
        let Ok(toc_bytes) = fs::read(self.toc_path()) else {
            return true;
        };
        let Ok(current) = Fingerprint::compute(&toc_bytes, &self.help_root) else {
            return true;
        };
        !last.matches(&current)
    }

    /// The fingerprint recorded by the last successful parse, if any.
    pub fn fingerprint(&self) -> Option<Fingerprint> {
        self.inner.read().expect("content indexer lock poisoned").fingerprint.clone()
    }

    /// Returns the page with the given id, or `None` if unknown or if the
    /// indexer is not `Ready`.
    pub fn get_page_by_id(&self, id: &str) -> Option<Page> {
        self.with_ready_graph(|g| g.get_page_by_id(id).cloned())
    }

    /// Returns the page with the given HelpID, or `None` if unknown or if
    /// the indexer is not `Ready`.
    pub fn get_page_by_help_id(&self, help_id: &str) -> Option<Page> {
        self.with_ready_graph(|g| g.get_page_by_help_id(help_id).cloned())
    }

    /// The ordered ancestor chain of `id`, root-first, inclusive.
    pub fn get_breadcrumb(&self, id: &str) -> Option<Vec<Page>> {
        self.with_ready_graph(|g| g.get_breadcrumb(id))
    }

    /// [`ContentIndexer::get_breadcrumb`] joined with `" > "`.
    pub fn get_breadcrumb_string(&self, id: &str) -> Option<String> {
        self.with_ready_graph(|g| g.get_breadcrumb_string(id))
    }

    /// The category (top-level ancestor text) of a page.
    pub fn get_category(&self, id: &str) -> Option<String> {
        self.with_ready_graph(|g| g.get_category(id))
    }

    /// Root-level pages, in document order.
    pub fn get_categories(&self) -> Vec<Page> {
        self.with_ready_graph(|g| g.categories().into_iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Direct children of a section, in document order. `None` if
    /// `section_id` is unknown, is not a section, or the indexer isn't
    /// `Ready`.
    pub fn browse(&self, section_id: &str) -> Option<Vec<Page>> {
        self.with_ready_graph(|g| g.browse(section_id).map(|pages| pages.into_iter().cloned().collect()))?
    }

    /// Pages in TOC document order, for a search index rebuild walk. Empty
    /// if the indexer isn't `Ready`.
    pub fn pages_in_document_order(&self) -> Vec<Page> {
        self.with_ready_graph(|g| g.iter_document_order().into_iter().cloned().collect())
            .unwrap_or_default()
    }

    fn with_ready_graph<T>(&self, f: impl FnOnce(&PageGraph) -> T) -> Option<T> {
        let inner = self.inner.read().expect("content indexer lock poisoned");
        if inner.state != State::Ready {
            return None;
        }
        Some(f(&inner.graph))
    }
}
