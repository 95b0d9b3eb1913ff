//! The help graph: pages, their parent/child links, and derived breadcrumbs.

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::{error, warn};

/// A single node of the help graph — a `Section` or a `Page` from the TOC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Globally unique id, taken verbatim from the TOC's `Id` attribute.
    pub id: String,
    /// Display name (`Text`/`t` attribute).
    pub text: String,
    /// Relative POSIX-style path under the help root, if this node has content.
    pub file_path: Option<String>,
    /// True for `Section`/`S` elements, false for `Page`/`P` elements.
    pub is_section: bool,
    /// Numeric HelpID, rendered as a string, if present.
    pub help_id: Option<String>,
    /// Id of the nearest enclosing `Section`/`Page`, if any.
    pub parent_id: Option<String>,
    /// Ids of direct children, in document order.
    pub child_ids: Vec<String>,
}

/// The parsed help graph, plus the derived indexes C3 maintains over it.
///
/// Pages are stored in a flat map keyed by id rather than as an owning tree
/// of nodes: `parent_id` and `child_ids` are stable string references into
/// the same map, so looking up a page or its parent is a single hash lookup
/// regardless of depth, and there is no pointer-cycle bookkeeping.
#[derive(Debug, Default)]
pub struct PageGraph {
    pages: HashMap<String, Page>,
    /// Root pages (`parent_id.is_none()`), in document order.
    roots: Vec<String>,
    help_id_index: HashMap<String, String>,
    breadcrumb_cache: RefCell<HashMap<String, Vec<Page>>>,
}

impl PageGraph {
    /// Builds a graph from parsed pages, recording document order and indexing HelpIDs.
    ///
    /// Pages are expected in document order as produced by [`crate::parse`]. A
    /// duplicate `help_id` keeps the most recently seen page and logs the
    /// collision; a `parent_id` referring to no known page is dropped (the
    /// page is treated as a root) and logged.
    pub fn build(pages: Vec<Page>) -> Self {
        let mut graph = Self::default();

        for mut page in pages {
            if let Some(hid) = &page.help_id {
                if let Some(existing) = graph.help_id_index.get(hid) {
                    if existing != &page.id {
                        warn!(help_id = %hid, previous_page = %existing, new_page = %page.id, "duplicate HelpID, last write wins");
                    }
                }
                graph.help_id_index.insert(hid.clone(), page.id.clone());
            }
            match &page.parent_id {
                Some(parent_id) if graph.pages.contains_key(parent_id) => {}
                Some(parent_id) => {
                    error!(page_id = %page.id, missing_parent = %parent_id, "parent reference missing, dropping edge and treating page as root");
                    page.parent_id = None;
                    graph.roots.push(page.id.clone());
                }
                None => graph.roots.push(page.id.clone()),
            }
            graph.pages.insert(page.id.clone(), page);
        }

        graph
    }

    /// Number of pages in the graph.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True if the graph has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Returns the page with the given id, or `None` if unknown.
    pub fn get_page_by_id(&self, id: &str) -> Option<&Page> {
        self.pages.get(id)
    }

    /// Returns the page with the given HelpID, or `None` if unknown.
    pub fn get_page_by_help_id(&self, help_id: &str) -> Option<&Page> {
        let id = self.help_id_index.get(help_id)?;
        self.pages.get(id)
    }

    /// Root-level pages, in document order.
    pub fn categories(&self) -> Vec<&Page> {
        self.roots.iter().filter_map(|id| self.pages.get(id)).collect()
    }

    /// Direct children of a section, in document order, or `None` if `section_id`
    /// is unknown or is not a section (the "not browsable" case).
    pub fn browse(&self, section_id: &str) -> Option<Vec<&Page>> {
        let section = self.pages.get(section_id)?;
        if !section.is_section {
            return None;
        }
        Some(
            section
                .child_ids
                .iter()
                .filter_map(|id| self.pages.get(id))
                .collect(),
        )
    }

    /// The ordered ancestor chain of `id`, root-first, inclusive of `id` itself.
    /// `None` if `id` is unknown. Memoized per graph instance.
    ///
    /// A cycle (a page reachable from itself through `parent_id` links) is
    /// detected by tracking visited ids; the chain is truncated at the first
    /// revisit and the condition is logged, per the "no silent corruption"
    /// error-handling policy.
    pub fn get_breadcrumb(&self, id: &str) -> Option<Vec<Page>> {
        if let Some(cached) = self.breadcrumb_cache.borrow().get(id) {
            return Some(cached.clone());
        }

        let _ = self.pages.get(id)?;

        let mut chain = Vec::new();
        let mut visited = std::collections::HashSet::new();
        let mut current = Some(id.to_string());

        while let Some(current_id) = current {
            if !visited.insert(current_id.clone()) {
                error!(page_id = %id, cycle_at = %current_id, "cyclic parent link detected, truncating breadcrumb");
                break;
            }
            let Some(page) = self.pages.get(&current_id) else {
                break;
            };
            chain.push(page.clone());
            current = page.parent_id.clone();
        }
        chain.reverse();

        self.breadcrumb_cache
            .borrow_mut()
            .insert(id.to_string(), chain.clone());
        Some(chain)
    }

    /// `get_breadcrumb` joined by `" > "`, or `None` if `id` is unknown.
    pub fn get_breadcrumb_string(&self, id: &str) -> Option<String> {
        let chain = self.get_breadcrumb(id)?;
        Some(
            chain
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join(" > "),
        )
    }

    /// The category of a page: the `text` of its top-level ancestor (itself, at depth 0).
    pub fn get_category(&self, id: &str) -> Option<String> {
        let chain = self.get_breadcrumb(id)?;
        chain.first().map(|p| p.text.clone())
    }

    /// All pages, in the arbitrary order the underlying map stores them (for
    /// callers that need an unordered full scan, e.g. a search index rebuild's
    /// iteration — which instead uses [`PageGraph::iter_document_order`]).
    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    /// All pages in document order, suitable for an index rebuild walk.
    pub fn iter_document_order(&self) -> Vec<&Page> {
        let mut seen = std::collections::HashSet::new();
        let mut ordered = Vec::with_capacity(self.pages.len());
        let mut stack: Vec<&str> = self.roots.iter().rev().map(String::as_str).collect();

        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let Some(page) = self.pages.get(id) else {
                continue;
            };
            ordered.push(page);
            for child in page.child_ids.iter().rev() {
                stack.push(child.as_str());
            }
        }
        ordered
    }
}
