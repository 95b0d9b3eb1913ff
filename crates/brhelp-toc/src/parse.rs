//! Streaming TOC parser (C2).
//!
//! Walks the XML event-by-event with [`quick_xml::Reader`] rather than
//! building a DOM, so a document with tens of thousands of entries never
//! needs to be fully materialized in memory at once.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::warn;

use crate::dialect::Dialect;
use crate::error::TocError;
use crate::page::Page;

/// What a still-open element on the scope stack represents, so an `End`
/// event knows what bookkeeping (if any) to undo.
enum Scope {
    /// A `Section`/`Page` element; the `usize` is its index into `pages`.
    Page(usize),
    /// The `Identifiers` container; `HelpID` is only honored directly inside it.
    Identifiers,
    /// Anything else — pushed only to keep the stack balanced against its `End`.
    Other,
}

/// Parses TOC XML bytes into a sequence of pages in document order.
///
/// The dialect is sniffed from the first `Section`/`S`/`Page`/`P` element
/// encountered (the `BrHelpContent` root and any preceding declaration are
/// skipped); every subsequent element is interpreted under that same
/// dialect.
pub fn parse(xml_bytes: &[u8]) -> Result<Vec<Page>, TocError> {
    let mut reader = Reader::from_reader(xml_bytes);
    reader.config_mut().trim_text(true);

    let mut dialect: Option<Dialect> = None;
    let mut pages: Vec<Page> = Vec::new();
    let mut page_stack: Vec<usize> = Vec::new();
    let mut scope_stack: Vec<Scope> = Vec::new();

    let mut buf = Vec::new();
    loop {
        let position = reader.buffer_position() as usize;
        match reader.read_event_into(&mut buf) {
            Err(source) => return Err(TocError::Malformed { position, source }),
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => {
                handle_open(&tag, position, &mut dialect, &mut pages, &mut page_stack, &mut scope_stack, true);
            }
            Ok(Event::Empty(tag)) => {
                handle_open(&tag, position, &mut dialect, &mut pages, &mut page_stack, &mut scope_stack, false);
            }
            Ok(Event::End(_)) => match scope_stack.pop() {
                Some(Scope::Page(idx)) => {
                    debug_assert_eq!(page_stack.last().copied(), Some(idx));
                    page_stack.pop();
                }
                Some(Scope::Identifiers | Scope::Other) | None => {}
            },
            Ok(_) => {}
        }
        buf.clear();
    }

    if pages.is_empty() {
        return Err(TocError::Empty);
    }
    Ok(pages)
}

#[allow(clippy::too_many_arguments)]
fn handle_open(
    tag: &BytesStart<'_>,
    position: usize,
    dialect: &mut Option<Dialect>,
    pages: &mut Vec<Page>,
    page_stack: &mut Vec<usize>,
    scope_stack: &mut Vec<Scope>,
    has_end_event: bool,
) {
    let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();

    if dialect.is_none() {
        *dialect = Dialect::sniff(&name);
    }
    let Some(tags) = dialect.map(Dialect::tags) else {
        if has_end_event {
            scope_stack.push(Scope::Other);
        }
        return;
    };

    if name == tags.section || name == tags.page {
        let Some(id) = attr(tag, tags.attr_id) else {
            warn!(position, element = %name, "TOC element missing Id, skipping");
            if has_end_event {
                scope_stack.push(Scope::Other);
            }
            return;
        };
        let text = attr(tag, tags.attr_text).unwrap_or_default();
        let file_path = attr(tag, tags.attr_file);
        let parent_id = page_stack.last().map(|&idx| pages[idx].id.clone());

        pages.push(Page {
            id: id.clone(),
            text,
            file_path,
            is_section: name == tags.section,
            help_id: None,
            parent_id: parent_id.clone(),
            child_ids: Vec::new(),
        });
        let idx = pages.len() - 1;

        if let Some(&parent_idx) = page_stack.last() {
            pages[parent_idx].child_ids.push(id);
        }

        if has_end_event {
            page_stack.push(idx);
            scope_stack.push(Scope::Page(idx));
        }
        return;
    }

    if name == tags.identifiers {
        if has_end_event {
            scope_stack.push(Scope::Identifiers);
        }
        return;
    }

    if name == tags.help_id {
        if matches!(scope_stack.last(), Some(Scope::Identifiers)) {
            if let (Some(&page_idx), Some(value)) = (page_stack.last(), attr(tag, tags.attr_value)) {
                pages[page_idx].help_id = Some(value);
            }
        }
        if has_end_event {
            scope_stack.push(Scope::Other);
        }
        return;
    }

    if has_end_event {
        scope_stack.push(Scope::Other);
    }
}

fn attr(tag: &BytesStart<'_>, name: &str) -> Option<String> {
    tag.attributes().flatten().find_map(|a| {
        if a.key.as_ref() == name.as_bytes() {
            Some(String::from_utf8_lossy(&a.value).into_owned())
        } else {
            None
        }
    })
}
