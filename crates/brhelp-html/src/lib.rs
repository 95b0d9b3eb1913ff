//! HTML text extraction for brhelp (C1).
//!
//! Strips markup from a vendor help page and returns its title and visible
//! body text. Extraction never fails: unparsable or missing bytes yield an
//! empty [`Extracted`] and a logged diagnostic, per the non-fatal
//! content-extraction policy — callers that need to distinguish "the file
//! was missing" from "the file parsed to nothing" do that at the I/O layer,
//! before calling [`extract`].

#![warn(missing_docs)]

use scraper::{Html, Selector};
use tracing::warn;

/// The title and plain text extracted from one HTML page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    /// Contents of the first `<title>`, else the first `<h1>`, else empty.
    pub title: String,
    /// All visible `<body>` text, markup stripped, whitespace collapsed.
    pub plain_text: String,
}

/// Extracts title and plain text from the raw bytes of an HTML document.
///
/// Bytes are decoded as UTF-8, falling back to a lossy decode on invalid
/// sequences so a single mis-encoded byte never turns a whole page into a
/// failure. `<script>` and `<style>` contents are excluded from `plain_text`.
pub fn extract(file_bytes: &[u8]) -> Extracted {
    let text = String::from_utf8(file_bytes.to_vec())
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());

    let document = Html::parse_document(&text);

    let title = extract_title(&document);
    let plain_text = extract_body_text(&document);

    Extracted { title, plain_text }
}

fn extract_title(document: &Html) -> String {
    let title_selector = selector("title");
    if let Some(node) = document.select(&title_selector).next() {
        let text = collapse_whitespace(&node.text().collect::<String>());
        if !text.is_empty() {
            return text;
        }
    }

    let h1_selector = selector("h1");
    if let Some(node) = document.select(&h1_selector).next() {
        return collapse_whitespace(&node.text().collect::<String>());
    }

    String::new()
}

fn extract_body_text(document: &Html) -> String {
    let body_selector = selector("body");
    let Some(body) = document.select(&body_selector).next() else {
        warn!("HTML document has no <body>, returning empty plain_text");
        return String::new();
    };

    let excluded = selector("script, style");
    let excluded_nodes: std::collections::HashSet<_> =
        body.select(&excluded).flat_map(|n| n.descendants().map(|d| d.id())).collect();

    let mut text = String::new();
    for descendant in body.descendants() {
        if excluded_nodes.contains(&descendant.id()) {
            continue;
        }
        if let Some(t) = descendant.value().as_text() {
            text.push_str(t);
            text.push(' ');
        }
    }

    collapse_whitespace(&text)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn selector(css: &str) -> Selector {
    // `scraper::Selector::parse` only fails on malformed CSS; every selector
    // used here is a fixed literal, so this cannot fail at runtime.
    Selector::parse(css).expect("built-in selector is valid CSS")
}
