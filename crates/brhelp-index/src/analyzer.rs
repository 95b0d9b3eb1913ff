//! Text analysis pipeline for the brhelp search index.
//!
//! A two-stage pipeline, deliberately simpler than a general-purpose
//! stemmed analyzer: this corpus is short vendor help text and HelpID-style
//! identifiers (`X20DI9371`, `MC_BR_MoveAbsolute`) where stemming would
//! mangle the very tokens users search for.
//!
//! 1. `SimpleTokenizer` - splits on whitespace and punctuation
//! 2. `LowerCaser` - converts tokens to lowercase

use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, TextAnalyzer};

/// Name of the custom tokenizer registered with Tantivy.
pub const BRHELP_TOKENIZER: &str = "brhelp_text";

/// Builds the brhelp text analyzer.
pub fn build_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .build()
}

#[cfg(test)]
mod test {
    use std::iter;

    use tantivy::tokenizer::TokenStream;

    use super::*;

    #[test]
    fn analyzer_lowercases() {
        let mut analyzer = build_analyzer();
        let mut stream = analyzer.token_stream("HELLO World");

        let token = stream.next().unwrap();
        assert_eq!(token.text, "hello");

        let token = stream.next().unwrap();
        assert_eq!(token.text, "world");

        assert!(stream.next().is_none());
    }

    #[test]
    fn analyzer_preserves_identifier_like_tokens() {
        let mut analyzer = build_analyzer();
        let mut stream = analyzer.token_stream("X20DI9371 MC_BR_MoveAbsolute");

        let tokens: Vec<_> = iter::from_fn(|| stream.next().map(|t| t.text.clone())).collect();
        assert_eq!(tokens, vec!["x20di9371", "mc_br_moveabsolute"]);
    }

    #[test]
    fn analyzer_splits_punctuation() {
        let mut analyzer = build_analyzer();
        let mut stream = analyzer.token_stream("hello, world! foo-bar");

        let tokens: Vec<_> = iter::from_fn(|| stream.next().map(|t| t.text.clone())).collect();
        assert_eq!(tokens, vec!["hello", "world", "foo", "bar"]);
    }
}
