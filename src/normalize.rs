//! # Text Normalization Module
//!
//! ## Purpose
//! First stage of the analysis pipeline. Produces a canonical single-line
//! form of the raw document text for the segmenter and downstream stages.
//!
//! ## Input/Output Specification
//! - **Input**: Raw decoded document text
//! - **Output**: Normalized text: NFC form, no bracketed citations, no
//!   parenthetical asides, whitespace runs collapsed to single spaces
//!
//! ## Key Features
//! - Unicode NFC normalization
//! - Lossy removal of `[...]` citations and `(...)` asides (non-greedy,
//!   first closing delimiter terminates the match, no nesting)
//! - Idempotent: normalizing twice equals normalizing once

use crate::errors::{AnalysisError, Result};
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Text normalizer with pre-compiled patterns
pub struct TextNormalizer {
    bracketed: Regex,
    parenthesized: Regex,
    whitespace: Regex,
}

impl TextNormalizer {
    /// Create a new normalizer, compiling all patterns up front
    pub fn new() -> Result<Self> {
        // Dot-matches-newline so spans broken across lines are still removed.
        let bracketed = compile(r"(?s)\[.*?\]")?;
        let parenthesized = compile(r"(?s)\(.*?\)")?;
        let whitespace = compile(r"\s+")?;

        Ok(Self {
            bracketed,
            parenthesized,
            whitespace,
        })
    }

    /// Normalize raw document text.
    ///
    /// Bracket stripping runs before whitespace collapsing: removing a
    /// span between two spaces must not leave a double space behind,
    /// otherwise a second pass would produce different output.
    pub fn normalize(&self, text: &str) -> String {
        let text: String = text.nfc().collect();
        let text = self.bracketed.replace_all(&text, "");
        let text = self.parenthesized.replace_all(&text, "");
        let text = self.whitespace.replace_all(&text, " ");
        text.trim().to_string()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| AnalysisError::pattern(pattern, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::new().expect("patterns compile")
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        let n = normalizer();
        assert_eq!(
            n.normalize("  The party\n\n shall\t pay.  "),
            "The party shall pay."
        );
    }

    #[test]
    fn strips_citations_and_parentheticals() {
        let n = normalizer();
        assert_eq!(
            n.normalize("The Licensee [1] shall (subject to Section 3) pay."),
            "The Licensee shall pay."
        );
    }

    #[test]
    fn first_closing_bracket_terminates_the_match() {
        let n = normalizer();
        // Non-greedy: "[a] keep [b]" loses both spans but keeps the middle.
        assert_eq!(n.normalize("[a] keep [b]"), "keep");
        // No recursion into nesting: the inner close ends the match.
        assert_eq!(n.normalize("x [[a]] y"), "x ] y");
    }

    #[test]
    fn normalize_is_idempotent() {
        let n = normalizer();
        let samples = [
            "  A (b) c  [d] e \n f ",
            "WHEREAS the parties [2] agree (in part) as follows:\n1. First.",
            "",
            "plain text with no markers",
        ];
        for raw in samples {
            let once = n.normalize(raw);
            assert_eq!(n.normalize(&once), once, "not idempotent for {:?}", raw);
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let n = normalizer();
        assert_eq!(n.normalize("   \n\t "), "");
    }
}
