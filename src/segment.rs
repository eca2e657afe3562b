//! # Clause Segmentation Module
//!
//! ## Purpose
//! Second stage of the pipeline: splits normalized document text into
//! titled clauses using the structural markers found in contracts and
//! policies, falling back to per-line paragraphs when no marker exists.
//!
//! ## Input/Output Specification
//! - **Input**: Normalized document text
//! - **Output**: Ordered `(title, body)` clause pairs
//! - **Markers**: `SECTION n.`/`SECTION n:`, `Article n.`/`Article n:`,
//!   newline-led numbered clauses, newline-led lettered sub-clauses,
//!   `WHEREAS` preambles
//!
//! ## Key Features
//! - Text before the first marker becomes the "Preamble" clause
//! - Missing marker titles synthesize as "Clause N"
//! - Zero markers fall back to "Paragraph N" per non-empty line
//! - The ≥5-word retention filter belongs to the caller, not here

use crate::errors::{AnalysisError, Result};
use crate::Clause;
use regex::Regex;

/// Clause segmenter with a pre-compiled marker alternation
pub struct ClauseSegmenter {
    markers: Regex,
}

const MARKER_PATTERN: &str = r"SECTION\s+\d+[.:]|Article\s+\d+[.:]|\n\d+\.\s|\n\([a-z]\)|WHEREAS";

impl ClauseSegmenter {
    /// Create a new segmenter, compiling the marker alternation up front
    pub fn new() -> Result<Self> {
        let markers = Regex::new(MARKER_PATTERN)
            .map_err(|e| AnalysisError::pattern(MARKER_PATTERN, e))?;
        Ok(Self { markers })
    }

    /// Split text into ordered titled clauses.
    ///
    /// The marker split and the marker scan run over the same text, so
    /// each segment after the preamble pairs with the marker that
    /// introduced it; the "Clause N" branch covers the defensive case of
    /// fewer scanned markers than segments.
    pub fn segment(&self, text: &str) -> Vec<Clause> {
        let parts: Vec<&str> = self.markers.split(text).collect();

        if parts.len() > 1 {
            let titles: Vec<&str> = self.markers.find_iter(text).map(|m| m.as_str()).collect();
            let mut clauses = Vec::with_capacity(parts.len());

            clauses.push(Clause::new(0, "Preamble", parts[0].trim()));
            for (i, part) in parts.iter().enumerate().skip(1) {
                let title = titles
                    .get(i - 1)
                    .map(|t| t.trim().to_string())
                    .unwrap_or_else(|| format!("Clause {}", i));
                clauses.push(Clause::new(i, title, part.trim()));
            }
            clauses
        } else {
            // No structural markers anywhere: one clause per non-empty line.
            text.split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .enumerate()
                .map(|(i, line)| Clause::new(i, format!("Paragraph {}", i + 1), line))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter() -> ClauseSegmenter {
        ClauseSegmenter::new().expect("marker pattern compiles")
    }

    #[test]
    fn zero_markers_fall_back_to_paragraphs() {
        let text = "First line of text\n\nSecond line here\nThird";
        let clauses = segmenter().segment(text);

        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses[0].title, "Paragraph 1");
        assert_eq!(clauses[1].title, "Paragraph 2");
        assert_eq!(clauses[2].title, "Paragraph 3");
        assert_eq!(clauses[1].body, "Second line here");
    }

    #[test]
    fn markers_partition_text_in_document_order() {
        let text = "WHEREAS foo. \nSECTION 1. bar baz";
        let clauses = segmenter().segment(text);

        let titles: Vec<&str> = clauses.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Preamble", "WHEREAS", "SECTION 1."]);
        assert_eq!(clauses[0].body, "");
        assert_eq!(clauses[1].body, "foo.");
        assert_eq!(clauses[2].body, "bar baz");
    }

    #[test]
    fn article_and_numbered_markers_are_recognized() {
        let text = "Intro text here.\nArticle 2: Scope of work applies.\n3. Numbered clause body text";
        let clauses = segmenter().segment(text);

        let titles: Vec<&str> = clauses.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Preamble", "Article 2:", "3."]);
        assert_eq!(clauses[0].body, "Intro text here.");
        assert_eq!(clauses[1].body, "Scope of work applies.");
        assert_eq!(clauses[2].body, "Numbered clause body text");
    }

    #[test]
    fn lettered_subclauses_split() {
        let text = "SECTION 1. Main clause body here\n(a) first sub clause text\n(b) second sub clause text";
        let clauses = segmenter().segment(text);

        let titles: Vec<&str> = clauses.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Preamble", "SECTION 1.", "(a)", "(b)"]);
        assert_eq!(clauses[2].body, "first sub clause text");
    }

    #[test]
    fn ordinals_follow_document_order() {
        let text = "Lead in.\nSECTION 1. one two\nSECTION 2. three four";
        let clauses = segmenter().segment(text);
        let ordinals: Vec<usize> = clauses.iter().map(|c| c.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
    }
}
