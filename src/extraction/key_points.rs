//! Key-point selection: picks the sentences most likely to carry legal
//! weight, using modal verbs, legal connector phrases, and defined-term
//! capitalization as signals.

use crate::errors::Result;
use crate::linguistic::{split_sentences, AnalyzedText};

/// Modal tokens that mark a binding statement
const MODAL_TOKENS: &[&str] = &["shall", "must", "will", "cannot"];

/// Two-word restriction checked as a sentence substring
const NEGATED_MODAL: &str = "may not";

/// Legal connector phrases checked as case-insensitive substrings
const LEGAL_PHRASES: &[&str] = &["hereby", "notwithstanding", "subject to", "in accordance with"];

/// A defined term is an all-uppercase token longer than this many chars
const DEFINED_TERM_MIN_LEN: usize = 3;

/// Selects up to `max_points` qualifying sentences in document order
pub struct KeyPointExtractor {
    max_points: usize,
}

impl KeyPointExtractor {
    pub fn new(max_points: usize) -> Self {
        Self { max_points }
    }

    /// Extract key sentences from one clause body
    pub fn extract(&self, body: &str, analyzed: Option<&AnalyzedText>) -> Result<Vec<String>> {
        let mut points = Vec::new();

        match analyzed {
            Some(view) => {
                for sentence in &view.sentences {
                    let tokens = sentence
                        .tokens
                        .iter()
                        .map(|t| (t.lower.as_str(), t.is_upper, t.text.chars().count()));
                    if qualifies(&sentence.text, tokens) {
                        points.push(sentence.text.trim().to_string());
                    }
                }
            }
            None => {
                for sentence in split_sentences(body) {
                    let words: Vec<(String, bool, usize)> = sentence
                        .split_whitespace()
                        .map(|w| {
                            let trimmed = w.trim_matches(|c: char| c.is_ascii_punctuation());
                            let surface = if trimmed.is_empty() { w } else { trimmed };
                            (
                                surface.to_lowercase(),
                                surface.chars().any(|c| c.is_alphabetic())
                                    && surface
                                        .chars()
                                        .filter(|c| c.is_alphabetic())
                                        .all(|c| c.is_uppercase()),
                                surface.chars().count(),
                            )
                        })
                        .collect();
                    let tokens = words.iter().map(|(l, u, n)| (l.as_str(), *u, *n));
                    if qualifies(&sentence, tokens) {
                        points.push(sentence.trim().to_string());
                    }
                }
            }
        }

        points.truncate(self.max_points);
        Ok(points)
    }
}

/// A sentence qualifies on any of: modal token, legal connector phrase,
/// or all-uppercase defined term.
fn qualifies<'a>(text: &str, tokens: impl Iterator<Item = (&'a str, bool, usize)>) -> bool {
    let lower = text.to_lowercase();
    let mut has_modal = lower.contains(NEGATED_MODAL);
    let mut has_defined_term = false;

    for (token_lower, is_upper, len) in tokens {
        has_modal = has_modal || MODAL_TOKENS.contains(&token_lower);
        has_defined_term = has_defined_term || (is_upper && len > DEFINED_TERM_MIN_LEN);
    }

    has_modal
        || has_defined_term
        || LEGAL_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linguistic::{HeuristicAnalyzer, LinguisticAnalyzer};

    fn extract(body: &str) -> Vec<String> {
        KeyPointExtractor::new(5).extract(body, None).unwrap()
    }

    #[test]
    fn modal_sentences_qualify() {
        let points = extract("The vendor shall pay. The sky is blue. Users must comply.");
        assert_eq!(points, vec!["The vendor shall pay.", "Users must comply."]);
    }

    #[test]
    fn may_not_qualifies_as_a_phrase() {
        let points = extract("The licensee may not sublicense. Nothing else here.");
        assert_eq!(points, vec!["The licensee may not sublicense."]);
    }

    #[test]
    fn legal_connector_phrases_qualify() {
        let points = extract(
            "Payments are due in accordance with Schedule A. \
             Notwithstanding the foregoing, delivery is excused. \
             Plain descriptive sentence here.",
        );
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn defined_terms_qualify_but_short_acronyms_do_not() {
        let points = extract("The AGREEMENT binds both sides. The US is a place.");
        assert_eq!(points, vec!["The AGREEMENT binds both sides."]);
    }

    #[test]
    fn returns_at_most_five_points_in_document_order() {
        let body = "A shall act. B shall act. C shall act. D shall act. \
                    E shall act. F shall act. G shall act.";
        let points = extract(body);
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], "A shall act.");
        assert_eq!(points[4], "E shall act.");
    }

    #[test]
    fn analyzed_and_fallback_paths_agree() {
        let body = "The vendor shall pay on time. Ordinary filler sentence here.";
        let analyzer = HeuristicAnalyzer::new().unwrap();
        let analyzed = analyzer.analyze(body).unwrap();

        let with_view = KeyPointExtractor::new(5).extract(body, Some(&analyzed)).unwrap();
        let without_view = KeyPointExtractor::new(5).extract(body, None).unwrap();
        assert_eq!(with_view, without_view);
    }
}
