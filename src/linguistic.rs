//! # Linguistic Analysis Module
//!
//! ## Purpose
//! Defines the linguistic collaborator seam used by the extraction engine
//! and document profiler: sentence boundaries, per-token features,
//! dependency roles, and named-entity spans.
//!
//! ## Input/Output Specification
//! - **Input**: Clause or document text
//! - **Output**: Sentences with tokens (surface, lowercase, uppercase flag,
//!   dependency role, entity label) and entity spans (ORG, DATE)
//!
//! ## Key Features
//! - `LinguisticAnalyzer` trait: injectable, read-only collaborator
//! - `HeuristicAnalyzer`: regex-backed default implementation with
//!   corporate-designator ORG detection and calendar/duration DATE spans
//! - Shared sentence splitter used as the degraded-mode fallback when no
//!   analyzer handle is supplied

use crate::errors::{AnalysisError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Dependency role of a token within its sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DependencyRole {
    /// Nominal subject
    NominalSubject,
    /// Passive nominal subject
    PassiveNominalSubject,
    /// Any other role
    Other,
}

/// Named-entity label for tokens and spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityLabel {
    Organization,
    Date,
}

/// A single token with the features the extractors consume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Surface text with surrounding punctuation trimmed
    pub text: String,
    /// Lowercase form
    pub lower: String,
    /// True when every alphabetic character is uppercase
    pub is_upper: bool,
    /// Dependency role
    pub dependency: DependencyRole,
    /// Entity label, if the token is inside an entity span
    pub entity: Option<EntityLabel>,
}

/// A labeled entity span over a token range (end exclusive)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

/// One sentence with its tokens and entity spans
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub tokens: Vec<TokenInfo>,
    pub entities: Vec<EntitySpan>,
}

/// Result of analyzing a span of text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedText {
    pub sentences: Vec<Sentence>,
}

/// Linguistic collaborator supplying sentence, token, and entity structure.
///
/// Handles are loaded once at process start and injected by reference;
/// implementations must treat `analyze` as read-only.
pub trait LinguisticAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Result<AnalyzedText>;
}

/// Split text into sentences on runs of terminal punctuation followed by
/// whitespace. Terminators stay attached to their sentence. This is the
/// degraded-mode splitter used when no analyzer handle is present.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (_, c) = chars[i];
        if matches!(c, '.' | '!' | '?') {
            let mut j = i + 1;
            while j < chars.len() && matches!(chars[j].1, '.' | '!' | '?') {
                j += 1;
            }
            let end = chars.get(j).map_or(text.len(), |(idx, _)| *idx);
            if j >= chars.len() || chars[j].1.is_whitespace() {
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                start = end;
            }
            i = j;
        } else {
            i += 1;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

/// Regex-backed analyzer: corporate designators mark ORG spans, calendar
/// and duration expressions mark DATE spans, and the first ORG span ahead
/// of an obligation modal is tagged as the sentence subject.
pub struct HeuristicAnalyzer {
    org_pattern: Regex,
    date_patterns: Vec<Regex>,
}

const MONTHS: &str = "January|February|March|April|May|June|July|August|September|October|November|December";

impl HeuristicAnalyzer {
    /// Create a new analyzer, compiling all patterns up front
    pub fn new() -> Result<Self> {
        let org_pattern = compile(
            r"\b(?:[A-Z][A-Za-z&.-]+\s+)*(?:Corp(?:oration)?|Inc(?:orporated)?|LLC|Ltd|Limited|Company|Co\.|GmbH|plc)\b\.?",
        )?;

        let date_patterns = vec![
            compile(&format!(r"\b(?:{MONTHS})\s+\d{{1,2}},?\s+\d{{4}}\b"))?,
            compile(&format!(r"\b\d{{1,2}}\s+(?:{MONTHS}),?\s+\d{{4}}\b"))?,
            compile(r"\b\d{1,2}/\d{1,2}/\d{2,4}\b")?,
            compile(r"\b(?:age\s+of\s+\d+|\d+\s+years?\s+(?:of\s+age|old))\b")?,
            compile(r"\b\d+\s+(?:business\s+|calendar\s+)?(?:day|week|month|year)s?\b")?,
        ];

        Ok(Self {
            org_pattern,
            date_patterns,
        })
    }

    fn analyze_sentence(&self, text: &str) -> Sentence {
        // Tokenize with byte offsets so entity matches map back to tokens.
        let mut offsets = Vec::new();
        let mut tokens: Vec<TokenInfo> = Vec::new();
        let mut pos = 0;
        for word in text.split_whitespace() {
            let start = text[pos..].find(word).map_or(pos, |i| pos + i);
            let end = start + word.len();
            pos = end;
            offsets.push((start, end));

            let trimmed = word.trim_matches(|c: char| c.is_ascii_punctuation());
            let surface = if trimmed.is_empty() { word } else { trimmed };
            tokens.push(TokenInfo {
                text: surface.to_string(),
                lower: surface.to_lowercase(),
                is_upper: surface.chars().any(|c| c.is_alphabetic())
                    && surface.chars().filter(|c| c.is_alphabetic()).all(|c| c.is_uppercase()),
                dependency: DependencyRole::Other,
                entity: None,
            });
        }

        let mut entities = Vec::new();
        self.collect_spans(text, &offsets, &mut tokens, &mut entities);
        self.mark_subject(&mut tokens, &entities);

        Sentence {
            text: text.to_string(),
            tokens,
            entities,
        }
    }

    fn collect_spans(
        &self,
        text: &str,
        offsets: &[(usize, usize)],
        tokens: &mut [TokenInfo],
        entities: &mut Vec<EntitySpan>,
    ) {
        for m in self.org_pattern.find_iter(text) {
            if let Some(span) = token_span(offsets, m.start(), m.end()) {
                self.push_org_span(span, tokens, entities);
            }
        }

        let mut date_ranges: Vec<(usize, usize)> = Vec::new();
        for pattern in &self.date_patterns {
            for m in pattern.find_iter(text) {
                if date_ranges.iter().any(|&(s, e)| m.start() < e && m.end() > s) {
                    continue;
                }
                date_ranges.push((m.start(), m.end()));
                if let Some((start, end)) = token_span(offsets, m.start(), m.end()) {
                    for token in &mut tokens[start..end] {
                        token.entity = Some(EntityLabel::Date);
                    }
                    entities.push(EntitySpan {
                        text: m.as_str().to_string(),
                        label: EntityLabel::Date,
                        start,
                        end,
                    });
                }
            }
        }
        entities.sort_by_key(|span| span.start);
    }

    fn push_org_span(
        &self,
        (mut start, end): (usize, usize),
        tokens: &mut [TokenInfo],
        entities: &mut Vec<EntitySpan>,
    ) {
        // Leading articles are not part of the organization name.
        while start < end && matches!(tokens[start].lower.as_str(), "the" | "a" | "an") {
            start += 1;
        }
        if start >= end {
            return;
        }
        for token in &mut tokens[start..end] {
            token.entity = Some(EntityLabel::Organization);
        }
        let text = tokens[start..end]
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        entities.push(EntitySpan {
            text,
            label: EntityLabel::Organization,
            start,
            end,
        });
    }

    /// The first ORG span that precedes the sentence's first obligation
    /// modal has its leading token marked as nominal subject.
    fn mark_subject(&self, tokens: &mut [TokenInfo], entities: &[EntitySpan]) {
        let modal_idx = tokens
            .iter()
            .position(|t| matches!(t.lower.as_str(), "shall" | "must"));
        let Some(modal_idx) = modal_idx else { return };

        if let Some(span) = entities
            .iter()
            .filter(|e| e.label == EntityLabel::Organization)
            .find(|e| e.start < modal_idx)
        {
            tokens[span.start].dependency = DependencyRole::NominalSubject;
        }
    }
}

impl LinguisticAnalyzer for HeuristicAnalyzer {
    fn analyze(&self, text: &str) -> Result<AnalyzedText> {
        let sentences = split_sentences(text)
            .into_iter()
            .map(|s| self.analyze_sentence(&s))
            .collect();
        Ok(AnalyzedText { sentences })
    }
}

/// Map a byte range to the token range it overlaps (end exclusive)
fn token_span(offsets: &[(usize, usize)], start: usize, end: usize) -> Option<(usize, usize)> {
    let mut first = None;
    let mut last = None;
    for (i, &(s, e)) in offsets.iter().enumerate() {
        if s < end && e > start {
            if first.is_none() {
                first = Some(i);
            }
            last = Some(i + 1);
        }
    }
    first.zip(last)
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| AnalysisError::pattern(pattern, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> HeuristicAnalyzer {
        HeuristicAnalyzer::new().expect("patterns compile")
    }

    #[test]
    fn splits_sentences_and_keeps_terminators() {
        let sentences = split_sentences("First rule. Second rule! Is this third? Tail without stop");
        assert_eq!(
            sentences,
            vec![
                "First rule.",
                "Second rule!",
                "Is this third?",
                "Tail without stop"
            ]
        );
    }

    #[test]
    fn terminal_run_is_one_boundary() {
        let sentences = split_sentences("Wait... really? Yes.");
        assert_eq!(sentences, vec!["Wait...", "really?", "Yes."]);
    }

    #[test]
    fn tags_org_span_and_subject_before_modal() {
        let analyzed = analyzer()
            .analyze("ACME Corp shall deliver goods within 30 days.")
            .unwrap();
        let sentence = &analyzed.sentences[0];

        let org: Vec<_> = sentence
            .entities
            .iter()
            .filter(|e| e.label == EntityLabel::Organization)
            .collect();
        assert_eq!(org.len(), 1);
        assert_eq!(org[0].text, "ACME Corp");
        assert_eq!(sentence.tokens[org[0].start].dependency, DependencyRole::NominalSubject);
        assert_eq!(sentence.tokens[org[0].start].text, "ACME");
    }

    #[test]
    fn org_after_modal_is_not_a_subject() {
        let analyzed = analyzer()
            .analyze("The goods shall be delivered by ACME Corp.")
            .unwrap();
        let sentence = &analyzed.sentences[0];
        assert!(sentence
            .tokens
            .iter()
            .all(|t| t.dependency == DependencyRole::Other));
    }

    #[test]
    fn leading_article_is_dropped_from_org_spans() {
        let analyzed = analyzer().analyze("The Globex Company must notify users.").unwrap();
        let sentence = &analyzed.sentences[0];
        let org = sentence
            .entities
            .iter()
            .find(|e| e.label == EntityLabel::Organization)
            .expect("org span");
        assert_eq!(org.text, "Globex Company");
    }

    #[test]
    fn tags_duration_and_calendar_dates() {
        let analyzed = analyzer()
            .analyze("Notice is due by January 15, 2026 and retained for 6 months.")
            .unwrap();
        let sentence = &analyzed.sentences[0];
        let dates: Vec<_> = sentence
            .entities
            .iter()
            .filter(|e| e.label == EntityLabel::Date)
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(dates, vec!["January 15, 2026", "6 months"]);
    }

    #[test]
    fn uppercase_flag_requires_alphabetic_majuscules() {
        let analyzed = analyzer().analyze("The AGREEMENT covers 2026 terms.").unwrap();
        let tokens = &analyzed.sentences[0].tokens;
        let upper: Vec<_> = tokens.iter().filter(|t| t.is_upper).map(|t| t.text.as_str()).collect();
        assert_eq!(upper, vec!["AGREEMENT"]);
    }
}
