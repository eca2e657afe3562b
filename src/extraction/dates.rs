//! Date and timeframe extraction: DATE entity spans when a linguistic
//! view is available, a fixed regex set otherwise. Both modes share the
//! same context windows and keyword co-occurrence rules for deriving a
//! description and category bucket.

use crate::errors::{AnalysisError, Result};
use crate::linguistic::{split_sentences, AnalyzedText, EntityLabel};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Category buckets for extracted temporal expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateCategory {
    AgeRequirements,
    NoticePeriods,
    DeletionTimeframes,
    Deadlines,
    RetentionPeriods,
    GeneralTimeframes,
}

impl DateCategory {
    /// Display name used in reports
    pub fn name(&self) -> &'static str {
        match self {
            DateCategory::AgeRequirements => "Age Requirements",
            DateCategory::NoticePeriods => "Notice Periods",
            DateCategory::DeletionTimeframes => "Deletion/Removal Timeframes",
            DateCategory::Deadlines => "Deadlines",
            DateCategory::RetentionPeriods => "Retention Periods",
            DateCategory::GeneralTimeframes => "General Timeframes",
        }
    }
}

impl std::fmt::Display for DateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One extracted temporal expression. Duplicates across clauses are
/// preserved; there is no uniqueness constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateEntry {
    /// The matched date text
    pub text: String,
    /// Surrounding context window
    pub context: String,
    /// Generated human-readable description
    pub description: String,
    /// Full containing sentence
    pub sentence: String,
    /// Category bucket
    pub category: DateCategory,
}

/// Keyword rules in priority order; the first matching rule selects both
/// the description template and the category bucket.
const DATE_RULES: &[(&[&str], &str, DateCategory)] = &[
    (
        &["years of age", "age of", "years old"],
        "Age requirement of",
        DateCategory::AgeRequirements,
    ),
    (
        &["notice", "notify", "notification"],
        "Notice period of",
        DateCategory::NoticePeriods,
    ),
    (
        &["delet", "remov", "erase"],
        "Deletion timeframe of",
        DateCategory::DeletionTimeframes,
    ),
    (
        &["deadline", "due date", "no later than", "expires on"],
        "Deadline of",
        DateCategory::Deadlines,
    ),
    (
        &["retain", "retention", "preserve", "keep for"],
        "Retention period of",
        DateCategory::RetentionPeriods,
    ),
];

/// Extracts dated timeframes from one clause
pub struct DateExtractor {
    context_window: usize,
    fallback_patterns: Vec<Regex>,
}

impl DateExtractor {
    /// Create the extractor, compiling the regex fallback set up front
    pub fn new(context_window: usize) -> Result<Self> {
        let patterns = [
            r"\b(?:age\s+of\s+\d+|\d+\s+years?\s+(?:of\s+age|old))\b",
            r"\b\d+\s+(?:business\s+|calendar\s+)?days?\b",
            r"\b\d+\s+(?:week|month|year)s?\b",
        ];
        let fallback_patterns = patterns
            .iter()
            .map(|p| Regex::new(p).map_err(|e| AnalysisError::pattern(p, e)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            context_window,
            fallback_patterns,
        })
    }

    /// Extract date entries from one clause body
    pub fn extract(&self, body: &str, analyzed: Option<&AnalyzedText>) -> Result<Vec<DateEntry>> {
        match analyzed {
            Some(view) => Ok(self.extract_from_entities(view)),
            None => Ok(self.extract_with_regex(body)),
        }
    }

    /// DATE entity spans from the linguistic view drive extraction
    fn extract_from_entities(&self, view: &AnalyzedText) -> Vec<DateEntry> {
        let mut entries = Vec::new();
        for sentence in &view.sentences {
            for span in &sentence.entities {
                if span.label != EntityLabel::Date {
                    continue;
                }
                let words: Vec<&str> = sentence.tokens.iter().map(|t| t.text.as_str()).collect();
                let context = window(&words, span.start, span.end, self.context_window);
                entries.push(self.entry(&span.text, context, &sentence.text));
            }
        }
        entries
    }

    /// Regex-only fallback over the fixed age/day/month pattern set
    fn extract_with_regex(&self, body: &str) -> Vec<DateEntry> {
        let mut entries = Vec::new();
        for sentence in split_sentences(body) {
            let mut matched: Vec<(usize, usize)> = Vec::new();
            for pattern in &self.fallback_patterns {
                for m in pattern.find_iter(&sentence) {
                    if matched.iter().any(|&(s, e)| m.start() < e && m.end() > s) {
                        continue;
                    }
                    matched.push((m.start(), m.end()));

                    let words: Vec<&str> = sentence.split_whitespace().collect();
                    let context = match word_span(&sentence, m.start(), m.end()) {
                        Some((first, last)) => window(&words, first, last, self.context_window),
                        None => sentence.trim().to_string(),
                    };
                    entries.push(self.entry(m.as_str(), context, &sentence));
                }
            }
        }
        entries
    }

    fn entry(&self, date_text: &str, context: String, sentence: &str) -> DateEntry {
        let (description, category) = describe(sentence, date_text);
        DateEntry {
            text: date_text.to_string(),
            context,
            description,
            sentence: sentence.trim().to_string(),
            category,
        }
    }
}

/// Apply the keyword co-occurrence rules to the containing sentence.
/// First matching rule wins; no rule means a general timeframe.
fn describe(sentence: &str, date_text: &str) -> (String, DateCategory) {
    let lower = sentence.to_lowercase();
    for (keywords, template, category) in DATE_RULES {
        if keywords.iter().any(|k| lower.contains(k)) {
            return (format!("{} {}", template, date_text), *category);
        }
    }
    (
        format!("General timeframe of {}", date_text),
        DateCategory::GeneralTimeframes,
    )
}

/// ±window words around a word range (end exclusive)
fn window(words: &[&str], start: usize, end: usize, size: usize) -> String {
    let from = start.saturating_sub(size);
    let to = (end + size).min(words.len());
    words[from..to].join(" ")
}

/// Map a byte range to the whitespace-word range it overlaps
fn word_span(text: &str, start: usize, end: usize) -> Option<(usize, usize)> {
    let mut first = None;
    let mut last = None;
    let mut pos = 0;
    for (i, word) in text.split_whitespace().enumerate() {
        let word_start = text[pos..].find(word).map_or(pos, |off| pos + off);
        let word_end = word_start + word.len();
        pos = word_end;
        if word_start < end && word_end > start {
            if first.is_none() {
                first = Some(i);
            }
            last = Some(i + 1);
        }
    }
    first.zip(last)
}
