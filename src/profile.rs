//! # Document Profiling Module
//!
//! ## Purpose
//! Infers document-level identity from the opening text: a title, a
//! document type, and a templated purpose statement.
//!
//! ## Input/Output Specification
//! - **Input**: Normalized document text (only the head is inspected),
//!   optional linguistic analyzer for organization detection
//! - **Output**: `DocumentProfile { title, doc_type, purpose }`
//!
//! ## Key Features
//! - Document-type patterns checked in fixed priority order, first
//!   match wins, defaulting to "Legal Document"
//! - Title from the first early line that looks like a heading, else
//!   synthesized from the first organization entity plus the type

use crate::config::ProfilerConfig;
use crate::linguistic::{split_sentences, EntityLabel, LinguisticAnalyzer};
use serde::{Deserialize, Serialize};

/// Inferred identity of the whole document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentProfile {
    pub title: String,
    pub doc_type: String,
    pub purpose: String,
}

/// Document-type name patterns in priority order; first match wins
const DOC_TYPE_PATTERNS: &[&str] = &[
    "Terms of Service",
    "Privacy Policy",
    "License Agreement",
    "Service Agreement",
    "Terms and Conditions",
    "User Agreement",
    "Contract",
    "Policy",
];

/// Keywords that mark a heading line as a plausible title
const TITLE_KEYWORDS: &[&str] = &["terms", "policy", "agreement", "service", "privacy"];

/// Infers a document profile from the opening text
pub struct DocumentProfiler {
    config: ProfilerConfig,
}

impl DocumentProfiler {
    pub fn new(config: ProfilerConfig) -> Self {
        Self { config }
    }

    /// Profile a document from its normalized text
    pub fn profile(
        &self,
        normalized: &str,
        analyzer: Option<&dyn LinguisticAnalyzer>,
    ) -> DocumentProfile {
        let head: String = normalized.chars().take(self.config.head_chars).collect();

        let doc_type = self.detect_type(&head);
        let title = self
            .title_from_lines(&head)
            .unwrap_or_else(|| self.synthesize_title(&head, &doc_type, analyzer));
        let purpose = purpose_for(&doc_type);

        DocumentProfile {
            title,
            doc_type,
            purpose,
        }
    }

    /// Scan the first sentences for a type pattern, in priority order
    fn detect_type(&self, head: &str) -> String {
        let sentences: Vec<String> = split_sentences(head)
            .into_iter()
            .take(self.config.sentence_scan)
            .map(|s| s.to_lowercase())
            .collect();

        for pattern in DOC_TYPE_PATTERNS {
            let needle = pattern.to_lowercase();
            if sentences.iter().any(|s| s.contains(&needle)) {
                return (*pattern).to_string();
            }
        }
        "Legal Document".to_string()
    }

    /// First early line of plausible heading length carrying a legal keyword
    fn title_from_lines(&self, head: &str) -> Option<String> {
        head.lines()
            .take(self.config.line_scan)
            .map(str::trim)
            .find(|line| {
                let len = line.chars().count();
                len >= self.config.title_min_chars
                    && len <= self.config.title_max_chars
                    && {
                        let lower = line.to_lowercase();
                        TITLE_KEYWORDS.iter().any(|k| lower.contains(k))
                    }
            })
            .map(str::to_string)
    }

    /// "{first org} {type}", or the type alone when no organization exists
    fn synthesize_title(
        &self,
        head: &str,
        doc_type: &str,
        analyzer: Option<&dyn LinguisticAnalyzer>,
    ) -> String {
        let org = analyzer.and_then(|a| match a.analyze(head) {
            Ok(view) => view.sentences.iter().find_map(|s| {
                s.entities
                    .iter()
                    .find(|e| e.label == EntityLabel::Organization)
                    .map(|e| e.text.clone())
            }),
            Err(e) => {
                tracing::warn!(error = %e, "profiler linguistic analysis failed");
                None
            }
        });

        match org {
            Some(org) => format!("{} {}", org, doc_type),
            None => doc_type.to_string(),
        }
    }
}

/// Templated purpose sentence per document type
fn purpose_for(doc_type: &str) -> String {
    let purpose = match doc_type {
        "Terms of Service" => "Establishes the rules and conditions for using a service.",
        "Privacy Policy" => "Describes how personal information is collected, used, and shared.",
        "License Agreement" => "Grants permission to use software or other licensed material.",
        "Service Agreement" => "Defines the services to be provided and the terms of engagement.",
        "Terms and Conditions" => "Sets out the general conditions that govern a transaction or service.",
        "User Agreement" => "Governs the relationship between a provider and its users.",
        "Contract" => "Records a binding agreement between the parties.",
        "Policy" => "States the rules and principles an organization follows.",
        _ => "Sets out legal terms, obligations, and rights.",
    };
    purpose.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linguistic::HeuristicAnalyzer;

    fn profiler() -> DocumentProfiler {
        DocumentProfiler::new(ProfilerConfig::default())
    }

    #[test]
    fn type_patterns_check_in_priority_order() {
        let p = profiler();
        // Both patterns present: "Terms of Service" has higher priority
        // even though "Privacy Policy" appears first in the text.
        let head = "This Privacy Policy supplements the Terms of Service. It binds users.";
        let profile = p.profile(head, None);
        assert_eq!(profile.doc_type, "Terms of Service");
    }

    #[test]
    fn unknown_type_defaults_to_legal_document() {
        let profile = profiler().profile("A memorandum between two offices.", None);
        assert_eq!(profile.doc_type, "Legal Document");
        assert_eq!(profile.purpose, "Sets out legal terms, obligations, and rights.");
    }

    #[test]
    fn heading_line_becomes_the_title() {
        let head = "Acme Service Agreement\nEffective as of the date below.";
        let profile = profiler().profile(head, None);
        assert_eq!(profile.title, "Acme Service Agreement");
        assert_eq!(profile.doc_type, "Service Agreement");
    }

    #[test]
    fn short_or_keywordless_lines_are_rejected_as_titles() {
        // First line is under 10 chars, second has no legal keyword; the
        // title falls back to the document type.
        let head = "Contract\nBetween the undersigned partners here.";
        let profile = profiler().profile(head, None);
        assert_eq!(profile.title, "Contract");
        assert_eq!(profile.doc_type, "Contract");
    }

    #[test]
    fn synthesized_title_uses_first_org_entity() {
        let analyzer = HeuristicAnalyzer::new().unwrap();
        let head = "Globex Corp operates this platform under a binding contract for users.";
        let profile = profiler().profile(head, Some(&analyzer));
        assert_eq!(profile.title, "Globex Corp Contract");
    }

    #[test]
    fn type_scan_is_limited_to_the_first_sentences() {
        let p = profiler();
        let head = "One. Two. Three. Four. Five. This Privacy Policy comes too late.";
        let profile = p.profile(head, None);
        assert_eq!(profile.doc_type, "Legal Document");
    }
}
