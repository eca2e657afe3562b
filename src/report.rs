//! # Report Synthesis Module
//!
//! ## Purpose
//! Turns an aggregated [`Analysis`] into two plain-text artifacts: a
//! short executive summary and a full structured report.
//!
//! ## Input/Output Specification
//! - **Input**: One immutable `Analysis`
//! - **Output**: Newline-joined plain text, no markup, safe to write
//!   verbatim to a file or display widget
//!
//! ## Key Features
//! - Deterministic string concatenation, no randomness
//! - Clause-type distribution and date grouping follow first-encounter
//!   order when iterating the aggregated structures

use crate::classify::ClauseCategory;
use crate::extraction::{DateCategory, DateEntry};
use crate::Analysis;

/// Builds the two report artifacts from an analysis
pub struct ReportBuilder;

impl ReportBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Executive summary: document identity, clause-type distribution,
    /// date count, and total obligation count across parties.
    pub fn executive_summary(&self, analysis: &Analysis) -> String {
        let mut lines = Vec::new();

        lines.push("EXECUTIVE SUMMARY".to_string());
        lines.push("=================".to_string());
        lines.push(format!("Document: {}", analysis.profile.title));
        lines.push(format!("Type: {}", analysis.profile.doc_type));
        lines.push(format!("Purpose: {}", analysis.profile.purpose));
        lines.push(format!(
            "Length: {} characters across {} clauses",
            analysis.metadata.length,
            analysis.clauses.len()
        ));
        lines.push(String::new());

        lines.push("Clause type distribution:".to_string());
        let distribution = clause_distribution(analysis);
        if distribution.is_empty() {
            lines.push("  (no clauses retained)".to_string());
        }
        for (category, count) in distribution {
            lines.push(format!("  - {}: {}", category, count));
        }
        lines.push(String::new());

        lines.push(format!("Key dates identified: {}", analysis.dates.len()));
        lines.push(format!(
            "Obligations identified: {} across {} parties",
            analysis.obligations.total_obligations(),
            analysis.obligations.len()
        ));

        lines.join("\n")
    }

    /// Full report: header, per-clause breakdown, dates grouped by category
    pub fn full_report(&self, analysis: &Analysis) -> String {
        let mut lines = Vec::new();

        lines.push("LEGAL DOCUMENT ANALYSIS REPORT".to_string());
        lines.push("==============================".to_string());
        lines.push(String::new());
        lines.push(format!("Document: {}", analysis.profile.title));
        lines.push(format!("Type: {}", analysis.profile.doc_type));
        lines.push(format!("Purpose: {}", analysis.profile.purpose));
        lines.push(format!(
            "Length: {} characters, estimated {} clauses, {} analyzed",
            analysis.metadata.length,
            analysis.metadata.estimated_clauses,
            analysis.clauses.len()
        ));
        lines.push(String::new());

        lines.push("CLAUSE BREAKDOWN".to_string());
        lines.push("----------------".to_string());

        for (index, clause) in analysis.clauses.iter().enumerate() {
            lines.push(String::new());
            lines.push(format!(
                "[{}] {} - {} ({} confidence)",
                index + 1,
                clause.title,
                clause.classification.category,
                clause.classification.confidence
            ));
            lines.push(format!("    {}", clause.classification.explanation));
            lines.push(format!("    Summary: {}", clause.summary));

            if !clause.key_points.is_empty() {
                lines.push("    Key points:".to_string());
                for point in &clause.key_points {
                    lines.push(format!("      - {}", point));
                }
            }

            if !clause.obligations.is_empty() {
                lines.push("    Obligations:".to_string());
                for entry in clause.obligations.iter() {
                    lines.push(format!("      {}:", entry.party));
                    for sentence in &entry.sentences {
                        lines.push(format!("        - {}", sentence));
                    }
                }
            }

            if !clause.dates.is_empty() {
                lines.push("    Dates:".to_string());
                for date in &clause.dates {
                    lines.push(format!("      - {} ({})", date.text, date.description));
                }
            }
        }

        let grouped = dates_by_category(&analysis.dates);
        if !grouped.is_empty() {
            lines.push(String::new());
            lines.push("DATES BY CATEGORY".to_string());
            lines.push("-----------------".to_string());
            for (category, entries) in grouped {
                lines.push(String::new());
                lines.push(format!("{}:", category));
                for entry in entries {
                    lines.push(format!("  - {} ({})", entry.text, entry.description));
                }
            }
        }

        lines.join("\n")
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Clause-type counts in first-encounter order
fn clause_distribution(analysis: &Analysis) -> Vec<(ClauseCategory, usize)> {
    let mut distribution: Vec<(ClauseCategory, usize)> = Vec::new();
    for clause in &analysis.clauses {
        let category = clause.classification.category;
        match distribution.iter_mut().find(|(c, _)| *c == category) {
            Some((_, count)) => *count += 1,
            None => distribution.push((category, 1)),
        }
    }
    distribution
}

/// Date entries grouped by category in first-encounter order
fn dates_by_category(dates: &[DateEntry]) -> Vec<(DateCategory, Vec<&DateEntry>)> {
    let mut grouped: Vec<(DateCategory, Vec<&DateEntry>)> = Vec::new();
    for entry in dates {
        match grouped.iter_mut().find(|(c, _)| *c == entry.category) {
            Some((_, entries)) => entries.push(entry),
            None => grouped.push((entry.category, vec![entry])),
        }
    }
    grouped
}
