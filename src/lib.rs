//! # Legal Clause Analyzer
//!
//! ## Overview
//! This library analyzes legal documents (contracts, policies, terms of
//! service) by splitting them into clauses, classifying each clause's
//! legal category, extracting obligations, dates, and key points, and
//! producing human-readable reports.
//!
//! ## Architecture
//! The system is composed of several key modules:
//! - `normalize`: whitespace, citation, and parenthetical cleanup
//! - `segment`: clause segmentation by structural markers
//! - `classify`: rule-based clause classification with optional model blending
//! - `extraction`: key-point, obligation, and date extractors
//! - `linguistic`: sentence/token/entity collaborator seam with a heuristic default
//! - `profile`: document title/type/purpose inference
//! - `pipeline`: the end-to-end document analyzer
//! - `report`: executive summary and full report synthesis
//! - `storage`: persistence collaborator for saved analyses
//! - `config`: configuration management and settings
//! - `errors`: centralized error handling and types
//!
//! ## Input/Output Specification
//! - **Input**: Plain decoded document text (PDF/byte extraction is external)
//! - **Output**: An [`Analysis`] structure plus two formatted report strings
//! - **Degradation**: per-clause failures are logged and skipped; the
//!   pipeline favors partial results over total failure
//!
//! ## Usage
//! ```rust,no_run
//! use std::sync::Arc;
//! use legal_clause_analyzer::{Config, DocumentAnalyzer, HeuristicAnalyzer, ReportBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load()?;
//!     let analyzer = DocumentAnalyzer::new(&config)?
//!         .with_linguistic_analyzer(Arc::new(HeuristicAnalyzer::new()?));
//!     let analysis = analyzer.analyze("SECTION 1. The vendor shall deliver the goods.");
//!     println!("{}", ReportBuilder::new().executive_summary(&analysis));
//!     Ok(())
//! }
//! ```

// Core modules
pub mod classify;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod linguistic;
pub mod normalize;
pub mod pipeline;
pub mod profile;
pub mod report;
pub mod segment;
pub mod storage;

// Utilities
pub mod utils;

// Re-exports for convenience
pub use classify::{Classification, ClassificationModel, ClauseCategory, Confidence};
pub use config::Config;
pub use errors::{AnalysisError, Result};
pub use extraction::{DateCategory, DateEntry, ObligationMap, Party};
pub use linguistic::{HeuristicAnalyzer, LinguisticAnalyzer};
pub use pipeline::DocumentAnalyzer;
pub use profile::DocumentProfile;
pub use report::ReportBuilder;
pub use storage::{AnalysisStore, SledAnalysisStore};

// Core types used throughout the system
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for analysis runs
pub type AnalysisId = Uuid;

/// A titled contiguous span of document text treated as one analysis unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    /// Position in document order (insertion order)
    pub ordinal: usize,
    /// Title derived from the matched marker or a fallback label
    pub title: String,
    /// Body text
    pub body: String,
}

impl Clause {
    pub fn new(ordinal: usize, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            ordinal,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Whitespace-separated word count of the body
    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }

    /// A clause is kept only when its trimmed body is non-empty and
    /// carries at least `min_words` words
    pub fn is_substantive(&self, min_words: usize) -> bool {
        !self.body.trim().is_empty() && self.word_count() >= min_words
    }
}

/// Per-clause analysis results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClauseAnalysis {
    /// Clause title from segmentation
    pub title: String,
    /// Legal category with confidence and explanation
    pub classification: Classification,
    /// Word-preview summary of the clause body
    pub summary: String,
    /// Qualifying key-point sentences, document order
    pub key_points: Vec<String>,
    /// Party → obligation sentences for this clause
    pub obligations: ObligationMap,
    /// Extracted temporal expressions
    pub dates: Vec<DateEntry>,
    /// Clause body excerpt for display
    pub excerpt: String,
}

/// Document-level metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Normalized text length in characters
    pub length: usize,
    /// Structural-marker count heuristic for expected clauses
    pub estimated_clauses: usize,
}

/// Complete analysis of one document. Immutable after construction;
/// read by the report stage and the persistence collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    /// Unique identifier for this run
    pub id: AnalysisId,
    /// Inferred document identity
    pub profile: DocumentProfile,
    /// Document-level metadata
    pub metadata: AnalysisMetadata,
    /// Per-clause results in document order
    pub clauses: Vec<ClauseAnalysis>,
    /// All extracted dates, clause order preserved, duplicates kept
    pub dates: Vec<DateEntry>,
    /// Obligations aggregated across clauses in encounter order
    pub obligations: ObligationMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clause_substantive_filter_requires_five_words() {
        let short = Clause::new(0, "Preamble", "only four words here");
        assert!(!short.is_substantive(5));

        let enough = Clause::new(1, "SECTION 1.", "this body has five words");
        assert!(enough.is_substantive(5));

        let blank = Clause::new(2, "SECTION 2.", "   ");
        assert!(!blank.is_substantive(5));
    }
}
