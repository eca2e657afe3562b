//! # Extraction Engine
//!
//! ## Purpose
//! Runs three independent extractors over one clause body: key-point
//! selection, obligation attribution, and date/timeframe extraction.
//!
//! ## Input/Output Specification
//! - **Input**: Clause body text, optional pre-analyzed linguistic view
//! - **Output**: `ClauseExtraction { key_points, obligations, dates }`
//! - **Degradation**: without a linguistic view, dates fall back to
//!   fixed regex patterns and obligation parties collapse to
//!   `Party::AllParties`
//!
//! ## Key Features
//! - Extractors are isolated: one failing extractor yields empty output
//!   for that clause without disturbing the other two

mod dates;
mod key_points;
mod obligations;

pub use dates::{DateCategory, DateEntry, DateExtractor};
pub use key_points::KeyPointExtractor;
pub use obligations::{ObligationEntry, ObligationExtractor, ObligationMap, Party};

use crate::config::ExtractionConfig;
use crate::errors::Result;
use crate::linguistic::AnalyzedText;
use serde::{Deserialize, Serialize};

/// Combined extraction results for one clause
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClauseExtraction {
    pub key_points: Vec<String>,
    pub obligations: ObligationMap,
    pub dates: Vec<DateEntry>,
}

/// Facade over the three clause extractors
pub struct ExtractionEngine {
    key_points: KeyPointExtractor,
    obligations: ObligationExtractor,
    dates: DateExtractor,
}

impl ExtractionEngine {
    /// Create the engine, compiling fallback patterns up front
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            key_points: KeyPointExtractor::new(config.max_key_points),
            obligations: ObligationExtractor::new(),
            dates: DateExtractor::new(config.date_context_window)?,
        })
    }

    /// Run all three extractors over one clause body. Extractor failures
    /// are logged and produce empty output for that extractor only.
    pub fn extract(&self, body: &str, analyzed: Option<&AnalyzedText>) -> ClauseExtraction {
        let key_points = self.key_points.extract(body, analyzed).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "key point extraction failed, continuing without");
            Vec::new()
        });

        let obligations = self.obligations.extract(body, analyzed).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "obligation extraction failed, continuing without");
            ObligationMap::new()
        });

        let dates = self.dates.extract(body, analyzed).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "date extraction failed, continuing without");
            Vec::new()
        });

        ClauseExtraction {
            key_points,
            obligations,
            dates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractionConfig;
    use crate::linguistic::{HeuristicAnalyzer, LinguisticAnalyzer};

    #[test]
    fn extractors_run_independently_over_one_clause() {
        let engine = ExtractionEngine::new(&ExtractionConfig::default()).unwrap();
        let analyzer = HeuristicAnalyzer::new().unwrap();
        let body = "ACME Corp shall deliver the goods within 30 days. \
                    The CLIENT may request changes in accordance with this agreement.";
        let analyzed = analyzer.analyze(body).unwrap();

        let extraction = engine.extract(body, Some(&analyzed));

        assert!(!extraction.key_points.is_empty());
        assert!(!extraction.obligations.is_empty());
        assert_eq!(extraction.dates.len(), 1);
        assert_eq!(extraction.dates[0].text, "30 days");
    }

    #[test]
    fn degraded_mode_still_extracts() {
        let engine = ExtractionEngine::new(&ExtractionConfig::default()).unwrap();
        let body = "The vendor shall respond within 10 days.";

        let extraction = engine.extract(body, None);

        assert_eq!(extraction.key_points.len(), 1);
        assert_eq!(extraction.obligations.len(), 1);
        assert_eq!(extraction.dates.len(), 1);
    }
}
