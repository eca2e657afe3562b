//! # Document Analysis Pipeline
//!
//! ## Purpose
//! Orchestrates the complete analysis workflow: normalize → segment →
//! filter → per-clause classification and extraction → aggregation →
//! document profiling.
//!
//! ## Input/Output Specification
//! - **Input**: Raw document text, optional collaborator handles
//! - **Output**: One immutable [`Analysis`] per run
//! - **Workflow**: Normalize → Segment → Classify/Extract → Aggregate
//!
//! ## Key Features
//! - Explicit dependency injection: collaborator handles are constructed
//!   once at process start and passed in, never global
//! - Per-clause error isolation: a failing clause is logged and omitted,
//!   the rest of the document still analyzes
//! - Empty or unparseable input yields an empty analysis, not an error

use std::sync::Arc;

use crate::classify::{ClassificationModel, ClauseClassifier};
use crate::config::Config;
use crate::errors::Result;
use crate::extraction::{DateEntry, ExtractionEngine, ObligationMap};
use crate::linguistic::LinguisticAnalyzer;
use crate::normalize::TextNormalizer;
use crate::profile::DocumentProfiler;
use crate::segment::ClauseSegmenter;
use crate::utils::{TextUtils, Timer};
use crate::{Analysis, AnalysisMetadata, ClauseAnalysis};

/// Per-run statistics, logged when a document completes
#[derive(Debug, Default)]
struct AnalysisStats {
    segmented: usize,
    retained: usize,
    filtered: usize,
    failed: usize,
}

/// End-to-end document analyzer with injected collaborator handles
pub struct DocumentAnalyzer {
    min_clause_words: usize,
    summary_words: usize,
    excerpt_chars: usize,
    enable_model_blending: bool,
    normalizer: TextNormalizer,
    segmenter: ClauseSegmenter,
    classifier: ClauseClassifier,
    extraction: ExtractionEngine,
    profiler: DocumentProfiler,
    linguistic: Option<Arc<dyn LinguisticAnalyzer>>,
    model: Option<Arc<dyn ClassificationModel>>,
}

impl DocumentAnalyzer {
    /// Create an analyzer from configuration, with no collaborators
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            min_clause_words: config.analysis.min_clause_words,
            summary_words: config.analysis.summary_words,
            excerpt_chars: config.analysis.excerpt_chars,
            enable_model_blending: config.analysis.enable_model_blending,
            normalizer: TextNormalizer::new()?,
            segmenter: ClauseSegmenter::new()?,
            classifier: ClauseClassifier::new(),
            extraction: ExtractionEngine::new(&config.extraction)?,
            profiler: DocumentProfiler::new(config.profiler.clone()),
            linguistic: None,
            model: None,
        })
    }

    /// Inject a linguistic analyzer handle (loaded once, read-only)
    pub fn with_linguistic_analyzer(mut self, analyzer: Arc<dyn LinguisticAnalyzer>) -> Self {
        self.linguistic = Some(analyzer);
        self
    }

    /// Inject a classification model handle (loaded once, read-only)
    pub fn with_classification_model(mut self, model: Arc<dyn ClassificationModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Analyze one document. Never fails: degraded input degrades the
    /// output instead (empty text yields an analysis with empty
    /// aggregates).
    pub fn analyze(&self, text: &str) -> Analysis {
        let timer = Timer::new("document_analysis");

        let normalized = self.normalizer.normalize(text);
        let metadata = AnalysisMetadata {
            length: normalized.chars().count(),
            estimated_clauses: normalized.matches("SECTION").count()
                + normalized.matches("Article").count()
                + 1,
        };
        let profile = self.profiler.profile(&normalized, self.linguistic.as_deref());

        let mut stats = AnalysisStats::default();
        let mut clauses = Vec::new();
        let mut all_dates: Vec<DateEntry> = Vec::new();
        let mut all_obligations = ObligationMap::new();

        for clause in self.segmenter.segment(&normalized) {
            stats.segmented += 1;

            if !clause.is_substantive(self.min_clause_words) {
                stats.filtered += 1;
                continue;
            }

            // The linguistic view is computed once per clause and shared
            // by all three extractors. A failure here skips the clause.
            let analyzed = match &self.linguistic {
                Some(analyzer) => match analyzer.analyze(&clause.body) {
                    Ok(view) => Some(view),
                    Err(e) => {
                        tracing::warn!(
                            clause = %clause.title,
                            error = %e,
                            "linguistic analysis failed, skipping clause"
                        );
                        stats.failed += 1;
                        continue;
                    }
                },
                None => None,
            };

            let model = if self.enable_model_blending {
                self.model.as_deref()
            } else {
                None
            };
            let classification = self.classifier.classify(&clause.body, model);
            let extraction = self.extraction.extract(&clause.body, analyzed.as_ref());

            all_dates.extend(extraction.dates.iter().cloned());
            all_obligations.merge(extraction.obligations.clone());

            clauses.push(ClauseAnalysis {
                title: clause.title.clone(),
                classification,
                summary: TextUtils::extract_preview(&clause.body, self.summary_words),
                key_points: extraction.key_points,
                obligations: extraction.obligations,
                dates: extraction.dates,
                excerpt: TextUtils::truncate(&clause.body, self.excerpt_chars),
            });
            stats.retained += 1;
        }

        tracing::info!(
            segmented = stats.segmented,
            retained = stats.retained,
            filtered = stats.filtered,
            failed = stats.failed,
            elapsed_ms = timer.stop(),
            "document analysis completed"
        );

        Analysis {
            id: uuid::Uuid::new_v4(),
            profile,
            metadata,
            clauses,
            dates: all_dates,
            obligations: all_obligations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ClauseCategory;
    use crate::errors::AnalysisError;
    use crate::linguistic::{AnalyzedText, HeuristicAnalyzer};
    use crate::Party;

    fn analyzer() -> DocumentAnalyzer {
        DocumentAnalyzer::new(&Config::default()).unwrap()
    }

    fn analyzer_with_linguistics() -> DocumentAnalyzer {
        analyzer().with_linguistic_analyzer(Arc::new(HeuristicAnalyzer::new().unwrap()))
    }

    const CONTRACT: &str = "Acme Service Agreement\n\
        WHEREAS the parties wish to cooperate on delivery of services. \n\
        SECTION 1. ACME Corp shall deliver the goods within 30 days of the order date. \n\
        SECTION 2. All confidential information and proprietary information stays protected. \n\
        SECTION 3. Data must be deleted within 30 days of request by the user.";

    #[test]
    fn analyzes_a_contract_end_to_end() {
        let analysis = analyzer_with_linguistics().analyze(CONTRACT);

        // The three-word preamble ("Acme Service Agreement") is filtered.
        assert_eq!(analysis.clauses.len(), 4);
        let titles: Vec<&str> = analysis.clauses.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["WHEREAS", "SECTION 1.", "SECTION 2.", "SECTION 3."]);

        // SECTION markers stay in the normalized text, so the heuristic
        // counts three of them plus one.
        assert_eq!(analysis.metadata.estimated_clauses, 4);
        assert!(analysis.metadata.length > 0);
    }

    #[test]
    fn short_clauses_are_dropped() {
        // The second clause has three words and must not survive.
        let text = "SECTION 1. The first clause carries plenty of words. \
                    SECTION 2. too few words. \
                    SECTION 3. The third clause also has enough words.";
        let analysis = analyzer().analyze(text);

        let titles: Vec<&str> = analysis.clauses.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["SECTION 1.", "SECTION 3."]);
        assert!(analysis
            .clauses
            .iter()
            .all(|c| !c.excerpt.contains("too few words")));
    }

    #[test]
    fn empty_input_yields_empty_aggregates() {
        let analysis = analyzer().analyze("   \n  ");
        assert!(analysis.clauses.is_empty());
        assert!(analysis.dates.is_empty());
        assert!(analysis.obligations.is_empty());
        assert_eq!(analysis.metadata.length, 0);
    }

    #[test]
    fn aggregates_preserve_clause_order() {
        let analysis = analyzer_with_linguistics().analyze(CONTRACT);

        // SECTION 1 and SECTION 3 both mention "30 days"; duplicates
        // are preserved in clause order.
        assert_eq!(analysis.dates.len(), 2);
        assert!(analysis
            .obligations
            .get(&Party::Named("ACME".to_string()))
            .is_some());
    }

    #[test]
    fn classification_reaches_each_clause() {
        let analysis = analyzer_with_linguistics().analyze(CONTRACT);
        let confidentiality = analysis
            .clauses
            .iter()
            .find(|c| c.title == "SECTION 2.")
            .unwrap();
        assert_eq!(
            confidentiality.classification.category,
            ClauseCategory::Confidentiality
        );
    }

    #[test]
    fn failing_linguistic_analyzer_skips_clauses_but_not_the_document() {
        struct FailingAnalyzer;
        impl LinguisticAnalyzer for FailingAnalyzer {
            fn analyze(&self, _text: &str) -> crate::errors::Result<AnalyzedText> {
                Err(AnalysisError::LinguisticAnalysis {
                    details: "model unavailable".to_string(),
                })
            }
        }

        let analysis = analyzer()
            .with_linguistic_analyzer(Arc::new(FailingAnalyzer))
            .analyze(CONTRACT);

        assert!(analysis.clauses.is_empty());
        assert!(analysis.dates.is_empty());
    }
}
