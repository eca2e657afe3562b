//! # Clause Classification Module
//!
//! ## Purpose
//! Assigns each clause a legal category with a confidence grade and a
//! fixed explanation string. Rule-based keyword scoring is the baseline;
//! an optional external classification model can raise confidence when
//! it agrees or fill in when the rules find nothing.
//!
//! ## Input/Output Specification
//! - **Input**: Clause body text, optional classification model handle
//! - **Output**: `Classification { category, confidence, explanation }`
//! - **Categories**: 12 scored legal categories plus `Miscellaneous`
//!
//! ## Key Features
//! - Lower-cased substring occurrence counts per keyword phrase
//!   (loose matching: "must" inside "adjustment" counts)
//! - Strictly-highest score wins; ties resolve to the first-declared
//!   category; zero top score falls back to `Miscellaneous`
//! - Presence-checked optional model handle, never exception-driven
//! - Model failures log and degrade silently to the rule-based result

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Closed set of legal clause categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClauseCategory {
    Definitions,
    Obligations,
    Rights,
    Termination,
    Confidentiality,
    PaymentTerms,
    GoverningLaw,
    Liability,
    DataProtection,
    IntellectualProperty,
    DisputeResolution,
    ForceMajeure,
    /// No-match fallback; never scored by keywords
    Miscellaneous,
}

impl ClauseCategory {
    /// Display name used in reports
    pub fn name(&self) -> &'static str {
        match self {
            ClauseCategory::Definitions => "Definitions",
            ClauseCategory::Obligations => "Obligations",
            ClauseCategory::Rights => "Rights",
            ClauseCategory::Termination => "Termination",
            ClauseCategory::Confidentiality => "Confidentiality",
            ClauseCategory::PaymentTerms => "Payment Terms",
            ClauseCategory::GoverningLaw => "Governing Law",
            ClauseCategory::Liability => "Liability",
            ClauseCategory::DataProtection => "Data Protection",
            ClauseCategory::IntellectualProperty => "Intellectual Property",
            ClauseCategory::DisputeResolution => "Dispute Resolution",
            ClauseCategory::ForceMajeure => "Force Majeure",
            ClauseCategory::Miscellaneous => "Miscellaneous",
        }
    }

    /// Fixed explanation string per category
    pub fn explanation(&self) -> &'static str {
        match self {
            ClauseCategory::Definitions => "Defines key terms used throughout the document",
            ClauseCategory::Obligations => "Sets out duties and requirements for the parties",
            ClauseCategory::Rights => "Grants rights or entitlements to one or more parties",
            ClauseCategory::Termination => "Governs how and when the agreement may end",
            ClauseCategory::Confidentiality => "Restricts disclosure of confidential information",
            ClauseCategory::PaymentTerms => "Covers fees, invoicing, and payment schedules",
            ClauseCategory::GoverningLaw => "Specifies the governing law and forum",
            ClauseCategory::Liability => "Allocates risk and limits liability between the parties",
            ClauseCategory::DataProtection => "Addresses handling of personal data and privacy",
            ClauseCategory::IntellectualProperty => {
                "Deals with ownership and licensing of intellectual property"
            }
            ClauseCategory::DisputeResolution => "Describes how disputes will be resolved",
            ClauseCategory::ForceMajeure => {
                "Excuses performance during events beyond the parties' control"
            }
            ClauseCategory::Miscellaneous => "General legal provision",
        }
    }
}

impl std::fmt::Display for ClauseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Qualitative classification certainty, not a probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        };
        f.write_str(name)
    }
}

/// Classification result for one clause
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub category: ClauseCategory,
    pub confidence: Confidence,
    pub explanation: String,
}

/// External classification model collaborator. Given clause text, returns
/// a class index in 0–9 mapped through [`model_category`]. Handles are
/// loaded once at process start and treated as read-only.
pub trait ClassificationModel: Send + Sync {
    fn predict(&self, text: &str) -> Result<usize>;
}

/// Fixed mapping from model output index to category. Out-of-range
/// indices map to `Miscellaneous`.
pub fn model_category(index: usize) -> ClauseCategory {
    match index {
        0 => ClauseCategory::Definitions,
        1 => ClauseCategory::Obligations,
        2 => ClauseCategory::Rights,
        3 => ClauseCategory::Termination,
        4 => ClauseCategory::Confidentiality,
        5 => ClauseCategory::PaymentTerms,
        6 => ClauseCategory::GoverningLaw,
        7 => ClauseCategory::Liability,
        8 => ClauseCategory::DataProtection,
        _ => ClauseCategory::Miscellaneous,
    }
}

/// Rule-based clause classifier with fixed keyword tables
pub struct ClauseClassifier {
    keyword_sets: Vec<(ClauseCategory, &'static [&'static str])>,
}

/// Keyword phrase tables, declared in tie-break order. Scoring counts
/// substring occurrences in the lower-cased body, so phrases are kept
/// lowercase and specific enough to avoid the worst collisions.
const KEYWORD_SETS: &[(ClauseCategory, &[&str])] = &[
    (
        ClauseCategory::Definitions,
        &["shall mean", "means", "defined as", "definition", "interpretation"],
    ),
    (
        ClauseCategory::Obligations,
        &["shall", "must", "obligation", "required to", "responsible for", "duty"],
    ),
    (
        ClauseCategory::Rights,
        &["right to", "entitled to", "may elect", "option to", "at its discretion"],
    ),
    (
        ClauseCategory::Termination,
        &["terminat", "expiration", "expiry", "cancel", "end of term"],
    ),
    (
        ClauseCategory::Confidentiality,
        &["confidential", "non-disclosure", "nondisclosure", "proprietary information", "trade secret"],
    ),
    (
        ClauseCategory::PaymentTerms,
        &["payment", "invoice", "fee", "compensation", "remuneration", "purchase price"],
    ),
    (
        ClauseCategory::GoverningLaw,
        &["governing law", "governed by", "jurisdiction", "venue", "laws of"],
    ),
    (
        ClauseCategory::Liability,
        &["liability", "liable", "indemnif", "damages", "hold harmless"],
    ),
    (
        ClauseCategory::DataProtection,
        &["personal data", "data protection", "gdpr", "privacy", "data subject"],
    ),
    (
        ClauseCategory::IntellectualProperty,
        &["intellectual property", "copyright", "trademark", "patent", "work product"],
    ),
    (
        ClauseCategory::DisputeResolution,
        &["dispute", "arbitration", "mediation", "litigation", "claim"],
    ),
    (
        ClauseCategory::ForceMajeure,
        &["force majeure", "act of god", "beyond the reasonable control", "natural disaster"],
    ),
];

impl ClauseClassifier {
    /// Create a new classifier with the fixed keyword tables
    pub fn new() -> Self {
        Self {
            keyword_sets: KEYWORD_SETS.to_vec(),
        }
    }

    /// Classify a clause body, optionally blending an external model's
    /// prediction into the rule-based result.
    pub fn classify(
        &self,
        body: &str,
        model: Option<&dyn ClassificationModel>,
    ) -> Classification {
        let rule_category = self.rule_based_category(body);
        let mut category = rule_category;
        let mut confidence = Confidence::Medium;

        if let Some(model) = model {
            match model.predict(body) {
                Ok(index) => {
                    let predicted = model_category(index);
                    if predicted == rule_category || rule_category == ClauseCategory::Miscellaneous {
                        category = predicted;
                        confidence = Confidence::High;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "classification model failed, using rule-based result");
                }
            }
        }

        Classification {
            category,
            confidence,
            explanation: category.explanation().to_string(),
        }
    }

    /// Score every category's keywords against the lower-cased body and
    /// pick the strict maximum; declaration order breaks ties.
    fn rule_based_category(&self, body: &str) -> ClauseCategory {
        let lower = body.to_lowercase();
        let mut best = ClauseCategory::Miscellaneous;
        let mut best_score = 0usize;

        for (category, keywords) in &self.keyword_sets {
            let score: usize = keywords
                .iter()
                .map(|keyword| lower.matches(keyword).count())
                .sum();
            if score > best_score {
                best_score = score;
                best = *category;
            }
        }

        best
    }
}

impl Default for ClauseClassifier {
    fn default() -> Self {
        Self::new()
    }
}
