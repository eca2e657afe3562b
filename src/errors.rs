//! # Error Handling Module
//!
//! ## Purpose
//! Centralized error handling for the legal document analyzer, providing
//! structured error types and conversion utilities for all pipeline stages.
//!
//! ## Input/Output Specification
//! - **Input**: Error conditions from pipeline stages and collaborators
//! - **Output**: Structured error types with context
//! - **Error Categories**: Configuration, Patterns, Linguistic,
//!   Classification, Extraction, Storage
//!
//! ## Key Features
//! - Per-stage error variants with detailed context
//! - Automatic error conversion from library error types
//! - Recoverability classification: per-clause errors are recoverable
//!   (the pipeline degrades to partial output instead of aborting)
//! - Structured logging integration

use thiserror::Error;

/// Result type used throughout the application
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for the legal document analyzer
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation failed for field '{field}': {reason}")]
    ValidationFailed { field: String, reason: String },

    /// Regex pattern failed to compile
    #[error("Pattern compilation failed for '{pattern}': {details}")]
    PatternCompilation { pattern: String, details: String },

    /// Linguistic analysis failed for a span of text
    #[error("Linguistic analysis failed: {details}")]
    LinguisticAnalysis { details: String },

    /// External classification model failed
    #[error("Classification model failed: {details}")]
    ClassificationModel { details: String },

    /// A single extractor failed on one clause
    #[error("Extraction failed in '{extractor}': {details}")]
    Extraction { extractor: String, details: String },

    /// Database errors from the analysis store
    #[error("Store connection failed at {db_path}: {reason}")]
    StoreConnectionFailed { db_path: String, reason: String },

    /// Store read/write errors
    #[error("Store operation failed: {details}")]
    StoreOperation { details: String },

    /// Serialization/deserialization errors
    #[error("Serialization failed: {message}")]
    SerializationFailed { message: String },

    /// Stored text that is not valid UTF-8 after decompression
    #[error("Unsupported text encoding: {details}")]
    UnsupportedEncoding { details: String },

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Internal invariant violations
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AnalysisError {
    /// Check if the error is recoverable by degrading to partial output.
    /// Per-clause failures never abort a whole document analysis.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalysisError::LinguisticAnalysis { .. }
                | AnalysisError::ClassificationModel { .. }
                | AnalysisError::Extraction { .. }
        )
    }

    /// Get error category for metrics and logging
    pub fn category(&self) -> &'static str {
        match self {
            AnalysisError::Config { .. } | AnalysisError::Toml(_) => "configuration",
            AnalysisError::ValidationFailed { .. } => "validation",
            AnalysisError::PatternCompilation { .. } => "patterns",
            AnalysisError::LinguisticAnalysis { .. } => "linguistic",
            AnalysisError::ClassificationModel { .. } => "classification",
            AnalysisError::Extraction { .. } => "extraction",
            AnalysisError::StoreConnectionFailed { .. }
            | AnalysisError::StoreOperation { .. }
            | AnalysisError::SerializationFailed { .. }
            | AnalysisError::UnsupportedEncoding { .. } => "storage",
            AnalysisError::Io(_) | AnalysisError::Json(_) => "io",
            AnalysisError::Internal { .. } => "generic",
        }
    }

    /// Build a pattern-compilation error from a regex failure
    pub fn pattern(pattern: &str, err: regex::Error) -> Self {
        AnalysisError::PatternCompilation {
            pattern: pattern.to_string(),
            details: err.to_string(),
        }
    }
}

impl From<bincode::Error> for AnalysisError {
    fn from(err: bincode::Error) -> Self {
        AnalysisError::SerializationFailed {
            message: format!("Binary serialization error: {}", err),
        }
    }
}

impl From<sled::Error> for AnalysisError {
    fn from(err: sled::Error) -> Self {
        AnalysisError::StoreOperation {
            details: err.to_string(),
        }
    }
}

/// Helper macro for internal errors
#[macro_export]
macro_rules! internal_error {
    ($msg:expr) => {
        $crate::errors::AnalysisError::Internal {
            message: $msg.to_string(),
        }
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::errors::AnalysisError::Internal {
            message: format!($fmt, $($arg)*),
        }
    };
}
