//! # Configuration Management Module
//!
//! ## Purpose
//! Centralized configuration for the analyzer: per-stage tunables with
//! file, environment, and default sources and type-safe access.
//!
//! ## Input/Output Specification
//! - **Input**: TOML configuration files, environment variables
//! - **Output**: Validated configuration structs with defaults and overrides
//!
//! ## Configuration Sources (in order of precedence)
//! 1. Environment variables (`LEGAL_ANALYZER_*`)
//! 2. Configuration file
//! 3. Default values
//!
//! ## Usage
//! ```rust,no_run
//! use legal_clause_analyzer::Config;
//!
//! let config = Config::load()?;
//! println!("min clause words: {}", config.analysis.min_clause_words);
//! # Ok::<(), legal_clause_analyzer::AnalysisError>(())
//! ```

use crate::errors::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure containing all analyzer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Pipeline-level behavior
    pub analysis: AnalysisConfig,
    /// Extraction engine tunables
    pub extraction: ExtractionConfig,
    /// Document profiler tunables
    pub profiler: ProfilerConfig,
    /// Analysis store settings
    pub storage: StorageConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Pipeline-level behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Clauses with fewer whitespace-separated words are dropped
    pub min_clause_words: usize,
    /// Number of words kept in the per-clause summary preview
    pub summary_words: usize,
    /// Character cap for the stored clause excerpt
    pub excerpt_chars: usize,
    /// Blend an injected classification model into rule-based results
    pub enable_model_blending: bool,
}

/// Extraction engine tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Maximum qualifying key-point sentences kept per clause
    pub max_key_points: usize,
    /// Tokens of context kept on each side of an extracted date
    pub date_context_window: usize,
}

/// Document profiler tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilerConfig {
    /// Characters of normalized text the profiler inspects
    pub head_chars: usize,
    /// Sentences scanned for a document-type pattern
    pub sentence_scan: usize,
    /// Lines scanned for a heading-like title
    pub line_scan: usize,
    /// Minimum title line length in characters
    pub title_min_chars: usize,
    /// Maximum title line length in characters
    pub title_max_chars: usize,
}

/// Analysis store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database file path
    pub db_path: PathBuf,
    /// Compress stored payloads
    pub enable_compression: bool,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable structured JSON logging
    pub json_format: bool,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::from_file("config.toml")
    }

    /// Load configuration from a specific file, falling back to defaults
    /// when the file does not exist
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| AnalysisError::Config {
                message: format!("Failed to read config file {:?}: {}", path, e),
            })?;
            toml::from_str(&content).map_err(|e| AnalysisError::Config {
                message: format!("Failed to parse config file {:?}: {}", path, e),
            })?
        } else {
            tracing::warn!("Configuration file not found: {:?}, using defaults", path);
            Self::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(db_path) = std::env::var("LEGAL_ANALYZER_DB_PATH") {
            self.storage.db_path = PathBuf::from(db_path);
        }
        if let Ok(level) = std::env::var("LEGAL_ANALYZER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(min_words) = std::env::var("LEGAL_ANALYZER_MIN_CLAUSE_WORDS") {
            self.analysis.min_clause_words =
                min_words.parse().map_err(|_| AnalysisError::Config {
                    message: "Invalid value in LEGAL_ANALYZER_MIN_CLAUSE_WORDS".to_string(),
                })?;
        }
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.analysis.min_clause_words == 0 {
            return Err(AnalysisError::ValidationFailed {
                field: "analysis.min_clause_words".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        if self.extraction.max_key_points == 0 {
            return Err(AnalysisError::ValidationFailed {
                field: "extraction.max_key_points".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        if self.profiler.head_chars == 0 {
            return Err(AnalysisError::ValidationFailed {
                field: "profiler.head_chars".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        if self.profiler.title_min_chars > self.profiler.title_max_chars {
            return Err(AnalysisError::ValidationFailed {
                field: "profiler.title_min_chars".to_string(),
                reason: "Minimum title length cannot exceed the maximum".to_string(),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(AnalysisError::ValidationFailed {
                field: "logging.level".to_string(),
                reason: format!("Unknown log level '{}'", self.logging.level),
            });
        }

        Ok(())
    }

    /// Get configuration as TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| AnalysisError::Config {
            message: format!("Failed to serialize config to TOML: {}", e),
        })
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            extraction: ExtractionConfig::default(),
            profiler: ProfilerConfig::default(),
            storage: StorageConfig {
                db_path: PathBuf::from("./data/analyses.db"),
                enable_compression: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                json_format: false,
            },
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_clause_words: 5,
            summary_words: 50,
            excerpt_chars: 1000,
            enable_model_blending: true,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_key_points: 5,
            date_context_window: 5,
        }
    }
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            head_chars: 1000,
            sentence_scan: 5,
            line_scan: 10,
            title_min_chars: 10,
            title_max_chars: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.analysis.min_clause_words, 5);
        assert_eq!(config.extraction.max_key_points, 5);
    }

    #[test]
    fn zero_min_clause_words_is_rejected() {
        let mut config = Config::default();
        config.analysis.min_clause_words = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, AnalysisError::ValidationFailed { field, .. }
            if field == "analysis.min_clause_words"));
    }

    #[test]
    fn inverted_title_bounds_are_rejected() {
        let mut config = Config::default();
        config.profiler.title_min_chars = 300;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_file(dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.analysis.min_clause_words, 5);
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.analysis.summary_words = 30;
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.analysis.summary_words, 30);
    }
}
