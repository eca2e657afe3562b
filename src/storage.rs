//! # Analysis Store Module
//!
//! ## Purpose
//! Thin persistence collaborator for saved analyses. The core pipeline
//! never touches storage; callers hand a finished [`Analysis`] to a
//! store together with an owner identifier and a generated name.
//!
//! ## Input/Output Specification
//! - **Input**: Owner identifier, analysis name, serializable analysis
//! - **Output**: Persistent records, owner-scoped listing, deletion
//! - **Storage**: Sled embedded database, bincode values, optional gzip
//!
//! ## Key Features
//! - `AnalysisStore` trait so remote backends can replace the default
//! - Owner-scoped keys; listing scans one owner's prefix only
//! - Generated analysis names from the first clause title plus timestamp

use crate::config::StorageConfig;
use crate::errors::{AnalysisError, Result};
use crate::utils::TextUtils;
use crate::Analysis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One saved analysis record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAnalysis {
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub analysis: Analysis,
}

/// Persistence collaborator. Implementations accept a caller-supplied
/// owner identifier, a generated name, and a serializable analysis.
pub trait AnalysisStore: Send + Sync {
    fn save(&self, owner: &str, name: &str, analysis: &Analysis) -> Result<()>;
    fn list(&self, owner: &str) -> Result<Vec<SavedAnalysis>>;
    fn delete(&self, owner: &str, name: &str) -> Result<()>;
}

/// Generate a store name for an analysis: the first clause title
/// (sanitized) plus a second-resolution timestamp.
pub fn generate_analysis_name(analysis: &Analysis) -> String {
    let first_title = analysis
        .clauses
        .first()
        .map(|c| c.title.as_str())
        .unwrap_or("Analysis");
    format!(
        "{}_{}",
        TextUtils::sanitize_name(first_title),
        Utc::now().format("%Y-%m-%d_%H-%M-%S")
    )
}

/// Sled-backed analysis store
pub struct SledAnalysisStore {
    db: sled::Db,
    tree: sled::Tree,
    enable_compression: bool,
}

impl SledAnalysisStore {
    /// Open (or create) the store at the configured path
    pub fn new(config: &StorageConfig) -> Result<Self> {
        if let Some(parent) = config.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = sled::open(&config.db_path).map_err(|e| AnalysisError::StoreConnectionFailed {
            db_path: config.db_path.to_string_lossy().to_string(),
            reason: e.to_string(),
        })?;

        let tree = db
            .open_tree("analyses")
            .map_err(|e| AnalysisError::StoreConnectionFailed {
                db_path: config.db_path.to_string_lossy().to_string(),
                reason: format!("Failed to open analyses tree: {}", e),
            })?;

        let store = Self {
            db,
            tree,
            enable_compression: config.enable_compression,
        };

        tracing::info!("Analysis store opened with {} records", store.tree.len());
        Ok(store)
    }

    /// Owner identifiers are sanitized so the `{owner}/{name}` key space
    /// stays unambiguous under prefix scans.
    fn key(owner: &str, name: &str) -> Vec<u8> {
        format!("{}/{}", TextUtils::sanitize_name(owner), name).into_bytes()
    }

    fn encode(&self, record: &SavedAnalysis) -> Result<Vec<u8>> {
        let bytes = bincode::serialize(record)?;
        if self.enable_compression {
            compress(&bytes)
        } else {
            Ok(bytes)
        }
    }

    fn decode(&self, data: &[u8]) -> Result<SavedAnalysis> {
        let bytes = if self.enable_compression {
            decompress(data)?
        } else {
            data.to_vec()
        };
        Ok(bincode::deserialize(&bytes)?)
    }

    /// Probe basic read/write health of the underlying database
    pub fn health_check(&self) -> Result<()> {
        let test_key = b"\0health_check";
        self.tree.insert(test_key, b"ok".to_vec())?;
        let value = self.tree.get(test_key)?;
        if value.is_none() {
            return Err(AnalysisError::StoreOperation {
                details: "Health check value not found".to_string(),
            });
        }
        self.tree.remove(test_key)?;
        Ok(())
    }
}

impl AnalysisStore for SledAnalysisStore {
    fn save(&self, owner: &str, name: &str, analysis: &Analysis) -> Result<()> {
        let record = SavedAnalysis {
            name: name.to_string(),
            saved_at: Utc::now(),
            analysis: analysis.clone(),
        };
        let value = self.encode(&record)?;
        self.tree.insert(Self::key(owner, name), value)?;
        self.db.flush()?;

        tracing::debug!(owner, name, "saved analysis");
        Ok(())
    }

    fn list(&self, owner: &str) -> Result<Vec<SavedAnalysis>> {
        let prefix = format!("{}/", TextUtils::sanitize_name(owner));
        let mut records = Vec::new();

        for item in self.tree.scan_prefix(prefix.as_bytes()) {
            let (_, value) = item?;
            records.push(self.decode(&value)?);
        }

        Ok(records)
    }

    fn delete(&self, owner: &str, name: &str) -> Result<()> {
        self.tree.remove(Self::key(owner, name))?;
        self.db.flush()?;
        Ok(())
    }
}

fn compress(bytes: &[u8]) -> Result<Vec<u8>> {
    use std::io::Write;

    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(bytes).map_err(|e| AnalysisError::Internal {
        message: format!("Compression failed: {}", e),
    })?;
    encoder.finish().map_err(|e| AnalysisError::Internal {
        message: format!("Compression finish failed: {}", e),
    })
}

fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    use std::io::Read;

    let mut decoder = flate2::read::GzDecoder::new(data);
    let mut bytes = Vec::new();
    decoder
        .read_to_end(&mut bytes)
        .map_err(|e| AnalysisError::Internal {
            message: format!("Decompression failed: {}", e),
        })?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::pipeline::DocumentAnalyzer;

    fn sample_analysis() -> Analysis {
        DocumentAnalyzer::new(&Config::default())
            .unwrap()
            .analyze("SECTION 1. The vendor shall deliver all goods promptly.")
    }

    fn store_at(dir: &std::path::Path, compression: bool) -> SledAnalysisStore {
        let config = StorageConfig {
            db_path: dir.join("analyses.db"),
            enable_compression: compression,
        };
        SledAnalysisStore::new(&config).unwrap()
    }

    #[test]
    fn save_list_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(dir.path(), true);
        let analysis = sample_analysis();

        store.save("user-1", "first", &analysis).unwrap();
        store.save("user-1", "second", &analysis).unwrap();

        let records = store.list("user-1").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].analysis.clauses.len(), analysis.clauses.len());

        store.delete("user-1", "first").unwrap();
        assert_eq!(store.list("user-1").unwrap().len(), 1);
    }

    #[test]
    fn listing_is_owner_scoped() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(dir.path(), false);
        let analysis = sample_analysis();

        store.save("alice", "a", &analysis).unwrap();
        store.save("bob", "b", &analysis).unwrap();

        assert_eq!(store.list("alice").unwrap().len(), 1);
        assert_eq!(store.list("bob").unwrap().len(), 1);
        assert!(store.list("carol").unwrap().is_empty());
    }

    #[test]
    fn uncompressed_store_round_trips_too() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(dir.path(), false);
        let analysis = sample_analysis();

        store.save("user", "plain", &analysis).unwrap();
        let records = store.list("user").unwrap();
        assert_eq!(records[0].name, "plain");
    }

    #[test]
    fn health_check_probes_the_tree() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(dir.path(), true);
        store.health_check().unwrap();
    }

    #[test]
    fn generated_names_start_with_the_first_clause_title() {
        let analysis = sample_analysis();
        let name = generate_analysis_name(&analysis);
        assert!(name.starts_with("SECTION_1._"));
    }

    #[test]
    fn generated_names_fall_back_without_clauses() {
        let analysis = DocumentAnalyzer::new(&Config::default()).unwrap().analyze("");
        let name = generate_analysis_name(&analysis);
        assert!(name.starts_with("Analysis_"));
    }
}
