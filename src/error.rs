//! Error types for the fallible edges of the crate.
//!
//! Item data never produces errors: ingestion and every field accessor degrade
//! to empty values instead. Errors only come from I/O and from collaborators
//! the host plugs in (settings storage, host configuration, enrichment).

use std::path::PathBuf;

/// Failure reading or writing the persisted filter settings.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read settings from {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("failed to write settings to {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },

    #[error("settings in {path} are not valid JSON: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failure loading host data (type registries, localization catalog, items).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {what} from {path}: {source}")]
    Read { what: &'static str, path: PathBuf, source: std::io::Error },

    #[error("invalid {what} JSON: {source}")]
    Parse { what: &'static str, source: serde_json::Error },
}

/// Failure reported by a host [`Enricher`](crate::Enricher).
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("description enrichment failed: {0}")]
    Failed(String),
}
