//! Batch configuration

use serde::Serialize;
use std::path::PathBuf;

use duel_common::DuelError;

// ============================================================================
// Ingest Configuration Constants
// ============================================================================

/// Default directory holding the JSON exports.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default location of the table definition applied before the batch.
pub const DEFAULT_SCHEMA_PATH: &str = "./database/20240901000000_initial_schema.sql";

/// Upper bound on files taken from one directory listing; also the largest allowed value.
pub const DEFAULT_MAX_FILES: usize = 10_000;

/// Extension (without the dot) of files picked up by the batch.
pub const DEFAULT_FILE_EXTENSION: &str = "json";

/// Files processed at once; 1 keeps the batch strictly sequential.
pub const DEFAULT_CONCURRENCY: usize = 1;

#[derive(Debug, Clone, Serialize)]
pub struct IngestConfig {
    pub data_dir: PathBuf,
    pub schema_path: PathBuf,
    pub max_files: usize,
    pub file_extension: String,
    pub concurrency: usize,
    pub show_progress: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            schema_path: PathBuf::from(DEFAULT_SCHEMA_PATH),
            max_files: DEFAULT_MAX_FILES,
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            show_progress: false,
        }
    }
}

impl IngestConfig {
    /// Load from `DUEL_*` environment variables, falling back to the defaults
    pub fn from_env() -> Result<Self, DuelError> {
        let defaults = Self::default();

        let config = Self {
            data_dir: std::env::var("DUEL_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            schema_path: std::env::var("DUEL_SCHEMA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.schema_path),
            max_files: env_parse("DUEL_MAX_FILES")?.unwrap_or(defaults.max_files),
            file_extension: std::env::var("DUEL_FILE_EXTENSION")
                .map(|ext| ext.trim_start_matches('.').to_string())
                .unwrap_or(defaults.file_extension),
            concurrency: env_parse("DUEL_INGEST_CONCURRENCY")?.unwrap_or(defaults.concurrency),
            show_progress: env_parse("DUEL_SHOW_PROGRESS")?.unwrap_or(defaults.show_progress),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DuelError> {
        if self.max_files == 0 {
            return Err(DuelError::Config("DUEL_MAX_FILES must be greater than 0".to_string()));
        }
        if self.max_files > DEFAULT_MAX_FILES {
            return Err(DuelError::Config(format!(
                "DUEL_MAX_FILES cannot exceed {}",
                DEFAULT_MAX_FILES
            )));
        }
        if self.concurrency == 0 {
            return Err(DuelError::Config(
                "DUEL_INGEST_CONCURRENCY must be greater than 0".to_string(),
            ));
        }
        if self.file_extension.is_empty() {
            return Err(DuelError::Config("DUEL_FILE_EXTENSION cannot be empty".to_string()));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>, DuelError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| DuelError::invalid_env(name, &raw)),
        Err(_) => Ok(None),
    }
}
