use std::path::PathBuf;
use thiserror::Error;

use crate::repair::RepairError;
use crate::schema::{SchemaError, ValidationIssue};
use crate::store::StoreError;

/// Why a single file was not persisted
///
/// Never escapes the ingestor as a batch failure; the driver only counts it.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {file}: {source}")]
    Read {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: RepairError,
    },

    #[error("{file} failed validation with {} error(s)", issues.len())]
    Validation {
        file: String,
        issues: Vec<ValidationIssue>,
    },

    #[error("failed to store {file}: {source}")]
    Store {
        file: String,
        #[source]
        source: StoreError,
    },
}

impl IngestError {
    pub fn file(&self) -> &str {
        match self {
            Self::Read { file, .. }
            | Self::Parse { file, .. }
            | Self::Validation { file, .. }
            | Self::Store { file, .. } => file,
        }
    }
}

/// Failures that stop the whole batch
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to list input directory {}: {source}", path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to initialise record store schema: {0}")]
    Schema(#[source] StoreError),

    #[error(transparent)]
    Validator(#[from] SchemaError),
}
