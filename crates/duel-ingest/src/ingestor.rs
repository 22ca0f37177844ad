//! Per-file pipeline: read, repair, validate, sanitize, persist
//!
//! [`FileIngestor::process`] is the isolation boundary. Every failure is logged with
//! the file name and folded into a [`FileOutcome`]; nothing propagates to the caller.

use std::path::Path;
use std::sync::Arc;

use crate::error::IngestError;
use crate::models::UserFile;
use crate::repair::{parse_with_repair, ParseOutcome};
use crate::sanitize::sanitize;
use crate::schema::{normalize_whole_numbers, UserFileValidator, ValidationIssue};
use crate::store::RecordStore;

/// What happened to one input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Inserted(ParseOutcome),
    ReadFailed,
    ParseFailed,
    ValidationFailed,
    StoreFailed,
}

impl FileOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted(_))
    }
}

impl From<&IngestError> for FileOutcome {
    fn from(err: &IngestError) -> Self {
        match err {
            IngestError::Read { .. } => Self::ReadFailed,
            IngestError::Parse { .. } => Self::ParseFailed,
            IngestError::Validation { .. } => Self::ValidationFailed,
            IngestError::Store { .. } => Self::StoreFailed,
        }
    }
}

#[derive(Clone)]
pub struct FileIngestor {
    validator: Arc<UserFileValidator>,
    store: Arc<dyn RecordStore>,
}

impl FileIngestor {
    pub fn new(validator: Arc<UserFileValidator>, store: Arc<dyn RecordStore>) -> Self {
        Self { validator, store }
    }

    /// Run the pipeline for `path`, logging any failure
    pub async fn process(&self, path: &Path) -> FileOutcome {
        match self.ingest_path(path).await {
            Ok(outcome) => {
                tracing::debug!(file = %path.display(), "Imported file");
                FileOutcome::Inserted(outcome)
            },
            Err(err) => {
                log_failure(&err);
                FileOutcome::from(&err)
            },
        }
    }

    pub async fn ingest_path(&self, path: &Path) -> Result<ParseOutcome, IngestError> {
        let file = display_name(path);
        let raw = tokio::fs::read(path).await.map_err(|source| IngestError::Read {
            file: file.clone(),
            source,
        })?;

        self.ingest_bytes(&file, &raw).await
    }

    /// Run the pipeline over bytes already in memory, under the given file name
    pub async fn ingest_bytes(&self, file: &str, raw: &[u8]) -> Result<ParseOutcome, IngestError> {
        let parsed = parse_with_repair(raw).map_err(|source| IngestError::Parse {
            file: file.to_string(),
            source,
        })?;

        if parsed.outcome == ParseOutcome::Repaired {
            tracing::warn!(file, "Repaired malformed JSON by appending a closing brace");
        }

        let mut value = parsed.value;
        normalize_whole_numbers(&mut value);

        self.validator
            .validate(&value)
            .map_err(|issues| IngestError::Validation {
                file: file.to_string(),
                issues,
            })?;

        // Integers beyond i64 pass the schema but not the typed model.
        let user = UserFile::from_value(value).map_err(|e| IngestError::Validation {
            file: file.to_string(),
            issues: vec![ValidationIssue::new("", e.to_string())],
        })?;

        let record = sanitize(file, user);

        self.store
            .insert(&record)
            .await
            .map_err(|source| IngestError::Store {
                file: file.to_string(),
                source,
            })?;

        Ok(parsed.outcome)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn log_failure(err: &IngestError) {
    match err {
        IngestError::Validation { file, issues } => {
            for issue in issues {
                tracing::error!(
                    file = %file,
                    path = %issue.path,
                    message = %issue.message,
                    "Validation error"
                );
            }
            tracing::error!(file = %file, error = %err, "Rejected file");
        },
        _ => tracing::error!(file = %err.file(), error = %err, "Failed to import file"),
    }
}
