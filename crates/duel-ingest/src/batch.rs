//! Batch driver
//!
//! Lists the input directory once, applies the schema, then feeds every file through
//! [`FileIngestor::process`]. Only listing and schema setup can fail the batch; per-file
//! failures are counted in the [`BatchSummary`].

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::IngestConfig;
use crate::error::BatchError;
use crate::ingestor::{FileIngestor, FileOutcome};
use crate::repair::ParseOutcome;
use crate::schema::UserFileValidator;
use crate::store::RecordStore;

/// Totals for one run; `files_attempted` counts every listed file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub files_attempted: usize,
    pub inserted: usize,
    pub repaired: usize,
    pub read_failures: usize,
    pub parse_failures: usize,
    pub validation_failures: usize,
    pub store_failures: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: FileOutcome) {
        self.files_attempted += 1;
        match outcome {
            FileOutcome::Inserted(parse) => {
                self.inserted += 1;
                if parse == ParseOutcome::Repaired {
                    self.repaired += 1;
                }
            },
            FileOutcome::ReadFailed => self.read_failures += 1,
            FileOutcome::ParseFailed => self.parse_failures += 1,
            FileOutcome::ValidationFailed => self.validation_failures += 1,
            FileOutcome::StoreFailed => self.store_failures += 1,
        }
    }

    pub fn failed(&self) -> usize {
        self.files_attempted - self.inserted
    }
}

/// Files in `dir` ending in `.{extension}`, skipping hidden entries, at most `max_files`
///
/// Order is whatever the filesystem enumeration yields.
pub async fn list_input_files(
    dir: &Path,
    extension: &str,
    max_files: usize,
) -> Result<Vec<PathBuf>, BatchError> {
    let list_err = |source| BatchError::ListDir {
        path: dir.to_path_buf(),
        source,
    };

    let suffix = format!(".{}", extension);
    let mut entries = tokio::fs::read_dir(dir).await.map_err(list_err)?;
    let mut files = Vec::new();

    while files.len() < max_files {
        let Some(entry) = entries.next_entry().await.map_err(list_err)? else {
            break;
        };

        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') || !name.ends_with(&suffix) {
            continue;
        }

        files.push(entry.path());
    }

    Ok(files)
}

pub struct BatchDriver {
    config: IngestConfig,
    store: Arc<dyn RecordStore>,
    ingestor: FileIngestor,
}

impl BatchDriver {
    pub fn new(
        config: IngestConfig,
        validator: Arc<UserFileValidator>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        let ingestor = FileIngestor::new(validator, store.clone());
        Self {
            config,
            store,
            ingestor,
        }
    }

    pub async fn run(&self) -> Result<BatchSummary, BatchError> {
        let started = Instant::now();

        self.store.init_schema().await.map_err(BatchError::Schema)?;

        let files = list_input_files(
            &self.config.data_dir,
            &self.config.file_extension,
            self.config.max_files,
        )
        .await?;

        tracing::info!(
            files = files.len(),
            dir = %self.config.data_dir.display(),
            concurrency = self.config.concurrency,
            "Starting import"
        );

        let progress = self.progress_bar(files.len() as u64);

        let mut summary = stream::iter(files)
            .map(|path| {
                let ingestor = &self.ingestor;
                async move { ingestor.process(&path).await }
            })
            .buffer_unordered(self.config.concurrency)
            .fold(BatchSummary::default(), |mut summary, outcome| {
                progress.inc(1);
                summary.record(outcome);
                async move { summary }
            })
            .await;

        progress.finish_and_clear();
        summary.elapsed = started.elapsed();

        tracing::info!(
            inserted = summary.inserted,
            repaired = summary.repaired,
            read_failures = summary.read_failures,
            parse_failures = summary.parse_failures,
            validation_failures = summary.validation_failures,
            store_failures = summary.store_failures,
            "Finished importing {} JSON files to the database in {:.2?}",
            summary.files_attempted,
            summary.elapsed
        );

        Ok(summary)
    }

    fn progress_bar(&self, total: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar
    }
}
