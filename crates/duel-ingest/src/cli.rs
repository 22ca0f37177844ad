//! Command-line surface of the `duel-ingest` binary
//!
//! Every flag is optional and overrides the matching `DUEL_*` variable.

use clap::Parser;
use std::path::PathBuf;

use crate::config::IngestConfig;

#[derive(Parser, Debug, Default)]
#[command(name = "duel-ingest")]
#[command(author, version, about = "Import advocacy user exports into the database")]
pub struct Cli {
    /// Directory containing the JSON exports
    #[arg(long, env = "DUEL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// SQL file applied before the import
    #[arg(long, env = "DUEL_SCHEMA_PATH")]
    pub schema_path: Option<PathBuf>,

    /// Maximum number of files taken from the directory
    #[arg(long, env = "DUEL_MAX_FILES")]
    pub max_files: Option<usize>,

    /// Files processed at once
    #[arg(long, env = "DUEL_INGEST_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Show a progress bar
    #[arg(long)]
    pub progress: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Layer the flags over `config`
    pub fn apply(&self, mut config: IngestConfig) -> IngestConfig {
        if let Some(ref dir) = self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(ref path) = self.schema_path {
            config.schema_path = path.clone();
        }
        if let Some(max) = self.max_files {
            config.max_files = max;
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        config.show_progress |= self.progress;
        config
    }
}
