//! Duel Ingest - loads advocacy user exports into PostgreSQL

use anyhow::{Context, Result};
use clap::Parser;
use duel_common::db::{create_pool, DbConfig};
use duel_common::logging::{init_logging, LogConfig, LogLevel};
use duel_ingest::{cli::Cli, BatchDriver, IngestConfig, PgRecordStore, UserFileValidator};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables take precedence over the flag
    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("duel-ingest")
        .build()
        .merge_env()?;

    let _guard = init_logging(&log_config)?;

    let config = cli.apply(IngestConfig::from_env()?);
    config.validate()?;

    let pool = create_pool(&DbConfig::from_env()?)
        .await
        .context("Failed to connect to the database")?;

    let validator = Arc::new(UserFileValidator::new()?);
    let store = Arc::new(PgRecordStore::new(pool.clone(), config.schema_path.clone()));

    let summary = BatchDriver::new(config, validator, store).run().await?;

    pool.close().await;

    info!(
        files = summary.files_attempted,
        failed = summary.failed(),
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "Ingestion complete"
    );
    Ok(())
}
