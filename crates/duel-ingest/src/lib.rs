//! Duel Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Loads advocacy user exports (one JSON document per file) into PostgreSQL.
//!
//! # Pipeline
//!
//! Each file goes through [`repair`] (one retry with a closing brace appended),
//! [`schema`] validation, [`sanitize`] (placeholder values become `NULL`) and finally
//! the [`store::RecordStore`]. A failing file is logged and counted, never fatal.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use duel_common::db::{create_pool, DbConfig};
//! use duel_ingest::{BatchDriver, IngestConfig, PgRecordStore, UserFileValidator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = IngestConfig::from_env()?;
//!     let pool = create_pool(&DbConfig::from_env()?).await?;
//!     let store = Arc::new(PgRecordStore::new(pool, config.schema_path.clone()));
//!
//!     let driver = BatchDriver::new(config, Arc::new(UserFileValidator::new()?), store);
//!     let summary = driver.run().await?;
//!     println!("{} files attempted", summary.files_attempted);
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod ingestor;
pub mod models;
pub mod repair;
pub mod sanitize;
pub mod schema;
pub mod store;

pub use batch::{list_input_files, BatchDriver, BatchSummary};
pub use config::IngestConfig;
pub use error::{BatchError, IngestError};
pub use ingestor::{FileIngestor, FileOutcome};
pub use models::{FlatUserRecord, UserFile};
pub use repair::{parse_with_repair, ParseOutcome};
pub use sanitize::sanitize;
pub use schema::{UserFileValidator, ValidationIssue};
pub use store::{PgRecordStore, RecordStore, StoreError};
