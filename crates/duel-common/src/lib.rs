//! Duel Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling, logging and database utilities for the Duel workspace.
//!
//! # Overview
//!
//! - **Error Handling**: the workspace-wide [`DuelError`] and [`Result`] alias
//! - **Logging**: `tracing` subscriber setup driven by `LOG_*` environment variables
//! - **Database**: PostgreSQL pool configuration shared by the ingester and the server
//!
//! # Example
//!
//! ```no_run
//! use duel_common::db::{create_pool, DbConfig};
//! use duel_common::logging::{init_logging, LogConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     init_logging(&LogConfig::from_env()?)?;
//!     let pool = create_pool(&DbConfig::from_env()?).await?;
//!     tracing::info!(size = pool.size(), "Connected");
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{DuelError, Result};
