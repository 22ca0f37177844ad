//! Duel Server Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Read-only HTTP API over the advocacy records loaded by `duel-ingest`.
//!
//! # Endpoints
//!
//! - `GET /engagement?platform=...` - summed likes, comments and shares for one platform
//! - `GET /top-users` - the ten users with the highest attributed sales
//! - `GET /health` - database connectivity
//! - `GET /openapi.json` - OpenAPI 3.0 description of the above
//!
//! Handlers reach PostgreSQL only through [`db::UserStatsStore`].
//!
//! # Example
//!
//! ```no_run
//! use duel_common::db::{create_pool, DbConfig};
//! use duel_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = create_pool(&DbConfig::from_env()?).await?;
//!     api::serve(config, pool).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod features;
pub mod middleware;
pub mod models;

pub use features::FeatureState;
pub use models::{EngagementTotals, Platform, TopUser};
