//! Duel Server - Main entry point

use anyhow::{Context, Result};
use duel_common::db::{create_pool, DbConfig};
use duel_common::logging::{init_logging, LogConfig};
use duel_server::{api, config::Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Environment variables take precedence over these defaults
    let log_config = LogConfig::builder()
        .log_file_prefix("duel-server")
        .filter_directives("duel_server=debug,tower_http=debug,sqlx=warn")
        .build()
        .merge_env()?;

    let _guard = init_logging(&log_config)?;

    info!("Starting Duel Server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}",
        config.bind_address()
    );

    let pool = create_pool(&DbConfig::from_env()?)
        .await
        .context("Failed to connect to the database")?;

    api::serve(config, pool.clone()).await?;

    pool.close().await;
    info!("Server shut down gracefully");

    Ok(())
}
