pub mod docs;
pub mod response;

use crate::config::Config;
use crate::db::PgUserStatsStore;
use crate::features::{self, FeatureState};
use crate::middleware;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::compression::CompressionLayer;

use self::response::ErrorResponse;

/// Bind, serve until Ctrl+C or SIGTERM, then drain for at most the configured timeout
pub async fn serve(config: Config, pool: PgPool) -> anyhow::Result<()> {
    let state = FeatureState::new(Arc::new(PgUserStatsStore::new(pool)));
    let app = create_router(state, &config);

    let addr: SocketAddr = config.bind_address().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    let (stopping_tx, mut stopping_rx) = tokio::sync::watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = stopping_tx.send(true);
        })
        .into_future();

    let drain_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let deadline = async move {
        if stopping_rx.changed().await.is_ok() {
            tracing::info!(
                "Waiting up to {} seconds for connections to close",
                drain_timeout.as_secs()
            );
            tokio::time::sleep(drain_timeout).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server => result?,
        _ = deadline => tracing::warn!("Shutdown timeout elapsed, closing remaining connections"),
    }

    Ok(())
}

/// Build the application router with all routes and middleware
pub fn create_router(state: FeatureState, config: &Config) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(state.clone())
        .route("/openapi.json", get(openapi))
        .merge(features::router(state))
        // Apply layers from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

async fn health(State(state): State<FeatureState>) -> Response {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            ErrorResponse::new("Database unavailable").with_status(StatusCode::SERVICE_UNAVAILABLE)
        },
    }
}

async fn openapi() -> impl IntoResponse {
    Json(docs::openapi_document())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
