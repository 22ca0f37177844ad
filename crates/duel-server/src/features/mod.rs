//! Feature modules implementing the Duel read API
//!
//! Each feature is a vertical slice:
//! - `queries/` - validation and the store call
//! - `routes.rs` - HTTP route definitions and error mapping
//!
//! # Features
//!
//! - **engagement**: per-platform engagement totals
//! - **top_users**: users ranked by attributed sales

pub mod engagement;
pub mod top_users;

use axum::Router;
use std::sync::Arc;

use crate::db::UserStatsStore;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    pub store: Arc<dyn UserStatsStore>,
}

impl FeatureState {
    pub fn new(store: Arc<dyn UserStatsStore>) -> Self {
        Self { store }
    }
}

/// Creates the router with all feature routes mounted at the root
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .merge(engagement::engagement_routes())
        .merge(top_users::top_users_routes())
        .with_state(state)
}
