//! Shared helpers for duel-server integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use duel_server::{
    api, config::Config, db::UserStatsStore, EngagementTotals, FeatureState, Platform, TopUser,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// In-memory [`UserStatsStore`] with canned data
#[derive(Default)]
pub struct FakeStatsStore {
    pub engagement: HashMap<Platform, EngagementTotals>,
    pub users: Vec<TopUser>,
    pub fail: bool,
    pub requested_limits: Mutex<Vec<i64>>,
}

impl FakeStatsStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_users(count: usize) -> Self {
        let users = (0..count)
            .map(|i| TopUser {
                name: Some(format!("User {i}")),
                email: Some(format!("user{i}@example.com")),
                instagram_handle: if i % 2 == 0 { Some(format!("@insta{i}")) } else { None },
                tiktok_handle: Some(format!("@tok{i}")),
                total_sales_attributed: Some(1000.0 - i as f64),
            })
            .collect();

        Self {
            users,
            ..Self::default()
        }
    }
}

#[async_trait]
impl UserStatsStore for FakeStatsStore {
    async fn engagement_totals(&self, platform: Platform) -> Result<EngagementTotals, sqlx::Error> {
        if self.fail {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(self.engagement.get(&platform).copied().unwrap_or_default())
    }

    async fn top_users_by_sales(&self, limit: i64) -> Result<Vec<TopUser>, sqlx::Error> {
        if self.fail {
            return Err(sqlx::Error::PoolTimedOut);
        }
        self.requested_limits.lock().unwrap().push(limit);
        Ok(self.users.iter().take(limit as usize).cloned().collect())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        if self.fail {
            return Err(sqlx::Error::PoolClosed);
        }
        Ok(())
    }
}

pub fn app(store: Arc<FakeStatsStore>) -> Router {
    api::create_router(FeatureState::new(store), &Config::default())
}

/// Send a GET request and decode the JSON body
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, value)
}
