//! Shared fixtures for duel-ingest integration tests
//!
//! [`RecordingStore`] stands in for PostgreSQL and keeps every inserted row in memory.

#![allow(dead_code)]

use async_trait::async_trait;
use duel_ingest::{FlatUserRecord, IngestConfig, RecordStore, StoreError};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingStore {
    pub rows: Mutex<Vec<FlatUserRecord>>,
    pub schema_calls: AtomicUsize,
    /// Schema setup fails when set
    pub fail_schema: bool,
    /// Inserts for these file names fail
    pub reject_files: Vec<String>,
}

impl RecordingStore {
    pub fn rejecting(files: &[&str]) -> Self {
        Self {
            reject_files: files.iter().map(|f| f.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn rows(&self) -> Vec<FlatUserRecord> {
        self.rows.lock().unwrap().clone()
    }

    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rows().into_iter().map(|r| r.file_name).collect();
        names.sort();
        names
    }
}

#[async_trait]
impl RecordStore for RecordingStore {
    async fn init_schema(&self) -> Result<(), StoreError> {
        self.schema_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_schema {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }

    async fn insert(&self, record: &FlatUserRecord) -> Result<(), StoreError> {
        if self.reject_files.contains(&record.file_name) {
            return Err(StoreError::Database(sqlx::Error::RowNotFound));
        }
        self.rows.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// A user export that passes validation, tagged with `user_id`
pub fn valid_user(user_id: &str) -> Value {
    json!({
        "user_id": user_id,
        "name": "Dallas Metz",
        "email": "Giovanna_Gusikowski70@yahoo.com",
        "instagram_handle": "@Lucio98",
        "tiktok_handle": "@Jaleel93",
        "joined_at": "2024-09-07T15:59:34.170Z",
        "advocacy_programs": [{
            "program_id": "355e40a7-58ca-41c4-abe8-2aaeaf4bfca9",
            "brand": "Gibson, Hartmann and Murray",
            "tasks_completed": [{
                "task_id": "90f738ce-9ca8-4fb6-8b34-7d035925e089",
                "platform": "TikTok",
                "post_url": "https://hateful-custom.org",
                "likes": 287,
                "comments": 14,
                "shares": 15,
                "reach": 9993
            }],
            "total_sales_attributed": 564.0311517201802
        }]
    })
}

pub fn write_json(dir: &Path, name: &str, value: &Value) {
    std::fs::write(dir.join(name), serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

pub fn write_raw(dir: &Path, name: &str, raw: &str) {
    std::fs::write(dir.join(name), raw).unwrap();
}

pub fn config_for(dir: &Path) -> IngestConfig {
    IngestConfig {
        data_dir: dir.to_path_buf(),
        ..IngestConfig::default()
    }
}
