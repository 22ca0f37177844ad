//! Record store interface
//!
//! The batch driver only sees [`RecordStore`]; [`PgRecordStore`] is the PostgreSQL
//! implementation used by the binary. Tests substitute an in-memory recorder.

use async_trait::async_trait;
use sqlx::PgPool;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::FlatUserRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read schema file {}: {source}", path.display())]
    SchemaFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence boundary for flattened user rows
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Apply the table definition; safe to call on an initialised database
    async fn init_schema(&self) -> Result<(), StoreError>;

    /// Insert one row; each call is independent and durable on return
    async fn insert(&self, record: &FlatUserRecord) -> Result<(), StoreError>;
}

const INSERT_USER: &str = r#"
    INSERT INTO users (
        filename, user_id, name, email, instagram_handle, tiktok_handle,
        joined_at, program_id, brand, total_sales_attributed, task_id, platform,
        post_url, likes, comments, shares, reach
    ) VALUES (
        $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17
    )
"#;

pub struct PgRecordStore {
    pool: PgPool,
    schema_path: PathBuf,
}

impl PgRecordStore {
    pub fn new(pool: PgPool, schema_path: impl Into<PathBuf>) -> Self {
        Self {
            pool,
            schema_path: schema_path.into(),
        }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn init_schema(&self) -> Result<(), StoreError> {
        let ddl = tokio::fs::read_to_string(&self.schema_path)
            .await
            .map_err(|source| StoreError::SchemaFile {
                path: self.schema_path.clone(),
                source,
            })?;

        sqlx::raw_sql(&ddl).execute(&self.pool).await?;

        tracing::info!(schema = %self.schema_path.display(), "Database schema applied");
        Ok(())
    }

    async fn insert(&self, record: &FlatUserRecord) -> Result<(), StoreError> {
        sqlx::query(INSERT_USER)
            .bind(&record.file_name)
            .bind(&record.user_id)
            .bind(&record.name)
            .bind(&record.email)
            .bind(&record.instagram_handle)
            .bind(&record.tiktok_handle)
            .bind(record.joined_at)
            .bind(&record.program_id)
            .bind(&record.brand)
            .bind(record.total_sales_attributed)
            .bind(&record.task_id)
            .bind(&record.platform)
            .bind(&record.post_url)
            .bind(record.likes)
            .bind(record.comments)
            .bind(record.shares)
            .bind(record.reach)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
