//! Aggregate queries over the `users` table
//!
//! Handlers depend on [`UserStatsStore`] so tests can run against an in-memory fake.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{EngagementTotals, Platform, TopUser};

#[async_trait]
pub trait UserStatsStore: Send + Sync {
    /// Sum of likes, comments and shares for `platform`; zeros when nothing matches
    async fn engagement_totals(&self, platform: Platform) -> Result<EngagementTotals, sqlx::Error>;

    /// Users with known sales, highest first
    async fn top_users_by_sales(&self, limit: i64) -> Result<Vec<TopUser>, sqlx::Error>;

    async fn ping(&self) -> Result<(), sqlx::Error>;
}

#[derive(Clone)]
pub struct PgUserStatsStore {
    pool: PgPool,
}

impl PgUserStatsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStatsStore for PgUserStatsStore {
    #[tracing::instrument(skip(self))]
    async fn engagement_totals(&self, platform: Platform) -> Result<EngagementTotals, sqlx::Error> {
        sqlx::query_as::<_, EngagementTotals>(
            r#"
            SELECT
                COALESCE(SUM(likes), 0)::BIGINT AS likes,
                COALESCE(SUM(comments), 0)::BIGINT AS comments,
                COALESCE(SUM(shares), 0)::BIGINT AS shares
            FROM users
            WHERE platform = $1
            "#,
        )
        .bind(platform.as_str())
        .fetch_one(&self.pool)
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn top_users_by_sales(&self, limit: i64) -> Result<Vec<TopUser>, sqlx::Error> {
        sqlx::query_as::<_, TopUser>(
            r#"
            SELECT
                name,
                email,
                instagram_handle,
                tiktok_handle,
                total_sales_attributed
            FROM users
            WHERE total_sales_attributed IS NOT NULL
            ORDER BY total_sales_attributed DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await.map(|_| ())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn insert_row(pool: &PgPool, file: &str, platform: &str, likes: Option<i64>, sales: Option<f64>) {
        sqlx::query(
            r#"
            INSERT INTO users (filename, name, brand, platform, likes, comments, shares, total_sales_attributed)
            VALUES ($1, $1, 'Acme', $2, $3, NULL, 2, $4)
            "#,
        )
        .bind(file)
        .bind(platform)
        .bind(likes)
        .bind(sales)
        .execute(pool)
        .await
        .unwrap();
    }

    #[sqlx::test(migrations = "../../database")]
    #[ignore = "requires PostgreSQL (DATABASE_URL)"]
    async fn test_engagement_totals_sum_one_platform(pool: PgPool) {
        insert_row(&pool, "a.json", "TikTok", Some(10), None).await;
        insert_row(&pool, "b.json", "TikTok", None, None).await;
        insert_row(&pool, "c.json", "Facebook", Some(99), None).await;

        let store = PgUserStatsStore::new(pool);
        let totals = store.engagement_totals(Platform::TikTok).await.unwrap();

        assert_eq!(
            totals,
            EngagementTotals {
                likes: 10,
                comments: 0,
                shares: 4
            }
        );
    }

    #[sqlx::test(migrations = "../../database")]
    #[ignore = "requires PostgreSQL (DATABASE_URL)"]
    async fn test_engagement_totals_empty_table(pool: PgPool) {
        let store = PgUserStatsStore::new(pool);
        let totals = store.engagement_totals(Platform::Numeric123).await.unwrap();
        assert_eq!(totals, EngagementTotals::default());
    }

    #[sqlx::test(migrations = "../../database")]
    #[ignore = "requires PostgreSQL (DATABASE_URL)"]
    async fn test_top_users_skip_null_sales(pool: PgPool) {
        for i in 0..12 {
            insert_row(&pool, &format!("{i}.json"), "Instagram", None, Some(i as f64)).await;
        }
        insert_row(&pool, "null.json", "Instagram", None, None).await;

        let store = PgUserStatsStore::new(pool);
        let users = store.top_users_by_sales(10).await.unwrap();

        assert_eq!(users.len(), 10);
        assert_eq!(users[0].total_sales_attributed, Some(11.0));
        assert!(users
            .windows(2)
            .all(|w| w[0].total_sales_attributed >= w[1].total_sales_attributed));
    }
}
