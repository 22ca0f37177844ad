use crate::db::UserStatsStore;
use crate::models::TopUser;

/// Number of users returned by `GET /top-users`
pub const TOP_USERS_LIMIT: i64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ListTopUsersError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(skip(store))]
pub async fn handle(store: &dyn UserStatsStore) -> Result<Vec<TopUser>, ListTopUsersError> {
    let users = store.top_users_by_sales(TOP_USERS_LIMIT).await?;
    Ok(users)
}
