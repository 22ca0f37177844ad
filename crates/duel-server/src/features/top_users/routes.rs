use crate::api::response::ErrorResponse;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::queries::ListTopUsersError;
use crate::features::FeatureState;

pub fn top_users_routes() -> Router<FeatureState> {
    Router::new().route("/top-users", get(list_top_users))
}

#[tracing::instrument(skip(state))]
async fn list_top_users(State(state): State<FeatureState>) -> Result<Response, ListTopUsersError> {
    let users = super::queries::list_top_users::handle(state.store.as_ref()).await?;

    tracing::debug!(count = users.len(), "Top users fetched");

    Ok((StatusCode::OK, Json(users)).into_response())
}

impl IntoResponse for ListTopUsersError {
    fn into_response(self) -> Response {
        match self {
            ListTopUsersError::Database(ref e) => {
                tracing::error!(error = %e, "Failed to fetch top users");
                ErrorResponse::new("Failed to fetch top users")
                    .with_status(StatusCode::INTERNAL_SERVER_ERROR)
            },
        }
    }
}
