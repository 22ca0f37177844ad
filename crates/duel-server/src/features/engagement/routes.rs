use crate::api::response::ErrorResponse;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::queries::{GetEngagementError, GetEngagementQuery};
use crate::features::FeatureState;

pub fn engagement_routes() -> Router<FeatureState> {
    Router::new().route("/engagement", get(get_engagement))
}

#[tracing::instrument(skip(state, query), fields(platform = ?query.platform))]
async fn get_engagement(
    State(state): State<FeatureState>,
    Query(query): Query<GetEngagementQuery>,
) -> Result<Response, GetEngagementError> {
    let totals = super::queries::get_engagement::handle(state.store.as_ref(), query).await?;

    tracing::debug!(
        likes = totals.likes,
        comments = totals.comments,
        shares = totals.shares,
        "Engagement totals fetched"
    );

    Ok((StatusCode::OK, Json(totals)).into_response())
}

impl IntoResponse for GetEngagementError {
    fn into_response(self) -> Response {
        match self {
            GetEngagementError::MissingPlatform | GetEngagementError::InvalidPlatform(_) => {
                ErrorResponse::new(self.to_string()).with_status(StatusCode::BAD_REQUEST)
            },
            GetEngagementError::Database(ref e) => {
                tracing::error!(error = %e, "Failed to fetch engagement totals");
                ErrorResponse::new("Failed to fetch engagement totals")
                    .with_status(StatusCode::INTERNAL_SERVER_ERROR)
            },
        }
    }
}
