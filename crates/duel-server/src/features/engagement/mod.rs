//! `GET /engagement`: summed likes, comments and shares for one platform

pub mod queries;
pub mod routes;

pub use queries::{GetEngagementError, GetEngagementQuery};
pub use routes::engagement_routes;
