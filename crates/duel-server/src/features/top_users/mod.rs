//! `GET /top-users`: the ten users with the highest attributed sales

pub mod queries;
pub mod routes;

pub use queries::{ListTopUsersError, TOP_USERS_LIMIT};
pub use routes::top_users_routes;
