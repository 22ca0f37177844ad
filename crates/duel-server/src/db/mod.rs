//! Database access for the read API

pub mod user_stats;

pub use user_stats::{PgUserStatsStore, UserStatsStore};
