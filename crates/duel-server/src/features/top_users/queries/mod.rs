pub mod list_top_users;

pub use list_top_users::{ListTopUsersError, TOP_USERS_LIMIT};
