pub mod get_engagement;

pub use get_engagement::{GetEngagementError, GetEngagementQuery};
