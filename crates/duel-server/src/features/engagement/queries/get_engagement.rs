use serde::{Deserialize, Serialize};

use crate::db::UserStatsStore;
use crate::models::{EngagementTotals, Platform};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetEngagementQuery {
    pub platform: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetEngagementError {
    #[error("Missing platform query parameter")]
    MissingPlatform,
    #[error("Platform must be one of {}", Platform::list())]
    InvalidPlatform(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl GetEngagementQuery {
    /// An empty value counts as missing
    pub fn validate(&self) -> Result<Platform, GetEngagementError> {
        let raw = self
            .platform
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or(GetEngagementError::MissingPlatform)?;

        raw.parse()
            .map_err(|_| GetEngagementError::InvalidPlatform(raw.to_string()))
    }
}

#[tracing::instrument(skip(store))]
pub async fn handle(
    store: &dyn UserStatsStore,
    query: GetEngagementQuery,
) -> Result<EngagementTotals, GetEngagementError> {
    let platform = query.validate()?;
    let totals = store.engagement_totals(platform).await?;
    Ok(totals)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn query(platform: Option<&str>) -> GetEngagementQuery {
        GetEngagementQuery {
            platform: platform.map(str::to_string),
        }
    }

    #[test]
    fn test_validate_accepts_every_platform() {
        for platform in Platform::ALL {
            assert!(matches!(query(Some(platform.as_str())).validate(), Ok(p) if p == platform));
        }
    }

    #[test]
    fn test_validate_missing() {
        assert!(matches!(
            query(None).validate(),
            Err(GetEngagementError::MissingPlatform)
        ));
        assert!(matches!(
            query(Some("")).validate(),
            Err(GetEngagementError::MissingPlatform)
        ));
    }

    #[test]
    fn test_validate_unknown_platform() {
        let err = query(Some("MySpace")).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Platform must be one of Facebook, Instagram, TikTok, 123"
        );
    }
}
