//! Read-side models shared by the store and the HTTP features

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Platforms accepted by the engagement endpoint
///
/// `123` is a platform value that appears in the source data as a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Facebook,
    Instagram,
    TikTok,
    #[serde(rename = "123")]
    Numeric123,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Facebook,
        Platform::Instagram,
        Platform::TikTok,
        Platform::Numeric123,
    ];

    /// Value stored in the `platform` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Facebook => "Facebook",
            Platform::Instagram => "Instagram",
            Platform::TikTok => "TikTok",
            Platform::Numeric123 => "123",
        }
    }

    /// `"Facebook, Instagram, TikTok, 123"`
    pub fn list() -> String {
        Self::ALL
            .iter()
            .map(Platform::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    /// Exact, case-sensitive match
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}

/// Summed engagement for one platform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct EngagementTotals {
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TopUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub instagram_handle: Option<String>,
    pub tiktok_handle: Option<String>,
    pub total_sales_attributed: Option<f64>,
}
