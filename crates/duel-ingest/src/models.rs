//! Record shapes on either side of the sanitizer
//!
//! [`UserFile`] is the typed view of a user export that already passed schema
//! validation. [`FlatUserRecord`] is the denormalized row written to the store.

use chrono::{DateTime, Utc};
use serde::de::Unexpected;
use serde::{Deserialize, Deserializer, Serialize};

/// A JSON value declared as "number or string" by the export format
///
/// Numbers carry data; strings in these fields are "no data" markers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

impl From<i64> for NumberOrText {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for NumberOrText {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One user export, after validation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserFile {
    pub user_id: Option<String>,
    pub name: String,
    pub email: String,
    pub instagram_handle: Option<String>,
    pub tiktok_handle: String,
    pub joined_at: String,
    /// The export wraps this in a one-element array.
    #[serde(rename = "advocacy_programs", deserialize_with = "exactly_one")]
    pub advocacy_program: AdvocacyProgram,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdvocacyProgram {
    pub program_id: String,
    pub brand: NumberOrText,
    #[serde(rename = "tasks_completed", deserialize_with = "exactly_one")]
    pub task: CompletedTask,
    pub total_sales_attributed: NumberOrText,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompletedTask {
    pub task_id: Option<String>,
    pub platform: NumberOrText,
    pub post_url: String,
    pub likes: NumberOrText,
    #[serde(deserialize_with = "optional_integer")]
    pub comments: Option<i64>,
    #[serde(deserialize_with = "integer")]
    pub shares: i64,
    #[serde(deserialize_with = "integer")]
    pub reach: i64,
}

impl UserFile {
    /// Decode a value that passed [`crate::schema::UserFileValidator`]
    pub fn from_value(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}

/// Integer value of a JSON number, accepting whole floats such as `5.0`
pub fn whole_number(n: &serde_json::Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let n = serde_json::Number::deserialize(deserializer)?;
    whole_number(&n).ok_or_else(|| {
        serde::de::Error::invalid_value(Unexpected::Other("non-integer number"), &"an integer")
    })
}

fn optional_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Number>::deserialize(deserializer)? {
        Some(n) => whole_number(&n).map(Some).ok_or_else(|| {
            serde::de::Error::invalid_value(Unexpected::Other("non-integer number"), &"an integer")
        }),
        None => Ok(None),
    }
}

fn exactly_one<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items = Vec::<T>::deserialize(deserializer)?;
    let len = items.len();
    match <[T; 1]>::try_from(items) {
        Ok([item]) => Ok(item),
        Err(_) => Err(serde::de::Error::invalid_length(len, &"exactly one element")),
    }
}

/// One persisted row: identity, program and task fields side by side
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatUserRecord {
    pub file_name: String,

    pub user_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub instagram_handle: Option<String>,
    pub tiktok_handle: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,

    pub program_id: Option<String>,
    pub brand: String,
    pub total_sales_attributed: Option<f64>,

    pub task_id: Option<String>,
    pub platform: String,
    pub post_url: Option<String>,
    pub likes: Option<i64>,
    pub comments: Option<i64>,
    pub shares: i64,
    pub reach: Option<i64>,
}
