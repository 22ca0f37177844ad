//! Sentinel scrubbing and flattening
//!
//! The exports mark missing data with literal placeholder values. [`sanitize`] maps a
//! validated [`UserFile`] onto a [`FlatUserRecord`], turning every placeholder into
//! `None`. Everything here is pure.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::{whole_number, FlatUserRecord, NumberOrText, UserFile};

/// Placeholder values that mean "no data", one per affected field
pub mod sentinels {
    pub const NAME: &str = "???";
    pub const EMAIL: &str = "invalid-email";
    pub const TIKTOK_HANDLE: &str = "#error_handle";
    pub const PROGRAM_ID: &str = "";
    pub const POST_URL: &str = "broken_link";
    pub const REACH: i64 = -1000;
}

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y%m%dT%H%M%S%#z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y%m%dT%H%M%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

/// `None` when `value` equals `sentinel`
pub fn replace_with_null<T, S>(value: T, sentinel: &S) -> Option<T>
where
    T: PartialEq<S>,
    S: ?Sized,
{
    if value == *sentinel {
        None
    } else {
        Some(value)
    }
}

/// Numeric payload of a number-or-string field; strings are never parsed
pub fn number_or_null(value: &NumberOrText) -> Option<f64> {
    match value {
        NumberOrText::Number(n) => n.as_f64(),
        NumberOrText::Text(_) => None,
    }
}

/// Integer payload of a number-or-string field; strings are never parsed
pub fn integer_or_null(value: &NumberOrText) -> Option<i64> {
    match value {
        NumberOrText::Number(n) => whole_number(n),
        NumberOrText::Text(_) => None,
    }
}

/// Canonical string form: strings pass through, numbers are printed
pub fn to_text(value: NumberOrText) -> String {
    match value {
        NumberOrText::Number(n) => n.to_string(),
        NumberOrText::Text(s) => s,
    }
}

/// Parse an ISO-8601 date or date-time
///
/// Values without an offset are read as UTC; a bare date is midnight UTC.
pub fn parse_date_or_null(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    // `%#z` takes `+02`, `+0200` and `+02:00` but not `Z`.
    let zulu = raw.strip_suffix(['Z', 'z']).map(|rest| format!("{rest}+00:00"));
    let with_offset = zulu.as_deref().unwrap_or(raw);
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(with_offset, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Flatten one validated export into its persisted row
pub fn sanitize(file_name: impl Into<String>, user: UserFile) -> FlatUserRecord {
    let program = user.advocacy_program;
    let task = program.task;

    FlatUserRecord {
        file_name: file_name.into(),

        user_id: user.user_id,
        name: replace_with_null(user.name, sentinels::NAME),
        email: replace_with_null(user.email, sentinels::EMAIL),
        instagram_handle: user.instagram_handle,
        tiktok_handle: replace_with_null(user.tiktok_handle, sentinels::TIKTOK_HANDLE),
        joined_at: parse_date_or_null(&user.joined_at),

        program_id: replace_with_null(program.program_id, sentinels::PROGRAM_ID),
        total_sales_attributed: number_or_null(&program.total_sales_attributed),
        brand: to_text(program.brand),

        task_id: task.task_id,
        likes: integer_or_null(&task.likes),
        platform: to_text(task.platform),
        post_url: replace_with_null(task.post_url, sentinels::POST_URL),
        comments: task.comments,
        shares: task.shares,
        reach: replace_with_null(task.reach, &sentinels::REACH),
    }
}
