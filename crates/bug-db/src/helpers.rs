//! Row-to-entity parsing helpers.
//!
//! Timestamps are written with [`format_timestamp`] (fixed microsecond
//! precision, `Z` suffix) so that `ORDER BY created_at` sorts
//! chronologically. Reading also accepts `SQLite`'s `datetime('now')` format.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use crate::error::DatabaseError;

/// Current time truncated to the precision that is stored.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Render a timestamp in the stored text form.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Convert optional text into a bind parameter (`NULL` for `None`).
#[must_use]
pub fn opt_text_value(value: Option<&str>) -> libsql::Value {
    value.map_or(libsql::Value::Null, Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bug_core::enums::BugStatus;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn timestamps_are_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2026, 2, 8, 12, 0, 0).unwrap();
        assert_eq!(format_timestamp(&whole), "2026-02-08T12:00:00.000000Z");
        assert_eq!(parse_datetime(&format_timestamp(&whole)).unwrap(), whole);
    }

    #[test]
    fn parses_sqlite_default_format() {
        let parsed = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 2, 9, 14, 30, 0).unwrap());
    }

    #[test]
    fn rejects_garbage_datetime() {
        assert!(matches!(
            parse_datetime("yesterday"),
            Err(DatabaseError::Query(_))
        ));
    }

    #[test]
    fn now_round_trips_through_storage_form() {
        let ts = now();
        assert_eq!(parse_datetime(&format_timestamp(&ts)).unwrap(), ts);
    }

    #[test]
    fn parses_kebab_case_status() {
        let status: BugStatus = parse_enum("in-progress").unwrap();
        assert_eq!(status, BugStatus::InProgress);
        assert!(parse_enum::<BugStatus>("closed").is_err());
    }
}
