//! Stored value parsing utilities
//!
//! Timestamps written by older clients come in several shapes: full RFC3339,
//! RFC3339 without an offset, or a bare `YYYY-MM-DD` from a date picker.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rusqlite::Error as SqlError;

/// Parse a stored timestamp, accepting date-only values as midnight UTC
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Ok(naive.and_utc());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("Invalid timestamp '{}'", s))
}

/// Extension trait for converting rusqlite Results to Option
pub trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, SqlError>;
}

impl<T> OptionalExt<T> for Result<T, SqlError> {
    fn optional(self) -> Result<Option<T>, SqlError> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(SqlError::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_timestamp("2025-01-10T08:15:00.123Z").unwrap();
        assert_eq!(dt.timestamp_millis(), 1736496900123);
    }

    #[test]
    fn test_parse_offset_normalized_to_utc() {
        let dt = parse_timestamp("2025-01-10T01:00:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 1, 9, 23, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_timestamp("2025-01-20").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 1, 20, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_datetime_local_input() {
        let dt = parse_timestamp("2025-01-20T14:30").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 1, 20, 14, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("next tuesday").is_err());
    }
}
