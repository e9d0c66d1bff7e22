//! 记录时间戳解析/格式化工具
//!
//! The zone API reports `created_on`/`modified_on` as RFC 3339 strings with a
//! `Z` suffix and up to microsecond precision. Values without a zone marker
//! are read as UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Formats accepted for timestamps that lack an offset.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a wire timestamp into a UTC instant.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Formats a UTC instant the way the zone API does.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn parses_zulu_with_micros() {
        let dt = parse_timestamp("2024-03-01T12:30:45.123456Z");
        assert!(dt.is_some(), "failed to parse");
        let Some(dt) = dt else {
            return;
        };
        assert_eq!(dt.nanosecond(), 123_456_000);
        assert_eq!(
            dt.with_nanosecond(0),
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).single()
        );
    }

    #[test]
    fn parses_offset_into_utc() {
        let dt = parse_timestamp("2024-03-01T14:30:45+02:00");
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).single());
    }

    #[test]
    fn parses_missing_zone_marker_as_utc() {
        let dt = parse_timestamp("2024-03-01T12:30:45");
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).single());
        let spaced = parse_timestamp("2024-03-01 12:30:45.5");
        assert!(spaced.is_some());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-13-01T00:00:00Z").is_none());
    }

    #[test]
    fn format_round_trips() {
        let text = "2024-03-01T12:30:45.123456Z";
        let dt = parse_timestamp(text);
        assert!(dt.is_some());
        let Some(dt) = dt else {
            return;
        };
        assert_eq!(format_timestamp(&dt), text);
        assert_eq!(parse_timestamp(&format_timestamp(&dt)), Some(dt));
    }
}
