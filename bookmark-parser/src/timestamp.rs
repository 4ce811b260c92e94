//! Timestamp normalization for `ADD_DATE` attributes and CSV date columns

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Values above this are microseconds since the epoch, anything else seconds
pub const MICROSECONDS_THRESHOLD: i64 = 10_000_000_000;

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

const NAIVE_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Infer the epoch unit of a raw integer timestamp and return milliseconds.
pub fn epoch_millis(raw: &str) -> Option<i64> {
    let value: i64 = raw.trim().parse().ok()?;
    if value > MICROSECONDS_THRESHOLD {
        Some(value / 1000)
    } else {
        value.checked_mul(1000)
    }
}

/// Normalize a raw epoch timestamp (seconds or microseconds).
pub fn normalize(raw: &str) -> Option<DateTime<Utc>> {
    epoch_millis(raw).and_then(DateTime::from_timestamp_millis)
}

/// Parse a human-readable date string. Naive values are taken as UTC.
pub fn parse_date_string(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NAIVE_DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(raw, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_seconds_are_scaled_to_millis() {
        assert_eq!(epoch_millis("1700000000"), Some(1_700_000_000_000));
        assert_eq!(epoch_millis("0"), Some(0));
    }

    #[test]
    fn test_microseconds_are_scaled_down() {
        assert_eq!(epoch_millis("1700000000000000"), Some(1_700_000_000_000));
    }

    #[test]
    fn test_threshold_boundary() {
        // exactly at the threshold is still seconds
        assert_eq!(epoch_millis("10000000000"), Some(10_000_000_000_000));
        assert_eq!(epoch_millis("10000000001"), Some(10_000_000));
    }

    #[test]
    fn test_unparseable_is_absent() {
        assert_eq!(epoch_millis(""), None);
        assert_eq!(epoch_millis("yesterday"), None);
        assert_eq!(normalize("12ab"), None);
    }

    #[test]
    fn test_normalize_seconds_and_micros_agree() {
        let expected = Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap();
        assert_eq!(normalize("1700000000"), Some(expected));
        assert_eq!(normalize("1700000000000000"), Some(expected));
    }

    #[test]
    fn test_parse_date_string_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
        assert_eq!(parse_date_string("2024-03-15T10:30:00.000Z"), Some(expected));
        assert_eq!(parse_date_string("2024-03-15T12:30:00+02:00"), Some(expected));
        assert_eq!(parse_date_string("2024-03-15 10:30:00"), Some(expected));
        assert_eq!(parse_date_string("Fri, 15 Mar 2024 10:30:00 +0000"), Some(expected));

        let midnight = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        assert_eq!(parse_date_string("2024-03-15"), Some(midnight));
        assert_eq!(parse_date_string("03/15/2024"), Some(midnight));
    }

    #[test]
    fn test_parse_date_string_rejects_garbage() {
        assert_eq!(parse_date_string(""), None);
        assert_eq!(parse_date_string("not a date"), None);
        assert_eq!(parse_date_string("2024-13-45"), None);
    }
}
