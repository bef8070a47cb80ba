//! Instant parsing for raw wire dates.
//!
//! # Responsibility
//! - Turn the data layer's ISO strings into UTC instants at use time.
//!
//! # Invariants
//! - Parsing never panics; failures surface as `MalformedDate` so callers can
//!   skip one record for one metric.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raw date string that matches none of the accepted layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedDate(pub String);

impl Display for MalformedDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed date `{}`", self.0)
    }
}

impl Error for MalformedDate {}

/// Parses a raw instant.
///
/// Accepted layouts:
/// - RFC 3339 (`2024-03-01T09:30:00Z`, `2024-03-01T09:30:00.000+02:00`)
/// - naive date-time (`2024-03-01T09:30:00`, optional fraction), read as UTC
/// - plain date (`2024-03-01`), midnight UTC
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, MalformedDate> {
    let value = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, layout) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(MalformedDate(raw.to_string()))
}

/// Parses an optional raw instant, treating blank strings as absent.
pub fn parse_optional(raw: Option<&str>) -> Option<Result<DateTime<Utc>, MalformedDate>> {
    raw.filter(|value| !value.trim().is_empty())
        .map(parse_instant)
}

/// Renders a raw instant as `YYYY-MM-DD`, or `None` when absent or malformed.
pub fn calendar_date(raw: Option<&str>) -> Option<String> {
    match parse_optional(raw)? {
        Ok(instant) => Some(instant.date_naive().format("%Y-%m-%d").to_string()),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{calendar_date, parse_instant, parse_optional};
    use chrono::{TimeZone, Utc};

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_instant("2024-03-01T23:30:00-02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 2, 1, 30, 0).unwrap());
    }

    #[test]
    fn parses_naive_and_plain_dates_as_utc() {
        assert_eq!(
            parse_instant("2024-03-01T08:00:00.123").unwrap().date_naive(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap().date_naive()
        );
        assert_eq!(
            parse_instant("2024-03-01").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn rejects_garbage_and_skips_blank() {
        assert!(parse_instant("next tuesday").is_err());
        assert!(parse_optional(Some("   ")).is_none());
        assert_eq!(calendar_date(Some("not a date")), None);
        assert_eq!(
            calendar_date(Some("2024-12-31T10:00:00Z")).as_deref(),
            Some("2024-12-31")
        );
    }
}
