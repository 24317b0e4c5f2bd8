//! Canonical date handling.
//!
//! Dates cross the crate boundary as strings in one of two formats:
//! `YYYY-MM-DD HH:MM:SS` (the one we emit) and bare `YYYY-MM-DD` (also
//! accepted on input, read as midnight).

use chrono::{NaiveDate, NaiveDateTime};
use crate::Time;

/// Full timestamp format, used for every date the engine produces.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date-only format, accepted on input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const SECONDS_PER_DAY: i64 = 86_400;

/// Errors that can occur while parsing a schedule date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    /// Input was empty
    #[error("empty date")]
    Empty,

    /// Input matched neither canonical format
    #[error("could not parse date: {0}")]
    Unrecognized(String),
}

/// Parse a date in either canonical format.
pub fn parse_date(input: &str) -> Result<Time, DateParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DateParseError::Empty);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(input, DATE_TIME_FORMAT) {
        return Ok(dt);
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| DateParseError::Unrecognized(input.to_string()))
}

/// Parse an optional date field.
///
/// Absent and empty values are `Ok(None)`; only text that is present but
/// malformed is an error.
pub fn parse_optional_date(input: Option<&str>) -> Result<Option<Time>, DateParseError> {
    match input {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_date(s).map(Some),
    }
}

/// Format a timestamp in the canonical `YYYY-MM-DD HH:MM:SS` form.
///
/// Sub-second precision is dropped.
pub fn format_date(time: Time) -> String {
    time.format(DATE_TIME_FORMAT).to_string()
}

/// Whole days from `from` to `to`, rounded toward negative infinity.
///
/// Twelve hours before `from` is day -1, not day 0.
pub fn days_between(from: Time, to: Time) -> i64 {
    (to - from).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Round to `decimals` places, exact ties going to the even digit.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> Time {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_parse_full_timestamp() {
        let parsed = parse_date("2024-03-01 17:30:05").unwrap();
        assert_eq!(parsed, at(2024, 3, 1, 17, 30, 5));
    }

    #[test]
    fn test_parse_bare_date_is_midnight() {
        let parsed = parse_date("2024-03-01").unwrap();
        assert_eq!(parsed, at(2024, 3, 1, 0, 0, 0));
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        assert_eq!(parse_date(""), Err(DateParseError::Empty));
        assert!(matches!(
            parse_date("03/01/2024"),
            Err(DateParseError::Unrecognized(_))
        ));
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("NA").is_err());
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date(None), Ok(None));
        assert_eq!(parse_optional_date(Some("  ")), Ok(None));
        assert_eq!(
            parse_optional_date(Some("2024-01-01")),
            Ok(Some(at(2024, 1, 1, 0, 0, 0)))
        );
        assert!(parse_optional_date(Some("soon")).is_err());
    }

    #[test]
    fn test_format_then_parse_is_identity() {
        let times = [
            at(2024, 1, 1, 0, 0, 0),
            at(2024, 2, 29, 23, 59, 59),
            at(1999, 12, 31, 8, 15, 0),
        ];
        for t in times {
            assert_eq!(parse_date(&format_date(t)).unwrap(), t);
        }

        // Formatting is stable across a parse cycle for emitted strings
        let emitted = "2024-05-17 06:42:11";
        assert_eq!(format_date(parse_date(emitted).unwrap()), emitted);
    }

    #[test]
    fn test_days_between_floors() {
        let start = at(2024, 1, 1, 0, 0, 0);
        assert_eq!(days_between(start, at(2024, 3, 1, 0, 0, 0)), 60);
        assert_eq!(days_between(start, at(2024, 2, 1, 23, 59, 59)), 31);
        assert_eq!(days_between(start, start), 0);
        assert_eq!(days_between(start, at(2023, 12, 31, 12, 0, 0)), -1);
        assert_eq!(days_between(start, at(2023, 12, 30, 0, 0, 0)), -2);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.9677, 2), 0.97);
        assert_eq!(round_to(-1.04, 1), -1.0);
        assert_eq!(round_to(1.25, 1), 1.2);
        assert_eq!(round_to(-1.25, 1), -1.2);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
    }
}
