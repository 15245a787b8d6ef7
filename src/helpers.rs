//! Scalar value helper functions
//!
//! Parse and format pairs for the string-encoded logical values carried
//! by nodes. Parsing is non-fatal (`Option`); the wire encodings are
//! fixed: booleans `"true"`/`"false"`, integers base-10, reals with at
//! least one fractional digit, dates `yyyy-MM-dd`, times
//! `HH:mm:ss[.fff]` with an offset marker, timestamps
//! `yyyy-MM-ddTHH:mm:ss[.fff]Z`.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, Offset, Timelike, Utc};
use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    /// Boolean text value mapping
    pub static ref BOOLEAN_MAP: HashMap<&'static str, bool> = {
        let mut m = HashMap::new();
        m.insert("false", false);
        m.insert("0", false);
        m.insert("true", true);
        m.insert("1", true);
        m
    };
}

/// Parse a boolean text value
pub fn parse_boolean(value: &str) -> Option<bool> {
    BOOLEAN_MAP.get(value.trim()).copied()
}

/// Format a boolean as its canonical text value
pub fn format_boolean(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Parse an integer text value
pub fn parse_integer(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Format an integer as base-10 text
pub fn format_integer(value: i64) -> String {
    value.to_string()
}

/// Parse a real text value
pub fn parse_real(value: &str) -> Option<f64> {
    let parsed = value.trim().parse::<f64>().ok()?;
    if parsed.is_finite() {
        Some(parsed)
    } else {
        None
    }
}

/// Format a real with at least one fractional digit.
///
/// Trailing zeros beyond the first fractional digit are dropped, so the
/// encoding is stable under re-parsing: `2.0`, `2.201`, `0.0`.
pub fn format_real(value: f64) -> String {
    let mut text = format!("{:.9}", value);
    while text.ends_with('0') && !text.ends_with(".0") {
        text.pop();
    }
    // the wire form has no negative zero
    if text == "-0.0" {
        return "0.0".to_string();
    }
    text
}

/// The local system offset at the moment of the call
pub fn local_offset() -> FixedOffset {
    Local::now().offset().fix()
}

/// The offset marker appended to time encodings: `Z` at UTC, `±HH:MM`
/// elsewhere
pub fn offset_marker(offset: FixedOffset) -> String {
    let secs = offset.local_minus_utc();
    if secs == 0 {
        return "Z".to_string();
    }
    let sign = if secs < 0 { '-' } else { '+' };
    let secs = secs.abs();
    format!("{}{:02}:{:02}", sign, secs / 3600, (secs % 3600) / 60)
}

/// Format a date as `yyyy-MM-dd`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn fraction_suffix(nanos: u32) -> String {
    if nanos == 0 {
        String::new()
    } else {
        format!(".{:03}", nanos / 1_000_000)
    }
}

/// Format a local time of day as `HH:mm:ss[.fff]` plus the given offset
/// marker
pub fn format_time(time: NaiveTime, offset: FixedOffset) -> String {
    format!(
        "{}{}{}",
        time.format("%H:%M:%S"),
        fraction_suffix(time.nanosecond()),
        offset_marker(offset)
    )
}

/// Format an instant as `yyyy-MM-ddTHH:mm:ss[.fff]Z`
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    format!(
        "{}{}Z",
        instant.format("%Y-%m-%dT%H:%M:%S"),
        fraction_suffix(instant.nanosecond())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_boolean_round_trip() {
        assert_eq!(parse_boolean("true"), Some(true));
        assert_eq!(parse_boolean("1"), Some(true));
        assert_eq!(parse_boolean("false"), Some(false));
        assert_eq!(parse_boolean("0"), Some(false));
        assert_eq!(parse_boolean("yes"), None);
        assert_eq!(format_boolean(true), "true");
        assert_eq!(format_boolean(false), "false");
    }

    #[test]
    fn test_integer_parsing() {
        assert_eq!(parse_integer("42"), Some(42));
        assert_eq!(parse_integer(" -7 "), Some(-7));
        assert_eq!(parse_integer("4.2"), None);
        assert_eq!(parse_integer("abc"), None);
    }

    #[test]
    fn test_real_formatting() {
        assert_eq!(format_real(0.0), "0.0");
        assert_eq!(format_real(2.0), "2.0");
        assert_eq!(format_real(2.201), "2.201");
        assert_eq!(format_real(-1.5), "-1.5");
        assert_eq!(format_real(-0.0), "0.0");
        assert_eq!(format_real(-1e-10), "0.0");
        // stepping noise is absorbed by the fixed-precision render
        assert_eq!(format_real(2.2 + 0.1), "2.3");
    }

    #[test]
    fn test_real_parsing() {
        assert_eq!(parse_real("2.5"), Some(2.5));
        assert_eq!(parse_real("3"), Some(3.0));
        assert_eq!(parse_real("abc"), None);
        assert_eq!(parse_real("inf"), None);
    }

    #[test]
    fn test_date_formatting() {
        let date = NaiveDate::from_ymd_opt(1999, 8, 7).unwrap();
        assert_eq!(format_date(date), "1999-08-07");
    }

    #[test]
    fn test_offset_marker() {
        assert_eq!(offset_marker(FixedOffset::east_opt(0).unwrap()), "Z");
        assert_eq!(
            offset_marker(FixedOffset::east_opt(2 * 3600).unwrap()),
            "+02:00"
        );
        assert_eq!(
            offset_marker(FixedOffset::west_opt(5 * 3600 + 30 * 60).unwrap()),
            "-05:30"
        );
    }

    #[test]
    fn test_time_formatting() {
        let time = NaiveTime::from_hms_opt(10, 20, 30).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(format_time(time, utc), "10:20:30Z");

        let time = NaiveTime::from_hms_nano_opt(10, 20, 30, 500_000_000).unwrap();
        assert_eq!(format_time(time, utc), "10:20:30.500Z");
    }

    #[test]
    fn test_timestamp_formatting() {
        let instant = Utc.with_ymd_and_hms(2020, 1, 2, 10, 20, 30).unwrap();
        assert_eq!(format_timestamp(instant), "2020-01-02T10:20:30Z");
    }
}
