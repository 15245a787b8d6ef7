//! Permissive ISO-8601 parsing and normalization
//!
//! This module parses dates, times of day and date-times across the
//! accepted textual variants (extended and basic forms, optional
//! fractional seconds, optional zone designators) into normalized chrono
//! values. Malformed input never panics and never errors: the parsers
//! return `None`. Absent input is unrepresentable (`&str`), so the
//! "absent input is a programming error" contract is enforced by the
//! compiler rather than at runtime.
//!
//! Normalization rules:
//! - dates ignore any zone designator,
//! - times of day are represented at the local offset (foreign offsets
//!   are converted),
//! - date-times are represented in UTC (bare date-times are interpreted
//!   as local time first).

use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
    Utc,
};
use lazy_static::lazy_static;
use regex::Regex;

/// Extended date body: `yyyy-MM-dd` with optional sign and 5+ digit years
const EXTENDED_DATE_BODY: &str = r"^(?P<year>[+-]?\d{4,})-(?P<month>\d{2})-(?P<day>\d{2})";

/// Basic date body: `yyyyMMdd`, month and day always the last four digits
const BASIC_DATE_BODY: &str = r"^(?P<year>[+-]?\d{4,})(?P<month>\d{2})(?P<day>\d{2})";

/// Extended time body: `HH:mm:ss` with optional fraction of 1-9 digits
const EXTENDED_TIME_BODY: &str =
    r"^(?P<hour>\d{2}):(?P<minute>\d{2}):(?P<second>\d{2})(?:\.(?P<frac>\d{1,9}))?";

/// Basic time body: `HHmmss` with optional fraction of 1-9 digits
const BASIC_TIME_BODY: &str =
    r"^(?P<hour>\d{2})(?P<minute>\d{2})(?P<second>\d{2})(?:\.(?P<frac>\d{1,9}))?";

/// Zone designator suffix: `Z`, `±HH`, `±HHmm`, `±HH:mm` or `±HH:mm:ss`
const ZONE_SUFFIX: &str = r"(?P<zone>Z|[+-]\d{2}(?::?\d{2})?(?::\d{2})?)?$";

lazy_static! {
    static ref EXTENDED_DATE: Regex =
        Regex::new(&format!("{}{}", EXTENDED_DATE_BODY, ZONE_SUFFIX)).unwrap();
    static ref BASIC_DATE: Regex =
        Regex::new(&format!("{}{}", BASIC_DATE_BODY, ZONE_SUFFIX)).unwrap();
    static ref EXTENDED_DATE_FIELDS: Regex =
        Regex::new(&format!("{}$", EXTENDED_DATE_BODY)).unwrap();
    static ref BASIC_DATE_FIELDS: Regex = Regex::new(&format!("{}$", BASIC_DATE_BODY)).unwrap();
    static ref EXTENDED_TIME: Regex =
        Regex::new(&format!("{}{}", EXTENDED_TIME_BODY, ZONE_SUFFIX)).unwrap();
    static ref BASIC_TIME: Regex =
        Regex::new(&format!("{}{}", BASIC_TIME_BODY, ZONE_SUFFIX)).unwrap();
}

/// Zone designator of a parsed time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    /// No designator present
    Missing,
    /// Literal `Z`
    Utc,
    /// Numeric offset in seconds east of UTC
    Offset(i32),
}

/// Decomposed time-of-day fields before normalization
#[derive(Debug, Clone, Copy)]
struct TimeParts {
    hour: u32,
    minute: u32,
    second: u32,
    nanos: u32,
    frac_digits: usize,
    zone: Zone,
}

impl TimeParts {
    fn seconds_of_day(&self) -> u32 {
        self.hour * 3600 + self.minute * 60 + self.second
    }

    fn offset_secs(&self) -> Option<i32> {
        match self.zone {
            Zone::Missing => None,
            Zone::Utc => Some(0),
            Zone::Offset(secs) => Some(secs),
        }
    }
}

/// The local system offset, fixed at the moment of the call
fn local_offset() -> FixedOffset {
    Local::now().offset().fix()
}

/// Parse a zone designator into seconds east of UTC
fn parse_offset_secs(zone: &str) -> Option<i32> {
    if zone == "Z" {
        return Some(0);
    }
    let sign: i32 = match zone.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let digits = zone[1..].replace(':', "");
    let hour: i32 = digits.get(0..2)?.parse().ok()?;
    let minute: i32 = digits.get(2..4).map_or(Some(0), |m| m.parse().ok())?;
    let second: i32 = digits.get(4..6).map_or(Some(0), |s| s.parse().ok())?;
    if hour > 23 || minute > 59 || second > 59 {
        return None;
    }
    Some(sign * (hour * 3600 + minute * 60 + second))
}

/// Number of days in a month, leap years included
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

/// Build a date from raw fields, clamping an impossible day-of-month to
/// the last valid day of that month instead of rejecting or rolling over
fn date_from_fields(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day.min(days_in_month(year, month)))
}

fn captured_date(caps: &regex::Captures<'_>) -> Option<NaiveDate> {
    let year: i32 = caps["year"].parse().ok()?;
    let month: u32 = caps["month"].parse().ok()?;
    let day: u32 = caps["day"].parse().ok()?;
    date_from_fields(year, month, day)
}

fn parse_time_parts(text: &str) -> Option<TimeParts> {
    let caps = EXTENDED_TIME
        .captures(text)
        .or_else(|| BASIC_TIME.captures(text))?;
    let hour: u32 = caps["hour"].parse().ok()?;
    let minute: u32 = caps["minute"].parse().ok()?;
    let second: u32 = caps["second"].parse().ok()?;
    if hour > 23 || minute > 59 || second > 59 {
        return None;
    }
    let (nanos, frac_digits) = match caps.name("frac") {
        Some(frac) => {
            let digits = frac.as_str();
            let mut padded = digits.to_string();
            while padded.len() < 9 {
                padded.push('0');
            }
            (padded.parse().ok()?, digits.len())
        }
        None => (0, 0),
    };
    let zone = match caps.name("zone") {
        None => Zone::Missing,
        Some(z) if z.as_str() == "Z" => Zone::Utc,
        Some(z) => Zone::Offset(parse_offset_secs(z.as_str())?),
    };
    Some(TimeParts {
        hour,
        minute,
        second,
        nanos,
        frac_digits,
        zone,
    })
}

/// Parse an ISO-8601 date.
///
/// Accepts the extended (`1999-08-07`) and basic (`19990807`) forms, an
/// optional trailing zone designator (validated, then ignored for the
/// date value), explicit signs and years of five or more digits. Month
/// and day are strict two-digit fields.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let caps = EXTENDED_DATE
        .captures(text)
        .or_else(|| BASIC_DATE.captures(text))?;
    if let Some(zone) = caps.name("zone") {
        parse_offset_secs(zone.as_str())?;
    }
    captured_date(&caps)
}

/// Parse an ISO-8601 time of day, normalized to the local offset.
///
/// Accepts `HH:mm:ss` and `HHmmss`, an optional fraction of 1-9 digits
/// and an optional zone designator. A bare time is taken to already be
/// at the local offset; a foreign offset is converted to local wall
/// clock time, wrapping across midnight where needed.
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let parts = parse_time_parts(text.trim())?;
    let local = local_offset().local_minus_utc();
    let offset = parts.offset_secs().unwrap_or(local);
    let shifted = (i64::from(parts.seconds_of_day()) + i64::from(local - offset))
        .rem_euclid(86_400) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(shifted, parts.nanos)
}

/// Parse an ISO-8601 date-time, normalized to UTC.
///
/// Accepts the cross product of the date and time forms joined by `T`.
/// A bare date-time is interpreted as local time and converted to UTC;
/// an offset-bearing one is converted directly. Seconds are mandatory.
/// Fractions longer than four digits are only accepted when the
/// date-time is bare or `Z`-suffixed. An impossible day-of-month is
/// clamped like in [`parse_date`].
pub fn parse_date_time(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    let (date_part, time_part) = text.split_once('T')?;
    if time_part.contains('T') {
        return None;
    }
    let dcaps = EXTENDED_DATE_FIELDS
        .captures(date_part)
        .or_else(|| BASIC_DATE_FIELDS.captures(date_part))?;
    let date = captured_date(&dcaps)?;
    let parts = parse_time_parts(time_part)?;
    if parts.frac_digits > 4 && matches!(parts.zone, Zone::Offset(_)) {
        return None;
    }
    let time = NaiveTime::from_hms_nano_opt(parts.hour, parts.minute, parts.second, parts.nanos)?;
    let naive = NaiveDateTime::new(date, time);
    match parts.zone {
        Zone::Utc => Some(Utc.from_utc_datetime(&naive)),
        Zone::Offset(secs) => {
            let offset = FixedOffset::east_opt(secs)?;
            offset
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
        }
        Zone::Missing => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}
