//! ISO-8601 duration and date decoding.
//!
//! Durations use calendar-approximate multipliers (a year is 365 days, a
//! month is 30 days), which is what players expect from manifest durations.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

const SECONDS_IN_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0;
const SECONDS_IN_MONTH: f64 = 30.0 * 24.0 * 60.0 * 60.0;
const SECONDS_IN_DAY: f64 = 24.0 * 60.0 * 60.0;
const SECONDS_IN_HOUR: f64 = 60.0 * 60.0;
const SECONDS_IN_MIN: f64 = 60.0;

/// Matches `P10Y10M10DT10H10M10.1S` and any subset of its fields.
static DURATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"P(?:(\d*)Y)?(?:(\d*)M)?(?:(\d*)D)?(?:T(?:(\d*)H)?(?:(\d*)M)?(?:([\d.]*)S)?)?")
        .expect("Invalid duration regex")
});

/// Naive date-time layouts accepted when no offset is present.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Decode an ISO-8601 duration string into seconds.
///
/// Missing or empty fields count as zero, so a string with no recognized
/// fields decodes to `0.0`.
///
/// # Examples
///
/// ```
/// use mpdforge_manifest::time::parse_duration;
///
/// assert_eq!(parse_duration("PT1M30S"), 90.0);
/// assert_eq!(parse_duration("P1DT2H"), 93600.0);
/// ```
pub fn parse_duration(value: &str) -> f64 {
    let Some(caps) = DURATION_REGEX.captures(value) else {
        return 0.0;
    };

    let field = |i: usize| caps.get(i).map(|m| leading_float(m.as_str())).unwrap_or(0.0);

    field(1) * SECONDS_IN_YEAR
        + field(2) * SECONDS_IN_MONTH
        + field(3) * SECONDS_IN_DAY
        + field(4) * SECONDS_IN_HOUR
        + field(5) * SECONDS_IN_MIN
        + field(6)
}

/// Decode an ISO-8601 date-time string into milliseconds since the Unix epoch.
///
/// Strings without a UTC designator or offset are read as UTC. A bare date
/// resolves to midnight UTC. Returns `None` when nothing parses.
pub fn parse_date(value: &str) -> Option<f64> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_millis() as f64);
    }

    // Offsets without a colon, e.g. `+0100`.
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.timestamp_millis() as f64);
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc().timestamp_millis() as f64);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis() as f64)
}

/// Read the longest prefix of `s` that forms a decimal number.
///
/// `"10.5.2"` reads as `10.5`; an empty or dot-only string reads as `0`.
fn leading_float(s: &str) -> f64 {
    let mut end = 0;
    let mut seen_dot = false;

    for (i, c) in s.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }

    s[..end].parse().unwrap_or(0.0)
}
