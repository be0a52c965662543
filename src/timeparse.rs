/// Date/time parsing policies shared by the preparation tools.
///
/// Two distinct hour-reduction strategies live here and must stay
/// distinct:
///
/// - **Floor-hour** (`parse_station_key`, `parse_detection_key`): the
///   minute part of an `HHMM` token is simply discarded. This is the
///   policy of the temporal join — both sides of a join must use it.
/// - **Round-to-nearest-hour** (`round_datetime_to_hour`): minutes ≥ 30
///   round up with full day/month/year rollover. Used only when a
///   combined timestamp column is split into a (date, hour) pair.
///
/// Every function returns `Option`: a bad token is a row-level event
/// the caller counts and skips, never a run-aborting fault.

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::model::TimestampKey;

// ---------------------------------------------------------------------------
// Floor-hour policy (join keys)
// ---------------------------------------------------------------------------

/// Parse an INMET observation timestamp: date `YYYY/MM/DD` plus an hour
/// token such as `"0600 UTC"`, `"06:00"` or `"600"`.
pub fn parse_station_key(date: &str, hour: &str) -> Option<TimestampKey> {
    let d = NaiveDate::parse_from_str(date.trim(), "%Y/%m/%d").ok()?;
    key_from_date_and_hour(d, hour)
}

/// Parse a fire-detection timestamp: date `DD/MM/YYYY` plus the same
/// hour token convention as the station side.
pub fn parse_detection_key(date: &str, hour: &str) -> Option<TimestampKey> {
    let d = NaiveDate::parse_from_str(date.trim(), "%d/%m/%Y").ok()?;
    key_from_date_and_hour(d, hour)
}

fn key_from_date_and_hour(d: NaiveDate, hour: &str) -> Option<TimestampKey> {
    use chrono::Datelike;
    let h = parse_hour_component(hour)?;
    Some(TimestampKey {
        year: d.year(),
        month: d.month(),
        day: d.day(),
        hour: h,
    })
}

/// Reduce an `HHMM`-style token to its hour, flooring the minutes away.
///
/// Accepts an optional `UTC` marker and colon separators: `"0600 UTC"`,
/// `"06:00"`, `"600"` and `"0600"` all yield 6. Hours of 24 and above
/// are rejected (a `2400` stamp is a malformed row, not midnight).
pub fn parse_hour_component(s: &str) -> Option<u32> {
    let token: String = s
        .replace("UTC", "")
        .trim()
        .chars()
        .filter(|c| *c != ':')
        .collect();
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let raw: u32 = token.parse().ok()?;
    let hour = raw / 100;
    if hour < 24 { Some(hour) } else { None }
}

// ---------------------------------------------------------------------------
// Round-to-nearest-hour policy (timestamp splitting)
// ---------------------------------------------------------------------------

/// Datetime shapes accepted when splitting a combined timestamp column.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse a combined timestamp and round it to the nearest hour.
///
/// Minutes ≥ 30 round up, carrying into the day/month/year as needed;
/// anything below floors. The result always has zero minutes/seconds.
pub fn round_datetime_to_hour(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    let dt = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())?;
    let floored = dt.with_minute(0)?.with_second(0)?;
    if dt.minute() >= 30 {
        Some(floored + Duration::hours(1))
    } else {
        Some(floored)
    }
}

// ---------------------------------------------------------------------------
// Lenient digit-run extraction (cyclical encoding inputs)
// ---------------------------------------------------------------------------

/// Extract the first three numeric runs of a date string as
/// (day, month, year) regardless of delimiter. Missing runs come back as
/// empty strings; a 2-digit year is expanded into the 2000s.
pub fn split_date_components(s: &str) -> (String, String, String) {
    let runs = digit_runs(s);
    let day = runs.first().map(|r| r.to_string()).unwrap_or_default();
    let month = runs.get(1).map(|r| r.to_string()).unwrap_or_default();
    let mut year = runs.get(2).map(|r| r.to_string()).unwrap_or_default();
    if year.len() == 2 {
        if let Ok(y) = year.parse::<i32>() {
            year = (2000 + y).to_string();
        }
    }
    (day, month, year)
}

/// Convert a time-of-day string to a fraction of the day in [0, 1).
///
/// The first numeric run is the token: with ≥ 3 digits the last two are
/// minutes and the rest hours (`"1700"` → 17:00), otherwise the whole
/// run is an hour (`"4"` → 04:00). Out-of-range values are normalized
/// modulo 24/60 rather than rejected.
pub fn time_fraction(s: &str) -> Option<f64> {
    let runs = digit_runs(s);
    let token = *runs.first()?;
    let (hh, mm) = if token.len() >= 3 {
        let split = token.len() - 2;
        (
            token[..split].parse::<u64>().ok()?,
            token[split..].parse::<u64>().ok()?,
        )
    } else {
        (token.parse::<u64>().ok()?, 0)
    };
    let hh = hh % 24;
    let mm = mm % 60;
    Some((hh as f64 + mm as f64 / 60.0) / 24.0)
}

fn digit_runs(s: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            runs.push(&s[start..i]);
        } else {
            i += 1;
        }
    }
    runs
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
