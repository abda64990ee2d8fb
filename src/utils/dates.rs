use std::borrow::Cow;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::AbsenceError;

/// `YYYY-MM-DD` at the start of a label.
static ISO_DATE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("ISO date prefix pattern is valid"));

/// Offset-less forms accepted after RFC 3339 fails. Read as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Largest year that still renders as four digits.
const MAX_YEAR: i32 = 9999;

/// Parse an API timestamp into a UTC instant.
///
/// Accepts RFC 3339 (`2026-01-28T13:12:13.562Z`, `+01:00` offsets), date-times
/// without an offset (`2021-10-19T06:48:24.8627`, `2026-02-08 10:30:00`) and
/// bare dates (`2026-02-08`). The date/time separator may be `T`, `t` or a space.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, AbsenceError> {
    let value = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    let value = upper_separator(value);
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&value, fmt) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AbsenceError::invalid(format!("'{raw}' is not a valid date")))
}

fn upper_separator(value: &str) -> Cow<'_, str> {
    match value.as_bytes().get(10) {
        Some(b't') => Cow::Owned(format!("{}T{}", &value[..10], &value[11..])),
        _ => Cow::Borrowed(value),
    }
}

/// Render an instant the way the API does: `YYYY-MM-DDTHH:mm:ss.sssZ`.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Re-render any accepted timestamp in the canonical UTC millisecond form.
pub fn normalize_timestamp(raw: &str) -> Result<String, AbsenceError> {
    parse_timestamp(raw).map(|dt| format_timestamp(&dt))
}

/// Add `days` calendar days to `start_date`.
///
/// The time of day is kept; month, year and leap-day roll-over follow the
/// calendar. The result is always UTC with millisecond precision.
pub fn compute_end_date(start_date: &str, days: i64) -> Result<String, AbsenceError> {
    if days < 0 {
        return Err(AbsenceError::invalid(format!(
            "days must be non-negative, got {days}"
        )));
    }

    let start = parse_timestamp(start_date)?;
    let end = start
        .checked_add_days(Days::new(days as u64))
        .ok_or_else(|| {
            AbsenceError::invalid(format!("{start_date} + {days} days is out of range"))
        })?;

    if end.year() > MAX_YEAR {
        return Err(AbsenceError::invalid(format!(
            "{start_date} + {days} days is past year {MAX_YEAR}"
        )));
    }

    Ok(format_timestamp(&end))
}

/// Show ISO dates as `DD/MM/YYYY`, pass every other label through untouched.
///
/// A label starting with `YYYY-MM-DD` is formatted when the whole label is a
/// date or a timestamp. Anything else with a date prefix comes back unchanged
/// and is logged so bad upstream data does not go unnoticed.
pub fn format_label_if_iso_date(label: &str) -> String {
    if !ISO_DATE_PREFIX.is_match(label) {
        return label.to_string();
    }

    // the prefix is ten ASCII bytes
    let date = NaiveDate::parse_from_str(&label[..10], "%Y-%m-%d").ok();
    let rest = label[10..].trim();

    match date {
        Some(d) if rest.is_empty() || parse_timestamp(label).is_ok() => {
            d.format("%d/%m/%Y").to_string()
        }
        _ => {
            log::warn!("label '{}' looks like an ISO date but does not parse", label);
            label.to_string()
        }
    }
}
