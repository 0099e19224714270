//! Date/time slot extraction.
//!
//! Recognizes relative words (today/tomorrow/day after tomorrow), weekday
//! names, `dd/mm[/yyyy]` dates and `HH:MM` times, and combines the date and
//! time parts it finds. All resolution is relative to an injected `now`.

use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use regex::Regex;
use serde_json::{Map, Value};

use crate::params::string_field;

/// Synonym fields providers use for the date-time.
const DATETIME_FIELDS: &[&str] = &["datetime", "date_time", "when", "due", "due_date", "date", "time"];

/// Time-of-day used when a date arrives without a time.
const DEFAULT_HOUR: u32 = 9;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{2,4}))?\b").expect("date regex is valid")
});

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([01]?\d|2[0-3]):([0-5]\d)\b").expect("time regex is valid")
});

const WEEKDAYS: &[(&str, Weekday)] = &[
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

/// Resolve the date-time slot from the parameter bag or the free text.
///
/// Structured candidates are parsed with the same grammar as free text, so
/// a provider value of `"tomorrow 10:00"` works as well as `"12/06 10:00"`.
pub fn extract_datetime(
    params: &Map<String, Value>,
    text: &str,
    now: NaiveDateTime,
) -> Option<NaiveDateTime> {
    if let Some(candidate) = string_field(params, DATETIME_FIELDS) {
        if let Some(resolved) = from_text(&candidate, now) {
            return Some(resolved);
        }
    }

    from_text(text, now)
}

/// Parse a date and/or time out of free text, relative to `now`.
pub fn from_text(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let lowered = text.to_lowercase();
    let today = now.date();

    let time = find_time(&lowered);
    let (date, from_weekday) = find_date(&lowered, today);

    match (date, time) {
        (Some(date), Some(time)) => {
            let mut resolved = date.and_time(time);
            // A named weekday means the next future occurrence.
            if from_weekday && resolved <= now {
                resolved += Duration::days(7);
            }
            Some(resolved)
        }
        (Some(date), None) => {
            let mut resolved = date.and_time(NaiveTime::from_hms_opt(DEFAULT_HOUR, 0, 0)?);
            if from_weekday && resolved <= now {
                resolved += Duration::days(7);
            }
            Some(resolved)
        }
        (None, Some(time)) => Some(today.and_time(time)),
        (None, None) => None,
    }
}

/// Find an explicit `HH:MM` time.
fn find_time(lowered: &str) -> Option<NaiveTime> {
    let caps = TIME_RE.captures(lowered)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Find a date. The second value is true when the date came from a weekday
/// name, which changes how past results roll forward.
fn find_date(lowered: &str, today: NaiveDate) -> (Option<NaiveDate>, bool) {
    // Relative words; the longer phrase must win over its "tomorrow" suffix.
    if lowered.contains("day after tomorrow") {
        return (Some(today + Duration::days(2)), false);
    }
    if lowered.contains("tomorrow") {
        return (Some(today + Duration::days(1)), false);
    }
    if lowered.contains("today") || lowered.contains("tonight") {
        return (Some(today), false);
    }

    for (name, weekday) in WEEKDAYS {
        if lowered.contains(name) {
            let ahead =
                (weekday.num_days_from_monday() + 7 - today.weekday().num_days_from_monday()) % 7;
            return (Some(today + Duration::days(ahead as i64)), true);
        }
    }

    if let Some(caps) = DATE_RE.captures(lowered) {
        if let Some(date) = resolve_numeric_date(&caps, today) {
            return (Some(date), false);
        }
    }

    (None, false)
}

/// Resolve a `dd/mm[/yyyy]` capture. Two-digit years land in the current
/// century; a missing year means this year, rolled forward one year when the
/// date has already passed.
fn resolve_numeric_date(caps: &regex::Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;

    match caps.get(3) {
        Some(year) => {
            let raw: i32 = year.as_str().parse().ok()?;
            let year = if year.as_str().len() == 2 { 2000 + raw } else { raw };
            NaiveDate::from_ymd_opt(year, month, day)
        }
        None => {
            let this_year = NaiveDate::from_ymd_opt(today.year(), month, day)?;
            if this_year < today {
                NaiveDate::from_ymd_opt(today.year() + 1, month, day)
            } else {
                Some(this_year)
            }
        }
    }
}
