//! Reservation-window extraction.

use std::sync::LazyLock;

use assistant_core::ReservationRequest;
use chrono::{Duration, NaiveDateTime};
use regex::Regex;
use serde_json::{Map, Value};

use crate::datetime::extract_datetime;
use crate::params::{number_field, string_field};
use crate::recipients::parse_recipients;

/// Window length used when the user names none.
const DEFAULT_DURATION_MIN: i64 = 60;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,3})[\s-]*(minutes?|mins?|min\b|hours?|hrs?|hr\b)")
        .expect("duration regex is valid")
});

static ROOM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bin\s+(?:the\s+)?((?:meeting|conference)\s+room\s+[\w-]+|room\s+[\w-]+|[\w-]+\s+room)\b")
        .expect("room regex is valid")
});

static CAPACITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,3})\s*(people|persons|attendees|participants|guests|seats)\b")
        .expect("capacity regex is valid")
});

static LEADING_BOOKING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(please\s+)?(book|reserve|schedule|arrange|set up)\s+(a\s+|an\s+|the\s+)?")
        .expect("leading booking regex is valid")
});

static SCHEDULE_NOISE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(today|tonight|tomorrow|day after tomorrow)\b",
        r"(?i)\b(on\s+)?(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
        r"(?i)\bat\s+\d{1,2}:\d{2}\b",
        r"(?i)\b\d{1,2}:\d{2}\b",
        r"(?i)\b(on\s+)?\d{1,2}/\d{1,2}(/\d{2,4})?\b",
        r"(?i)\bfor\s+\d{1,3}\s*(people|persons|attendees|participants|guests|seats)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("schedule noise regex is valid"))
    .collect()
});

/// Build a [`ReservationRequest`] from the parameter bag and the free text.
///
/// When no start can be extracted the window opens at `now` and the
/// resolver's normalization shifts it forward; when no duration is named
/// the 60-minute default applies.
pub fn reservation_request(
    params: &Map<String, Value>,
    text: &str,
    now: NaiveDateTime,
) -> ReservationRequest {
    let start = extract_datetime(params, text, now).unwrap_or(now);
    let minutes = duration_minutes(params, text).unwrap_or(DEFAULT_DURATION_MIN);
    let end = start + Duration::minutes(minutes);

    let mut request = ReservationRequest::new(start, end, title(params, text));
    request.description = string_field(params, &["description"]);
    request.preferred_room = preferred_room(params, text);
    request.attendees = attendees(params);
    request.capacity = capacity(params, text);
    request.notes = string_field(params, &["notes"]);
    request
}

fn duration_minutes(params: &Map<String, Value>, text: &str) -> Option<i64> {
    if let Some(n) = number_field(params, &["duration", "duration_minutes", "minutes"]) {
        if n > 0.0 {
            return Some(n as i64);
        }
    }

    if let Some(caps) = DURATION_RE.captures(text) {
        let amount: i64 = caps[1].parse().ok()?;
        let unit = caps[2].to_lowercase();
        let minutes = if unit.starts_with('h') { amount * 60 } else { amount };
        return Some(minutes);
    }

    let lowered = text.to_lowercase();
    if lowered.contains("half an hour") || lowered.contains("half hour") {
        return Some(30);
    }
    if lowered.contains("an hour") || lowered.contains("one hour") {
        return Some(60);
    }

    None
}

fn preferred_room(params: &Map<String, Value>, text: &str) -> Option<String> {
    if let Some(room) = string_field(params, &["room", "preferred_room", "location"]) {
        return Some(room);
    }

    ROOM_RE
        .captures(text)
        .map(|caps| caps[1].split_whitespace().collect::<Vec<_>>().join(" "))
}

fn attendees(params: &Map<String, Value>) -> Vec<String> {
    for key in ["attendees", "participants", "invitees"] {
        if let Some(value) = params.get(key) {
            let list = parse_recipients(value);
            if !list.is_empty() {
                return list;
            }
        }
    }
    Vec::new()
}

fn capacity(params: &Map<String, Value>, text: &str) -> Option<u32> {
    if let Some(n) = number_field(params, &["capacity", "seats", "headcount"]) {
        if n > 0.0 {
            return Some(n as u32);
        }
    }

    CAPACITY_RE
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

/// Derive a meeting title: structured fields first, then the text with the
/// booking verb, duration, room, schedule and headcount phrases removed.
fn title(params: &Map<String, Value>, text: &str) -> String {
    if let Some(title) = string_field(params, &["title", "subject", "name"]) {
        return title;
    }

    let mut s = LEADING_BOOKING_RE.replace(text.trim(), "").into_owned();
    s = DURATION_RE.replace_all(&s, "").into_owned();
    s = ROOM_RE.replace_all(&s, "").into_owned();
    for re in SCHEDULE_NOISE_RES.iter() {
        s = re.replace_all(&s, "").into_owned();
    }

    let mut words: Vec<&str> = s
        .split_whitespace()
        .filter(|w| !w.chars().all(|c| c.is_ascii_punctuation()))
        .collect();

    // Drop dangling connectors left behind by the removals.
    while matches!(
        words.last().map(|w| w.to_lowercase()),
        Some(ref w) if ["for", "on", "at", "in", "with", "and"].contains(&w.as_str())
    ) {
        words.pop();
    }
    while matches!(
        words.first().map(|w| w.to_lowercase()),
        Some(ref w) if ["for", "on", "at", "in", "with", "and"].contains(&w.as_str())
    ) {
        words.remove(0);
    }

    let cleaned = words.join(" ");
    if cleaned.is_empty() {
        "Meeting".to_string()
    } else {
        cleaned
    }
}
