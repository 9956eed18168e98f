//! JSON wire codec for recurrence rules.
//!
//! The backend exchanges a recurrence rule as three sibling fields of the
//! enclosing event payload:
//!
//! - `recurring` — the kind as a lowercase-hyphenated string
//! - `recurring_end_date` — ISO 8601 date string, absent when unset
//! - `recurring_pattern` — the pattern object **JSON-encoded as a string**,
//!   present only for recurring events:
//!
//! ```json
//! { "dayOfWeek": 5, "interval": 2, "time": "09:00" }
//! ```
//!
//! Absent optional fields are omitted entirely; the codec never writes
//! null placeholders. Decoding comes in two policies:
//!
//! - [`decode`] is **lenient** (the default): malformed times degrade to
//!   `00:00`, unparseable dates decode as unset, unknown kind strings
//!   decode as one-time. This mirrors the tolerant parsing of the
//!   original client forms.
//! - [`decode_strict`] surfaces the same conditions as
//!   [`RecurrenceError`] values for backends that prefer to reject
//!   corrupt data.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::error::{RecurrenceError, Result};
use crate::rule::{RecurrenceKind, RecurrenceRule, TimeOfDay};

// ── Encoding ────────────────────────────────────────────────────────────────

/// Encodes the pattern object for a rule.
///
/// Fields are present iff set on the rule, except `interval`, which is
/// filled with 2 for bi-weekly rules even when unset (the bi-weekly
/// convention the backend expects). A one-time rule encodes as `{}`.
#[must_use]
pub fn encode(rule: &RecurrenceRule) -> Value {
    let mut pattern = Map::new();
    if let Some(dow) = rule.day_of_week {
        pattern.insert("dayOfWeek".to_string(), Value::from(dow));
    }
    if let Some(dom) = rule.day_of_month {
        pattern.insert("dayOfMonth".to_string(), Value::from(dom));
    }
    match rule.interval {
        Some(n) => {
            pattern.insert("interval".to_string(), Value::from(n));
        }
        None if rule.kind == RecurrenceKind::BiWeekly => {
            pattern.insert("interval".to_string(), Value::from(2));
        }
        None => {}
    }
    if let Some(time) = rule.time_of_day {
        pattern.insert("time".to_string(), Value::from(time.to_string()));
    }
    Value::Object(pattern)
}

/// Writes the rule's three event-level fields into an event payload.
///
/// For one-time rules only `recurring: "none"` is written and any stale
/// `recurring_end_date` / `recurring_pattern` keys are removed.
pub fn write_event_fields(rule: &RecurrenceRule, event: &mut Map<String, Value>) {
    event.insert(
        "recurring".to_string(),
        Value::from(rule.kind.as_str()),
    );

    if !rule.is_recurring() {
        event.remove("recurring_end_date");
        event.remove("recurring_pattern");
        return;
    }

    if let Some(end) = rule.end_date {
        event.insert(
            "recurring_end_date".to_string(),
            Value::from(end.format("%Y-%m-%d").to_string()),
        );
    } else {
        event.remove("recurring_end_date");
    }
    event.insert(
        "recurring_pattern".to_string(),
        Value::from(encode(rule).to_string()),
    );
}

// ── Lenient decoding ────────────────────────────────────────────────────────

/// Decodes a rule from a pattern object plus its sibling event fields.
///
/// Lenient: any field that fails to parse decodes as unset (or `00:00`
/// for the time), and an unknown kind string decodes as a one-time rule.
#[must_use]
pub fn decode(pattern: &Value, kind: &str, end_date: Option<&str>) -> RecurrenceRule {
    RecurrenceRule {
        kind: RecurrenceKind::parse(kind).unwrap_or(RecurrenceKind::None),
        interval: pattern
            .get("interval")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok()),
        day_of_week: pattern
            .get("dayOfWeek")
            .and_then(Value::as_u64)
            .and_then(|n| u8::try_from(n).ok()),
        day_of_month: pattern
            .get("dayOfMonth")
            .and_then(Value::as_u64)
            .and_then(|n| u8::try_from(n).ok()),
        time_of_day: pattern
            .get("time")
            .and_then(Value::as_str)
            .map(parse_time_lenient),
        end_date: end_date.and_then(parse_end_date),
    }
}

/// Reads a rule back out of a full event payload.
///
/// An unparseable `recurring_pattern` string degrades to an empty
/// pattern; a missing `recurring` field decodes as one-time.
#[must_use]
pub fn read_event_fields(event: &Map<String, Value>) -> RecurrenceRule {
    let kind = event
        .get("recurring")
        .and_then(Value::as_str)
        .unwrap_or("none");
    let end_date = event.get("recurring_end_date").and_then(Value::as_str);
    let pattern = event
        .get("recurring_pattern")
        .and_then(Value::as_str)
        .and_then(|s| serde_json::from_str::<Value>(s).ok())
        .unwrap_or_else(|| Value::Object(Map::new()));

    decode(&pattern, kind, end_date)
}

// ── Strict decoding ─────────────────────────────────────────────────────────

/// Decodes a rule, rejecting malformed input instead of defaulting.
///
/// # Errors
///
/// Returns [`RecurrenceError::InvalidKind`] for an unknown kind string,
/// [`RecurrenceError::InvalidTime`] for a time that is not zero-padded
/// `HH:MM` in range, [`RecurrenceError::InvalidDate`] for an unparseable
/// end date, and [`RecurrenceError::InvalidPattern`] for pattern fields
/// of the wrong type or out of range (day-of-week outside 0–6,
/// day-of-month outside 1–31, zero interval).
pub fn decode_strict(
    pattern: &Value,
    kind: &str,
    end_date: Option<&str>,
) -> Result<RecurrenceRule> {
    let kind = RecurrenceKind::parse(kind)
        .ok_or_else(|| RecurrenceError::InvalidKind(format!("'{kind}'")))?;

    let interval = match pattern.get("interval") {
        None => None,
        Some(v) => {
            let n = v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    RecurrenceError::InvalidPattern(format!("interval must be a positive integer, got {v}"))
                })?;
            Some(n)
        }
    };

    let day_of_week = match pattern.get("dayOfWeek") {
        None => None,
        Some(v) => {
            let n = v
                .as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .filter(|&n| n <= 6)
                .ok_or_else(|| {
                    RecurrenceError::InvalidPattern(format!("dayOfWeek must be 0-6, got {v}"))
                })?;
            Some(n)
        }
    };

    let day_of_month = match pattern.get("dayOfMonth") {
        None => None,
        Some(v) => {
            let n = v
                .as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .filter(|&n| (1..=31).contains(&n))
                .ok_or_else(|| {
                    RecurrenceError::InvalidPattern(format!("dayOfMonth must be 1-31, got {v}"))
                })?;
            Some(n)
        }
    };

    let time_of_day = match pattern.get("time") {
        None => None,
        Some(v) => {
            let s = v.as_str().ok_or_else(|| {
                RecurrenceError::InvalidTime(format!("time must be a string, got {v}"))
            })?;
            Some(parse_time_strict(s)?)
        }
    };

    let end_date = match end_date {
        None => None,
        Some(s) => Some(
            parse_end_date(s).ok_or_else(|| RecurrenceError::InvalidDate(format!("'{s}'")))?,
        ),
    };

    Ok(RecurrenceRule {
        kind,
        interval,
        day_of_week,
        day_of_month,
        time_of_day,
        end_date,
    })
}

/// Strict counterpart of [`read_event_fields`].
///
/// # Errors
///
/// Everything [`decode_strict`] rejects, plus
/// [`RecurrenceError::InvalidPattern`] when `recurring_pattern` is not a
/// JSON-encoded object string.
pub fn read_event_fields_strict(event: &Map<String, Value>) -> Result<RecurrenceRule> {
    let kind = event
        .get("recurring")
        .and_then(Value::as_str)
        .unwrap_or("none");
    let end_date = event.get("recurring_end_date").and_then(Value::as_str);

    let pattern = match event.get("recurring_pattern") {
        None => Value::Object(Map::new()),
        Some(v) => {
            let s = v.as_str().ok_or_else(|| {
                RecurrenceError::InvalidPattern(format!(
                    "recurring_pattern must be a JSON-encoded string, got {v}"
                ))
            })?;
            let parsed: Value = serde_json::from_str(s)
                .map_err(|e| RecurrenceError::InvalidPattern(format!("'{s}': {e}")))?;
            if !parsed.is_object() {
                return Err(RecurrenceError::InvalidPattern(format!(
                    "recurring_pattern must encode an object, got '{s}'"
                )));
            }
            parsed
        }
    };

    decode_strict(&pattern, kind, end_date)
}

// ── Parsing helpers ─────────────────────────────────────────────────────────

/// Lenient time parse: split on `:`, expect two integer components.
/// Anything else degrades to 00:00, component-wise or wholesale.
fn parse_time_lenient(s: &str) -> TimeOfDay {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 {
        return TimeOfDay::MIDNIGHT;
    }
    let hour: u8 = parts[0].trim().parse().unwrap_or(0);
    let minute: u8 = parts[1].trim().parse().unwrap_or(0);
    TimeOfDay::new(hour, minute).unwrap_or(TimeOfDay::MIDNIGHT)
}

/// Strict time parse: exactly `HH:MM` with both components in range.
fn parse_time_strict(s: &str) -> Result<TimeOfDay> {
    let err = || RecurrenceError::InvalidTime(format!("'{s}' (expected HH:MM)"));
    let (h, m) = s.split_once(':').ok_or_else(err)?;
    let hour: u8 = h.trim().parse().map_err(|_| err())?;
    let minute: u8 = m.trim().parse().map_err(|_| err())?;
    TimeOfDay::new(hour, minute).ok_or_else(err)
}

/// Parses an end-date string: a bare ISO date, or a full datetime
/// (RFC 3339 or `YYYY-MM-DDTHH:MM:SS`) from which the date is taken.
fn parse_end_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

// ── Tests ───────────────────────────────────────────────────────────────────
