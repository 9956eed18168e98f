//! Occurrence expansion: rule → concrete datetimes.
//!
//! Materializes the schedule a valid recurrence rule describes, from the
//! event's reference start through the rule's end date (inclusive). Pure
//! and deterministic — the caller supplies the reference start, nothing
//! reads a clock.
//!
//! Monthly rules anchored on a day a month lacks (e.g. the 31st in
//! April) skip that month rather than clamping, matching common
//! calendar-system behavior.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{RecurrenceError, Result};
use crate::rule::{RecurrenceKind, RecurrenceRule};
use crate::validate::validate;

/// Expansion stops after this many occurrences. The end date bounds any
/// sane rule well below it; the cap guards against pathological spans.
pub const MAX_OCCURRENCES: usize = 1000;

/// Expands a rule into the concrete occurrence datetimes it describes.
///
/// A one-time rule expands to the reference start alone. Recurring rules
/// produce every occurrence at or after the reference start whose date is
/// on or before the end date, capped at [`MAX_OCCURRENCES`].
///
/// # Errors
///
/// Returns [`RecurrenceError::Expansion`] when the rule does not
/// validate against the reference start (the message names the first
/// violation), when the interval is zero, or when an anchoring field
/// holds an out-of-range value.
pub fn expand(rule: &RecurrenceRule, reference_start: NaiveDateTime) -> Result<Vec<NaiveDateTime>> {
    if !rule.is_recurring() {
        return Ok(vec![reference_start]);
    }

    let errors = validate(rule, reference_start);
    if let Some(first) = errors.first() {
        return Err(RecurrenceError::Expansion(first.to_string()));
    }

    let interval = rule.effective_interval();
    if interval == 0 {
        return Err(RecurrenceError::Expansion(
            "interval must be positive".to_string(),
        ));
    }

    // Presence is guaranteed by validation above.
    let end = rule
        .end_date
        .ok_or_else(|| RecurrenceError::Expansion("end date missing".to_string()))?;
    let tod = rule
        .time_of_day
        .ok_or_else(|| RecurrenceError::Expansion("time of day missing".to_string()))?;
    let time = NaiveTime::from_hms_opt(u32::from(tod.hour), u32::from(tod.minute), 0)
        .ok_or_else(|| RecurrenceError::Expansion(format!("time of day out of range: {tod}")))?;

    match rule.kind {
        RecurrenceKind::None => Ok(vec![reference_start]),
        RecurrenceKind::Daily => {
            Ok(step_days(reference_start, end, time, i64::from(interval)))
        }
        RecurrenceKind::Weekly | RecurrenceKind::BiWeekly => {
            let dow = rule
                .day_of_week
                .ok_or_else(|| RecurrenceError::Expansion("day of week missing".to_string()))?;
            if dow > 6 {
                return Err(RecurrenceError::Expansion(format!(
                    "day of week out of range: {dow}"
                )));
            }
            // First date at/after the start that falls on the target weekday
            let current = reference_start.date().weekday().num_days_from_sunday();
            let days_ahead = (i64::from(dow) - i64::from(current) + 7) % 7;
            let first = reference_start.date() + Duration::days(days_ahead);
            let anchored = NaiveDateTime::new(first, time);
            let step = Duration::days(7 * i64::from(interval));
            let start = if anchored < reference_start {
                // Overflow means the next occurrence is past the datetime
                // range, so past any end date.
                match anchored.checked_add_signed(step) {
                    Some(dt) => dt,
                    None => return Ok(Vec::new()),
                }
            } else {
                anchored
            };
            Ok(collect_by_step(start, end, step))
        }
        RecurrenceKind::Monthly => {
            let dom = rule
                .day_of_month
                .ok_or_else(|| RecurrenceError::Expansion("day of month missing".to_string()))?;
            if !(1..=31).contains(&dom) {
                return Err(RecurrenceError::Expansion(format!(
                    "day of month out of range: {dom}"
                )));
            }
            Ok(step_months(reference_start, end, time, dom, interval))
        }
    }
}

/// Daily stepping: the series is anchored on the reference start's date.
fn step_days(start: NaiveDateTime, end: NaiveDate, time: NaiveTime, step: i64) -> Vec<NaiveDateTime> {
    let anchored = NaiveDateTime::new(start.date(), time);
    let first = if anchored < start {
        match anchored.checked_add_signed(Duration::days(step)) {
            Some(dt) => dt,
            None => return Vec::new(),
        }
    } else {
        anchored
    };
    collect_by_step(first, end, Duration::days(step))
}

/// Collects occurrences from `first` through `end` at a fixed stride.
/// Stepping past the datetime range ends the series.
fn collect_by_step(first: NaiveDateTime, end: NaiveDate, step: Duration) -> Vec<NaiveDateTime> {
    let mut out = Vec::new();
    let mut current = first;
    while current.date() <= end && out.len() < MAX_OCCURRENCES {
        out.push(current);
        match current.checked_add_signed(step) {
            Some(next) => current = next,
            None => break,
        }
    }
    out
}

/// Monthly stepping on a fixed day of month; short months are skipped.
fn step_months(
    start: NaiveDateTime,
    end: NaiveDate,
    time: NaiveTime,
    dom: u8,
    interval: u32,
) -> Vec<NaiveDateTime> {
    let mut out = Vec::new();
    let (mut year, mut month) = (start.date().year(), start.date().month());

    while out.len() < MAX_OCCURRENCES {
        match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(month_start) if month_start <= end => {}
            _ => break,
        }
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, u32::from(dom)) {
            let occurrence = NaiveDateTime::new(date, time);
            if occurrence >= start && date <= end {
                out.push(occurrence);
            }
        }
        (year, month) = add_months(year, month, interval);
    }
    out
}

/// Advances a (year, month) pair by `n` months. Widened arithmetic so a
/// huge interval cannot overflow; a year past chrono's range falls out of
/// `from_ymd_opt` at the call site and ends the series there.
fn add_months(year: i32, month: u32, n: u32) -> (i32, u32) {
    let zero_based = u64::from(month - 1) + u64::from(n);
    let years_ahead = i32::try_from(zero_based / 12).unwrap_or(i32::MAX);
    (
        year.saturating_add(years_ahead),
        (zero_based % 12 + 1) as u32,
    )
}

// ── Tests ───────────────────────────────────────────────────────────────────
