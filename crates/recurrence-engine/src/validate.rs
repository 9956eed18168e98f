//! Field-presence validation for recurrence rules.
//!
//! Validation is a pure function over a candidate rule and the event's
//! reference start: it returns *every* violated rule as a value, in a
//! fixed order, so a form can mark all invalid fields at once and tests
//! can assert on the first error deterministically. Expected validation
//! failures are never errors in the `Result` sense.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::rule::RecurrenceRule;

/// A single violated validation rule, tagged with the field at fault.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("End date is required for recurring events")]
    MissingEndDate,

    #[error("Time of day is required for recurring events")]
    MissingTimeOfDay,

    #[error("Day of week is required for weekly and bi-weekly events")]
    MissingDayOfWeek,

    #[error("Day of month is required for monthly events")]
    MissingDayOfMonth,

    #[error("End date must be after the event start date")]
    EndDateNotAfterStart,
}

impl ValidationError {
    /// The wire-contract name of the field this error refers to.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::MissingEndDate | Self::EndDateNotAfterStart => "recurring_end_date",
            Self::MissingTimeOfDay => "time",
            Self::MissingDayOfWeek => "dayOfWeek",
            Self::MissingDayOfMonth => "dayOfMonth",
        }
    }
}

/// Checks a candidate rule against the event's reference start.
///
/// Returns an empty vector when the rule is valid. One-time rules
/// (`kind == None`) always validate clean regardless of leftover field
/// values — the other fields are ignored for them.
///
/// Evaluation order is fixed: end-date presence, time-of-day presence,
/// day-of-week/day-of-month presence by kind, then end-date-after-start.
#[must_use]
pub fn validate(rule: &RecurrenceRule, reference_start: NaiveDateTime) -> Vec<ValidationError> {
    if !rule.is_recurring() {
        return Vec::new();
    }

    let mut errors = Vec::new();

    if rule.end_date.is_none() {
        errors.push(ValidationError::MissingEndDate);
    }
    if rule.time_of_day.is_none() {
        errors.push(ValidationError::MissingTimeOfDay);
    }
    if rule.requires_day_of_week() && rule.day_of_week.is_none() {
        errors.push(ValidationError::MissingDayOfWeek);
    }
    if rule.requires_day_of_month() && rule.day_of_month.is_none() {
        errors.push(ValidationError::MissingDayOfMonth);
    }
    if let Some(end) = rule.end_date {
        // Strictly after: an end date on the start day ends the series
        // before its first repeat, which the form treats as invalid.
        if end <= reference_start.date() {
            errors.push(ValidationError::EndDateNotAfterStart);
        }
    }

    errors
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{RecurrenceKind, TimeOfDay};
    use chrono::NaiveDate;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_one_time_rule_always_valid() {
        assert!(validate(&RecurrenceRule::one_time(), start()).is_empty());

        // Leftover fields from a previous edit are ignored for kind None
        let messy = RecurrenceRule {
            kind: RecurrenceKind::None,
            day_of_week: Some(3),
            day_of_month: Some(42),
            end_date: Some(date(2020, 1, 1)),
            ..RecurrenceRule::default()
        };
        assert!(validate(&messy, start()).is_empty());
    }

    #[test]
    fn test_weekly_missing_day_of_week() {
        let rule = RecurrenceRule {
            kind: RecurrenceKind::Weekly,
            time_of_day: TimeOfDay::new(14, 30),
            end_date: Some(date(2025, 6, 1)),
            ..RecurrenceRule::default()
        };
        assert_eq!(validate(&rule, start()), vec![ValidationError::MissingDayOfWeek]);
    }

    #[test]
    fn test_bi_weekly_missing_day_of_week() {
        let rule = RecurrenceRule {
            kind: RecurrenceKind::BiWeekly,
            time_of_day: TimeOfDay::new(9, 0),
            end_date: Some(date(2025, 12, 31)),
            ..RecurrenceRule::default()
        };
        assert_eq!(validate(&rule, start()), vec![ValidationError::MissingDayOfWeek]);
    }

    #[test]
    fn test_monthly_missing_day_of_month() {
        let rule = RecurrenceRule {
            kind: RecurrenceKind::Monthly,
            time_of_day: TimeOfDay::new(9, 0),
            end_date: Some(date(2025, 9, 1)),
            ..RecurrenceRule::default()
        };
        assert_eq!(validate(&rule, start()), vec![ValidationError::MissingDayOfMonth]);
    }

    #[test]
    fn test_monthly_missing_time_of_day_only() {
        let rule = RecurrenceRule {
            kind: RecurrenceKind::Monthly,
            day_of_month: Some(31),
            end_date: Some(date(2025, 9, 1)),
            ..RecurrenceRule::default()
        };
        assert_eq!(validate(&rule, start()), vec![ValidationError::MissingTimeOfDay]);
    }

    #[test]
    fn test_missing_end_date() {
        let rule = RecurrenceRule {
            kind: RecurrenceKind::Daily,
            time_of_day: TimeOfDay::new(8, 0),
            ..RecurrenceRule::default()
        };
        assert_eq!(validate(&rule, start()), vec![ValidationError::MissingEndDate]);
    }

    #[test]
    fn test_end_date_not_after_start() {
        let mut rule = RecurrenceRule {
            kind: RecurrenceKind::Daily,
            time_of_day: TimeOfDay::new(8, 0),
            end_date: Some(date(2025, 4, 30)),
            ..RecurrenceRule::default()
        };
        assert_eq!(
            validate(&rule, start()),
            vec![ValidationError::EndDateNotAfterStart]
        );

        // Same day as the start is still not strictly after
        rule.end_date = Some(date(2025, 5, 1));
        assert_eq!(
            validate(&rule, start()),
            vec![ValidationError::EndDateNotAfterStart]
        );

        rule.end_date = Some(date(2025, 5, 2));
        assert!(validate(&rule, start()).is_empty());
    }

    #[test]
    fn test_all_violations_collected_in_order() {
        // Weekly rule with every required field missing
        let rule = RecurrenceRule::new(RecurrenceKind::Weekly);
        assert_eq!(
            validate(&rule, start()),
            vec![
                ValidationError::MissingEndDate,
                ValidationError::MissingTimeOfDay,
                ValidationError::MissingDayOfWeek,
            ]
        );

        // Monthly with a bad end date on top of a missing time
        let rule = RecurrenceRule {
            kind: RecurrenceKind::Monthly,
            day_of_month: Some(15),
            end_date: Some(date(2025, 1, 1)),
            ..RecurrenceRule::default()
        };
        assert_eq!(
            validate(&rule, start()),
            vec![
                ValidationError::MissingTimeOfDay,
                ValidationError::EndDateNotAfterStart,
            ]
        );
    }

    #[test]
    fn test_valid_bi_weekly_scenario() {
        let rule = RecurrenceRule {
            kind: RecurrenceKind::BiWeekly,
            day_of_week: Some(5), // Friday
            time_of_day: TimeOfDay::new(9, 0),
            end_date: Some(date(2025, 12, 31)),
            ..RecurrenceRule::default()
        };
        assert!(validate(&rule, start()).is_empty());
    }

    #[test]
    fn test_error_field_tags() {
        assert_eq!(ValidationError::MissingEndDate.field(), "recurring_end_date");
        assert_eq!(ValidationError::EndDateNotAfterStart.field(), "recurring_end_date");
        assert_eq!(ValidationError::MissingTimeOfDay.field(), "time");
        assert_eq!(ValidationError::MissingDayOfWeek.field(), "dayOfWeek");
        assert_eq!(ValidationError::MissingDayOfMonth.field(), "dayOfMonth");
    }

    #[test]
    fn test_errors_are_display_ready() {
        let msg = ValidationError::MissingDayOfWeek.to_string();
        assert!(msg.contains("Day of week"), "got: {msg}");
    }
}
