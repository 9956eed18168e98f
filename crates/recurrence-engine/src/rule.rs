//! The recurring-event rule value object.
//!
//! A [`RecurrenceRule`] describes how an event repeats: the frequency
//! category ([`RecurrenceKind`]), an optional "every N units" interval,
//! the anchoring day (day-of-week for weekly kinds, day-of-month for
//! monthly), the time of day each occurrence fires, and the date the
//! series ends.
//!
//! Construction deliberately does **not** enforce the cross-field
//! invariants — a rule is assembled incrementally from form state, and
//! partial states must be representable without panicking. Invariants
//! are checked separately by [`crate::validate::validate`].

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── RecurrenceKind ──────────────────────────────────────────────────────────

/// Repetition frequency category. `None` means a one-time event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecurrenceKind {
    #[default]
    None,
    Daily,
    Weekly,
    BiWeekly,
    Monthly,
}

impl RecurrenceKind {
    /// Returns the lowercase-hyphenated wire string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::BiWeekly => "bi-weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Parses a kind from its wire string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "bi-weekly" => Self::BiWeekly,
            "monthly" => Self::Monthly,
            _ => return None,
        })
    }

    /// Returns all kinds in canonical order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::None,
            Self::Daily,
            Self::Weekly,
            Self::BiWeekly,
            Self::Monthly,
        ]
    }
}

impl fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ── TimeOfDay ───────────────────────────────────────────────────────────────

/// A wall-clock time truncated to minutes. Formats as zero-padded `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    /// 00:00, the lenient-decode fallback for malformed time strings.
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Creates a time of day, or `None` if hour/minute are out of range.
    #[must_use]
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

// ── RecurrenceRule ──────────────────────────────────────────────────────────

/// How an event repeats.
///
/// All fields other than `kind` are optional so that in-progress form
/// state can be held without validation getting in the way. Which fields
/// are *required* depends on `kind`; see [`crate::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecurrenceRule {
    pub kind: RecurrenceKind,
    /// "Every N units". Bi-weekly implies 2 when unset; everything else
    /// implies 1. See [`RecurrenceRule::effective_interval`].
    pub interval: Option<u32>,
    /// 0–6, 0 = Sunday. Required for weekly and bi-weekly rules.
    pub day_of_week: Option<u8>,
    /// 1–31. Required for monthly rules.
    pub day_of_month: Option<u8>,
    /// Required whenever the rule is recurring.
    pub time_of_day: Option<TimeOfDay>,
    /// Last date (inclusive) the series may produce an occurrence.
    /// Required whenever the rule is recurring; must be strictly after
    /// the event's reference start date.
    pub end_date: Option<NaiveDate>,
}

impl RecurrenceRule {
    /// A rule for an event that does not repeat.
    #[must_use]
    pub fn one_time() -> Self {
        Self::default()
    }

    /// A rule of the given kind with every other field unset.
    #[must_use]
    pub fn new(kind: RecurrenceKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Whether the event repeats at all.
    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.kind != RecurrenceKind::None
    }

    /// Whether this kind anchors on a day of the week.
    #[must_use]
    pub fn requires_day_of_week(&self) -> bool {
        matches!(self.kind, RecurrenceKind::Weekly | RecurrenceKind::BiWeekly)
    }

    /// Whether this kind anchors on a day of the month.
    #[must_use]
    pub fn requires_day_of_month(&self) -> bool {
        self.kind == RecurrenceKind::Monthly
    }

    /// The interval actually in effect: the explicit value when set,
    /// otherwise 2 for bi-weekly rules and 1 for everything else.
    #[must_use]
    pub fn effective_interval(&self) -> u32 {
        match self.interval {
            Some(n) => n,
            None if self.kind == RecurrenceKind::BiWeekly => 2,
            None => 1,
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_string_mapping_round_trips() {
        for kind in RecurrenceKind::all() {
            assert_eq!(RecurrenceKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_kind_parse_bi_weekly_hyphenated() {
        assert_eq!(
            RecurrenceKind::parse("bi-weekly"),
            Some(RecurrenceKind::BiWeekly)
        );
        // The un-hyphenated spelling is not part of the wire contract
        assert_eq!(RecurrenceKind::parse("biweekly"), None);
    }

    #[test]
    fn test_kind_parse_case_insensitive() {
        assert_eq!(RecurrenceKind::parse("Weekly"), Some(RecurrenceKind::Weekly));
        assert_eq!(RecurrenceKind::parse("MONTHLY"), Some(RecurrenceKind::Monthly));
    }

    #[test]
    fn test_kind_parse_unknown_returns_none() {
        assert_eq!(RecurrenceKind::parse("yearly"), None);
        assert_eq!(RecurrenceKind::parse(""), None);
    }

    #[test]
    fn test_kind_serde_uses_wire_strings() {
        let json = serde_json::to_string(&RecurrenceKind::BiWeekly).unwrap();
        assert_eq!(json, "\"bi-weekly\"");
        let back: RecurrenceKind = serde_json::from_str("\"bi-weekly\"").unwrap();
        assert_eq!(back, RecurrenceKind::BiWeekly);
    }

    #[test]
    fn test_time_of_day_formats_zero_padded() {
        let t = TimeOfDay::new(9, 5).unwrap();
        assert_eq!(t.to_string(), "09:05");
        let t = TimeOfDay::new(14, 30).unwrap();
        assert_eq!(t.to_string(), "14:30");
    }

    #[test]
    fn test_time_of_day_rejects_out_of_range() {
        assert!(TimeOfDay::new(24, 0).is_none());
        assert!(TimeOfDay::new(0, 60).is_none());
        assert!(TimeOfDay::new(23, 59).is_some());
    }

    #[test]
    fn test_derived_queries_by_kind() {
        assert!(!RecurrenceRule::one_time().is_recurring());

        let weekly = RecurrenceRule::new(RecurrenceKind::Weekly);
        assert!(weekly.is_recurring());
        assert!(weekly.requires_day_of_week());
        assert!(!weekly.requires_day_of_month());

        let biweekly = RecurrenceRule::new(RecurrenceKind::BiWeekly);
        assert!(biweekly.requires_day_of_week());

        let monthly = RecurrenceRule::new(RecurrenceKind::Monthly);
        assert!(!monthly.requires_day_of_week());
        assert!(monthly.requires_day_of_month());

        let daily = RecurrenceRule::new(RecurrenceKind::Daily);
        assert!(!daily.requires_day_of_week());
        assert!(!daily.requires_day_of_month());
    }

    #[test]
    fn test_effective_interval_defaults() {
        assert_eq!(RecurrenceRule::new(RecurrenceKind::Daily).effective_interval(), 1);
        assert_eq!(RecurrenceRule::new(RecurrenceKind::Weekly).effective_interval(), 1);
        assert_eq!(
            RecurrenceRule::new(RecurrenceKind::BiWeekly).effective_interval(),
            2
        );

        let explicit = RecurrenceRule {
            kind: RecurrenceKind::BiWeekly,
            interval: Some(3),
            ..RecurrenceRule::default()
        };
        assert_eq!(explicit.effective_interval(), 3);
    }

    #[test]
    fn test_partial_rule_is_representable() {
        // Mid-edit form state: a weekly rule with nothing else filled in yet
        let rule = RecurrenceRule::new(RecurrenceKind::Weekly);
        assert_eq!(rule.day_of_week, None);
        assert_eq!(rule.time_of_day, None);
        assert_eq!(rule.end_date, None);
    }
}
