//! # recurrence-engine
//!
//! The recurring-event rule model for a community-events backend.
//!
//! A recurrence rule says how an event repeats — daily, weekly,
//! bi-weekly, or monthly — anchored on a day of week or day of month,
//! at a time of day, through an end date. This crate holds the value
//! object, the validation contract the editing form relies on, the JSON
//! wire codec the backend API speaks, and the expansion of a rule into
//! concrete occurrence datetimes.
//!
//! Everything here is pure, synchronous, and side-effect-free: callers
//! supply form values and the event's reference start, and get values
//! back. No I/O, no clock access, safe to call concurrently.
//!
//! ## Modules
//!
//! - [`rule`] — [`RecurrenceRule`], [`RecurrenceKind`], [`TimeOfDay`]
//! - [`validate`] — field-presence validation producing display-ready errors
//! - [`codec`] — JSON wire codec (lenient by default, strict on request)
//! - [`expand`] — rule → concrete occurrence datetimes
//! - [`error`] — error types

pub mod codec;
pub mod error;
pub mod expand;
pub mod rule;
pub mod validate;

pub use codec::{
    decode, decode_strict, encode, read_event_fields, read_event_fields_strict,
    write_event_fields,
};
pub use error::RecurrenceError;
pub use expand::{expand, MAX_OCCURRENCES};
pub use rule::{RecurrenceKind, RecurrenceRule, TimeOfDay};
pub use validate::{validate, ValidationError};
