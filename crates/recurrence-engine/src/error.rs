//! Error types for recurrence-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecurrenceError {
    #[error("Invalid recurrence kind: {0}")]
    InvalidKind(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Expansion error: {0}")]
    Expansion(String),
}

pub type Result<T> = std::result::Result<T, RecurrenceError>;
