//! Alarm registry error types

use thiserror::Error;

/// Result type for alarm operations
pub type Result<T> = std::result::Result<T, AlarmError>;

/// Alarm registry errors
///
/// Only boundary parse failures are hard errors. A missing alarm or an
/// exhausted snooze allowance is normal control flow, surfaced through the
/// notification channel and operation return values instead.
#[derive(Debug, Error)]
pub enum AlarmError {
    /// Malformed time string or out-of-range fields
    #[error("invalid time (expected HH:MM): {0}")]
    InvalidTime(String),

    /// Unrecognized weekday name
    #[error("invalid day of week: {0}")]
    InvalidDay(String),

    /// Malformed alarm id
    #[error("invalid alarm id: {0}")]
    InvalidId(String),
}
