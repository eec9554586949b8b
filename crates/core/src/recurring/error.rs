//! Error types for recurring templates.

use thiserror::Error;

/// Errors from template scheduling.
#[derive(Debug, Error)]
pub enum RecurringError {
    /// Advancing the run date left the representable calendar range.
    #[error("Next run date overflows the calendar range")]
    DateOverflow,
}

impl RecurringError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DateOverflow => "DATE_OVERFLOW",
        }
    }
}
