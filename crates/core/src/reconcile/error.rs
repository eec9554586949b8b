//! Error types for reconciliation.

use thiserror::Error;

/// Errors that can occur while proposing or accepting matches.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Confidence must lie in `[0, 1]`.
    #[error("Confidence {0} is outside the range 0.0 to 1.0")]
    InvalidConfidence(rust_decimal::Decimal),

    /// Match amounts must be strictly positive.
    #[error("Match amount must be positive")]
    NonPositiveAmount,

    /// The referenced match proposal does not exist.
    #[error("Match not found")]
    MatchNotFound,

    /// The bank transaction already has a manually-accepted match.
    #[error("Bank transaction '{0}' already has an accepted match")]
    AlreadyAccepted(String),
}

impl ReconcileError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfidence(_) => "INVALID_CONFIDENCE",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::MatchNotFound => "MATCH_NOT_FOUND",
            Self::AlreadyAccepted(_) => "ALREADY_ACCEPTED",
        }
    }
}
