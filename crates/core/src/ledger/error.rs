//! Error types for posting operations.

use lading_shared::types::AccountId;
use lading_shared::Money;
use thiserror::Error;

/// Errors that can occur while validating or appending postings.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A posting group must have at least two lines.
    #[error("Posting must have at least 2 lines")]
    InsufficientLines,

    /// The posting group does not balance.
    #[error("Posting is unbalanced: debits {debits} != credits {credits}")]
    UnbalancedPosting {
        /// Sum of debit amounts.
        debits: Money,
        /// Sum of credit amounts.
        credits: Money,
    },

    /// A line has both debit and credit set.
    #[error("Posting line must set exactly one of debit or credit, both are nonzero")]
    BothSidesSet,

    /// A line has neither debit nor credit set.
    #[error("Posting line must set exactly one of debit or credit, both are zero")]
    EmptyLine,

    /// A line has a negative amount.
    #[error("Posting line amounts must be nonnegative")]
    NegativeAmount,

    /// Account referenced by a line does not exist.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Account referenced by a line is inactive.
    #[error("Account {0} is inactive")]
    AccountInactive(AccountId),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::UnbalancedPosting { .. } => "UNBALANCED_POSTING",
            Self::BothSidesSet => "BOTH_SIDES_SET",
            Self::EmptyLine => "EMPTY_LINE",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::UnbalancedPosting {
            debits: Money::from_cents(10_000),
            credits: Money::from_cents(5_000),
        };
        assert_eq!(
            err.to_string(),
            "Posting is unbalanced: debits 100.00 != credits 50.00"
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(LedgerError::InsufficientLines.error_code(), "INSUFFICIENT_LINES");
        assert_eq!(LedgerError::EmptyLine.error_code(), "EMPTY_LINE");
    }
}
