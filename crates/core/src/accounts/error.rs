//! Error types for chart of accounts operations.

use lading_shared::types::AccountId;
use thiserror::Error;

/// Errors that can occur during chart of accounts operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Account code already exists in the company.
    #[error("Account code '{0}' already exists")]
    DuplicateCode(String),

    /// Account code is not a valid numeric code.
    #[error("Invalid account code '{0}': must be numeric and non-empty")]
    InvalidCode(String),

    /// Parent account not found.
    #[error("Parent account not found: {0}")]
    ParentNotFound(AccountId),

    /// Reparenting would create a cycle in the account tree.
    #[error("Parent {0} would create a cycle in the account tree")]
    ParentCycle(AccountId),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Account is inactive and cannot be used.
    #[error("Account {0} is inactive")]
    AccountInactive(AccountId),

    /// Account type cannot be changed because it has ledger entries.
    #[error("Cannot change account type for account {0}: it has ledger entries")]
    HasLedgerEntries(AccountId),
}

impl AccountError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateCode(_) => "DUPLICATE_CODE",
            Self::InvalidCode(_) => "INVALID_CODE",
            Self::ParentNotFound(_) => "PARENT_NOT_FOUND",
            Self::ParentCycle(_) => "PARENT_CYCLE",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::HasLedgerEntries(_) => "ACCOUNT_HAS_LEDGER_ENTRIES",
        }
    }
}
