//! Double-entry posting logic.
//!
//! This module implements the general-ledger core:
//! - Journal entry lines (debits and credits)
//! - Posting-group validation (balanced, one side per line)
//! - Balance accumulation by normal side
//! - Error types for posting operations

pub mod balance;
pub mod error;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use balance::AccountBalance;
pub use error::LedgerError;
pub use types::{JournalEntry, PostingLine, PostingTotals, ReferenceType};
pub use validation::validate_lines;
