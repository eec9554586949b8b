//! Business rule validation for posting groups.

use lading_shared::Money;

use super::error::LedgerError;
use super::types::{PostingLine, PostingTotals};

/// Validates a posting group before it is appended to the ledger.
///
/// Rules:
/// 1. At least two lines.
/// 2. Every line sets exactly one of debit/credit, nonnegative.
/// 3. Total debits equal total credits. Amounts are fixed-point (two
///    decimals), so equality is exact - no epsilon.
///
/// # Errors
///
/// Returns the first violated rule as a `LedgerError`.
pub fn validate_lines(lines: &[PostingLine]) -> Result<PostingTotals, LedgerError> {
    if lines.len() < 2 {
        return Err(LedgerError::InsufficientLines);
    }

    let mut debits = Money::ZERO;
    let mut credits = Money::ZERO;

    for line in lines {
        if line.debit.is_negative() || line.credit.is_negative() {
            return Err(LedgerError::NegativeAmount);
        }
        match (line.debit.is_zero(), line.credit.is_zero()) {
            (false, false) => return Err(LedgerError::BothSidesSet),
            (true, true) => return Err(LedgerError::EmptyLine),
            _ => {}
        }
        debits += line.debit;
        credits += line.credit;
    }

    let totals = PostingTotals::new(debits, credits);
    if !totals.is_balanced {
        return Err(LedgerError::UnbalancedPosting { debits, credits });
    }

    Ok(totals)
}
