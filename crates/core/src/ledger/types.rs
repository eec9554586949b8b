//! Journal entry domain types.

use chrono::{DateTime, NaiveDate, Utc};
use lading_shared::types::{AccountId, CompanyId, JournalEntryId, UserId};
use lading_shared::Money;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::accounts::NormalBalance;

/// The kind of document that caused a posting group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceType {
    /// Receivable invoice issued to a customer.
    Invoice,
    /// Payable bill received from a vendor.
    Bill,
    /// Cash movement applied to a document or standing alone.
    Payment,
    /// Manual correcting entry.
    Adjustment,
}

impl ReferenceType {
    /// Returns the string representation used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Bill => "bill",
            Self::Payment => "payment",
            Self::Adjustment => "adjustment",
        }
    }
}

/// Input for one line of a posting group.
///
/// Exactly one of `debit`/`credit` must be nonzero; both must be
/// nonnegative. Callers supply fully-formed balanced line sets - the
/// posting engine validates but never invents lines.
#[derive(Debug, Clone)]
pub struct PostingLine {
    /// The account to post to.
    pub account_id: AccountId,
    /// Debit amount (>= 0).
    pub debit: Money,
    /// Credit amount (>= 0).
    pub credit: Money,
    /// Free-text description for this line.
    pub description: String,
}

impl PostingLine {
    /// Builds a debit line.
    #[must_use]
    pub fn debit(account_id: AccountId, amount: Money, description: impl Into<String>) -> Self {
        Self {
            account_id,
            debit: amount,
            credit: Money::ZERO,
            description: description.into(),
        }
    }

    /// Builds a credit line.
    #[must_use]
    pub fn credit(account_id: AccountId, amount: Money, description: impl Into<String>) -> Self {
        Self {
            account_id,
            debit: Money::ZERO,
            credit: amount,
            description: description.into(),
        }
    }
}

/// One immutable row in the general ledger.
///
/// Entries are append-only: corrections are new offsetting entries, never
/// edits. For any `reference_id`, the group of entries sharing it balances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: JournalEntryId,
    /// Company this entry belongs to.
    pub company_id: CompanyId,
    /// Transaction date.
    pub transaction_date: NaiveDate,
    /// The account affected.
    pub account_id: AccountId,
    /// Debit amount (zero when this is a credit line).
    pub debit: Money,
    /// Credit amount (zero when this is a debit line).
    pub credit: Money,
    /// Free-text description.
    pub description: String,
    /// The kind of document that caused this entry.
    pub reference_type: ReferenceType,
    /// The document that caused this entry.
    pub reference_id: Uuid,
    /// Who created the entry.
    pub created_by: UserId,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Returns the balance change this entry contributes to an account
    /// with the given normal side.
    #[must_use]
    pub fn balance_change(&self, normal: NormalBalance) -> Money {
        normal.balance_change(self.debit, self.credit)
    }
}

/// Totals for a posting group, used for validation and display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingTotals {
    /// Sum of debit amounts.
    pub debits: Money,
    /// Sum of credit amounts.
    pub credits: Money,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

impl PostingTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(debits: Money, credits: Money) -> Self {
        Self {
            debits,
            credits,
            is_balanced: debits == credits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_totals_balanced() {
        let totals = PostingTotals::new(Money::from_cents(10_000), Money::from_cents(10_000));
        assert!(totals.is_balanced);
    }

    #[test]
    fn test_posting_totals_unbalanced() {
        let totals = PostingTotals::new(Money::from_cents(10_000), Money::from_cents(5_000));
        assert!(!totals.is_balanced);
    }

    #[test]
    fn test_line_constructors() {
        let account = AccountId::new();
        let d = PostingLine::debit(account, Money::from_cents(100), "d");
        assert!(d.credit.is_zero());
        let c = PostingLine::credit(account, Money::from_cents(100), "c");
        assert!(c.debit.is_zero());
    }

    #[test]
    fn test_reference_type_wire_names() {
        assert_eq!(ReferenceType::Invoice.as_str(), "invoice");
        assert_eq!(ReferenceType::Payment.as_str(), "payment");
    }
}
