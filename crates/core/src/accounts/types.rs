//! Account domain types.

use chrono::{DateTime, Utc};
use lading_shared::types::{AccountId, CompanyId};
use lading_shared::Money;
use serde::{Deserialize, Serialize};

/// The five canonical account types.
///
/// In double-entry bookkeeping every account has a normal balance side:
/// - Asset/Expense accounts are debit-normal
/// - Liability/Equity/Revenue accounts are credit-normal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources the company owns (cash, receivables, equipment).
    Asset,
    /// Obligations the company owes (payables, loans).
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Income earned (freight revenue).
    Revenue,
    /// Costs incurred (carrier pay, fuel, overhead).
    Expense,
}

impl AccountType {
    /// Returns the normal balance side for this account type.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }

    /// Returns true if the type appears on the balance sheet.
    #[must_use]
    pub const fn is_balance_sheet(self) -> bool {
        matches!(self, Self::Asset | Self::Liability | Self::Equity)
    }

    /// Returns the string representation used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }
}

/// Which side increases an account's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Debit-normal accounts (Asset, Expense).
    Debit,
    /// Credit-normal accounts (Liability, Equity, Revenue).
    Credit,
}

impl NormalBalance {
    /// Calculates the balance change contributed by a debit/credit pair.
    ///
    /// Debit-normal: balance += debit - credit.
    /// Credit-normal: balance += credit - debit.
    #[must_use]
    pub fn balance_change(self, debit: Money, credit: Money) -> Money {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// A node in the chart of accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Company this account belongs to.
    pub company_id: CompanyId,
    /// Numeric account code, unique per company (e.g. "1100").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Account type; immutable once postings reference the account.
    pub account_type: AccountType,
    /// Optional parent account (forms a tree).
    pub parent_id: Option<AccountId>,
    /// Accounts are deactivated, never deleted.
    pub is_active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Returns the normal balance side of this account.
    #[must_use]
    pub const fn normal_balance(&self) -> NormalBalance {
        self.account_type.normal_balance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lading_shared::Money;

    #[test]
    fn test_normal_balance_sides() {
        assert_eq!(AccountType::Asset.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountType::Expense.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountType::Liability.normal_balance(), NormalBalance::Credit);
        assert_eq!(AccountType::Equity.normal_balance(), NormalBalance::Credit);
        assert_eq!(AccountType::Revenue.normal_balance(), NormalBalance::Credit);
    }

    #[test]
    fn test_balance_change_debit_normal() {
        let n = NormalBalance::Debit;
        assert_eq!(
            n.balance_change(Money::from_cents(10_000), Money::ZERO),
            Money::from_cents(10_000)
        );
        assert_eq!(
            n.balance_change(Money::ZERO, Money::from_cents(3_000)),
            Money::from_cents(-3_000)
        );
    }

    #[test]
    fn test_balance_change_credit_normal() {
        let n = NormalBalance::Credit;
        assert_eq!(
            n.balance_change(Money::ZERO, Money::from_cents(10_000)),
            Money::from_cents(10_000)
        );
        assert_eq!(
            n.balance_change(Money::from_cents(4_000), Money::ZERO),
            Money::from_cents(-4_000)
        );
    }

    #[test]
    fn test_balance_sheet_classification() {
        assert!(AccountType::Asset.is_balance_sheet());
        assert!(AccountType::Liability.is_balance_sheet());
        assert!(AccountType::Equity.is_balance_sheet());
        assert!(!AccountType::Revenue.is_balance_sheet());
        assert!(!AccountType::Expense.is_balance_sheet());
    }
}
