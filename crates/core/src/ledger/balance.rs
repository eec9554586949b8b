//! Account balance accumulation.

use lading_shared::types::AccountId;
use lading_shared::Money;
use serde::{Deserialize, Serialize};

use crate::accounts::NormalBalance;
use crate::ledger::JournalEntry;

/// Accumulated balance for one account.
///
/// The net balance follows the account's normal side:
/// debit-normal accounts grow with debits, credit-normal with credits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalance {
    /// The account ID.
    pub account_id: AccountId,
    /// Which side increases this account.
    pub normal_balance: NormalBalance,
    /// Total debit amount.
    pub debit_total: Money,
    /// Total credit amount.
    pub credit_total: Money,
    /// Net balance.
    pub balance: Money,
}

impl AccountBalance {
    /// Creates an empty balance for an account.
    #[must_use]
    pub fn new(account_id: AccountId, normal_balance: NormalBalance) -> Self {
        Self {
            account_id,
            normal_balance,
            debit_total: Money::ZERO,
            credit_total: Money::ZERO,
            balance: Money::ZERO,
        }
    }

    /// Accumulates one journal entry.
    pub fn add_entry(&mut self, entry: &JournalEntry) {
        self.debit_total += entry.debit;
        self.credit_total += entry.credit;
        self.balance = self
            .normal_balance
            .balance_change(self.debit_total, self.credit_total);
    }
}
