//! Control account resolution.
//!
//! Document postings land on well-known accounts identified by code. The
//! codes follow the standard small-business chart: 1000 cash, 1100
//! accounts receivable, 2000 accounts payable, 4000 revenue, 5000
//! expense.

use lading_shared::types::{AccountId, CompanyId};

use crate::store::LedgerStore;

use super::error::EngineError;

/// Cash control account code.
pub const CASH_CODE: &str = "1000";
/// Accounts-receivable control account code.
pub const RECEIVABLE_CODE: &str = "1100";
/// Accounts-payable control account code.
pub const PAYABLE_CODE: &str = "2000";
/// Freight-revenue control account code.
pub const REVENUE_CODE: &str = "4000";
/// Carrier-expense control account code.
pub const EXPENSE_CODE: &str = "5000";

/// The resolved control accounts for one company.
#[derive(Debug, Clone, Copy)]
pub struct ControlAccounts {
    /// Cash (asset).
    pub cash: AccountId,
    /// Accounts receivable (asset).
    pub receivable: AccountId,
    /// Accounts payable (liability).
    pub payable: AccountId,
    /// Freight revenue.
    pub revenue: AccountId,
    /// Carrier expense.
    pub expense: AccountId,
}

impl ControlAccounts {
    /// Looks up the five control accounts by code.
    ///
    /// # Errors
    ///
    /// Returns `MissingControlAccount` naming the first absent code.
    pub async fn resolve<S: LedgerStore>(
        store: &S,
        company_id: CompanyId,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            cash: lookup(store, company_id, CASH_CODE).await?,
            receivable: lookup(store, company_id, RECEIVABLE_CODE).await?,
            payable: lookup(store, company_id, PAYABLE_CODE).await?,
            revenue: lookup(store, company_id, REVENUE_CODE).await?,
            expense: lookup(store, company_id, EXPENSE_CODE).await?,
        })
    }
}

async fn lookup<S: LedgerStore>(
    store: &S,
    company_id: CompanyId,
    code: &'static str,
) -> Result<AccountId, EngineError> {
    store
        .account_by_code(company_id, code)
        .await?
        .map(|a| a.id)
        .ok_or(EngineError::MissingControlAccount(code))
}
