//! Reporting service.

use chrono::NaiveDate;
use lading_shared::types::CompanyId;

use lading_core::reports::{
    ar_aging, balance_sheet, profit_and_loss, ArAgingReport, BalanceSheetReport,
    ProfitAndLossReport,
};

use crate::store::LedgerStore;

use super::error::EngineError;

/// Read-only aggregation over the store. Reads are snapshot-consistent
/// and may lag an in-flight commit; reports never mutate anything and
/// never error on empty data.
pub struct ReportService<'a, S: LedgerStore> {
    store: &'a S,
}

impl<'a, S: LedgerStore> ReportService<'a, S> {
    /// Creates a service over a store.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Profit and loss over an inclusive date range.
    pub async fn profit_and_loss(
        &self,
        company_id: CompanyId,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<ProfitAndLossReport, EngineError> {
        let accounts = self.store.accounts(company_id).await?;
        let entries = self.store.entries(company_id).await?;
        Ok(profit_and_loss(
            company_id, &accounts, &entries, start_date, end_date,
        ))
    }

    /// Balance sheet as of a date (inclusive).
    pub async fn balance_sheet(
        &self,
        company_id: CompanyId,
        as_of_date: NaiveDate,
    ) -> Result<BalanceSheetReport, EngineError> {
        let accounts = self.store.accounts(company_id).await?;
        let entries = self.store.entries(company_id).await?;
        Ok(balance_sheet(company_id, &accounts, &entries, as_of_date))
    }

    /// AR aging as of a date.
    pub async fn ar_aging(
        &self,
        company_id: CompanyId,
        as_of_date: NaiveDate,
    ) -> Result<ArAgingReport, EngineError> {
        let invoices = self.store.invoices(company_id).await?;
        Ok(ar_aging(company_id, &invoices, as_of_date))
    }
}
