//! Report output structures.
//!
//! Serialized field names are stable; exporters render them verbatim.

use chrono::NaiveDate;
use lading_shared::types::{AccountId, CompanyId};
use lading_shared::Money;
use serde::{Deserialize, Serialize};

/// One account's contribution to a report section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBreakdown {
    /// The account.
    pub account_id: AccountId,
    /// Account code, for display ordering.
    pub code: String,
    /// Account name.
    pub name: String,
    /// The account's aggregated amount.
    pub amount: Money,
}

/// Profit and loss over a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitAndLossReport {
    /// Company reported on.
    pub company_id: CompanyId,
    /// Inclusive range start.
    pub start_date: NaiveDate,
    /// Inclusive range end.
    pub end_date: NaiveDate,
    /// Total revenue (credit postings on revenue accounts).
    pub revenue: Money,
    /// Total expenses (debit postings on expense accounts).
    pub expenses: Money,
    /// `revenue - expenses`.
    pub net_income: Money,
    /// Per-account revenue, ordered by code.
    pub revenue_breakdown: Vec<AccountBreakdown>,
    /// Per-account expenses, ordered by code.
    pub expense_breakdown: Vec<AccountBreakdown>,
}

/// One side of the balance sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetSection {
    /// Per-account balances, ordered by code. Zero-balance accounts are
    /// omitted.
    pub lines: Vec<AccountBreakdown>,
    /// Section total.
    pub total: Money,
}

/// Balance sheet as of a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// Company reported on.
    pub company_id: CompanyId,
    /// Balances include everything up to and including this date.
    pub as_of_date: NaiveDate,
    /// Asset accounts.
    pub assets: BalanceSheetSection,
    /// Liability accounts.
    pub liabilities: BalanceSheetSection,
    /// Equity accounts, excluding retained earnings.
    pub equity: BalanceSheetSection,
    /// Lifetime net income folded into equity so the sheet balances.
    pub retained_earnings: Money,
}

impl BalanceSheetReport {
    /// Total equity including retained earnings.
    #[must_use]
    pub fn total_equity(&self) -> Money {
        self.equity.total + self.retained_earnings
    }

    /// The accounting identity: assets = liabilities + equity.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.assets.total == self.liabilities.total + self.total_equity()
    }
}

/// Accounts-receivable aging buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgingBucket {
    /// Not yet past due.
    Current,
    /// 1-30 days past due.
    Days1To30,
    /// 31-60 days past due.
    Days31To60,
    /// 61-90 days past due.
    Days61To90,
    /// More than 90 days past due.
    Over90,
}

impl AgingBucket {
    /// Partitions days-past-due into exactly one bucket.
    #[must_use]
    pub fn from_days(days: i64) -> Self {
        match days {
            i64::MIN..=0 => Self::Current,
            1..=30 => Self::Days1To30,
            31..=60 => Self::Days31To60,
            61..=90 => Self::Days61To90,
            _ => Self::Over90,
        }
    }
}

/// AR aging report. Bucket totals are mutually exclusive and sum to the
/// total outstanding AR.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArAgingReport {
    /// Company reported on.
    pub company_id: CompanyId,
    /// The date aging was computed against.
    pub as_of_date: NaiveDate,
    /// Outstanding balances not yet past due.
    pub current: Money,
    /// 1-30 days past due.
    #[serde(rename = "days1to30")]
    pub days_1_to_30: Money,
    /// 31-60 days past due.
    #[serde(rename = "days31to60")]
    pub days_31_to_60: Money,
    /// 61-90 days past due.
    #[serde(rename = "days61to90")]
    pub days_61_to_90: Money,
    /// More than 90 days past due.
    #[serde(rename = "over90")]
    pub over_90: Money,
}

impl ArAgingReport {
    /// Total outstanding across all buckets.
    #[must_use]
    pub fn total_outstanding(&self) -> Money {
        self.current + self.days_1_to_30 + self.days_31_to_60 + self.days_61_to_90 + self.over_90
    }
}
