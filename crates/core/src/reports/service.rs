//! Report aggregation over in-memory slices.
//!
//! The storage layer fetches a company's accounts, journal entries, and
//! invoices; these functions do the rest. Inputs are assumed to belong to
//! the company named in the call.

use std::collections::HashMap;

use chrono::NaiveDate;
use lading_shared::types::{AccountId, CompanyId};
use lading_shared::Money;

use crate::accounts::{Account, AccountType};
use crate::documents::{Invoice, InvoiceStatus};
use crate::ledger::{AccountBalance, JournalEntry};

use super::types::{
    AccountBreakdown, AgingBucket, ArAgingReport, BalanceSheetReport, BalanceSheetSection,
    ProfitAndLossReport,
};

/// Profit and loss over `[start_date, end_date]`.
///
/// Revenue is the sum of credit postings on revenue accounts in range,
/// expenses the sum of debit postings on expense accounts. Contra
/// activity (debits on revenue, credits on expense) nets against the
/// totals.
#[must_use]
pub fn profit_and_loss(
    company_id: CompanyId,
    accounts: &[Account],
    entries: &[JournalEntry],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> ProfitAndLossReport {
    let by_id = index_accounts(accounts);
    let mut revenue_totals: HashMap<AccountId, Money> = HashMap::new();
    let mut expense_totals: HashMap<AccountId, Money> = HashMap::new();

    for entry in entries {
        if entry.transaction_date < start_date || entry.transaction_date > end_date {
            continue;
        }
        let Some(account) = by_id.get(&entry.account_id) else {
            continue;
        };
        match account.account_type {
            AccountType::Revenue => {
                *revenue_totals.entry(account.id).or_default() += entry.credit - entry.debit;
            }
            AccountType::Expense => {
                *expense_totals.entry(account.id).or_default() += entry.debit - entry.credit;
            }
            _ => {}
        }
    }

    let revenue_breakdown = breakdown(&by_id, &revenue_totals);
    let expense_breakdown = breakdown(&by_id, &expense_totals);
    let revenue: Money = revenue_breakdown.iter().map(|b| b.amount).sum();
    let expenses: Money = expense_breakdown.iter().map(|b| b.amount).sum();

    ProfitAndLossReport {
        company_id,
        start_date,
        end_date,
        revenue,
        expenses,
        net_income: revenue - expenses,
        revenue_breakdown,
        expense_breakdown,
    }
}

/// Balance sheet as of `as_of_date` (inclusive).
///
/// Lifetime net income up to the date is reported as retained earnings
/// within equity, which is what makes the sheet balance: every revenue
/// credit has an asset debit somewhere, and retained earnings is where
/// that credit lands on the equity side.
#[must_use]
pub fn balance_sheet(
    company_id: CompanyId,
    accounts: &[Account],
    entries: &[JournalEntry],
    as_of_date: NaiveDate,
) -> BalanceSheetReport {
    let by_id = index_accounts(accounts);
    let mut balances: HashMap<AccountId, AccountBalance> = HashMap::new();
    let mut retained_earnings = Money::ZERO;

    for entry in entries {
        if entry.transaction_date > as_of_date {
            continue;
        }
        let Some(account) = by_id.get(&entry.account_id) else {
            continue;
        };
        let normal = account.account_type.normal_balance();
        if account.account_type.is_balance_sheet() {
            balances
                .entry(account.id)
                .or_insert_with(|| AccountBalance::new(account.id, normal))
                .add_entry(entry);
        } else {
            // Revenue and expense roll into retained earnings. Both are
            // credit/debit-normal respectively, so revenue adds and
            // expense subtracts.
            match account.account_type {
                AccountType::Revenue => retained_earnings += entry.balance_change(normal),
                AccountType::Expense => retained_earnings -= entry.balance_change(normal),
                _ => {}
            }
        }
    }

    let balances: HashMap<AccountId, Money> = balances
        .iter()
        .map(|(&id, acc)| (id, acc.balance))
        .collect();

    BalanceSheetReport {
        company_id,
        as_of_date,
        assets: section(&by_id, &balances, AccountType::Asset),
        liabilities: section(&by_id, &balances, AccountType::Liability),
        equity: section(&by_id, &balances, AccountType::Equity),
        retained_earnings,
    }
}

/// AR aging as of `as_of_date`.
///
/// Every issued, non-fully-paid invoice contributes its outstanding
/// balance to exactly one bucket. Draft and cancelled invoices are
/// excluded: a draft has not been issued and a cancelled invoice has
/// been reversed.
#[must_use]
pub fn ar_aging(
    company_id: CompanyId,
    invoices: &[Invoice],
    as_of_date: NaiveDate,
) -> ArAgingReport {
    let mut report = ArAgingReport {
        company_id,
        as_of_date,
        current: Money::ZERO,
        days_1_to_30: Money::ZERO,
        days_31_to_60: Money::ZERO,
        days_61_to_90: Money::ZERO,
        over_90: Money::ZERO,
    };

    for invoice in invoices {
        if invoice.status == InvoiceStatus::Draft || !invoice.status.is_open() {
            continue;
        }
        let outstanding = invoice.outstanding();
        if !outstanding.is_positive() {
            continue;
        }
        let bucket = match AgingBucket::from_days(invoice.aging_days(as_of_date)) {
            AgingBucket::Current => &mut report.current,
            AgingBucket::Days1To30 => &mut report.days_1_to_30,
            AgingBucket::Days31To60 => &mut report.days_31_to_60,
            AgingBucket::Days61To90 => &mut report.days_61_to_90,
            AgingBucket::Over90 => &mut report.over_90,
        };
        *bucket += outstanding;
    }

    report
}

fn index_accounts(accounts: &[Account]) -> HashMap<AccountId, &Account> {
    accounts.iter().map(|a| (a.id, a)).collect()
}

/// Nonzero totals as breakdown lines, ordered by account code.
fn breakdown(
    by_id: &HashMap<AccountId, &Account>,
    totals: &HashMap<AccountId, Money>,
) -> Vec<AccountBreakdown> {
    let mut lines: Vec<AccountBreakdown> = totals
        .iter()
        .filter(|(_, amount)| !amount.is_zero())
        .filter_map(|(id, &amount)| {
            by_id.get(id).map(|account| AccountBreakdown {
                account_id: *id,
                code: account.code.clone(),
                name: account.name.clone(),
                amount,
            })
        })
        .collect();
    lines.sort_by(|a, b| a.code.cmp(&b.code));
    lines
}

fn section(
    by_id: &HashMap<AccountId, &Account>,
    balances: &HashMap<AccountId, Money>,
    account_type: AccountType,
) -> BalanceSheetSection {
    let totals: HashMap<AccountId, Money> = balances
        .iter()
        .filter(|(id, _)| {
            by_id
                .get(*id)
                .is_some_and(|a| a.account_type == account_type)
        })
        .map(|(&id, &amount)| (id, amount))
        .collect();
    let lines = breakdown(by_id, &totals);
    let total = lines.iter().map(|l| l.amount).sum();
    BalanceSheetSection { lines, total }
}
