//! Report aggregation tests.

use chrono::{NaiveDate, Utc};
use lading_shared::types::{AccountId, CompanyId, CustomerId, InvoiceId, JournalEntryId, UserId};
use lading_shared::Money;
use uuid::Uuid;

use crate::accounts::{Account, AccountType};
use crate::documents::{Invoice, InvoiceStatus, PaymentTerms};
use crate::ledger::{JournalEntry, ReferenceType};

use super::service::{ar_aging, balance_sheet, profit_and_loss};
use super::types::AgingBucket;

fn account(company: CompanyId, code: &str, name: &str, account_type: AccountType) -> Account {
    Account {
        id: AccountId::new(),
        company_id: company,
        code: code.into(),
        name: name.into(),
        account_type,
        parent_id: None,
        is_active: true,
        created_at: Utc::now(),
    }
}

fn entry(
    company: CompanyId,
    account_id: AccountId,
    date: NaiveDate,
    debit_cents: i64,
    credit_cents: i64,
) -> JournalEntry {
    JournalEntry {
        id: JournalEntryId::new(),
        company_id: company,
        transaction_date: date,
        account_id,
        debit: Money::from_cents(debit_cents),
        credit: Money::from_cents(credit_cents),
        description: "test".into(),
        reference_type: ReferenceType::Invoice,
        reference_id: Uuid::now_v7(),
        created_by: UserId::new(),
        created_at: Utc::now(),
    }
}

fn invoice(
    company: CompanyId,
    total_cents: i64,
    paid_cents: i64,
    due_date: NaiveDate,
    status: InvoiceStatus,
) -> Invoice {
    Invoice {
        id: InvoiceId::new(),
        company_id: company,
        number: "INV-2025-0001".into(),
        customer_id: CustomerId::new(),
        load_id: None,
        issue_date: due_date,
        due_date,
        subtotal: Money::from_cents(total_cents),
        tax_amount: Money::ZERO,
        total_amount: Money::from_cents(total_cents),
        amount_paid: Money::from_cents(paid_cents),
        status,
        terms: PaymentTerms::DueOnReceipt,
        description: "freight".into(),
        is_recurring: false,
        version: 1,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A small posted ledger: one invoice for 1000.00 (AR/Revenue) and one
/// bill for 600.00 (Expense/AP), then 400.00 cash received (Cash/AR).
fn sample_ledger(company: CompanyId) -> (Vec<Account>, Vec<JournalEntry>) {
    let cash = account(company, "1000", "Cash", AccountType::Asset);
    let ar = account(company, "1100", "Accounts Receivable", AccountType::Asset);
    let ap = account(company, "2000", "Accounts Payable", AccountType::Liability);
    let revenue = account(company, "4000", "Freight Revenue", AccountType::Revenue);
    let expense = account(company, "5000", "Carrier Expense", AccountType::Expense);
    let d = date(2025, 6, 10);

    let entries = vec![
        entry(company, ar.id, d, 100_000, 0),
        entry(company, revenue.id, d, 0, 100_000),
        entry(company, expense.id, d, 60_000, 0),
        entry(company, ap.id, d, 0, 60_000),
        entry(company, cash.id, d, 40_000, 0),
        entry(company, ar.id, d, 0, 40_000),
    ];
    (vec![cash, ar, ap, revenue, expense], entries)
}

#[test]
fn test_profit_and_loss_totals() {
    let company = CompanyId::new();
    let (accounts, entries) = sample_ledger(company);

    let report = profit_and_loss(
        company,
        &accounts,
        &entries,
        date(2025, 6, 1),
        date(2025, 6, 30),
    );
    assert_eq!(report.revenue, Money::from_cents(100_000));
    assert_eq!(report.expenses, Money::from_cents(60_000));
    assert_eq!(report.net_income, Money::from_cents(40_000));
    assert_eq!(report.revenue_breakdown.len(), 1);
    assert_eq!(report.revenue_breakdown[0].code, "4000");
}

#[test]
fn test_profit_and_loss_respects_date_range() {
    let company = CompanyId::new();
    let (accounts, entries) = sample_ledger(company);

    // Range entirely before the activity.
    let report = profit_and_loss(
        company,
        &accounts,
        &entries,
        date(2025, 5, 1),
        date(2025, 5, 31),
    );
    assert_eq!(report.revenue, Money::ZERO);
    assert_eq!(report.expenses, Money::ZERO);
    assert_eq!(report.net_income, Money::ZERO);
    assert!(report.revenue_breakdown.is_empty());
}

#[test]
fn test_balance_sheet_identity() {
    let company = CompanyId::new();
    let (accounts, entries) = sample_ledger(company);

    let report = balance_sheet(company, &accounts, &entries, date(2025, 6, 30));

    // Assets: cash 400 + AR 600 = 1000.
    assert_eq!(report.assets.total, Money::from_cents(100_000));
    // Liabilities: AP 600.
    assert_eq!(report.liabilities.total, Money::from_cents(60_000));
    // No equity accounts; retained earnings carries net income 400.
    assert_eq!(report.equity.total, Money::ZERO);
    assert_eq!(report.retained_earnings, Money::from_cents(40_000));
    assert!(report.is_balanced());
}

#[test]
fn test_balance_sheet_as_of_excludes_later_entries() {
    let company = CompanyId::new();
    let (accounts, entries) = sample_ledger(company);

    let report = balance_sheet(company, &accounts, &entries, date(2025, 6, 1));
    assert_eq!(report.assets.total, Money::ZERO);
    assert_eq!(report.liabilities.total, Money::ZERO);
    assert!(report.is_balanced());
}

#[test]
fn test_empty_company_reports_zeroes() {
    let company = CompanyId::new();

    let pnl = profit_and_loss(company, &[], &[], date(2025, 1, 1), date(2025, 12, 31));
    assert_eq!(pnl.net_income, Money::ZERO);

    let bs = balance_sheet(company, &[], &[], date(2025, 12, 31));
    assert!(bs.is_balanced());
    assert_eq!(bs.assets.total, Money::ZERO);

    let aging = ar_aging(company, &[], date(2025, 12, 31));
    assert_eq!(aging.total_outstanding(), Money::ZERO);
}

#[test]
fn test_aging_bucket_boundaries() {
    assert_eq!(AgingBucket::from_days(0), AgingBucket::Current);
    assert_eq!(AgingBucket::from_days(1), AgingBucket::Days1To30);
    assert_eq!(AgingBucket::from_days(30), AgingBucket::Days1To30);
    assert_eq!(AgingBucket::from_days(31), AgingBucket::Days31To60);
    assert_eq!(AgingBucket::from_days(45), AgingBucket::Days31To60);
    assert_eq!(AgingBucket::from_days(60), AgingBucket::Days31To60);
    assert_eq!(AgingBucket::from_days(61), AgingBucket::Days61To90);
    assert_eq!(AgingBucket::from_days(90), AgingBucket::Days61To90);
    assert_eq!(AgingBucket::from_days(91), AgingBucket::Over90);
}

#[test]
fn test_ar_aging_partitions_outstanding() {
    let company = CompanyId::new();
    let today = date(2025, 8, 1);

    let invoices = vec![
        // Due in the future: current.
        invoice(company, 100_000, 0, date(2025, 8, 20), InvoiceStatus::Sent),
        // 45 days past due, 600.00 outstanding after partial payment.
        invoice(
            company,
            100_000,
            40_000,
            date(2025, 6, 17),
            InvoiceStatus::Overdue,
        ),
        // 100 days past due.
        invoice(
            company,
            50_000,
            0,
            date(2025, 4, 23),
            InvoiceStatus::Overdue,
        ),
        // Fully paid: excluded.
        invoice(
            company,
            25_000,
            25_000,
            date(2025, 6, 1),
            InvoiceStatus::Paid,
        ),
        // Cancelled: excluded.
        invoice(
            company,
            30_000,
            0,
            date(2025, 6, 1),
            InvoiceStatus::Cancelled,
        ),
        // Draft: not yet issued, excluded.
        invoice(company, 10_000, 0, date(2025, 6, 1), InvoiceStatus::Draft),
    ];

    let report = ar_aging(company, &invoices, today);
    assert_eq!(report.current, Money::from_cents(100_000));
    assert_eq!(report.days_31_to_60, Money::from_cents(60_000));
    assert_eq!(report.over_90, Money::from_cents(50_000));
    assert_eq!(report.days_1_to_30, Money::ZERO);
    assert_eq!(report.days_61_to_90, Money::ZERO);
    assert_eq!(report.total_outstanding(), Money::from_cents(210_000));
}

#[test]
fn test_aging_report_serde_field_names() {
    let company = CompanyId::new();
    let report = ar_aging(company, &[], date(2025, 8, 1));
    let json = serde_json::to_value(&report).unwrap();
    for field in ["current", "days1to30", "days31to60", "days61to90", "over90"] {
        assert!(json.get(field).is_some(), "missing field {field}");
    }
}
