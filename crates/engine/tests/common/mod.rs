//! Shared fixtures for engine integration tests.

use std::sync::Once;

use chrono::NaiveDate;
use lading_shared::types::{CompanyId, UserId};
use lading_shared::Money;

use lading_core::accounts::AccountType;
use lading_engine::services::{ChartService, NewAccount};
use lading_engine::store::MemoryStore;

/// A store seeded with the five control accounts for one company.
pub struct Fixture {
    pub store: MemoryStore,
    pub company_id: CompanyId,
    pub user_id: UserId,
}

static TRACING: Once = Once::new();

/// Seeds the standard chart: 1000 Cash, 1100 AR, 2000 AP, 4000 Revenue,
/// 5000 Expense.
pub async fn seeded() -> Fixture {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });

    let store = MemoryStore::new();
    let company_id = CompanyId::new();
    let user_id = UserId::new();
    seed_chart(&store, company_id).await;
    Fixture {
        store,
        company_id,
        user_id,
    }
}

pub async fn seed_chart(store: &MemoryStore, company_id: CompanyId) {
    let chart = ChartService::new(store);
    let accounts = [
        ("1000", "Cash", AccountType::Asset),
        ("1100", "Accounts Receivable", AccountType::Asset),
        ("2000", "Accounts Payable", AccountType::Liability),
        ("4000", "Freight Revenue", AccountType::Revenue),
        ("5000", "Carrier Expense", AccountType::Expense),
    ];
    for (code, name, account_type) in accounts {
        chart
            .create_account(NewAccount {
                company_id,
                code: code.into(),
                name: name.into(),
                account_type,
                parent_id: None,
            })
            .await
            .expect("seed account");
    }
}

pub fn money(cents: i64) -> Money {
    Money::from_cents(cents)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
