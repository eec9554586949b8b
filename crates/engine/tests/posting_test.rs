//! Posting engine integration tests.

mod common;

use common::{date, money, seeded};
use uuid::Uuid;

use lading_core::ledger::{PostingLine, ReferenceType};
use lading_engine::services::PostingService;
use lading_engine::store::LedgerStore;
use lading_engine::EngineError;

#[tokio::test]
async fn test_balanced_posting_is_committed() {
    let fx = seeded().await;
    let service = PostingService::new(&fx.store);
    let accounts = fx.store.accounts(fx.company_id).await.unwrap();
    let cash = accounts.iter().find(|a| a.code == "1000").unwrap().id;
    let revenue = accounts.iter().find(|a| a.code == "4000").unwrap().id;

    let reference_id = Uuid::now_v7();
    let entries = service
        .post(
            fx.company_id,
            date(2025, 6, 1),
            vec![
                PostingLine::debit(cash, money(50_000), "cash in"),
                PostingLine::credit(revenue, money(50_000), "revenue"),
            ],
            ReferenceType::Adjustment,
            reference_id,
            fx.user_id,
        )
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);

    let stored = fx
        .store
        .entries_for_reference(fx.company_id, reference_id)
        .await
        .unwrap();
    assert_eq!(stored.len(), 2);
    let debits: lading_shared::Money = stored.iter().map(|e| e.debit).sum();
    let credits: lading_shared::Money = stored.iter().map(|e| e.credit).sum();
    assert_eq!(debits, credits);
}

#[tokio::test]
async fn test_unbalanced_posting_writes_nothing() {
    let fx = seeded().await;
    let service = PostingService::new(&fx.store);
    let accounts = fx.store.accounts(fx.company_id).await.unwrap();
    let cash = accounts.iter().find(|a| a.code == "1000").unwrap().id;
    let revenue = accounts.iter().find(|a| a.code == "4000").unwrap().id;

    let err = service
        .post(
            fx.company_id,
            date(2025, 6, 1),
            vec![
                PostingLine::debit(cash, money(50_000), "cash in"),
                PostingLine::credit(revenue, money(49_999), "revenue"),
            ],
            ReferenceType::Adjustment,
            Uuid::now_v7(),
            fx.user_id,
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "UNBALANCED_POSTING");
    assert!(fx.store.entries(fx.company_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_posting_to_unknown_account_rejected() {
    let fx = seeded().await;
    let service = PostingService::new(&fx.store);
    let unknown = lading_shared::types::AccountId::new();
    let accounts = fx.store.accounts(fx.company_id).await.unwrap();
    let cash = accounts.iter().find(|a| a.code == "1000").unwrap().id;

    let err = service
        .post(
            fx.company_id,
            date(2025, 6, 1),
            vec![
                PostingLine::debit(cash, money(100), "x"),
                PostingLine::credit(unknown, money(100), "x"),
            ],
            ReferenceType::Adjustment,
            Uuid::now_v7(),
            fx.user_id,
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "ACCOUNT_NOT_FOUND");
}

#[tokio::test]
async fn test_posting_to_inactive_account_rejected() {
    let fx = seeded().await;
    let chart = lading_engine::services::ChartService::new(&fx.store);
    let accounts = fx.store.accounts(fx.company_id).await.unwrap();
    let cash = accounts.iter().find(|a| a.code == "1000").unwrap().id;
    let revenue = accounts.iter().find(|a| a.code == "4000").unwrap().id;
    chart.deactivate(fx.company_id, revenue).await.unwrap();

    let service = PostingService::new(&fx.store);
    let err = service
        .post(
            fx.company_id,
            date(2025, 6, 1),
            vec![
                PostingLine::debit(cash, money(100), "x"),
                PostingLine::credit(revenue, money(100), "x"),
            ],
            ReferenceType::Adjustment,
            Uuid::now_v7(),
            fx.user_id,
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Ledger(lading_core::ledger::LedgerError::AccountInactive(_))
    ));
}

#[tokio::test]
async fn test_duplicate_account_code_rejected() {
    let fx = seeded().await;
    let chart = lading_engine::services::ChartService::new(&fx.store);
    let err = chart
        .create_account(lading_engine::services::NewAccount {
            company_id: fx.company_id,
            code: "1000".into(),
            name: "Second cash".into(),
            account_type: lading_core::accounts::AccountType::Asset,
            parent_id: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "DUPLICATE_CODE");
}

#[tokio::test]
async fn test_account_listings_filter_type_and_active() {
    let fx = seeded().await;
    let chart = lading_engine::services::ChartService::new(&fx.store);
    let accounts = fx.store.accounts(fx.company_id).await.unwrap();
    let receivable = accounts.iter().find(|a| a.code == "1100").unwrap().id;

    let assets = chart
        .accounts_by_type(fx.company_id, lading_core::accounts::AccountType::Asset)
        .await
        .unwrap();
    let codes: Vec<&str> = assets.iter().map(|a| a.code.as_str()).collect();
    assert_eq!(codes, ["1000", "1100"]);

    chart.deactivate(fx.company_id, receivable).await.unwrap();

    let assets = chart
        .accounts_by_type(fx.company_id, lading_core::accounts::AccountType::Asset)
        .await
        .unwrap();
    let codes: Vec<&str> = assets.iter().map(|a| a.code.as_str()).collect();
    assert_eq!(codes, ["1000"]);

    let active = chart.list_accounts(fx.company_id, true).await.unwrap();
    assert!(active.iter().all(|a| a.code != "1100"));
    let all = chart.list_accounts(fx.company_id, false).await.unwrap();
    assert!(all.iter().any(|a| a.code == "1100"));
}
