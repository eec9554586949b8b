//! The storage abstraction.
//!
//! `LedgerStore` is the only seam between the services and persistence.
//! It offers snapshot reads, store-native atomic sequence allocation, and
//! a single `commit` that applies a `WriteBatch` all-or-nothing. The
//! in-memory implementation is the reference for the commit semantics a
//! real backend must reproduce.

pub mod batch;
pub mod error;
pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use lading_shared::types::{
    AccountId, BillId, CompanyId, InvoiceId, MatchId, PaymentId, TemplateId,
};
use uuid::Uuid;

use lading_core::accounts::Account;
use lading_core::documents::{Bill, Invoice, Payment, SequenceKind};
use lading_core::ledger::JournalEntry;
use lading_core::reconcile::BankTransactionMatch;
use lading_core::recurring::RecurringTemplate;

pub use batch::{Mutation, VersionGuard, WriteBatch};
pub use error::StoreError;
pub use memory::MemoryStore;

/// Snapshot reads, sequence allocation, and atomic commits.
///
/// All reads are scoped by `CompanyId`; a store never returns another
/// company's rows. Reads see a consistent snapshot that may lag an
/// in-flight commit.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Fetches one account.
    async fn account(
        &self,
        company_id: CompanyId,
        id: AccountId,
    ) -> Result<Option<Account>, StoreError>;

    /// Fetches an account by its code.
    async fn account_by_code(
        &self,
        company_id: CompanyId,
        code: &str,
    ) -> Result<Option<Account>, StoreError>;

    /// Lists all accounts, ordered by code ascending.
    async fn accounts(&self, company_id: CompanyId) -> Result<Vec<Account>, StoreError>;

    /// Returns true if any journal entry references the account.
    async fn account_has_entries(
        &self,
        company_id: CompanyId,
        id: AccountId,
    ) -> Result<bool, StoreError>;

    /// Lists all journal entries in commit order.
    async fn entries(&self, company_id: CompanyId) -> Result<Vec<JournalEntry>, StoreError>;

    /// Lists the entries posted under one reference id.
    async fn entries_for_reference(
        &self,
        company_id: CompanyId,
        reference_id: Uuid,
    ) -> Result<Vec<JournalEntry>, StoreError>;

    /// Fetches one invoice.
    async fn invoice(
        &self,
        company_id: CompanyId,
        id: InvoiceId,
    ) -> Result<Option<Invoice>, StoreError>;

    /// Lists all invoices.
    async fn invoices(&self, company_id: CompanyId) -> Result<Vec<Invoice>, StoreError>;

    /// Fetches one bill.
    async fn bill(&self, company_id: CompanyId, id: BillId) -> Result<Option<Bill>, StoreError>;

    /// Lists all bills.
    async fn bills(&self, company_id: CompanyId) -> Result<Vec<Bill>, StoreError>;

    /// Fetches one payment.
    async fn payment(
        &self,
        company_id: CompanyId,
        id: PaymentId,
    ) -> Result<Option<Payment>, StoreError>;

    /// Lists all payments.
    async fn payments(&self, company_id: CompanyId) -> Result<Vec<Payment>, StoreError>;

    /// Fetches one match proposal.
    async fn match_record(
        &self,
        company_id: CompanyId,
        id: MatchId,
    ) -> Result<Option<BankTransactionMatch>, StoreError>;

    /// Lists the proposals recorded for one bank transaction, oldest
    /// first.
    async fn matches_for(
        &self,
        company_id: CompanyId,
        bank_txn_id: &str,
    ) -> Result<Vec<BankTransactionMatch>, StoreError>;

    /// Fetches one recurring template.
    async fn template(
        &self,
        company_id: CompanyId,
        id: TemplateId,
    ) -> Result<Option<RecurringTemplate>, StoreError>;

    /// Lists all recurring templates.
    async fn templates(&self, company_id: CompanyId)
        -> Result<Vec<RecurringTemplate>, StoreError>;

    /// Returns true if the template already fired for the date.
    async fn was_fired(
        &self,
        company_id: CompanyId,
        template_id: TemplateId,
        scheduled_run_date: NaiveDate,
    ) -> Result<bool, StoreError>;

    /// Atomically allocates the next sequence number for a company, kind,
    /// and year. Starts at 1; values are never reused, even if the commit
    /// the number was allocated for later fails.
    async fn next_sequence(
        &self,
        company_id: CompanyId,
        kind: SequenceKind,
        year: i32,
    ) -> Result<u32, StoreError>;

    /// Applies a batch all-or-nothing: every guard is checked first and
    /// any failure leaves the store untouched.
    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;
}
