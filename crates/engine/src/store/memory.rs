//! In-memory reference store.
//!
//! A single async mutex serializes commits, which gives the batch its
//! all-or-nothing behavior for free: guards are checked first, and only
//! when every precondition holds are the mutations applied. Reads clone
//! out of the locked state, so they observe a consistent snapshot.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::NaiveDate;
use lading_shared::types::{
    AccountId, BillId, CompanyId, InvoiceId, MatchId, PaymentId, TemplateId,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use lading_core::accounts::Account;
use lading_core::documents::{Bill, Invoice, Payment, SequenceKind};
use lading_core::ledger::JournalEntry;
use lading_core::reconcile::BankTransactionMatch;
use lading_core::recurring::RecurringTemplate;

use super::batch::{Mutation, VersionGuard, WriteBatch};
use super::error::StoreError;
use super::LedgerStore;

#[derive(Default)]
struct Inner {
    accounts: HashMap<(CompanyId, AccountId), Account>,
    entries: Vec<JournalEntry>,
    invoices: HashMap<(CompanyId, InvoiceId), Invoice>,
    bills: HashMap<(CompanyId, BillId), Bill>,
    payments: HashMap<(CompanyId, PaymentId), Payment>,
    matches: HashMap<(CompanyId, MatchId), BankTransactionMatch>,
    templates: HashMap<(CompanyId, TemplateId), RecurringTemplate>,
    fired: HashSet<(CompanyId, TemplateId, NaiveDate)>,
    sequences: HashMap<(CompanyId, SequenceKind, i32), u32>,
}

impl Inner {
    fn check_guard(&self, company_id: CompanyId, guard: VersionGuard) -> Result<(), StoreError> {
        match guard {
            VersionGuard::Invoice { id, expected } => check_version(
                "invoice",
                id.into_inner(),
                self.invoices.get(&(company_id, id)).map(|i| i.version),
                expected,
            ),
            VersionGuard::Bill { id, expected } => check_version(
                "bill",
                id.into_inner(),
                self.bills.get(&(company_id, id)).map(|b| b.version),
                expected,
            ),
            VersionGuard::Template { id, expected } => check_version(
                "template",
                id.into_inner(),
                self.templates.get(&(company_id, id)).map(|t| t.version),
                expected,
            ),
        }
    }

    fn apply(&mut self, company_id: CompanyId, mutation: Mutation) {
        match mutation {
            Mutation::PutAccount(account) => {
                self.accounts.insert((company_id, account.id), account);
            }
            Mutation::AppendEntries(entries) => {
                self.entries.extend(entries);
            }
            Mutation::PutInvoice(mut invoice) => {
                let key = (company_id, invoice.id);
                invoice.version = self.invoices.get(&key).map_or(1, |prev| prev.version + 1);
                self.invoices.insert(key, invoice);
            }
            Mutation::PutBill(mut bill) => {
                let key = (company_id, bill.id);
                bill.version = self.bills.get(&key).map_or(1, |prev| prev.version + 1);
                self.bills.insert(key, bill);
            }
            Mutation::PutPayment(payment) => {
                self.payments.insert((company_id, payment.id), payment);
            }
            Mutation::PutMatch(record) => {
                self.matches.insert((company_id, record.id), record);
            }
            Mutation::PutTemplate(mut template) => {
                let key = (company_id, template.id);
                template.version = self.templates.get(&key).map_or(1, |prev| prev.version + 1);
                self.templates.insert(key, template);
            }
            Mutation::MarkFired {
                template_id,
                scheduled_run_date,
            } => {
                self.fired
                    .insert((company_id, template_id, scheduled_run_date));
            }
        }
    }
}

fn check_version(
    entity: &'static str,
    id: Uuid,
    current: Option<u64>,
    expected: u64,
) -> Result<(), StoreError> {
    match current {
        None => Err(StoreError::GuardTargetMissing { entity, id }),
        Some(version) if version != expected => Err(StoreError::VersionConflict { entity, id }),
        Some(_) => Ok(()),
    }
}

/// The in-memory `LedgerStore`.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn account(
        &self,
        company_id: CompanyId,
        id: AccountId,
    ) -> Result<Option<Account>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.accounts.get(&(company_id, id)).cloned())
    }

    async fn account_by_code(
        &self,
        company_id: CompanyId,
        code: &str,
    ) -> Result<Option<Account>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .accounts
            .values()
            .find(|a| a.company_id == company_id && a.code == code)
            .cloned())
    }

    async fn accounts(&self, company_id: CompanyId) -> Result<Vec<Account>, StoreError> {
        let inner = self.inner.lock().await;
        let mut accounts: Vec<Account> = inner
            .accounts
            .values()
            .filter(|a| a.company_id == company_id)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(accounts)
    }

    async fn account_has_entries(
        &self,
        company_id: CompanyId,
        id: AccountId,
    ) -> Result<bool, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .entries
            .iter()
            .any(|e| e.company_id == company_id && e.account_id == id))
    }

    async fn entries(&self, company_id: CompanyId) -> Result<Vec<JournalEntry>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .entries
            .iter()
            .filter(|e| e.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn entries_for_reference(
        &self,
        company_id: CompanyId,
        reference_id: Uuid,
    ) -> Result<Vec<JournalEntry>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .entries
            .iter()
            .filter(|e| e.company_id == company_id && e.reference_id == reference_id)
            .cloned()
            .collect())
    }

    async fn invoice(
        &self,
        company_id: CompanyId,
        id: InvoiceId,
    ) -> Result<Option<Invoice>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.invoices.get(&(company_id, id)).cloned())
    }

    async fn invoices(&self, company_id: CompanyId) -> Result<Vec<Invoice>, StoreError> {
        let inner = self.inner.lock().await;
        let mut invoices: Vec<Invoice> = inner
            .invoices
            .values()
            .filter(|i| i.company_id == company_id)
            .cloned()
            .collect();
        invoices.sort_by(|a, b| a.number.cmp(&b.number));
        Ok(invoices)
    }

    async fn bill(&self, company_id: CompanyId, id: BillId) -> Result<Option<Bill>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.bills.get(&(company_id, id)).cloned())
    }

    async fn bills(&self, company_id: CompanyId) -> Result<Vec<Bill>, StoreError> {
        let inner = self.inner.lock().await;
        let mut bills: Vec<Bill> = inner
            .bills
            .values()
            .filter(|b| b.company_id == company_id)
            .cloned()
            .collect();
        bills.sort_by(|a, b| a.number.cmp(&b.number));
        Ok(bills)
    }

    async fn payment(
        &self,
        company_id: CompanyId,
        id: PaymentId,
    ) -> Result<Option<Payment>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.payments.get(&(company_id, id)).cloned())
    }

    async fn payments(&self, company_id: CompanyId) -> Result<Vec<Payment>, StoreError> {
        let inner = self.inner.lock().await;
        let mut payments: Vec<Payment> = inner
            .payments
            .values()
            .filter(|p| p.company_id == company_id)
            .cloned()
            .collect();
        payments.sort_by(|a, b| a.number.cmp(&b.number));
        Ok(payments)
    }

    async fn match_record(
        &self,
        company_id: CompanyId,
        id: MatchId,
    ) -> Result<Option<BankTransactionMatch>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.matches.get(&(company_id, id)).cloned())
    }

    async fn matches_for(
        &self,
        company_id: CompanyId,
        bank_txn_id: &str,
    ) -> Result<Vec<BankTransactionMatch>, StoreError> {
        let inner = self.inner.lock().await;
        let mut matches: Vec<BankTransactionMatch> = inner
            .matches
            .values()
            .filter(|m| m.company_id == company_id && m.bank_txn_id == bank_txn_id)
            .cloned()
            .collect();
        matches.sort_by_key(|m| m.created_at);
        Ok(matches)
    }

    async fn template(
        &self,
        company_id: CompanyId,
        id: TemplateId,
    ) -> Result<Option<RecurringTemplate>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.templates.get(&(company_id, id)).cloned())
    }

    async fn templates(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<RecurringTemplate>, StoreError> {
        let inner = self.inner.lock().await;
        let mut templates: Vec<RecurringTemplate> = inner
            .templates
            .values()
            .filter(|t| t.company_id == company_id)
            .cloned()
            .collect();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(templates)
    }

    async fn was_fired(
        &self,
        company_id: CompanyId,
        template_id: TemplateId,
        scheduled_run_date: NaiveDate,
    ) -> Result<bool, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .fired
            .contains(&(company_id, template_id, scheduled_run_date)))
    }

    async fn next_sequence(
        &self,
        company_id: CompanyId,
        kind: SequenceKind,
        year: i32,
    ) -> Result<u32, StoreError> {
        let mut inner = self.inner.lock().await;
        let counter = inner.sequences.entry((company_id, kind, year)).or_insert(0);
        *counter = counter
            .checked_add(1)
            .ok_or(StoreError::SequenceExhausted)?;
        Ok(*counter)
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let (company_id, guards, mutations) = batch.into_parts();
        let mut inner = self.inner.lock().await;

        for guard in &guards {
            inner.check_guard(company_id, *guard)?;
        }
        // A MarkFired key that already exists (or repeats within the
        // batch) fails the whole commit before anything is applied.
        let mut staged_fires: HashSet<(TemplateId, NaiveDate)> = HashSet::new();
        for mutation in &mutations {
            if let Mutation::MarkFired {
                template_id,
                scheduled_run_date,
            } = mutation
            {
                let key = (company_id, *template_id, *scheduled_run_date);
                if inner.fired.contains(&key)
                    || !staged_fires.insert((*template_id, *scheduled_run_date))
                {
                    return Err(StoreError::DuplicateFire {
                        template_id: *template_id,
                        scheduled_run_date: *scheduled_run_date,
                    });
                }
            }
        }

        for mutation in mutations {
            inner.apply(company_id, mutation);
        }
        Ok(())
    }
}
