//! Write batches: the unit of atomic mutation.

use chrono::NaiveDate;
use lading_shared::types::{BillId, CompanyId, InvoiceId, TemplateId};

use lading_core::accounts::Account;
use lading_core::documents::{Bill, Invoice, Payment};
use lading_core::ledger::JournalEntry;
use lading_core::reconcile::BankTransactionMatch;
use lading_core::recurring::RecurringTemplate;

/// One mutation within a batch.
///
/// `Put*` upserts by id; the store manages version counters itself, so
/// the version carried on the value is ignored on write.
#[derive(Debug, Clone)]
pub enum Mutation {
    /// Insert or update an account.
    PutAccount(Account),
    /// Append journal entries. Entries are immutable once committed.
    AppendEntries(Vec<JournalEntry>),
    /// Insert or update an invoice.
    PutInvoice(Invoice),
    /// Insert or update a bill.
    PutBill(Bill),
    /// Insert or update a payment. After creation only the reconciliation
    /// matched flag changes.
    PutPayment(Payment),
    /// Insert or update a match proposal.
    PutMatch(BankTransactionMatch),
    /// Insert or update a recurring template.
    PutTemplate(RecurringTemplate),
    /// Record that a template fired for a scheduled date. Committing a
    /// duplicate key fails the whole batch, which is what makes
    /// scheduler re-runs idempotent.
    MarkFired {
        /// The template that fired.
        template_id: TemplateId,
        /// The run date being materialized.
        scheduled_run_date: NaiveDate,
    },
}

/// An optimistic-concurrency precondition. The batch only applies if the
/// stored version still equals `expected`.
#[derive(Debug, Clone, Copy)]
pub enum VersionGuard {
    /// Guard on an invoice's version.
    Invoice {
        /// The invoice to check.
        id: InvoiceId,
        /// The version the caller read.
        expected: u64,
    },
    /// Guard on a bill's version.
    Bill {
        /// The bill to check.
        id: BillId,
        /// The version the caller read.
        expected: u64,
    },
    /// Guard on a recurring template's version.
    Template {
        /// The template to check.
        id: TemplateId,
        /// The version the caller read.
        expected: u64,
    },
}

/// A set of mutations committed atomically for one company.
#[derive(Debug, Clone)]
pub struct WriteBatch {
    company_id: CompanyId,
    guards: Vec<VersionGuard>,
    mutations: Vec<Mutation>,
}

impl WriteBatch {
    /// Starts an empty batch for a company.
    #[must_use]
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            company_id,
            guards: Vec::new(),
            mutations: Vec::new(),
        }
    }

    /// Adds a mutation.
    pub fn push(&mut self, mutation: Mutation) -> &mut Self {
        self.mutations.push(mutation);
        self
    }

    /// Adds a version precondition.
    pub fn guard(&mut self, guard: VersionGuard) -> &mut Self {
        self.guards.push(guard);
        self
    }

    /// The company this batch mutates.
    #[must_use]
    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// The preconditions to check before applying.
    #[must_use]
    pub fn guards(&self) -> &[VersionGuard] {
        &self.guards
    }

    /// The mutations in commit order.
    #[must_use]
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Consumes the batch into its parts.
    #[must_use]
    pub fn into_parts(self) -> (CompanyId, Vec<VersionGuard>, Vec<Mutation>) {
        (self.company_id, self.guards, self.mutations)
    }
}
