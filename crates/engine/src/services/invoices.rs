//! Invoice lifecycle service.

use chrono::{Datelike, NaiveDate, Utc};
use lading_shared::types::{CompanyId, CustomerId, InvoiceId, LoadId, UserId};
use lading_shared::Money;
use serde::Deserialize;

use lading_core::documents::{
    format_number, DocumentError, Invoice, InvoiceStatus, PaymentTerms, SequenceKind,
};
use lading_core::ledger::{JournalEntry, PostingLine, ReferenceType};

use crate::store::{LedgerStore, Mutation, VersionGuard, WriteBatch};

use super::control::ControlAccounts;
use super::error::EngineError;
use super::posting::prepare_entries;

/// Input for creating an invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct NewInvoice {
    /// Company issuing the invoice.
    pub company_id: CompanyId,
    /// Customer billed.
    pub customer_id: CustomerId,
    /// Freight load billed, if any.
    pub load_id: Option<LoadId>,
    /// Issue date; the due date derives from the terms.
    pub issue_date: NaiveDate,
    /// Payment terms.
    pub terms: PaymentTerms,
    /// Subtotal before tax.
    pub subtotal: Money,
    /// Tax amount.
    pub tax_amount: Money,
    /// Line description.
    pub description: String,
    /// Acting user.
    pub created_by: UserId,
}

/// Creates invoices and manages their status lifecycle.
pub struct InvoiceService<'a, S: LedgerStore> {
    store: &'a S,
}

impl<'a, S: LedgerStore> InvoiceService<'a, S> {
    /// Creates a service over a store.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Creates an invoice and its AR-debit / revenue-credit posting pair
    /// in one commit. The invoice is issued immediately (status `Sent`);
    /// the receivable exists the moment the invoice does.
    ///
    /// # Errors
    ///
    /// `NegativeAmount` / `ZeroTotal` for bad amounts,
    /// `MissingControlAccount` when the chart lacks AR or revenue.
    pub async fn create_invoice(
        &self,
        new: NewInvoice,
    ) -> Result<(Invoice, Vec<JournalEntry>), EngineError> {
        let company_id = new.company_id;
        let (invoice, entries) = self.prepare_invoice(new, false).await?;

        let mut batch = WriteBatch::new(company_id);
        batch.push(Mutation::PutInvoice(invoice.clone()));
        batch.push(Mutation::AppendEntries(entries.clone()));
        self.store.commit(batch).await?;

        tracing::info!(
            company = %company_id,
            number = %invoice.number,
            total = %invoice.total_amount,
            "created invoice"
        );
        Ok((invoice, entries))
    }

    /// Builds the invoice row and posting pair without committing, so the
    /// recurring scheduler can bundle them with its own mutations.
    pub(crate) async fn prepare_invoice(
        &self,
        new: NewInvoice,
        is_recurring: bool,
    ) -> Result<(Invoice, Vec<JournalEntry>), EngineError> {
        if new.subtotal.is_negative() || new.tax_amount.is_negative() {
            return Err(DocumentError::NegativeAmount.into());
        }
        let total = new.subtotal + new.tax_amount;
        if !total.is_positive() {
            return Err(DocumentError::ZeroTotal.into());
        }

        let controls = ControlAccounts::resolve(self.store, new.company_id).await?;
        let year = new.issue_date.year();
        let seq = self
            .store
            .next_sequence(new.company_id, SequenceKind::Invoice, year)
            .await?;
        let number = format_number(SequenceKind::Invoice, year, seq);

        let now = Utc::now();
        let invoice = Invoice {
            id: InvoiceId::new(),
            company_id: new.company_id,
            number: number.clone(),
            customer_id: new.customer_id,
            load_id: new.load_id,
            issue_date: new.issue_date,
            due_date: new.terms.due_date_from(new.issue_date),
            subtotal: new.subtotal,
            tax_amount: new.tax_amount,
            total_amount: total,
            amount_paid: Money::ZERO,
            status: InvoiceStatus::Sent,
            terms: new.terms,
            description: new.description,
            is_recurring,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        let lines = vec![
            PostingLine::debit(controls.receivable, total, format!("Invoice {number}")),
            PostingLine::credit(controls.revenue, total, format!("Invoice {number}")),
        ];
        let entries = prepare_entries(
            self.store,
            new.company_id,
            invoice.issue_date,
            lines,
            ReferenceType::Invoice,
            invoice.id.into_inner(),
            new.created_by,
        )
        .await?;

        Ok((invoice, entries))
    }

    /// Administrative status override, preserving the
    /// `amount_paid <= total` invariant and the state machine.
    ///
    /// # Errors
    ///
    /// `InvoiceNotFound`, `InvalidTransition`, `AmountStatusMismatch`, or
    /// a retryable `CONCURRENT_MODIFICATION`.
    pub async fn update_status(
        &self,
        company_id: CompanyId,
        id: InvoiceId,
        status: InvoiceStatus,
        amount_paid: Option<Money>,
    ) -> Result<Invoice, EngineError> {
        let mut invoice = self
            .store
            .invoice(company_id, id)
            .await?
            .ok_or(EngineError::InvoiceNotFound(id))?;

        if !invoice.status.can_transition_to(status) {
            return Err(DocumentError::InvalidTransition {
                from: invoice.status.as_str(),
                to: status.as_str(),
            }
            .into());
        }
        let amount_paid = amount_paid.unwrap_or(invoice.amount_paid);
        Invoice::validate_status_amount(status, amount_paid, invoice.total_amount)?;

        let expected = invoice.version;
        invoice.status = status;
        invoice.amount_paid = amount_paid;
        invoice.updated_at = Utc::now();

        let mut batch = WriteBatch::new(company_id);
        batch.guard(VersionGuard::Invoice { id, expected });
        batch.push(Mutation::PutInvoice(invoice.clone()));
        self.store.commit(batch).await?;
        Ok(invoice)
    }

    /// Cancels an invoice, appending offsetting reversal entries so the
    /// ledger stays append-only.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the invoice is Draft or Sent with no
    /// payments applied.
    pub async fn cancel_invoice(
        &self,
        company_id: CompanyId,
        id: InvoiceId,
        cancel_date: NaiveDate,
        cancelled_by: UserId,
    ) -> Result<Invoice, EngineError> {
        let mut invoice = self
            .store
            .invoice(company_id, id)
            .await?
            .ok_or(EngineError::InvoiceNotFound(id))?;

        if !invoice.status.can_cancel() {
            return Err(DocumentError::InvalidTransition {
                from: invoice.status.as_str(),
                to: InvoiceStatus::Cancelled.as_str(),
            }
            .into());
        }

        let controls = ControlAccounts::resolve(self.store, company_id).await?;
        let number = invoice.number.clone();
        let lines = vec![
            PostingLine::debit(
                controls.revenue,
                invoice.total_amount,
                format!("Cancel invoice {number}"),
            ),
            PostingLine::credit(
                controls.receivable,
                invoice.total_amount,
                format!("Cancel invoice {number}"),
            ),
        ];
        let entries = prepare_entries(
            self.store,
            company_id,
            cancel_date,
            lines,
            ReferenceType::Invoice,
            invoice.id.into_inner(),
            cancelled_by,
        )
        .await?;

        let expected = invoice.version;
        invoice.status = InvoiceStatus::Cancelled;
        invoice.updated_at = Utc::now();

        let mut batch = WriteBatch::new(company_id);
        batch.guard(VersionGuard::Invoice { id, expected });
        batch.push(Mutation::PutInvoice(invoice.clone()));
        batch.push(Mutation::AppendEntries(entries));
        self.store.commit(batch).await?;

        tracing::info!(company = %company_id, number = %number, "cancelled invoice");
        Ok(invoice)
    }

    /// Recomputes the derived overdue status for every open invoice.
    /// Returns how many invoices changed.
    pub async fn refresh_overdue(
        &self,
        company_id: CompanyId,
        today: NaiveDate,
    ) -> Result<usize, EngineError> {
        let invoices = self.store.invoices(company_id).await?;
        let mut changed = 0;

        for mut invoice in invoices {
            let Some(status) = invoice.recomputed_status(today) else {
                continue;
            };
            let expected = invoice.version;
            let id = invoice.id;
            invoice.status = status;
            invoice.updated_at = Utc::now();

            let mut batch = WriteBatch::new(company_id);
            batch.guard(VersionGuard::Invoice { id, expected });
            batch.push(Mutation::PutInvoice(invoice));
            match self.store.commit(batch).await {
                Ok(()) => changed += 1,
                // A racing payment moved the invoice; the next sweep
                // will see the fresh state.
                Err(e) if e.is_retryable() => {
                    tracing::warn!(invoice = %id, "skipped overdue refresh on conflict");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(changed)
    }
}
