//! Bill lifecycle service.

use chrono::{Datelike, NaiveDate, Utc};
use lading_shared::types::{BillId, CompanyId, LoadId, UserId, VendorId};
use lading_shared::Money;
use serde::Deserialize;

use lading_core::documents::{
    format_number, ApprovalStatus, Bill, BillStatus, DocumentError, SequenceKind,
};
use lading_core::ledger::{JournalEntry, PostingLine, ReferenceType};

use crate::store::{LedgerStore, Mutation, VersionGuard, WriteBatch};

use super::control::ControlAccounts;
use super::error::EngineError;
use super::posting::prepare_entries;

/// Input for creating a bill.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBill {
    /// Company receiving the bill.
    pub company_id: CompanyId,
    /// Vendor/carrier owed.
    pub vendor_id: VendorId,
    /// Freight load covered, if any.
    pub load_id: Option<LoadId>,
    /// Date the bill was received.
    pub bill_date: NaiveDate,
    /// Due date.
    pub due_date: NaiveDate,
    /// Subtotal before tax.
    pub subtotal: Money,
    /// Tax amount.
    pub tax_amount: Money,
    /// Line description.
    pub description: String,
    /// Acting user.
    pub created_by: UserId,
}

/// Creates bills and manages approval and status.
pub struct BillService<'a, S: LedgerStore> {
    store: &'a S,
}

impl<'a, S: LedgerStore> BillService<'a, S> {
    /// Creates a service over a store.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Creates a bill and its expense-debit / AP-credit posting pair in
    /// one commit. The posting happens at creation, not approval: under
    /// accrual accounting the liability exists once the bill is received.
    ///
    /// # Errors
    ///
    /// `NegativeAmount` / `ZeroTotal` for bad amounts,
    /// `MissingControlAccount` when the chart lacks AP or expense.
    pub async fn create_bill(
        &self,
        new: NewBill,
    ) -> Result<(Bill, Vec<JournalEntry>), EngineError> {
        let company_id = new.company_id;
        let (bill, entries) = self.prepare_bill(new, false).await?;

        let mut batch = WriteBatch::new(company_id);
        batch.push(Mutation::PutBill(bill.clone()));
        batch.push(Mutation::AppendEntries(entries.clone()));
        self.store.commit(batch).await?;

        tracing::info!(
            company = %company_id,
            number = %bill.number,
            total = %bill.total_amount,
            "created bill"
        );
        Ok((bill, entries))
    }

    /// Builds the bill row and posting pair without committing.
    pub(crate) async fn prepare_bill(
        &self,
        new: NewBill,
        is_recurring: bool,
    ) -> Result<(Bill, Vec<JournalEntry>), EngineError> {
        if new.subtotal.is_negative() || new.tax_amount.is_negative() {
            return Err(DocumentError::NegativeAmount.into());
        }
        let total = new.subtotal + new.tax_amount;
        if !total.is_positive() {
            return Err(DocumentError::ZeroTotal.into());
        }

        let controls = ControlAccounts::resolve(self.store, new.company_id).await?;
        let year = new.bill_date.year();
        let seq = self
            .store
            .next_sequence(new.company_id, SequenceKind::Bill, year)
            .await?;
        let number = format_number(SequenceKind::Bill, year, seq);

        let now = Utc::now();
        let bill = Bill {
            id: BillId::new(),
            company_id: new.company_id,
            number: number.clone(),
            vendor_id: new.vendor_id,
            load_id: new.load_id,
            bill_date: new.bill_date,
            due_date: new.due_date,
            subtotal: new.subtotal,
            tax_amount: new.tax_amount,
            total_amount: total,
            amount_paid: Money::ZERO,
            status: BillStatus::Received,
            approval_status: ApprovalStatus::Pending,
            description: new.description,
            is_recurring,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        let lines = vec![
            PostingLine::debit(controls.expense, total, format!("Bill {number}")),
            PostingLine::credit(controls.payable, total, format!("Bill {number}")),
        ];
        let entries = prepare_entries(
            self.store,
            new.company_id,
            bill.bill_date,
            lines,
            ReferenceType::Bill,
            bill.id.into_inner(),
            new.created_by,
        )
        .await?;

        Ok((bill, entries))
    }

    /// Approves or rejects a bill. A pure status update - the posting
    /// already happened at creation.
    ///
    /// # Errors
    ///
    /// `BillNotFound`, `InvalidTransition` when the bill is past the
    /// approval gate, or a retryable `CONCURRENT_MODIFICATION`.
    pub async fn approve_bill(
        &self,
        company_id: CompanyId,
        id: BillId,
        approve: bool,
    ) -> Result<Bill, EngineError> {
        let mut bill = self
            .store
            .bill(company_id, id)
            .await?
            .ok_or(EngineError::BillNotFound(id))?;

        if bill.status != BillStatus::Received {
            return Err(DocumentError::InvalidTransition {
                from: bill.status.as_str(),
                to: BillStatus::Approved.as_str(),
            }
            .into());
        }

        let expected = bill.version;
        if approve {
            bill.approval_status = ApprovalStatus::Approved;
            bill.status = BillStatus::Approved;
        } else {
            bill.approval_status = ApprovalStatus::Rejected;
        }
        bill.updated_at = Utc::now();

        let mut batch = WriteBatch::new(company_id);
        batch.guard(VersionGuard::Bill { id, expected });
        batch.push(Mutation::PutBill(bill.clone()));
        self.store.commit(batch).await?;

        tracing::info!(
            company = %company_id,
            number = %bill.number,
            approved = approve,
            "reviewed bill"
        );
        Ok(bill)
    }

    /// Cancels an unapproved bill, appending offsetting reversal entries.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the bill is still `Received`.
    pub async fn cancel_bill(
        &self,
        company_id: CompanyId,
        id: BillId,
        cancel_date: NaiveDate,
        cancelled_by: UserId,
    ) -> Result<Bill, EngineError> {
        let mut bill = self
            .store
            .bill(company_id, id)
            .await?
            .ok_or(EngineError::BillNotFound(id))?;

        if !bill.status.can_transition_to(BillStatus::Cancelled) {
            return Err(DocumentError::InvalidTransition {
                from: bill.status.as_str(),
                to: BillStatus::Cancelled.as_str(),
            }
            .into());
        }

        let controls = ControlAccounts::resolve(self.store, company_id).await?;
        let number = bill.number.clone();
        let lines = vec![
            PostingLine::debit(
                controls.payable,
                bill.total_amount,
                format!("Cancel bill {number}"),
            ),
            PostingLine::credit(
                controls.expense,
                bill.total_amount,
                format!("Cancel bill {number}"),
            ),
        ];
        let entries = prepare_entries(
            self.store,
            company_id,
            cancel_date,
            lines,
            ReferenceType::Bill,
            bill.id.into_inner(),
            cancelled_by,
        )
        .await?;

        let expected = bill.version;
        bill.status = BillStatus::Cancelled;
        bill.updated_at = Utc::now();

        let mut batch = WriteBatch::new(company_id);
        batch.guard(VersionGuard::Bill { id, expected });
        batch.push(Mutation::PutBill(bill.clone()));
        batch.push(Mutation::AppendEntries(entries));
        self.store.commit(batch).await?;

        tracing::info!(company = %company_id, number = %number, "cancelled bill");
        Ok(bill)
    }

    /// Recomputes the derived overdue status for every open bill.
    /// Returns how many bills changed.
    pub async fn refresh_overdue(
        &self,
        company_id: CompanyId,
        today: NaiveDate,
    ) -> Result<usize, EngineError> {
        let bills = self.store.bills(company_id).await?;
        let mut changed = 0;

        for mut bill in bills {
            let Some(status) = bill.recomputed_status(today) else {
                continue;
            };
            let expected = bill.version;
            let id = bill.id;
            bill.status = status;
            bill.updated_at = Utc::now();

            let mut batch = WriteBatch::new(company_id);
            batch.guard(VersionGuard::Bill { id, expected });
            batch.push(Mutation::PutBill(bill));
            match self.store.commit(batch).await {
                Ok(()) => changed += 1,
                Err(e) if e.is_retryable() => {
                    tracing::warn!(bill = %id, "skipped overdue refresh on conflict");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(changed)
    }
}
