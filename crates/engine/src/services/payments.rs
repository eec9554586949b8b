//! Payment recording service.

use chrono::{Datelike, NaiveDate, Utc};
use lading_shared::types::{BankAccountId, BillId, CompanyId, InvoiceId, PaymentId, UserId};
use lading_shared::Money;
use serde::Deserialize;

use lading_core::documents::{
    format_number, DocumentError, Payment, PaymentMethod, PaymentType, SequenceKind,
};
use lading_core::ledger::{JournalEntry, PostingLine, ReferenceType};

use crate::store::{LedgerStore, Mutation, VersionGuard, WriteBatch};

use super::control::ControlAccounts;
use super::error::EngineError;
use super::posting::prepare_entries;

/// Input for recording a payment.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPayment {
    /// Company recording the payment.
    pub company_id: CompanyId,
    /// What the payment settles.
    pub payment_type: PaymentType,
    /// Target invoice for `InvoicePayment`.
    pub invoice_id: Option<InvoiceId>,
    /// Target bill for `BillPayment`.
    pub bill_id: Option<BillId>,
    /// Amount paid.
    pub amount: Money,
    /// Date of the payment.
    pub payment_date: NaiveDate,
    /// How the money moved.
    pub method: PaymentMethod,
    /// The bank account the money moved through, when known.
    pub bank_account_id: Option<BankAccountId>,
    /// Reference note (check number, transfer id).
    pub reference: String,
    /// Free-text memo.
    pub memo: Option<String>,
    /// Acting user.
    pub created_by: UserId,
}

/// Records payments and applies them to their target documents.
pub struct PaymentService<'a, S: LedgerStore> {
    store: &'a S,
}

impl<'a, S: LedgerStore> PaymentService<'a, S> {
    /// Creates a service over a store.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Records a payment: allocates `PAY-<year>-<seq>`, posts the cash
    /// movement, and applies the amount to the target document under a
    /// version guard - all in one commit.
    ///
    /// Posting pairs by type:
    /// - invoice payment: debit Cash, credit Accounts Receivable
    /// - bill payment: debit Accounts Payable, credit Cash
    /// - adjustment: debit Cash, credit Revenue (untargeted income)
    ///
    /// # Errors
    ///
    /// `Overpayment` when the amount exceeds the outstanding balance,
    /// `BillNotApproved` for unapproved bills, not-found errors for bad
    /// references, and a retryable `CONCURRENT_MODIFICATION` when another
    /// payment won the race on the same document.
    pub async fn record_payment(
        &self,
        new: NewPayment,
    ) -> Result<(Payment, Vec<JournalEntry>), EngineError> {
        let controls = ControlAccounts::resolve(self.store, new.company_id).await?;
        let year = new.payment_date.year();
        let seq = self
            .store
            .next_sequence(new.company_id, SequenceKind::Payment, year)
            .await?;
        let number = format_number(SequenceKind::Payment, year, seq);

        let payment = Payment {
            id: PaymentId::new(),
            company_id: new.company_id,
            number: number.clone(),
            payment_type: new.payment_type,
            invoice_id: new.invoice_id,
            bill_id: new.bill_id,
            amount: new.amount,
            payment_date: new.payment_date,
            method: new.method,
            bank_account_id: new.bank_account_id,
            reference: new.reference,
            memo: new.memo,
            is_matched: false,
            created_at: Utc::now(),
        };
        payment.validate()?;

        let mut batch = WriteBatch::new(new.company_id);

        let lines = match new.payment_type {
            PaymentType::InvoicePayment => {
                let id = payment
                    .invoice_id
                    .ok_or(DocumentError::MissingReference("invoice_payment"))?;
                let mut invoice = self
                    .store
                    .invoice(new.company_id, id)
                    .await?
                    .ok_or(EngineError::InvoiceNotFound(id))?;
                let applied = invoice.apply_payment(new.amount)?;

                let expected = invoice.version;
                invoice.amount_paid = applied.amount_paid;
                invoice.status = applied.status;
                invoice.updated_at = Utc::now();
                batch.guard(VersionGuard::Invoice { id, expected });
                batch.push(Mutation::PutInvoice(invoice));

                vec![
                    PostingLine::debit(controls.cash, new.amount, format!("Payment {number}")),
                    PostingLine::credit(
                        controls.receivable,
                        new.amount,
                        format!("Payment {number}"),
                    ),
                ]
            }
            PaymentType::BillPayment => {
                let id = payment
                    .bill_id
                    .ok_or(DocumentError::MissingReference("bill_payment"))?;
                let mut bill = self
                    .store
                    .bill(new.company_id, id)
                    .await?
                    .ok_or(EngineError::BillNotFound(id))?;
                let (amount_paid, status) = bill.apply_payment(new.amount)?;

                let expected = bill.version;
                bill.amount_paid = amount_paid;
                bill.status = status;
                bill.updated_at = Utc::now();
                batch.guard(VersionGuard::Bill { id, expected });
                batch.push(Mutation::PutBill(bill));

                vec![
                    PostingLine::debit(controls.payable, new.amount, format!("Payment {number}")),
                    PostingLine::credit(controls.cash, new.amount, format!("Payment {number}")),
                ]
            }
            PaymentType::Adjustment => vec![
                PostingLine::debit(controls.cash, new.amount, format!("Adjustment {number}")),
                PostingLine::credit(controls.revenue, new.amount, format!("Adjustment {number}")),
            ],
        };

        let entries = prepare_entries(
            self.store,
            new.company_id,
            new.payment_date,
            lines,
            ReferenceType::Payment,
            payment.id.into_inner(),
            new.created_by,
        )
        .await?;

        batch.push(Mutation::PutPayment(payment.clone()));
        batch.push(Mutation::AppendEntries(entries.clone()));
        self.store.commit(batch).await?;

        tracing::info!(
            company = %new.company_id,
            number = %number,
            amount = %new.amount,
            kind = payment.payment_type.as_str(),
            "recorded payment"
        );
        Ok((payment, entries))
    }
}
