//! Invoice aggregate and its status state machine.

use chrono::{DateTime, Days, NaiveDate, Utc};
use lading_shared::types::{CompanyId, CustomerId, InvoiceId, LoadId};
use lading_shared::Money;
use serde::{Deserialize, Serialize};

use super::error::DocumentError;

/// Invoice status.
///
/// `Overdue` is derived from the due date and is reversible; `Cancelled`
/// and `Paid` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Created but not yet issued to the customer.
    Draft,
    /// Issued, awaiting payment.
    Sent,
    /// Partially paid.
    Partial,
    /// Fully paid (terminal).
    Paid,
    /// Past due with an outstanding balance (derived, reversible).
    Overdue,
    /// Cancelled before payment (terminal).
    Cancelled,
}

impl InvoiceStatus {
    /// Returns true if the state machine allows moving to `next`.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Sent | Self::Cancelled)
                | (Self::Sent, Self::Partial | Self::Paid | Self::Overdue | Self::Cancelled)
                | (Self::Partial, Self::Paid | Self::Overdue)
                | (Self::Overdue, Self::Sent | Self::Partial | Self::Paid)
        )
    }

    /// Returns true if the invoice can still receive payments.
    #[must_use]
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Paid | Self::Cancelled)
    }

    /// Returns true if the invoice can be cancelled.
    #[must_use]
    pub fn can_cancel(self) -> bool {
        matches!(self, Self::Draft | Self::Sent)
    }

    /// Returns the string representation used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Partial => "partial",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Payment terms determining the due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTerms {
    /// Due immediately.
    DueOnReceipt,
    /// Due 15 days after issue.
    Net15,
    /// Due 30 days after issue.
    Net30,
    /// Due 45 days after issue.
    Net45,
    /// Due 60 days after issue.
    Net60,
}

impl PaymentTerms {
    /// Number of days until the invoice is due.
    #[must_use]
    pub const fn days(self) -> u64 {
        match self {
            Self::DueOnReceipt => 0,
            Self::Net15 => 15,
            Self::Net30 => 30,
            Self::Net45 => 45,
            Self::Net60 => 60,
        }
    }

    /// Computes the due date from an issue date.
    #[must_use]
    pub fn due_date_from(self, issue_date: NaiveDate) -> NaiveDate {
        issue_date
            .checked_add_days(Days::new(self.days()))
            .unwrap_or(issue_date)
    }
}

/// The result of applying a payment to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentApplication {
    /// The new amount paid.
    pub amount_paid: Money,
    /// The new status.
    pub status: InvoiceStatus,
}

/// A receivable document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier.
    pub id: InvoiceId,
    /// Company this invoice belongs to.
    pub company_id: CompanyId,
    /// Generated invoice number (`INV-<year>-<seq>`).
    pub number: String,
    /// The customer billed.
    pub customer_id: CustomerId,
    /// The freight load this invoice bills, if any.
    pub load_id: Option<LoadId>,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Due date.
    pub due_date: NaiveDate,
    /// Subtotal before tax.
    pub subtotal: Money,
    /// Tax amount.
    pub tax_amount: Money,
    /// Total (subtotal + tax).
    pub total_amount: Money,
    /// Amount paid so far (never exceeds `total_amount`).
    pub amount_paid: Money,
    /// Current status.
    pub status: InvoiceStatus,
    /// Payment terms.
    pub terms: PaymentTerms,
    /// Free-text description.
    pub description: String,
    /// Whether this invoice was materialized from a recurring template.
    pub is_recurring: bool,
    /// Optimistic-concurrency version, managed by the store.
    pub version: u64,
    /// When the invoice was created.
    pub created_at: DateTime<Utc>,
    /// When the invoice was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// The outstanding balance (`total - paid`).
    #[must_use]
    pub fn outstanding(&self) -> Money {
        self.total_amount - self.amount_paid
    }

    /// Days past due as of `today` (zero when not yet due).
    #[must_use]
    pub fn aging_days(&self, today: NaiveDate) -> i64 {
        (today - self.due_date).num_days().max(0)
    }

    /// Returns true if the invoice is past due with a balance outstanding.
    #[must_use]
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        today > self.due_date && self.outstanding().is_positive() && self.status.is_open()
    }

    /// Applies a payment, returning the new amount paid and status.
    ///
    /// Pure: the caller persists the result. Overpayment is rejected, not
    /// capped - recording a credit balance is a separate business decision.
    ///
    /// # Errors
    ///
    /// - `NonPositiveAmount` if `amount <= 0`
    /// - `DocumentCancelled` if the invoice is cancelled
    /// - `Overpayment` if the payment exceeds the outstanding balance
    pub fn apply_payment(&self, amount: Money) -> Result<PaymentApplication, DocumentError> {
        if !amount.is_positive() {
            return Err(DocumentError::NonPositiveAmount);
        }
        if self.status == InvoiceStatus::Cancelled {
            return Err(DocumentError::DocumentCancelled);
        }

        let amount_paid = self.amount_paid + amount;
        if amount_paid > self.total_amount {
            return Err(DocumentError::Overpayment {
                amount,
                outstanding: self.outstanding(),
            });
        }

        let status = if amount_paid == self.total_amount {
            InvoiceStatus::Paid
        } else {
            InvoiceStatus::Partial
        };

        Ok(PaymentApplication {
            amount_paid,
            status,
        })
    }

    /// Recomputes the derived overdue status as of `today`.
    ///
    /// Returns `Some(new_status)` when the status should change: an open
    /// invoice past its due date becomes `Overdue`; an `Overdue` invoice
    /// whose due date moved (or whose date context changed) reverts to
    /// `Sent` or `Partial`.
    #[must_use]
    pub fn recomputed_status(&self, today: NaiveDate) -> Option<InvoiceStatus> {
        match self.status {
            InvoiceStatus::Sent | InvoiceStatus::Partial if self.is_past_due(today) => {
                Some(InvoiceStatus::Overdue)
            }
            InvoiceStatus::Overdue if today <= self.due_date => {
                if self.amount_paid.is_positive() {
                    Some(InvoiceStatus::Partial)
                } else {
                    Some(InvoiceStatus::Sent)
                }
            }
            _ => None,
        }
    }

    /// Validates a status/amount-paid combination for administrative
    /// overrides. The `amount_paid <= total` invariant holds on every path.
    ///
    /// # Errors
    ///
    /// Returns `AmountPaidExceedsTotal` or `AmountStatusMismatch`.
    pub fn validate_status_amount(
        status: InvoiceStatus,
        amount_paid: Money,
        total: Money,
    ) -> Result<(), DocumentError> {
        if amount_paid.is_negative() || amount_paid > total {
            return Err(DocumentError::AmountPaidExceedsTotal { amount_paid, total });
        }
        let consistent = match status {
            InvoiceStatus::Paid => amount_paid == total,
            InvoiceStatus::Partial => amount_paid.is_positive() && amount_paid < total,
            InvoiceStatus::Draft | InvoiceStatus::Sent | InvoiceStatus::Cancelled => {
                amount_paid.is_zero()
            }
            InvoiceStatus::Overdue => amount_paid < total,
        };
        if !consistent {
            return Err(DocumentError::AmountStatusMismatch {
                status: status.as_str(),
                amount_paid,
                total,
            });
        }
        Ok(())
    }
}
