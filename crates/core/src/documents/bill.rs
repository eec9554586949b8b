//! Bill aggregate - the payable mirror of an invoice.

use chrono::{DateTime, NaiveDate, Utc};
use lading_shared::types::{BillId, CompanyId, LoadId, VendorId};
use lading_shared::Money;
use serde::{Deserialize, Serialize};

use super::error::DocumentError;

/// Bill status. Approval is a separate gate (`ApprovalStatus`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    /// Received from the vendor, awaiting approval.
    Received,
    /// Approved for payment.
    Approved,
    /// Fully paid (terminal).
    Paid,
    /// Past due with an outstanding balance (derived, reversible).
    Overdue,
    /// Cancelled before payment (terminal).
    Cancelled,
}

impl BillStatus {
    /// Returns true if the state machine allows moving to `next`.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Received, Self::Approved | Self::Cancelled)
                | (Self::Approved, Self::Paid | Self::Overdue)
                | (Self::Overdue, Self::Approved | Self::Paid)
        )
    }

    /// Returns true if the bill still carries an outstanding balance.
    #[must_use]
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Paid | Self::Cancelled)
    }

    /// Returns the string representation used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Approved => "approved",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Approval gate, separate from the bill status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Awaiting review.
    Pending,
    /// Cleared for payment.
    Approved,
    /// Declined; the bill stays unpayable until re-approved.
    Rejected,
}

/// A payable document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    /// Unique identifier.
    pub id: BillId,
    /// Company this bill belongs to.
    pub company_id: CompanyId,
    /// Generated bill number (`BILL-<year>-<seq>`).
    pub number: String,
    /// The vendor/carrier owed.
    pub vendor_id: VendorId,
    /// The freight load this bill covers, if any.
    pub load_id: Option<LoadId>,
    /// Date the bill was received.
    pub bill_date: NaiveDate,
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
    pub status: BillStatus,
    /// Approval gate.
    pub approval_status: ApprovalStatus,
    /// Free-text description.
    pub description: String,
    /// Whether this bill was materialized from a recurring template.
    pub is_recurring: bool,
    /// Optimistic-concurrency version, managed by the store.
    pub version: u64,
    /// When the bill was created.
    pub created_at: DateTime<Utc>,
    /// When the bill was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Bill {
    /// The outstanding balance (`total - paid`).
    #[must_use]
    pub fn outstanding(&self) -> Money {
        self.total_amount - self.amount_paid
    }

    /// Returns true if the bill may receive a payment.
    #[must_use]
    pub fn can_accept_payment(&self) -> bool {
        self.approval_status == ApprovalStatus::Approved && self.status.is_open()
    }

    /// Returns true if the bill is past due with a balance outstanding.
    #[must_use]
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        today > self.due_date && self.outstanding().is_positive() && self.status.is_open()
    }

    /// Applies a payment, returning the new amount paid and resulting
    /// invoice-style application. The bill status becomes `Paid` on exact
    /// cover; a partial payment leaves the current status in place (bills
    /// have no distinct partial state).
    ///
    /// # Errors
    ///
    /// - `NonPositiveAmount` if `amount <= 0`
    /// - `DocumentCancelled` if the bill is cancelled
    /// - `BillNotApproved` if the approval gate has not cleared
    /// - `Overpayment` if the payment exceeds the outstanding balance
    pub fn apply_payment(&self, amount: Money) -> Result<(Money, BillStatus), DocumentError> {
        if !amount.is_positive() {
            return Err(DocumentError::NonPositiveAmount);
        }
        if self.status == BillStatus::Cancelled {
            return Err(DocumentError::DocumentCancelled);
        }
        if self.approval_status != ApprovalStatus::Approved {
            return Err(DocumentError::BillNotApproved);
        }

        let amount_paid = self.amount_paid + amount;
        if amount_paid > self.total_amount {
            return Err(DocumentError::Overpayment {
                amount,
                outstanding: self.outstanding(),
            });
        }

        let status = if amount_paid == self.total_amount {
            BillStatus::Paid
        } else {
            self.status
        };
        Ok((amount_paid, status))
    }

    /// Recomputes the derived overdue status as of `today`.
    #[must_use]
    pub fn recomputed_status(&self, today: NaiveDate) -> Option<BillStatus> {
        match self.status {
            BillStatus::Approved if self.is_past_due(today) => Some(BillStatus::Overdue),
            BillStatus::Overdue if today <= self.due_date => Some(BillStatus::Approved),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bill(total_cents: i64, approval: ApprovalStatus, status: BillStatus) -> Bill {
        Bill {
            id: BillId::new(),
            company_id: CompanyId::new(),
            number: "BILL-2025-0001".into(),
            vendor_id: VendorId::new(),
            load_id: None,
            bill_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            subtotal: Money::from_cents(total_cents),
            tax_amount: Money::ZERO,
            total_amount: Money::from_cents(total_cents),
            amount_paid: Money::ZERO,
            status,
            approval_status: approval,
            description: "Carrier settlement".into(),
            is_recurring: false,
            version: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_payment_blocked_until_approved() {
        let b = bill(50_000, ApprovalStatus::Pending, BillStatus::Received);
        assert!(!b.can_accept_payment());
        assert!(matches!(
            b.apply_payment(Money::from_cents(50_000)),
            Err(DocumentError::BillNotApproved)
        ));
    }

    #[test]
    fn test_rejected_bill_cannot_be_paid() {
        let b = bill(50_000, ApprovalStatus::Rejected, BillStatus::Received);
        assert!(matches!(
            b.apply_payment(Money::from_cents(50_000)),
            Err(DocumentError::BillNotApproved)
        ));
    }

    #[test]
    fn test_full_payment_marks_paid() {
        let b = bill(50_000, ApprovalStatus::Approved, BillStatus::Approved);
        let (paid, status) = b.apply_payment(Money::from_cents(50_000)).unwrap();
        assert_eq!(paid, Money::from_cents(50_000));
        assert_eq!(status, BillStatus::Paid);
    }

    #[test]
    fn test_partial_payment_keeps_status() {
        let b = bill(50_000, ApprovalStatus::Approved, BillStatus::Approved);
        let (paid, status) = b.apply_payment(Money::from_cents(20_000)).unwrap();
        assert_eq!(paid, Money::from_cents(20_000));
        assert_eq!(status, BillStatus::Approved);
    }

    #[test]
    fn test_overpayment_rejected() {
        let b = bill(50_000, ApprovalStatus::Approved, BillStatus::Approved);
        assert!(matches!(
            b.apply_payment(Money::from_cents(50_001)),
            Err(DocumentError::Overpayment { .. })
        ));
    }

    #[test]
    fn test_state_machine_table() {
        use BillStatus::*;
        assert!(Received.can_transition_to(Approved));
        assert!(Received.can_transition_to(Cancelled));
        assert!(Approved.can_transition_to(Paid));
        assert!(Approved.can_transition_to(Overdue));
        assert!(Overdue.can_transition_to(Paid));

        assert!(!Paid.can_transition_to(Overdue));
        assert!(!Cancelled.can_transition_to(Approved));
        assert!(!Received.can_transition_to(Paid));
    }

    #[test]
    fn test_overdue_derivation() {
        let b = bill(50_000, ApprovalStatus::Approved, BillStatus::Approved);
        let past = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
        assert_eq!(b.recomputed_status(past), Some(BillStatus::Overdue));
    }
}
