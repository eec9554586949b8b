//! Payment records and their validation.

use chrono::{DateTime, NaiveDate, Utc};
use lading_shared::types::{BankAccountId, BillId, CompanyId, InvoiceId, PaymentId};
use lading_shared::Money;
use serde::{Deserialize, Serialize};

use super::error::DocumentError;

/// What a payment settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Cash received against an invoice.
    InvoicePayment,
    /// Cash disbursed against a bill.
    BillPayment,
    /// A standalone cash movement with no target document.
    Adjustment,
}

impl PaymentType {
    /// Returns the string representation used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvoicePayment => "invoice_payment",
            Self::BillPayment => "bill_payment",
            Self::Adjustment => "adjustment",
        }
    }
}

/// How the money moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// ACH transfer.
    Ach,
    /// Wire transfer.
    Wire,
    /// Paper check.
    Check,
    /// Credit card.
    Card,
    /// Cash in hand.
    Cash,
    /// Anything else (factoring advance, barter, write-off).
    Other,
}

/// A payment record. The financial fields never change after creation;
/// corrections are made by posting new payments. Only the reconciliation
/// `is_matched` flag is updated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier.
    pub id: PaymentId,
    /// Company this payment belongs to.
    pub company_id: CompanyId,
    /// Generated payment number (`PAY-<year>-<seq>`).
    pub number: String,
    /// What this payment settles.
    pub payment_type: PaymentType,
    /// The invoice settled, when `payment_type` is `InvoicePayment`.
    pub invoice_id: Option<InvoiceId>,
    /// The bill settled, when `payment_type` is `BillPayment`.
    pub bill_id: Option<BillId>,
    /// Amount paid. Always positive.
    pub amount: Money,
    /// Date the payment was made.
    pub payment_date: NaiveDate,
    /// How the money moved.
    pub method: PaymentMethod,
    /// The bank account the money moved through, when known.
    pub bank_account_id: Option<BankAccountId>,
    /// Reference note (check number, transfer id).
    pub reference: String,
    /// Free-text memo.
    pub memo: Option<String>,
    /// Whether an accepted bank-transaction match covers this payment.
    pub is_matched: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Validates the type/reference pairing and amount.
    ///
    /// # Errors
    ///
    /// - `NonPositiveAmount` if the amount is zero or negative
    /// - `MissingReference` if a targeted type lacks its document id
    pub fn validate(&self) -> Result<(), DocumentError> {
        if !self.amount.is_positive() {
            return Err(DocumentError::NonPositiveAmount);
        }
        match self.payment_type {
            PaymentType::InvoicePayment if self.invoice_id.is_none() => {
                Err(DocumentError::MissingReference("invoice_payment"))
            }
            PaymentType::BillPayment if self.bill_id.is_none() => {
                Err(DocumentError::MissingReference("bill_payment"))
            }
            _ => Ok(()),
        }
    }
}
