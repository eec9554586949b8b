//! Error types for document lifecycle operations.

use lading_shared::Money;
use thiserror::Error;

/// Errors that can occur during invoice/bill/payment operations.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Applying the payment would push `amount_paid` above the total.
    #[error("Payment of {amount} exceeds outstanding balance {outstanding}")]
    Overpayment {
        /// The attempted payment amount.
        amount: Money,
        /// The remaining balance on the document.
        outstanding: Money,
    },

    /// Payment amounts must be strictly positive.
    #[error("Payment amount must be positive")]
    NonPositiveAmount,

    /// Document amounts (subtotal, tax) must be nonnegative.
    #[error("Document amounts must be nonnegative")]
    NegativeAmount,

    /// Document total must be strictly positive.
    #[error("Document total must be positive")]
    ZeroTotal,

    /// The document has been cancelled.
    #[error("Document is cancelled")]
    DocumentCancelled,

    /// A bill cannot move toward payment until it is approved.
    #[error("Bill is not approved for payment")]
    BillNotApproved,

    /// The requested status change is not allowed by the state machine.
    #[error("Invalid status transition from '{from}' to '{to}'")]
    InvalidTransition {
        /// Current status.
        from: &'static str,
        /// Requested status.
        to: &'static str,
    },

    /// The status and amount-paid combination is inconsistent.
    #[error("Status '{status}' is inconsistent with amount paid {amount_paid} of {total}")]
    AmountStatusMismatch {
        /// Requested status.
        status: &'static str,
        /// Amount paid so far.
        amount_paid: Money,
        /// Document total.
        total: Money,
    },

    /// `amount_paid` may never exceed the document total.
    #[error("Amount paid {amount_paid} exceeds total {total}")]
    AmountPaidExceedsTotal {
        /// Amount paid.
        amount_paid: Money,
        /// Document total.
        total: Money,
    },

    /// Targeted payment types require a reference document.
    #[error("Payment type '{0}' requires a reference document")]
    MissingReference(&'static str),
}

impl DocumentError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Overpayment { .. } => "OVERPAYMENT",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::ZeroTotal => "ZERO_TOTAL",
            Self::DocumentCancelled => "DOCUMENT_CANCELLED",
            Self::BillNotApproved => "BILL_NOT_APPROVED",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::AmountStatusMismatch { .. } => "AMOUNT_STATUS_MISMATCH",
            Self::AmountPaidExceedsTotal { .. } => "AMOUNT_PAID_EXCEEDS_TOTAL",
            Self::MissingReference(_) => "MISSING_REFERENCE",
        }
    }
}
