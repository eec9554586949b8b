//! The engine-level error type.

use lading_shared::types::{AccountId, BillId, InvoiceId, TemplateId};
use thiserror::Error;

use lading_core::accounts::AccountError;
use lading_core::documents::DocumentError;
use lading_core::ledger::LedgerError;
use lading_core::reconcile::ReconcileError;
use lading_core::recurring::RecurringError;

use crate::store::StoreError;

/// Errors surfaced by the engine services.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Chart of accounts rule violation.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Posting rule violation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Document lifecycle rule violation.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Reconciliation rule violation.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    /// Recurring template rule violation.
    #[error(transparent)]
    Recurring(#[from] RecurringError),

    /// Storage failure or concurrency conflict.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The chart is missing a control account the operation needs.
    #[error("Missing control account '{0}' in chart of accounts")]
    MissingControlAccount(&'static str),

    /// The referenced invoice does not exist.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(InvoiceId),

    /// The referenced bill does not exist.
    #[error("Bill not found: {0}")]
    BillNotFound(BillId),

    /// The referenced account does not exist.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// The referenced template does not exist.
    #[error("Template not found: {0}")]
    TemplateNotFound(TemplateId),
}

impl EngineError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Account(e) => e.error_code(),
            Self::Ledger(e) => e.error_code(),
            Self::Document(e) => e.error_code(),
            Self::Reconcile(e) => e.error_code(),
            Self::Recurring(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
            Self::MissingControlAccount(_) => "MISSING_CONTROL_ACCOUNT",
            Self::InvoiceNotFound(_) => "INVOICE_NOT_FOUND",
            Self::BillNotFound(_) => "BILL_NOT_FOUND",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::TemplateNotFound(_) => "TEMPLATE_NOT_FOUND",
        }
    }

    /// Returns true if the caller may retry the operation after
    /// re-reading. Only concurrency conflicts qualify; the engine never
    /// retries on its own, because a retry may no longer be valid once
    /// the competing write lands.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_retryable())
    }
}
