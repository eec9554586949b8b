//! Invoice, bill, and payment lifecycle logic.
//!
//! This module implements the document state machines and the pure parts
//! of payment application:
//! - Invoice status transitions (draft/sent/partial/paid/overdue/cancelled)
//! - Bill status plus its separate approval gate
//! - Payment validation and the overpayment cap
//! - Document numbering (`INV-2025-0001`)

pub mod bill;
pub mod error;
pub mod invoice;
pub mod numbering;
pub mod payment;

#[cfg(test)]
mod lifecycle_props;

pub use bill::{ApprovalStatus, Bill, BillStatus};
pub use error::DocumentError;
pub use invoice::{Invoice, InvoiceStatus, PaymentApplication, PaymentTerms};
pub use numbering::{format_number, SequenceKind};
pub use payment::{Payment, PaymentMethod, PaymentType};
