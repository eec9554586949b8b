//! Orchestrating services over the `LedgerStore`.
//!
//! Each service validates with `lading-core`, assembles one `WriteBatch`,
//! and commits it atomically. Services never retry conflicts themselves;
//! `EngineError::is_retryable` tells the caller when a bounded retry is
//! safe.

pub mod accounts;
pub mod bills;
pub mod control;
pub mod error;
pub mod invoices;
pub mod payments;
pub mod posting;
pub mod reconcile;
pub mod recurring;
pub mod reports;

pub use accounts::{ChartService, NewAccount, UpdateAccount};
pub use bills::{BillService, NewBill};
pub use control::ControlAccounts;
pub use error::EngineError;
pub use invoices::{InvoiceService, NewInvoice};
pub use payments::{NewPayment, PaymentService};
pub use posting::PostingService;
pub use reconcile::{ProposeMatch, ReconcileService};
pub use recurring::{NewTemplate, RecurringService};
pub use reports::ReportService;
