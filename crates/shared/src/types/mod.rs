//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::{
    AccountId, BankAccountId, BillId, CompanyId, CustomerId, InvoiceId, JournalEntryId, LoadId,
    MatchId, PaymentId, TemplateId, UserId, VendorId,
};
pub use money::{Money, MoneyError};
