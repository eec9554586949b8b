//! Storage interface and orchestrating services for Lading.
//!
//! This crate is the service-level API over the pure logic in
//! `lading-core`:
//!
//! - `store` - the `LedgerStore` trait (snapshot reads, atomic sequence
//!   allocation, all-or-nothing `WriteBatch` commits) and an in-memory
//!   reference implementation
//! - `services` - chart of accounts, posting, invoice/bill/payment
//!   lifecycle, reconciliation, reporting, and the recurring scheduler
//!
//! Every mutating operation builds one `WriteBatch` and commits it in a
//! single call, so a document is never observable without its postings.

pub mod services;
pub mod store;

pub use services::EngineError;
pub use store::{LedgerStore, MemoryStore, Mutation, StoreError, VersionGuard, WriteBatch};
