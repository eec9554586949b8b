//! Core accounting logic for Lading.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here; persistence and orchestration live in `lading-engine`.
//!
//! # Modules
//!
//! - `accounts` - Chart of accounts taxonomy and validation
//! - `ledger` - Double-entry posting validation and balance rules
//! - `documents` - Invoice/bill/payment lifecycle state machines
//! - `reconcile` - Bank-transaction match policy and confidence scoring
//! - `reports` - P&L, balance sheet, and AR-aging aggregation
//! - `recurring` - Recurring-document calendar arithmetic

pub mod accounts;
pub mod documents;
pub mod ledger;
pub mod reconcile;
pub mod recurring;
pub mod reports;
