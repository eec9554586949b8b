//! Shared types for Lading.
//!
//! This crate provides common types used across all other crates:
//! - Money with fixed two-decimal precision (never floating point)
//! - Typed IDs for type-safe entity references

pub mod types;

pub use types::{Money, MoneyError};
