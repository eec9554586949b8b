//! Recurring transaction templates and schedule arithmetic.
//!
//! A template describes an invoice or bill to materialize on a cadence.
//! The calendar rules live here; actually firing a template (creating the
//! document and advancing the date atomically) is the storage layer's job.

pub mod error;
pub mod schedule;
pub mod types;

pub use error::RecurringError;
pub use schedule::Frequency;
pub use types::{RecurringTemplate, TemplatePayload};
