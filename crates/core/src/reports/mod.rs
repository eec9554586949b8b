//! Read-side reporting.
//!
//! Reports are pure aggregations over accounts, journal entries, and
//! invoices. They never mutate anything and never error on empty input;
//! a company with no activity gets zero-valued aggregates. Field names on
//! the report structures are rendered directly by export layers, so they
//! are part of the wire contract.

pub mod service;
pub mod types;

#[cfg(test)]
mod aging_props;
#[cfg(test)]
mod tests;

pub use service::{ar_aging, balance_sheet, profit_and_loss};
pub use types::{
    AccountBreakdown, AgingBucket, ArAgingReport, BalanceSheetReport, BalanceSheetSection,
    ProfitAndLossReport,
};
