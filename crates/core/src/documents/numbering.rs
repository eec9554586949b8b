//! Document number formatting.
//!
//! Numbers follow `<PREFIX>-<year>-<seq>` with the sequence zero-padded
//! to four digits (`INV-2025-0001`). Sequences are per company, per kind,
//! per calendar year; allocation itself lives in the storage layer so the
//! counter survives concurrent writers.

use serde::{Deserialize, Serialize};

/// The per-company, per-year counters a store must maintain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceKind {
    /// Invoice numbers (`INV-`).
    Invoice,
    /// Bill numbers (`BILL-`).
    Bill,
    /// Payment numbers (`PAY-`).
    Payment,
}

impl SequenceKind {
    /// The document-number prefix for this kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Invoice => "INV",
            Self::Bill => "BILL",
            Self::Payment => "PAY",
        }
    }
}

/// Formats a document number from an allocated sequence value.
///
/// Sequences above 9999 widen naturally rather than wrapping.
#[must_use]
pub fn format_number(kind: SequenceKind, year: i32, seq: u32) -> String {
    format!("{}-{}-{:04}", kind.prefix(), year, seq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SequenceKind::Invoice, 2025, 1, "INV-2025-0001")]
    #[case(SequenceKind::Invoice, 2025, 42, "INV-2025-0042")]
    #[case(SequenceKind::Bill, 2024, 137, "BILL-2024-0137")]
    #[case(SequenceKind::Payment, 2026, 9999, "PAY-2026-9999")]
    #[case(SequenceKind::Payment, 2026, 10_000, "PAY-2026-10000")]
    fn test_format_number(
        #[case] kind: SequenceKind,
        #[case] year: i32,
        #[case] seq: u32,
        #[case] expected: &str,
    ) {
        assert_eq!(format_number(kind, year, seq), expected);
    }
}
