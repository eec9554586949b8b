//! Bank reconciliation matching.
//!
//! External bank transactions are matched to ledger documents with a
//! confidence score. Proposals are append-only: the matcher records every
//! attempt and never deletes a prior match, so the full trail of match
//! attempts survives. The accepted match for a bank transaction is the
//! manually-accepted one if present, otherwise the latest auto-matched
//! proposal.

pub mod error;
pub mod matcher;
pub mod types;

pub use error::ReconcileError;
pub use matcher::{
    confidence_score, is_auto_match, select_accepted, validate_confidence, AUTO_ACCEPT_THRESHOLD,
};
pub use types::{BankTransactionMatch, MatchCandidate, MatchedType};
