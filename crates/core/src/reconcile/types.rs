//! Match records and candidate shapes.

use chrono::{DateTime, NaiveDate, Utc};
use lading_shared::types::{CompanyId, MatchId, UserId};
use lading_shared::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of ledger document a bank transaction is matched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchedType {
    /// An accounts-receivable invoice.
    Invoice,
    /// An accounts-payable bill.
    Bill,
    /// A recorded payment.
    Payment,
}

impl MatchedType {
    /// Returns the string representation used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Bill => "bill",
            Self::Payment => "payment",
        }
    }
}

/// A recorded match proposal between one bank transaction and one ledger
/// document. Proposals are never edited or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankTransactionMatch {
    /// Unique identifier.
    pub id: MatchId,
    /// Company this match belongs to.
    pub company_id: CompanyId,
    /// External bank transaction identifier, opaque to the ledger.
    pub bank_txn_id: String,
    /// The kind of document matched.
    pub matched_type: MatchedType,
    /// The matched document's id.
    pub matched_id: Uuid,
    /// The amount being matched.
    pub amount: Money,
    /// Confidence in `[0, 1]`.
    pub confidence: Decimal,
    /// True when confidence exceeded the acceptance threshold at proposal
    /// time.
    pub is_auto_matched: bool,
    /// True once an operator explicitly accepted this match.
    pub manually_accepted: bool,
    /// Who (or what) proposed the match.
    pub matched_by: UserId,
    /// When the proposal was recorded.
    pub created_at: DateTime<Utc>,
}

/// The document-side inputs to confidence scoring.
#[derive(Debug, Clone)]
pub struct MatchCandidate {
    /// The document's amount (invoice total, bill total, payment amount).
    pub amount: Money,
    /// The document's relevant date (due date or payment date).
    pub date: NaiveDate,
    /// The document's description, used for token overlap.
    pub description: String,
}
