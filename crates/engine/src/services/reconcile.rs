//! Reconciliation matcher service.

use chrono::Utc;
use lading_shared::types::{CompanyId, MatchId, PaymentId, UserId};
use lading_shared::Money;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use lading_core::reconcile::{
    is_auto_match, select_accepted, validate_confidence, BankTransactionMatch, MatchedType,
    ReconcileError,
};

use crate::store::{LedgerStore, Mutation, WriteBatch};

use super::error::EngineError;

/// Input for proposing a match.
#[derive(Debug, Clone, Deserialize)]
pub struct ProposeMatch {
    /// Company the bank transaction belongs to.
    pub company_id: CompanyId,
    /// External bank transaction identifier.
    pub bank_txn_id: String,
    /// The kind of document matched.
    pub matched_type: MatchedType,
    /// The matched document's id.
    pub matched_id: Uuid,
    /// The amount being matched.
    pub amount: Money,
    /// Caller-computed confidence in `[0, 1]`.
    pub confidence: Decimal,
    /// Who (or what) proposed the match.
    pub matched_by: UserId,
}

/// Records match proposals and applies the acceptance policy.
pub struct ReconcileService<'a, S: LedgerStore> {
    store: &'a S,
}

impl<'a, S: LedgerStore> ReconcileService<'a, S> {
    /// Creates a service over a store.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Records a proposal. Prior proposals for the same bank transaction
    /// are kept untouched - the trail of attempts is the audit record.
    /// Low confidence is not an error; an unmatched transaction is an
    /// expected outcome.
    ///
    /// # Errors
    ///
    /// `InvalidConfidence` outside `[0, 1]`, `NonPositiveAmount`.
    pub async fn propose_match(
        &self,
        propose: ProposeMatch,
    ) -> Result<BankTransactionMatch, EngineError> {
        validate_confidence(propose.confidence)?;
        if !propose.amount.is_positive() {
            return Err(ReconcileError::NonPositiveAmount.into());
        }

        let record = BankTransactionMatch {
            id: MatchId::new(),
            company_id: propose.company_id,
            bank_txn_id: propose.bank_txn_id,
            matched_type: propose.matched_type,
            matched_id: propose.matched_id,
            amount: propose.amount,
            confidence: propose.confidence,
            is_auto_matched: is_auto_match(propose.confidence),
            manually_accepted: false,
            matched_by: propose.matched_by,
            created_at: Utc::now(),
        };

        let mut batch = WriteBatch::new(propose.company_id);
        batch.push(Mutation::PutMatch(record.clone()));
        self.store.commit(batch).await?;

        tracing::debug!(
            company = %record.company_id,
            bank_txn = %record.bank_txn_id,
            confidence = %record.confidence,
            auto = record.is_auto_matched,
            "recorded match proposal"
        );
        Ok(record)
    }

    /// Manually accepts a proposal. A manual acceptance is authoritative
    /// over any auto-match, and a bank transaction carries at most one.
    ///
    /// # Errors
    ///
    /// `MatchNotFound`, or `AlreadyAccepted` when another proposal for
    /// the same transaction was already accepted.
    pub async fn accept_match(
        &self,
        company_id: CompanyId,
        id: MatchId,
    ) -> Result<BankTransactionMatch, EngineError> {
        let mut record = self
            .store
            .match_record(company_id, id)
            .await?
            .ok_or(ReconcileError::MatchNotFound)?;

        let siblings = self
            .store
            .matches_for(company_id, &record.bank_txn_id)
            .await?;
        if siblings.iter().any(|m| m.manually_accepted && m.id != id) {
            return Err(ReconcileError::AlreadyAccepted(record.bank_txn_id).into());
        }

        record.manually_accepted = true;

        let mut batch = WriteBatch::new(company_id);
        batch.push(Mutation::PutMatch(record.clone()));

        // An accepted match against a payment flips its reconciliation
        // flag in the same commit.
        if record.matched_type == MatchedType::Payment {
            let payment_id = PaymentId::from_uuid(record.matched_id);
            if let Some(mut payment) = self.store.payment(company_id, payment_id).await? {
                payment.is_matched = true;
                batch.push(Mutation::PutPayment(payment));
            }
        }
        self.store.commit(batch).await?;

        tracing::info!(
            company = %company_id,
            bank_txn = %record.bank_txn_id,
            "manually accepted match"
        );
        Ok(record)
    }

    /// The authoritative match for a bank transaction, if any: the
    /// manually-accepted proposal, else the latest auto-match.
    pub async fn accepted_match_for(
        &self,
        company_id: CompanyId,
        bank_txn_id: &str,
    ) -> Result<Option<BankTransactionMatch>, EngineError> {
        let matches = self.store.matches_for(company_id, bank_txn_id).await?;
        Ok(select_accepted(&matches).cloned())
    }

    /// All recorded proposals for a bank transaction, oldest first.
    pub async fn match_history(
        &self,
        company_id: CompanyId,
        bank_txn_id: &str,
    ) -> Result<Vec<BankTransactionMatch>, EngineError> {
        Ok(self.store.matches_for(company_id, bank_txn_id).await?)
    }
}
