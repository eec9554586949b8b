//! The posting engine.

use chrono::{NaiveDate, Utc};
use lading_shared::types::{CompanyId, JournalEntryId, UserId};
use uuid::Uuid;

use lading_core::ledger::{validate_lines, JournalEntry, LedgerError, PostingLine, ReferenceType};

use crate::store::{LedgerStore, Mutation, WriteBatch};

use super::error::EngineError;

/// Appends balanced posting groups to the ledger.
pub struct PostingService<'a, S: LedgerStore> {
    store: &'a S,
}

impl<'a, S: LedgerStore> PostingService<'a, S> {
    /// Creates a service over a store.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Validates and appends a posting group in one commit.
    ///
    /// # Errors
    ///
    /// Returns a `LedgerError` for rule violations (too few lines,
    /// unbalanced totals, inactive accounts) before anything is written.
    pub async fn post(
        &self,
        company_id: CompanyId,
        transaction_date: NaiveDate,
        lines: Vec<PostingLine>,
        reference_type: ReferenceType,
        reference_id: Uuid,
        created_by: UserId,
    ) -> Result<Vec<JournalEntry>, EngineError> {
        let entries = prepare_entries(
            self.store,
            company_id,
            transaction_date,
            lines,
            reference_type,
            reference_id,
            created_by,
        )
        .await?;

        let mut batch = WriteBatch::new(company_id);
        batch.push(Mutation::AppendEntries(entries.clone()));
        self.store.commit(batch).await?;

        tracing::debug!(
            company = %company_id,
            reference = %reference_id,
            lines = entries.len(),
            "posted journal entries"
        );
        Ok(entries)
    }
}

/// Validates lines against the ledger rules and the chart, and builds the
/// journal entries without committing them. Lifecycle services use this to
/// bundle postings with document rows in a single batch.
pub(crate) async fn prepare_entries<S: LedgerStore>(
    store: &S,
    company_id: CompanyId,
    transaction_date: NaiveDate,
    lines: Vec<PostingLine>,
    reference_type: ReferenceType,
    reference_id: Uuid,
    created_by: UserId,
) -> Result<Vec<JournalEntry>, EngineError> {
    validate_lines(&lines)?;

    for line in &lines {
        let account = store
            .account(company_id, line.account_id)
            .await?
            .ok_or(LedgerError::AccountNotFound(line.account_id))?;
        if !account.is_active {
            return Err(LedgerError::AccountInactive(account.id).into());
        }
    }

    let now = Utc::now();
    Ok(lines
        .into_iter()
        .map(|line| JournalEntry {
            id: JournalEntryId::new(),
            company_id,
            transaction_date,
            account_id: line.account_id,
            debit: line.debit,
            credit: line.credit,
            description: line.description,
            reference_type,
            reference_id,
            created_by,
            created_at: now,
        })
        .collect())
}
