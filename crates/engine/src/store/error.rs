//! Error types for the storage layer.

use chrono::NaiveDate;
use lading_shared::types::TemplateId;
use thiserror::Error;
use uuid::Uuid;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A version guard failed: another writer committed first. Retryable
    /// after re-reading.
    #[error("Concurrent modification of {entity} {id}")]
    VersionConflict {
        /// The kind of record ("invoice", "bill", "template").
        entity: &'static str,
        /// The record's id.
        id: Uuid,
    },

    /// The (template, run date) pair was already fired.
    #[error("Template {template_id} already fired for {scheduled_run_date}")]
    DuplicateFire {
        /// The template.
        template_id: TemplateId,
        /// The run date that was already materialized.
        scheduled_run_date: NaiveDate,
    },

    /// A guard referenced a record that does not exist.
    #[error("{entity} {id} not found")]
    GuardTargetMissing {
        /// The kind of record.
        entity: &'static str,
        /// The record's id.
        id: Uuid,
    },

    /// The sequence counter overflowed.
    #[error("Sequence counter exhausted")]
    SequenceExhausted,
}

impl StoreError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::VersionConflict { .. } => "CONCURRENT_MODIFICATION",
            Self::DuplicateFire { .. } => "DUPLICATE_FIRE",
            Self::GuardTargetMissing { .. } => "GUARD_TARGET_MISSING",
            Self::SequenceExhausted => "SEQUENCE_EXHAUSTED",
        }
    }

    /// Returns true if the caller may retry after re-reading.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}
