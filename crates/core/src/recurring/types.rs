//! Recurring template records.

use chrono::{DateTime, NaiveDate, Utc};
use lading_shared::types::{CompanyId, CustomerId, TemplateId, UserId, VendorId};
use lading_shared::Money;
use serde::{Deserialize, Serialize};

use crate::documents::PaymentTerms;

use super::schedule::Frequency;

/// What a template materializes when it fires.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TemplatePayload {
    /// A receivable invoice.
    Invoice {
        /// The customer to bill.
        customer_id: CustomerId,
        /// Subtotal before tax.
        subtotal: Money,
        /// Tax amount.
        tax_amount: Money,
        /// Payment terms; the due date is computed from the run date.
        terms: PaymentTerms,
        /// Line description.
        description: String,
    },
    /// A payable bill.
    Bill {
        /// The vendor owed.
        vendor_id: VendorId,
        /// Subtotal before tax.
        subtotal: Money,
        /// Tax amount.
        tax_amount: Money,
        /// Days until the bill is due.
        due_in_days: u32,
        /// Line description.
        description: String,
    },
}

impl TemplatePayload {
    /// Total amount the materialized document will carry.
    #[must_use]
    pub fn total_amount(&self) -> Money {
        match self {
            Self::Invoice {
                subtotal,
                tax_amount,
                ..
            }
            | Self::Bill {
                subtotal,
                tax_amount,
                ..
            } => *subtotal + *tax_amount,
        }
    }
}

/// A stored recurring template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTemplate {
    /// Unique identifier.
    pub id: TemplateId,
    /// Company this template belongs to.
    pub company_id: CompanyId,
    /// Display name ("Monthly office rent").
    pub name: String,
    /// Firing cadence.
    pub frequency: Frequency,
    /// What gets materialized.
    pub payload: TemplatePayload,
    /// The next date this template is due to fire.
    pub next_run_date: NaiveDate,
    /// Inactive templates are skipped by the scheduler.
    pub is_active: bool,
    /// Who created the template; materialized postings carry this user.
    pub created_by: UserId,
    /// Optimistic-concurrency version, managed by the store.
    pub version: u64,
    /// When the template was created.
    pub created_at: DateTime<Utc>,
    /// When the template was last updated.
    pub updated_at: DateTime<Utc>,
}

impl RecurringTemplate {
    /// Returns true if the template should fire at or before `now`.
    #[must_use]
    pub fn is_due(&self, now: NaiveDate) -> bool {
        self.is_active && self.next_run_date <= now
    }
}
