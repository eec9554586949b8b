//! Recurring scheduler service.

use chrono::{Days, NaiveDate, Utc};
use lading_shared::types::{CompanyId, TemplateId, UserId};
use serde::Deserialize;

use lading_core::recurring::{Frequency, RecurringError, RecurringTemplate, TemplatePayload};

use crate::store::{LedgerStore, Mutation, VersionGuard, WriteBatch};

use super::bills::{BillService, NewBill};
use super::error::EngineError;
use super::invoices::{InvoiceService, NewInvoice};

/// Input for scheduling a template.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTemplate {
    /// Company the template belongs to.
    pub company_id: CompanyId,
    /// Display name.
    pub name: String,
    /// Firing cadence.
    pub frequency: Frequency,
    /// What gets materialized.
    pub payload: TemplatePayload,
    /// The first date the template should fire.
    pub first_run_date: NaiveDate,
    /// Acting user; materialized postings carry this user.
    pub created_by: UserId,
}

/// Stores templates and materializes the due ones.
pub struct RecurringService<'a, S: LedgerStore> {
    store: &'a S,
}

impl<'a, S: LedgerStore> RecurringService<'a, S> {
    /// Creates a service over a store.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Stores a new active template.
    pub async fn schedule(&self, new: NewTemplate) -> Result<RecurringTemplate, EngineError> {
        let now = Utc::now();
        let template = RecurringTemplate {
            id: TemplateId::new(),
            company_id: new.company_id,
            name: new.name,
            frequency: new.frequency,
            payload: new.payload,
            next_run_date: new.first_run_date,
            is_active: true,
            created_by: new.created_by,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        let mut batch = WriteBatch::new(new.company_id);
        batch.push(Mutation::PutTemplate(template.clone()));
        self.store.commit(batch).await?;

        tracing::info!(
            company = %template.company_id,
            name = %template.name,
            total = %template.payload.total_amount(),
            next_run = %template.next_run_date,
            "scheduled recurring template"
        );
        Ok(template)
    }

    /// Deactivates a template so the scheduler skips it.
    ///
    /// # Errors
    ///
    /// `TemplateNotFound`.
    pub async fn deactivate(
        &self,
        company_id: CompanyId,
        id: TemplateId,
    ) -> Result<RecurringTemplate, EngineError> {
        let mut template = self
            .store
            .template(company_id, id)
            .await?
            .ok_or(EngineError::TemplateNotFound(id))?;

        let expected = template.version;
        template.is_active = false;
        template.updated_at = Utc::now();

        let mut batch = WriteBatch::new(company_id);
        batch.guard(VersionGuard::Template { id, expected });
        batch.push(Mutation::PutTemplate(template.clone()));
        self.store.commit(batch).await?;
        Ok(template)
    }

    /// Materializes every due template once and advances its run date.
    /// Returns the number of documents created.
    ///
    /// Each template commits in its own batch: the document, its
    /// postings, the advanced run date, and the `(template, run date)`
    /// fire marker. A concurrent or repeated run loses on either the
    /// version guard or the fire marker and skips the template, so
    /// re-running with the same `now` never double-materializes.
    pub async fn run_due(
        &self,
        company_id: CompanyId,
        now: NaiveDate,
    ) -> Result<usize, EngineError> {
        let templates = self.store.templates(company_id).await?;
        let mut materialized = 0;

        for template in templates {
            if !template.is_due(now) {
                continue;
            }
            // The commit-time fire marker is authoritative; this read
            // only avoids burning sequence numbers on an already-fired
            // run date.
            if self
                .store
                .was_fired(company_id, template.id, template.next_run_date)
                .await?
            {
                continue;
            }
            match self.fire(template).await {
                Ok(()) => materialized += 1,
                Err(EngineError::Store(e)) if e.is_retryable() => {
                    tracing::warn!("skipped template on concurrent run");
                }
                Err(EngineError::Store(crate::store::StoreError::DuplicateFire {
                    template_id,
                    scheduled_run_date,
                })) => {
                    tracing::warn!(
                        template = %template_id,
                        run_date = %scheduled_run_date,
                        "skipped already-fired template"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(company = %company_id, count = materialized, "processed due templates");
        Ok(materialized)
    }

    async fn fire(&self, mut template: RecurringTemplate) -> Result<(), EngineError> {
        let company_id = template.company_id;
        let scheduled_run_date = template.next_run_date;
        let template_id = template.id;
        let expected = template.version;

        let mut batch = WriteBatch::new(company_id);
        batch.guard(VersionGuard::Template {
            id: template_id,
            expected,
        });
        batch.push(Mutation::MarkFired {
            template_id,
            scheduled_run_date,
        });

        match template.payload.clone() {
            TemplatePayload::Invoice {
                customer_id,
                subtotal,
                tax_amount,
                terms,
                description,
            } => {
                let (invoice, entries) = InvoiceService::new(self.store)
                    .prepare_invoice(
                        NewInvoice {
                            company_id,
                            customer_id,
                            load_id: None,
                            issue_date: scheduled_run_date,
                            terms,
                            subtotal,
                            tax_amount,
                            description,
                            created_by: template.created_by,
                        },
                        true,
                    )
                    .await?;
                batch.push(Mutation::PutInvoice(invoice));
                batch.push(Mutation::AppendEntries(entries));
            }
            TemplatePayload::Bill {
                vendor_id,
                subtotal,
                tax_amount,
                due_in_days,
                description,
            } => {
                let due_date = scheduled_run_date
                    .checked_add_days(Days::new(u64::from(due_in_days)))
                    .ok_or(RecurringError::DateOverflow)?;
                let (bill, entries) = BillService::new(self.store)
                    .prepare_bill(
                        NewBill {
                            company_id,
                            vendor_id,
                            load_id: None,
                            bill_date: scheduled_run_date,
                            due_date,
                            subtotal,
                            tax_amount,
                            description,
                            created_by: template.created_by,
                        },
                        true,
                    )
                    .await?;
                batch.push(Mutation::PutBill(bill));
                batch.push(Mutation::AppendEntries(entries));
            }
        }

        template.next_run_date = template.frequency.advance(scheduled_run_date)?;
        template.updated_at = Utc::now();
        batch.push(Mutation::PutTemplate(template));

        self.store.commit(batch).await?;
        Ok(())
    }
}
