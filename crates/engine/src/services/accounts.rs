//! Chart of accounts service.

use chrono::Utc;
use lading_shared::types::{AccountId, CompanyId};
use serde::Deserialize;

use lading_core::accounts::{
    ensure_no_cycle, ensure_type_change_allowed, ensure_unique_code, validate_code, Account,
    AccountError, AccountType,
};

use crate::store::{LedgerStore, Mutation, WriteBatch};

use super::error::EngineError;

/// Input for creating an account.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    /// Company the account belongs to.
    pub company_id: CompanyId,
    /// Numeric code, unique per company.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Optional parent account.
    pub parent_id: Option<AccountId>,
}

/// Input for updating an account. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAccount {
    /// New display name.
    pub name: Option<String>,
    /// New account type; rejected once the account has postings.
    pub account_type: Option<AccountType>,
    /// New parent; cycle-checked.
    pub parent_id: Option<AccountId>,
}

/// Manages the per-company chart of accounts.
pub struct ChartService<'a, S: LedgerStore> {
    store: &'a S,
}

impl<'a, S: LedgerStore> ChartService<'a, S> {
    /// Creates a service over a store.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// `InvalidCode`, `DuplicateCode`, or `ParentNotFound`.
    pub async fn create_account(&self, new: NewAccount) -> Result<Account, EngineError> {
        validate_code(&new.code)?;

        let existing = self.store.accounts(new.company_id).await?;
        ensure_unique_code(existing.iter().map(|a| a.code.as_str()), &new.code)?;

        if let Some(parent_id) = new.parent_id {
            self.store
                .account(new.company_id, parent_id)
                .await?
                .ok_or(AccountError::ParentNotFound(parent_id))?;
        }

        let account = Account {
            id: AccountId::new(),
            company_id: new.company_id,
            code: new.code,
            name: new.name,
            account_type: new.account_type,
            parent_id: new.parent_id,
            is_active: true,
            created_at: Utc::now(),
        };

        let mut batch = WriteBatch::new(new.company_id);
        batch.push(Mutation::PutAccount(account.clone()));
        self.store.commit(batch).await?;

        tracing::info!(company = %account.company_id, code = %account.code, "created account");
        Ok(account)
    }

    /// Updates an account's name, type, or parent.
    ///
    /// # Errors
    ///
    /// `AccountNotFound`; `HasLedgerEntries` on a type change for a
    /// posted-to account; `ParentNotFound` / `ParentCycle` on reparent.
    pub async fn update_account(
        &self,
        company_id: CompanyId,
        id: AccountId,
        update: UpdateAccount,
    ) -> Result<Account, EngineError> {
        let mut account = self
            .store
            .account(company_id, id)
            .await?
            .ok_or(AccountError::AccountNotFound(id))?;

        if let Some(name) = update.name {
            account.name = name;
        }

        if let Some(account_type) = update.account_type {
            if account_type != account.account_type {
                let has_entries = self.store.account_has_entries(company_id, id).await?;
                ensure_type_change_allowed(id, has_entries)?;
                account.account_type = account_type;
            }
        }

        if let Some(parent_id) = update.parent_id {
            let all = self.store.accounts(company_id).await?;
            if !all.iter().any(|a| a.id == parent_id) {
                return Err(AccountError::ParentNotFound(parent_id).into());
            }
            let parent_of = |child: AccountId| {
                all.iter()
                    .find(|a| a.id == child)
                    .and_then(|a| a.parent_id)
            };
            ensure_no_cycle(id, parent_id, parent_of)?;
            account.parent_id = Some(parent_id);
        }

        let mut batch = WriteBatch::new(company_id);
        batch.push(Mutation::PutAccount(account.clone()));
        self.store.commit(batch).await?;
        Ok(account)
    }

    /// Deactivates an account. Accounts are never deleted; deactivation
    /// keeps historical postings resolvable.
    ///
    /// # Errors
    ///
    /// `AccountNotFound`.
    pub async fn deactivate(
        &self,
        company_id: CompanyId,
        id: AccountId,
    ) -> Result<Account, EngineError> {
        let mut account = self
            .store
            .account(company_id, id)
            .await?
            .ok_or(AccountError::AccountNotFound(id))?;
        account.is_active = false;

        let mut batch = WriteBatch::new(company_id);
        batch.push(Mutation::PutAccount(account.clone()));
        self.store.commit(batch).await?;

        tracing::info!(company = %company_id, code = %account.code, "deactivated account");
        Ok(account)
    }

    /// Lists accounts ordered by code.
    pub async fn list_accounts(
        &self,
        company_id: CompanyId,
        active_only: bool,
    ) -> Result<Vec<Account>, EngineError> {
        let mut accounts = self.store.accounts(company_id).await?;
        if active_only {
            accounts.retain(|a| a.is_active);
        }
        Ok(accounts)
    }

    /// Lists active accounts of one type, ordered by code. Deactivated
    /// accounts are omitted; they cannot take new postings.
    pub async fn accounts_by_type(
        &self,
        company_id: CompanyId,
        account_type: AccountType,
    ) -> Result<Vec<Account>, EngineError> {
        let mut accounts = self.store.accounts(company_id).await?;
        accounts.retain(|a| a.is_active && a.account_type == account_type);
        Ok(accounts)
    }
}
