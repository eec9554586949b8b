//! Business rule validation for the chart of accounts.

use lading_shared::types::AccountId;

use super::error::AccountError;

/// Validates that an account code is non-empty and numeric.
///
/// # Errors
///
/// Returns `AccountError::InvalidCode` otherwise.
pub fn validate_code(code: &str) -> Result<(), AccountError> {
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AccountError::InvalidCode(code.to_string()));
    }
    Ok(())
}

/// Validates that a code is not already taken within the company.
///
/// # Errors
///
/// Returns `AccountError::DuplicateCode` if any existing code matches.
pub fn ensure_unique_code<'a, I>(existing_codes: I, code: &str) -> Result<(), AccountError>
where
    I: IntoIterator<Item = &'a str>,
{
    if existing_codes.into_iter().any(|c| c == code) {
        return Err(AccountError::DuplicateCode(code.to_string()));
    }
    Ok(())
}

/// Validates that attaching `account_id` under `parent_id` keeps the tree
/// acyclic, given a lookup from an account to its parent.
///
/// Walks the ancestor chain from `parent_id`; if `account_id` appears the
/// reparenting closes a loop. A depth bound guards against corrupted chains.
///
/// # Errors
///
/// Returns `AccountError::ParentCycle` if a cycle would form.
pub fn ensure_no_cycle<F>(
    account_id: AccountId,
    parent_id: AccountId,
    parent_of: F,
) -> Result<(), AccountError>
where
    F: Fn(AccountId) -> Option<AccountId>,
{
    const MAX_DEPTH: usize = 64;

    let mut current = Some(parent_id);
    let mut depth = 0;
    while let Some(ancestor) = current {
        if ancestor == account_id {
            return Err(AccountError::ParentCycle(parent_id));
        }
        depth += 1;
        if depth > MAX_DEPTH {
            return Err(AccountError::ParentCycle(parent_id));
        }
        current = parent_of(ancestor);
    }
    Ok(())
}

/// Validates that an account's type may be changed.
///
/// The type is frozen once postings reference the account, because changing
/// it would reclassify historical reports.
///
/// # Errors
///
/// Returns `AccountError::HasLedgerEntries` if the account has postings.
pub fn ensure_type_change_allowed(
    account_id: AccountId,
    has_entries: bool,
) -> Result<(), AccountError> {
    if has_entries {
        return Err(AccountError::HasLedgerEntries(account_id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_validate_code() {
        assert!(validate_code("1100").is_ok());
        assert!(validate_code("4000").is_ok());
        assert!(matches!(validate_code(""), Err(AccountError::InvalidCode(_))));
        assert!(matches!(
            validate_code("AR-1"),
            Err(AccountError::InvalidCode(_))
        ));
    }

    #[test]
    fn test_unique_code() {
        let existing = ["1000", "1100"];
        assert!(ensure_unique_code(existing, "2000").is_ok());
        assert!(matches!(
            ensure_unique_code(existing, "1100"),
            Err(AccountError::DuplicateCode(_))
        ));
    }

    #[test]
    fn test_no_cycle_in_straight_chain() {
        // c -> b -> a -> (root)
        let a = AccountId::new();
        let b = AccountId::new();
        let c = AccountId::new();
        let parents: HashMap<AccountId, AccountId> = [(b, a), (c, b)].into();
        let lookup = |id| parents.get(&id).copied();

        let new_account = AccountId::new();
        assert!(ensure_no_cycle(new_account, c, lookup).is_ok());
    }

    #[test]
    fn test_cycle_detected_when_reparenting_under_descendant() {
        // b's parent is a; reparenting a under b closes a loop.
        let a = AccountId::new();
        let b = AccountId::new();
        let parents: HashMap<AccountId, AccountId> = [(b, a)].into();
        let lookup = |id| parents.get(&id).copied();

        assert!(matches!(
            ensure_no_cycle(a, b, lookup),
            Err(AccountError::ParentCycle(_))
        ));
    }

    #[test]
    fn test_self_parent_is_a_cycle() {
        let a = AccountId::new();
        assert!(matches!(
            ensure_no_cycle(a, a, |_| None),
            Err(AccountError::ParentCycle(_))
        ));
    }

    #[test]
    fn test_corrupted_chain_hits_depth_bound() {
        // Pre-existing loop between two other accounts must not hang.
        let a = AccountId::new();
        let b = AccountId::new();
        let parents: HashMap<AccountId, AccountId> = [(a, b), (b, a)].into();
        let lookup = |id| parents.get(&id).copied();

        let other = AccountId::new();
        assert!(matches!(
            ensure_no_cycle(other, a, lookup),
            Err(AccountError::ParentCycle(_))
        ));
    }

    #[test]
    fn test_type_change_gate() {
        let id = AccountId::new();
        assert!(ensure_type_change_allowed(id, false).is_ok());
        assert!(matches!(
            ensure_type_change_allowed(id, true),
            Err(AccountError::HasLedgerEntries(_))
        ));
    }
}
