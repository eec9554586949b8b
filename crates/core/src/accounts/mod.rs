//! Chart of accounts taxonomy and validation.
//!
//! Accounts form a per-company tree of typed nodes. The five canonical
//! account types are a closed enum, so an invalid type is unrepresentable;
//! validation covers code uniqueness, parent cycles, and the rule that an
//! account's type is frozen once postings reference it.

pub mod error;
pub mod types;
pub mod validation;

pub use error::AccountError;
pub use types::{Account, AccountType, NormalBalance};
pub use validation::{
    ensure_no_cycle, ensure_type_change_allowed, ensure_unique_code, validate_code,
};
