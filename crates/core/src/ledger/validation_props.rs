//! Property tests for posting validation.

use lading_shared::types::AccountId;
use lading_shared::Money;
use proptest::prelude::*;

use super::error::LedgerError;
use super::types::PostingLine;
use super::validation::validate_lines;

/// Strategy for a positive line amount in cents.
fn amount_strategy() -> impl Strategy<Value = i64> {
    1i64..=10_000_000
}

/// Strategy for a list of positive amounts.
fn amounts_strategy(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(amount_strategy(), 1..=max_len)
}

fn debit(cents: i64) -> PostingLine {
    PostingLine::debit(AccountId::new(), Money::from_cents(cents), "prop")
}

fn credit(cents: i64) -> PostingLine {
    PostingLine::credit(AccountId::new(), Money::from_cents(cents), "prop")
}

/// Builds a balanced group: each amount appears once as a debit and once
/// as a credit.
fn balanced_group(amounts: &[i64]) -> Vec<PostingLine> {
    let mut lines: Vec<PostingLine> = amounts.iter().map(|&a| debit(a)).collect();
    lines.extend(amounts.iter().map(|&a| credit(a)));
    lines
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Mirrored debit/credit groups always validate, and the reported
    /// totals equal the sum of the generated amounts.
    #[test]
    fn prop_balanced_groups_validate(amounts in amounts_strategy(10)) {
        let lines = balanced_group(&amounts);
        let totals = validate_lines(&lines).expect("balanced group must validate");

        let expected: Money = amounts.iter().map(|&a| Money::from_cents(a)).sum();
        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.debits, expected);
        prop_assert_eq!(totals.credits, expected);
    }

    /// Adding any nonzero delta to one debit line breaks the balance and
    /// is rejected with `UnbalancedPosting`.
    #[test]
    fn prop_perturbed_groups_rejected(
        amounts in amounts_strategy(10),
        delta in 1i64..=1_000,
    ) {
        let mut lines = balanced_group(&amounts);
        lines[0].debit += Money::from_cents(delta);

        prop_assert!(
            matches!(
                validate_lines(&lines),
                Err(LedgerError::UnbalancedPosting { .. })
            ),
            "expected Err(LedgerError::UnbalancedPosting)"
        );
    }

    /// Validation is order-independent.
    #[test]
    fn prop_validation_order_independent(amounts in amounts_strategy(8)) {
        let lines = balanced_group(&amounts);
        let mut reversed = lines.clone();
        reversed.reverse();

        prop_assert_eq!(
            validate_lines(&lines).is_ok(),
            validate_lines(&reversed).is_ok()
        );
    }

    /// A single-sided group (all debits) is never accepted.
    #[test]
    fn prop_single_sided_rejected(amounts in amounts_strategy(10)) {
        prop_assume!(amounts.len() >= 2);
        let lines: Vec<PostingLine> = amounts.iter().map(|&a| debit(a)).collect();

        prop_assert!(validate_lines(&lines).is_err());
    }
}
