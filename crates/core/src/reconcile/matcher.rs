//! Confidence scoring and the acceptance policy.

use chrono::NaiveDate;
use lading_shared::Money;
use rust_decimal::Decimal;

use super::error::ReconcileError;
use super::types::{BankTransactionMatch, MatchCandidate};

/// Proposals above this confidence are auto-matched. 0.9
pub const AUTO_ACCEPT_THRESHOLD: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

/// Weight of amount closeness in the confidence score. 0.5
const AMOUNT_WEIGHT: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
/// Weight of date proximity. 0.3
const DATE_WEIGHT: Decimal = Decimal::from_parts(3, 0, 0, false, 1);
/// Weight of description token overlap. 0.2
const TOKEN_WEIGHT: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

/// Date differences at or beyond this many days score zero proximity.
const DATE_WINDOW_DAYS: i64 = 30;

/// Rejects confidences outside `[0, 1]`.
///
/// # Errors
///
/// Returns `InvalidConfidence` when out of range.
pub fn validate_confidence(confidence: Decimal) -> Result<(), ReconcileError> {
    if confidence < Decimal::ZERO || confidence > Decimal::ONE {
        return Err(ReconcileError::InvalidConfidence(confidence));
    }
    Ok(())
}

/// The acceptance policy: strictly above the threshold.
#[must_use]
pub fn is_auto_match(confidence: Decimal) -> bool {
    confidence > AUTO_ACCEPT_THRESHOLD
}

/// Scores a candidate document against a bank transaction.
///
/// Three weighted components: amount closeness (0.5), date proximity
/// within a 30-day window (0.3), and description token overlap (0.2).
/// The result lies in `[0, 1]` and is rounded to four decimal places.
#[must_use]
pub fn confidence_score(
    candidate: &MatchCandidate,
    bank_amount: Money,
    bank_date: NaiveDate,
    bank_description: &str,
) -> Decimal {
    let amount = amount_closeness(candidate.amount, bank_amount);
    let date = date_proximity(candidate.date, bank_date);
    let tokens = token_overlap(&candidate.description, bank_description);

    let score = AMOUNT_WEIGHT * amount + DATE_WEIGHT * date + TOKEN_WEIGHT * tokens;
    score.round_dp(4)
}

/// Picks the authoritative match for one bank transaction out of its
/// recorded proposals: the latest manually-accepted one wins; otherwise
/// the latest auto-matched proposal; otherwise none.
#[must_use]
pub fn select_accepted(matches: &[BankTransactionMatch]) -> Option<&BankTransactionMatch> {
    matches
        .iter()
        .filter(|m| m.manually_accepted)
        .max_by_key(|m| m.created_at)
        .or_else(|| {
            matches
                .iter()
                .filter(|m| m.is_auto_matched)
                .max_by_key(|m| m.created_at)
        })
}

/// 1 for an exact amount match, falling off with the relative difference.
fn amount_closeness(a: Money, b: Money) -> Decimal {
    if a == b {
        return Decimal::ONE;
    }
    let base = a.abs().amount().max(b.abs().amount());
    if base.is_zero() {
        return Decimal::ONE;
    }
    let diff = (a - b).abs().amount();
    (Decimal::ONE - diff / base).max(Decimal::ZERO)
}

/// 1 for the same day, linearly down to 0 at the window edge.
fn date_proximity(a: NaiveDate, b: NaiveDate) -> Decimal {
    let days = (a - b).num_days().abs();
    if days >= DATE_WINDOW_DAYS {
        return Decimal::ZERO;
    }
    Decimal::ONE - Decimal::from(days) / Decimal::from(DATE_WINDOW_DAYS)
}

/// Jaccard overlap of lowercased alphanumeric tokens.
fn token_overlap(a: &str, b: &str) -> Decimal {
    let ta = tokens(a);
    let tb = tokens(b);
    if ta.is_empty() && tb.is_empty() {
        return Decimal::ZERO;
    }
    let shared = ta.iter().filter(|t| tb.contains(*t)).count();
    let union = ta.len() + tb.len() - shared;
    if union == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(shared) / Decimal::from(union)
}

fn tokens(text: &str) -> std::collections::BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}
