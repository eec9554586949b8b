//! Property tests for payment application.

use chrono::{NaiveDate, Utc};
use lading_shared::types::{CompanyId, CustomerId, InvoiceId};
use lading_shared::Money;
use proptest::prelude::*;

use super::invoice::{Invoice, InvoiceStatus, PaymentTerms};

fn invoice(total_cents: i64) -> Invoice {
    Invoice {
        id: InvoiceId::new(),
        company_id: CompanyId::new(),
        number: "INV-2025-0001".into(),
        customer_id: CustomerId::new(),
        load_id: None,
        issue_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        due_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        subtotal: Money::from_cents(total_cents),
        tax_amount: Money::ZERO,
        total_amount: Money::from_cents(total_cents),
        amount_paid: Money::ZERO,
        status: InvoiceStatus::Sent,
        terms: PaymentTerms::Net30,
        description: "prop".into(),
        is_recurring: false,
        version: 1,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Splits `total` into between 1 and 6 positive installments that sum to
/// exactly `total`.
fn installments_strategy(total: i64) -> impl Strategy<Value = Vec<i64>> {
    (1usize..=6).prop_flat_map(move |n| {
        prop::collection::vec(1i64..=total, n - 1).prop_map(move |mut cuts| {
            cuts.push(0);
            cuts.push(total);
            cuts.sort_unstable();
            cuts.windows(2).map(|w| w[1] - w[0]).filter(|&d| d > 0).collect()
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Applying installments in sequence keeps `amount_paid` monotonic,
    /// never above the total, and ends in `Paid` exactly when the
    /// installments cover the total.
    #[test]
    fn prop_installments_settle_exactly(
        total in 100i64..=10_000_000,
        installments in (100i64..=10_000_000).prop_flat_map(installments_strategy),
    ) {
        prop_assume!(installments.iter().sum::<i64>() <= total);

        let mut inv = invoice(total);
        let mut prev_paid = Money::ZERO;
        for &cents in &installments {
            let applied = inv.apply_payment(Money::from_cents(cents))
                .expect("installment within outstanding must apply");
            prop_assert!(applied.amount_paid >= prev_paid);
            prop_assert!(applied.amount_paid <= inv.total_amount);
            prev_paid = applied.amount_paid;
            inv.amount_paid = applied.amount_paid;
            inv.status = applied.status;
        }

        let covered = installments.iter().sum::<i64>() == total;
        prop_assert_eq!(inv.status == InvoiceStatus::Paid, covered);
    }

    /// Any payment above the outstanding balance is rejected and leaves
    /// the invoice untouched.
    #[test]
    fn prop_overpayment_always_rejected(
        total in 100i64..=1_000_000,
        paid in 0i64..=1_000_000,
        excess in 1i64..=1_000,
    ) {
        prop_assume!(paid < total);

        let mut inv = invoice(total);
        inv.amount_paid = Money::from_cents(paid);
        if paid > 0 {
            inv.status = InvoiceStatus::Partial;
        }

        let outstanding = total - paid;
        let result = inv.apply_payment(Money::from_cents(outstanding + excess));
        prop_assert!(result.is_err());
        prop_assert_eq!(inv.amount_paid, Money::from_cents(paid));
    }

    /// Paying the exact outstanding balance always settles the invoice.
    #[test]
    fn prop_exact_outstanding_settles(
        total in 100i64..=1_000_000,
        paid in 0i64..=1_000_000,
    ) {
        prop_assume!(paid < total);

        let mut inv = invoice(total);
        inv.amount_paid = Money::from_cents(paid);
        if paid > 0 {
            inv.status = InvoiceStatus::Partial;
        }

        let applied = inv.apply_payment(inv.outstanding())
            .expect("exact outstanding must apply");
        prop_assert_eq!(applied.status, InvoiceStatus::Paid);
        prop_assert_eq!(applied.amount_paid, inv.total_amount);
    }
}
