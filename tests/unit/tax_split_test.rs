// Property-based tests for invoice totals and the CGST/SGST display split.
//
// Totals are derived values: subtotal is the sum of line amounts, tax is
// subtotal * rate / 100, and CGST/SGST are fixed equal halves of the tax.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use billforge::invoices::models::{DraftAction, InvoiceDraft, ItemEdit};

fn draft_from_amounts(amounts: &[(u32, u32)], tax_rate: Decimal) -> InvoiceDraft {
    let mut draft = InvoiceDraft::new();
    draft.apply(DraftAction::SetTaxRate(tax_rate)).unwrap();

    for (i, (quantity, rate)) in amounts.iter().enumerate() {
        if i > 0 {
            draft.apply(DraftAction::AddItem).unwrap();
        }
        draft
            .apply(DraftAction::EditItem {
                index: i,
                edit: ItemEdit::Quantity(Decimal::from(*quantity)),
            })
            .unwrap();
        draft
            .apply(DraftAction::EditItem {
                index: i,
                edit: ItemEdit::Rate(Decimal::from(*rate)),
            })
            .unwrap();
    }

    draft
}

proptest! {
    #[test]
    fn subtotal_is_sum_of_item_amounts(
        items in prop::collection::vec((1u32..1000u32, 0u32..100_000u32), 1..10)
    ) {
        let draft = draft_from_amounts(&items, dec!(18));
        let totals = draft.compute_totals();

        let expected: Decimal = draft.items.iter().map(|i| i.amount).sum();
        prop_assert_eq!(totals.subtotal, expected);
    }

    #[test]
    fn tax_formula_holds_for_any_rate(
        items in prop::collection::vec((1u32..1000u32, 0u32..100_000u32), 1..10),
        rate_percent in 0u32..=100u32
    ) {
        let rate = Decimal::from(rate_percent);
        let draft = draft_from_amounts(&items, rate);
        let totals = draft.compute_totals();

        prop_assert_eq!(totals.tax_amount, totals.subtotal * rate / dec!(100));
        prop_assert_eq!(totals.total, totals.subtotal + totals.tax_amount);
    }

    #[test]
    fn cgst_and_sgst_reconstruct_the_tax(
        items in prop::collection::vec((1u32..1000u32, 0u32..100_000u32), 1..10),
        rate_percent in 0u32..=100u32
    ) {
        let draft = draft_from_amounts(&items, Decimal::from(rate_percent));
        let totals = draft.compute_totals();

        // the halves are exact, so they always sum back to the whole
        prop_assert_eq!(totals.cgst_amount() + totals.sgst_amount(), totals.tax_amount);
        prop_assert_eq!(totals.cgst_amount(), totals.sgst_amount());
    }

    #[test]
    fn zero_rate_means_zero_tax(
        items in prop::collection::vec((1u32..1000u32, 0u32..100_000u32), 1..10)
    ) {
        let draft = draft_from_amounts(&items, dec!(0));
        let totals = draft.compute_totals();

        prop_assert_eq!(totals.tax_amount, dec!(0));
        prop_assert_eq!(totals.total, totals.subtotal);
    }
}

#[test]
fn totals_never_cached_across_edits() {
    let mut draft = draft_from_amounts(&[(2, 100)], dec!(18));
    let before = draft.compute_totals();
    assert_eq!(before.subtotal, dec!(200));

    draft
        .apply(DraftAction::EditItem {
            index: 0,
            edit: ItemEdit::Rate(dec!(150)),
        })
        .unwrap();

    let after = draft.compute_totals();
    assert_eq!(after.subtotal, dec!(300));
    assert_eq!(after.tax_amount, dec!(54.00));
}

#[test]
fn tax_rate_above_hundred_rejected() {
    let mut draft = InvoiceDraft::new();
    assert!(draft.apply(DraftAction::SetTaxRate(dec!(101))).is_err());
    assert!(draft.apply(DraftAction::SetTaxRate(dec!(-1))).is_err());
    assert_eq!(draft.tax_rate, dec!(18));
}
