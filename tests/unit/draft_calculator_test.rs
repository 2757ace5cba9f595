// Property-based and scenario tests for the invoice draft reducer.
//
// The invariant under test: after any accepted edit, every line item holds
// amount == quantity * rate, and a draft never drops below one line item.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use billforge::invoices::models::{Customer, DraftAction, InvoiceDraft, ItemEdit};
use billforge::products::models::ProductSuggestion;

fn draft_with_rate(rate: Decimal) -> InvoiceDraft {
    let mut draft = InvoiceDraft::new();
    draft
        .apply(DraftAction::EditItem {
            index: 0,
            edit: ItemEdit::Rate(rate),
        })
        .unwrap();
    draft
}

proptest! {
    #[test]
    fn amount_follows_quantity_and_rate(
        quantity_cents in 1u64..1_000_000u64,
        rate_cents in 0u64..100_000_000u64
    ) {
        let quantity = Decimal::new(quantity_cents as i64, 2);
        let rate = Decimal::new(rate_cents as i64, 2);

        let mut draft = draft_with_rate(rate);
        draft.apply(DraftAction::EditItem {
            index: 0,
            edit: ItemEdit::Quantity(quantity),
        }).unwrap();

        prop_assert_eq!(draft.items[0].amount, quantity * rate);
    }

    #[test]
    fn add_item_grows_by_exactly_one(extra in 1usize..20usize) {
        let mut draft = InvoiceDraft::new();
        for _ in 0..extra {
            let before = draft.items.len();
            draft.apply(DraftAction::AddItem).unwrap();
            prop_assert_eq!(draft.items.len(), before + 1);
            prop_assert_eq!(draft.items.last().unwrap().amount, Decimal::ZERO);
        }
    }

    #[test]
    fn nonpositive_quantity_never_stored(raw in -1_000_000i64..=0i64) {
        let mut draft = draft_with_rate(dec!(10));
        let before = draft.items[0].clone();

        let result = draft.apply(DraftAction::EditItem {
            index: 0,
            edit: ItemEdit::Quantity(Decimal::from(raw)),
        });

        prop_assert!(result.is_err());
        prop_assert_eq!(&draft.items[0], &before);
    }
}

#[test]
fn new_draft_starts_with_one_empty_item() {
    let draft = InvoiceDraft::new();
    assert_eq!(draft.items.len(), 1);
    assert_eq!(draft.items[0].quantity, dec!(1));
    assert_eq!(draft.items[0].rate, dec!(0));
    assert_eq!(draft.items[0].amount, dec!(0));
}

#[test]
fn remove_item_on_single_item_draft_is_noop() {
    let mut draft = InvoiceDraft::new();
    draft.apply(DraftAction::RemoveItem { index: 0 }).unwrap();
    assert_eq!(draft.items.len(), 1);
}

#[test]
fn remove_item_drops_the_right_row() {
    let mut draft = InvoiceDraft::new();
    draft
        .apply(DraftAction::EditItem {
            index: 0,
            edit: ItemEdit::ProductName("first".to_string()),
        })
        .unwrap();
    draft.apply(DraftAction::AddItem).unwrap();
    draft
        .apply(DraftAction::EditItem {
            index: 1,
            edit: ItemEdit::ProductName("second".to_string()),
        })
        .unwrap();

    draft.apply(DraftAction::RemoveItem { index: 0 }).unwrap();

    assert_eq!(draft.items.len(), 1);
    assert_eq!(draft.items[0].product_name, "second");
}

#[test]
fn select_product_overwrites_rate_and_recomputes_amount() {
    let mut draft = InvoiceDraft::new();
    draft
        .apply(DraftAction::EditItem {
            index: 0,
            edit: ItemEdit::Quantity(dec!(3)),
        })
        .unwrap();

    draft
        .apply(DraftAction::SelectProduct {
            index: 0,
            product: ProductSuggestion {
                id: "p-1".to_string(),
                name: "Copper wire".to_string(),
                description: Some("2.5 sqmm".to_string()),
                current_price: dec!(75),
            },
        })
        .unwrap();

    let item = &draft.items[0];
    assert_eq!(item.product_id.as_deref(), Some("p-1"));
    assert_eq!(item.product_name, "Copper wire");
    assert_eq!(item.rate, dec!(75));
    assert_eq!(item.amount, dec!(225.00));
}

#[test]
fn typing_a_name_detaches_the_catalog_product() {
    let mut draft = InvoiceDraft::new();
    draft
        .apply(DraftAction::SelectProduct {
            index: 0,
            product: ProductSuggestion {
                id: "p-1".to_string(),
                name: "Copper wire".to_string(),
                description: None,
                current_price: dec!(75),
            },
        })
        .unwrap();

    draft
        .apply(DraftAction::EditItem {
            index: 0,
            edit: ItemEdit::ProductName("Copper wire (old stock)".to_string()),
        })
        .unwrap();

    assert!(draft.items[0].product_id.is_none());
}

#[test]
fn quantity_with_three_decimals_rejected() {
    let mut draft = InvoiceDraft::new();
    let result = draft.apply(DraftAction::EditItem {
        index: 0,
        edit: ItemEdit::Quantity(dec!(1.125)),
    });
    assert!(result.is_err());
}

#[test]
fn out_of_range_index_is_an_error() {
    let mut draft = InvoiceDraft::new();
    let result = draft.apply(DraftAction::EditItem {
        index: 5,
        edit: ItemEdit::Rate(dec!(10)),
    });
    assert!(result.is_err());
}

#[test]
fn submission_scenario_two_items_at_18_percent() {
    let mut draft = InvoiceDraft::new();
    draft
        .apply(DraftAction::SetCustomer(Customer {
            name: "Acme Traders".to_string(),
            ..Customer::default()
        }))
        .unwrap();
    draft
        .apply(DraftAction::EditItem {
            index: 0,
            edit: ItemEdit::ProductName("Steel pipe".to_string()),
        })
        .unwrap();
    draft
        .apply(DraftAction::EditItem {
            index: 0,
            edit: ItemEdit::Quantity(dec!(2)),
        })
        .unwrap();
    draft
        .apply(DraftAction::EditItem {
            index: 0,
            edit: ItemEdit::Rate(dec!(100)),
        })
        .unwrap();
    draft.apply(DraftAction::AddItem).unwrap();
    draft
        .apply(DraftAction::EditItem {
            index: 1,
            edit: ItemEdit::ProductName("Elbow joint".to_string()),
        })
        .unwrap();
    draft
        .apply(DraftAction::EditItem {
            index: 1,
            edit: ItemEdit::Rate(dec!(50)),
        })
        .unwrap();

    assert!(draft.validate().is_ok());

    let totals = draft.compute_totals();
    assert_eq!(totals.subtotal, dec!(250.00));
    assert_eq!(totals.tax_amount, dec!(45.00));
    assert_eq!(totals.total, dec!(295.00));
    assert_eq!(totals.cgst_amount(), dec!(22.50));
    assert_eq!(totals.sgst_amount(), dec!(22.50));
}
