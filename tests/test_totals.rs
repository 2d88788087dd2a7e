//! Offer aggregation tests.
//!
//! Tests cover:
//! - the triple-rounding policy (items subtotal, accessories subtotal and
//!   their sum each rounded up to the nearest thousand independently)
//! - orphaned and inactive accessory selections
//! - computed items carrying normalized labels and per-item prices

mod common;

use common::*;
use mobilya_teklif::{approved_revenue, compute_item_price, compute_project_totals, round_up_thousands};

#[test]
fn totals_round_three_times_not_once() {
    // Unit prices chosen so every subtotal actually moves when rounded.
    let mut settings = test_settings();
    settings.door_price = 1200.0;
    settings.skirting_price_per_meter = 1300.0;

    let items = vec![
        make_item("Kapı", ItemData::new().with("qty", "1")),
        make_item("Süpürgelik", ItemData::new().with("m", "1")),
    ];
    let selections = vec![AccessorySelection {
        accessory_id: "sis".to_string(),
        quantity: 1,
    }];

    let totals = compute_project_totals(&settings, &items, &selections);

    // 1. Per-item prices round first: 1200 → 2000, 1300 → 2000.
    assert_eq!(totals.items[0].raw_price, 1200.0);
    assert_eq!(totals.items[0].price, 2000.0);
    assert_eq!(totals.items[1].price, 2000.0);

    // 2. Subtotals round independently: items 4000, accessories 3500 → 4000.
    assert_eq!(totals.items_total, 4000.0);
    assert_eq!(totals.accessories_total, 4000.0);

    // 3. The grand total rounds the rounded subtotals.
    assert_eq!(totals.grand_total, 8000.0);

    // A single final rounding over the raw sum would give a smaller figure.
    let naive = round_up_thousands(1200.0 + 1300.0 + 3500.0);
    assert_eq!(naive, 6000.0);
    assert_ne!(totals.grand_total, naive);
}

#[test]
fn empty_project_totals_are_zero() {
    let totals = compute_project_totals(&test_settings(), &[], &[]);
    assert!(totals.items.is_empty());
    assert_eq!(totals.items_total, 0.0);
    assert_eq!(totals.accessories_total, 0.0);
    assert_eq!(totals.grand_total, 0.0);
}

#[test]
fn orphaned_selection_contributes_nothing() {
    let settings = test_settings();
    let selections = vec![
        AccessorySelection {
            accessory_id: "ghost".to_string(),
            quantity: 5,
        },
        AccessorySelection {
            accessory_id: "doner".to_string(),
            quantity: 2,
        },
    ];
    let totals = compute_project_totals(&settings, &[], &selections);
    assert_eq!(totals.accessories_total, round_up_thousands(2.0 * 4500.0));
}

#[test]
fn inactive_accessory_still_prices_existing_selection() {
    let mut settings = test_settings();
    settings.accessories[0].is_active = false;

    let selections = vec![AccessorySelection {
        accessory_id: "sis".to_string(),
        quantity: 2,
    }];
    let totals = compute_project_totals(&settings, &[], &selections);
    assert_eq!(totals.accessories_total, 7000.0);
}

#[test]
fn computed_items_carry_normalized_labels() {
    let settings = test_settings();
    let items = vec![
        make_item("mutfak dolabı", ItemData::new()),
        make_item("Gardırop", ItemData::new()),
    ];
    let totals = compute_project_totals(&settings, &items, &[]);

    assert_eq!(totals.items[0].type_label, "Mutfak");
    assert_eq!(totals.items[0].category, Category::Kitchen);
    // unmatched text keeps its raw label but prices as a plain item
    assert_eq!(totals.items[1].type_label, "Gardırop");
    assert_eq!(totals.items[1].category, Category::PlainItem);
}

#[test]
fn per_item_prices_match_the_single_item_api() {
    let settings = test_settings();
    let item = make_item(
        "TV Ünitesi",
        ItemData::new().with("w", "300").with("h", "250").with("d", "40"),
    );
    let quote = compute_item_price(&settings, &item);
    let totals = compute_project_totals(&settings, std::slice::from_ref(&item), &[]);

    assert_eq!(totals.items[0].raw_price, quote.price);
    assert_eq!(totals.items[0].factor, quote.factor);
    assert_eq!(totals.items[0].price, round_up_thousands(quote.price));
}

#[test]
fn approved_revenue_rounds_the_sum() {
    assert_eq!(approved_revenue([3000.0, 5000.0]), 8000.0);
    assert_eq!(approved_revenue([]), 0.0);
    // raw figures round too, should a caller pass them
    assert_eq!(approved_revenue([1500.0, 200.0]), 2000.0);
}
