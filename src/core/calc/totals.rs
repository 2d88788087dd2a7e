//! Offer-level aggregation.
//!
//! An offer total is rounded three times: the items subtotal, the
//! accessories subtotal, and their sum are each rounded up to the nearest
//! thousand independently. Quotes therefore end in whole thousands at
//! every displayed subtotal — this is deliberate and must not be collapsed
//! into one final rounding.

use serde::{Deserialize, Serialize};

use crate::core::calc::category::{Category, normalize_type_label};
use crate::core::calc::formulas::{Quote, price_for};
use crate::core::calc::item::LineItem;
use crate::core::calc::num::round_up_thousands;
use crate::core::calc::settings::PricingSettings;

/// A chosen catalog accessory with a piece count. Quantities are always
/// at least 1; a selection dropped to 0 is removed, not stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessorySelection {
    pub accessory_id: String,
    pub quantity: u32,
}

/// A line item with its computed pricing attached. Derived on every read,
/// never persisted — a settings change retroactively reprices history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputedItem {
    pub id: i64,
    pub name: String,
    /// Canonical display label, or the raw type text when nothing matched.
    pub type_label: String,
    pub category: Category,
    pub factor: f64,
    pub raw_price: f64,
    /// Raw price rounded up to the nearest thousand.
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectTotals {
    pub items: Vec<ComputedItem>,
    pub items_total: f64,
    pub accessories_total: f64,
    pub grand_total: f64,
}

/// Price a single item from current settings.
pub fn compute_item_price(settings: &PricingSettings, item: &LineItem) -> Quote {
    let category = Category::from_raw(&item.item_type).unwrap_or(Category::PlainItem);
    price_for(settings, category, &item.data)
}

/// Compute every item's price and the three rounded totals for an offer.
///
/// Accessory selections are looked up against the current catalog by id;
/// selections whose accessory no longer exists contribute nothing.
pub fn compute_project_totals(
    settings: &PricingSettings,
    items: &[LineItem],
    selections: &[AccessorySelection],
) -> ProjectTotals {
    let items: Vec<ComputedItem> = items
        .iter()
        .map(|item| {
            let category = Category::from_raw(&item.item_type).unwrap_or(Category::PlainItem);
            let quote = price_for(settings, category, &item.data);
            ComputedItem {
                id: item.id,
                name: item.name.clone(),
                type_label: normalize_type_label(&item.item_type),
                category,
                factor: quote.factor,
                raw_price: quote.price,
                price: round_up_thousands(quote.price),
            }
        })
        .collect();

    let items_total = round_up_thousands(items.iter().map(|it| it.price).sum());

    let mut accessories_raw = 0.0;
    for selection in selections {
        let Some(def) = settings.accessory(&selection.accessory_id) else {
            continue;
        };
        accessories_raw += f64::from(selection.quantity) * def.unit_price;
    }
    let accessories_total = round_up_thousands(accessories_raw);

    let grand_total = round_up_thousands(items_total + accessories_total);

    ProjectTotals {
        items,
        items_total,
        accessories_total,
        grand_total,
    }
}

/// Revenue figure for the project list header: the sum of the given grand
/// totals, rounded up to the nearest thousand once more.
pub fn approved_revenue<I: IntoIterator<Item = f64>>(grand_totals: I) -> f64 {
    round_up_thousands(grand_totals.into_iter().sum())
}
