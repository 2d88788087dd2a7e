//! The pricing engine: pure, synchronous, and total over its inputs.
//!
//! Given resolved settings and raw item data, everything here returns
//! numbers deterministically — no I/O, no shared state, no panics on
//! malformed business input. Bad input degrades to documented defaults or
//! zero; it never throws.

mod category;
mod formulas;
mod item;
mod num;
mod settings;
mod totals;

pub use category::{Category, normalize_type_label};
pub use formulas::{Quote, price_for};
pub use item::{ItemData, LineItem};
pub use num::{round_up_thousands, to_num, to_num_str};
pub use settings::{
    AccessoryDef, Coefficients, DEFAULT_DOOR_PRICE, DEFAULT_SKIRTING_PRICE_PER_METER, Material,
    MaterialPrices, PricingSettings, RawSettings,
};
pub use totals::{
    AccessorySelection, ComputedItem, ProjectTotals, approved_revenue, compute_item_price,
    compute_project_totals,
};
