//! Per-category price formulas.
//!
//! Every calculator maps raw item data plus resolved settings to a
//! dimensionless factor and a price. Material-based categories price as
//! `factor × material unit price`; doors and skirting multiply a count or
//! length by a fixed unit price from settings. All numeric fields are read
//! through the tolerant [`ItemData`] accessors — the data arrives as form
//! strings and must never make pricing panic.

use crate::core::calc::category::Category;
use crate::core::calc::item::ItemData;
use crate::core::calc::settings::{Material, PricingSettings};

/// A priced item: the sizing factor and the resulting raw (unrounded) price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub factor: f64,
    pub price: f64,
}

/// Depth multiplier applied to base cabinet runs.
const ALT_DEPTH_FACTOR: f64 = 1.6;

/// Shared sizing primitive: cm dimensions to a volumetric-ish factor,
/// `width_m × height_m × (1 + depth_m)`, each dimension clamped to ≥ 0.
fn factor_from_dims(width_cm: f64, height_cm: f64, depth_cm: f64) -> f64 {
    let w = width_cm.max(0.0) / 100.0;
    let h = height_cm.max(0.0) / 100.0;
    let d = depth_cm.max(0.0) / 100.0;
    w * h * (1.0 + d)
}

/// Unit price for the item's material; unknown material keys price at 0.
fn unit_price(settings: &PricingSettings, data: &ItemData) -> f64 {
    let key = data.text_or("material", "Lake");
    Material::from_key(&key)
        .map(|m| settings.material_prices.get(m))
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KitchenShape {
    Straight,
    L,
    U,
}

impl KitchenShape {
    fn parse(raw: &str) -> Option<KitchenShape> {
        match raw {
            "Duz" => Some(KitchenShape::Straight),
            "L" => Some(KitchenShape::L),
            "U" => Some(KitchenShape::U),
            _ => None,
        }
    }
}

/// Kitchen: base cabinet run derived from wall lengths minus the tall-unit
/// block, tall units sized against the ceiling, upper cabinets by mode.
///
/// The L and U shapes lose 60 cm per inside corner from the usable run.
/// "IkiKat" (two-layer) and "Full" upper modes compute identically today;
/// that duplication is long-standing observed behavior and is kept as is.
fn kitchen(settings: &PricingSettings, d: &ItemData) -> Quote {
    let ceiling = d.num_or("ceilingCm", 260.0);

    let fridge = d.num_or("fridgeCm", 90.0);
    let tall_oven = d.num_or("tallOvenCm", 60.0);
    let tall_total = fridge + tall_oven;

    let unit = unit_price(settings, d);

    let shape = KitchenShape::parse(&d.text_or("shape", "Duz"));
    let mut run_alt_cm = match shape {
        Some(KitchenShape::Straight) => {
            let total_wall = d.num_or("totalWallCm", 600.0);
            (total_wall - tall_total).max(0.0)
        }
        Some(KitchenShape::L) => {
            let a = d.num_or("wallAcm", 400.0);
            let b = d.num_or("wallBcm", 500.0);
            (a + b - tall_total - 60.0).max(0.0)
        }
        Some(KitchenShape::U) => {
            let a = d.num_or("wallAcm", 300.0);
            let b = d.num_or("wallBcm", 300.0);
            let c = d.num_or("wallCcm", 300.0);
            (a + b + c - tall_total - 120.0).max(0.0)
        }
        // unknown shape: no cabinet run, only island and tall units price
        None => 0.0,
    };
    run_alt_cm += d.num_or("islandCm", 0.0).max(0.0);

    let alt_factor = (run_alt_cm / 100.0) * 1.0 * ALT_DEPTH_FACTOR;
    let tall_factor = (tall_total / 100.0) * (ceiling / 100.0) * ALT_DEPTH_FACTOR;

    let upper_mode = d.text_or("upperMode", "IkiKat");
    let upper_factor = match upper_mode.as_str() {
        "IkiKat" | "Full" => (run_alt_cm / 100.0) * 1.1 * 1.35,
        _ => 0.0,
    };

    let factor = alt_factor + tall_factor + upper_factor;
    Quote {
        factor,
        price: factor * unit,
    }
}

/// Coffee corner: a short base run plus optional tall block, upper
/// cabinets and bazali strip, scaled by the coffee coefficient.
fn coffee_corner(settings: &PricingSettings, d: &ItemData) -> Quote {
    let unit = unit_price(settings, d);

    let run_alt_cm = d.num_or("runAltCm", 120.0);
    let ceiling = d.num_or("ceilingCm", 260.0);

    let alt_factor = (run_alt_cm / 100.0) * 1.0 * ALT_DEPTH_FACTOR;

    let tall_cm = d.num_or("tallTotalCm", 0.0);
    let tall_factor = (tall_cm / 100.0) * (ceiling / 100.0) * ALT_DEPTH_FACTOR;

    let mut upper_factor = 0.0;
    if d.flag("hasUpper") {
        upper_factor += (run_alt_cm / 100.0) * 0.7 * 1.35;
    }
    if d.flag("hasBazali") {
        upper_factor += (run_alt_cm / 100.0) * 0.4 * ALT_DEPTH_FACTOR;
    }

    let factor = (alt_factor + tall_factor + upper_factor) * settings.coefficients.coffee;
    Quote {
        factor,
        price: factor * unit,
    }
}

/// Hilton (bathroom unit): a base factor per cabinet width, plus mirror
/// cabinet and type surcharges. Type 3 adds a washing machine cabinet and
/// a pantry cabinet sized like plain items.
fn hilton(settings: &PricingSettings, d: &ItemData) -> Quote {
    let unit = unit_price(settings, d);

    let tip = d.text_or("tip", "Tip1");
    let size = d.text_or("size", "80");
    let mirror_cabinet = d.flag("mirrorCabinet");

    let mut base = match size.as_str() {
        "60" => 1.0,
        "100" => 2.0,
        "120" => 2.5,
        _ => 1.5, // 80
    };

    if mirror_cabinet {
        base += 0.5;
    }
    if tip == "Tip2" || tip == "Tip3" {
        base += 1.0;
    }

    let mut extra = 0.0;
    if tip == "Tip3" {
        extra += factor_from_dims(
            d.num_or("wmW", 60.0),
            d.num_or("wmH", 200.0),
            d.num_or("wmD", 60.0),
        );
        extra += factor_from_dims(
            d.num_or("panW", 45.0),
            d.num_or("panH", 200.0),
            d.num_or("panD", 60.0),
        );
    }

    let factor = (base + extra) * settings.coefficients.hilton;
    Quote {
        factor,
        price: factor * unit,
    }
}

fn plain_item(settings: &PricingSettings, d: &ItemData) -> Quote {
    let unit = unit_price(settings, d);
    let factor = factor_from_dims(
        d.num_or("w", 100.0),
        d.num_or("h", 100.0),
        d.num_or("d", 60.0),
    );
    Quote {
        factor,
        price: factor * unit,
    }
}

fn separator(settings: &PricingSettings, d: &ItemData) -> Quote {
    let unit = unit_price(settings, d);
    let factor = factor_from_dims(
        d.num_or("w", 100.0),
        d.num_or("h", 250.0),
        d.num_or("d", 10.0),
    ) * settings.coefficients.seperator;
    Quote {
        factor,
        price: factor * unit,
    }
}

fn tv_unit(settings: &PricingSettings, d: &ItemData) -> Quote {
    let unit = unit_price(settings, d);
    let factor = factor_from_dims(
        d.num_or("w", 300.0),
        d.num_or("h", 250.0),
        d.num_or("d", 40.0),
    ) * settings.coefficients.tv;
    Quote {
        factor,
        price: factor * unit,
    }
}

/// Doors price per piece; factor is the piece count.
fn door(settings: &PricingSettings, d: &ItemData) -> Quote {
    let qty = d.num_or("qty", 1.0).floor().max(0.0);
    Quote {
        factor: qty,
        price: qty * settings.door_price,
    }
}

/// Skirting prices per linear meter; factor is the meter count.
fn skirting(settings: &PricingSettings, d: &ItemData) -> Quote {
    let m = d.num_or("m", 10.0).max(0.0);
    Quote {
        factor: m,
        price: m * settings.skirting_price_per_meter,
    }
}

/// Price item data under an already-normalized category.
pub fn price_for(settings: &PricingSettings, category: Category, data: &ItemData) -> Quote {
    match category {
        Category::Kitchen => kitchen(settings, data),
        Category::CoffeeCorner => coffee_corner(settings, data),
        Category::Hilton => hilton(settings, data),
        Category::Separator => separator(settings, data),
        Category::TvUnit => tv_unit(settings, data),
        Category::Door => door(settings, data),
        Category::Skirting => skirting(settings, data),
        Category::PlainItem => plain_item(settings, data),
    }
}
