use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The four materials an offer can be priced in. Prices are per unit of
/// factor, not per square meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    Mdflam,
    HGloss,
    LakPanel,
    Lake,
}

impl Material {
    pub const ALL: [Material; 4] = [
        Material::Mdflam,
        Material::HGloss,
        Material::LakPanel,
        Material::Lake,
    ];

    /// The storage key, matched exactly against item data.
    pub fn key(&self) -> &'static str {
        match self {
            Material::Mdflam => "MDFLAM",
            Material::HGloss => "HGloss",
            Material::LakPanel => "LakPanel",
            Material::Lake => "Lake",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Material::Mdflam => "MDFLAM",
            Material::HGloss => "High Gloss",
            Material::LakPanel => "Lak Panel",
            Material::Lake => "Lake",
        }
    }

    pub fn from_key(key: &str) -> Option<Material> {
        Material::ALL.iter().copied().find(|m| m.key() == key)
    }
}

/// Unit prices per material. An item naming a material key that is not in
/// the table prices at 0 rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialPrices {
    pub mdflam: f64,
    pub h_gloss: f64,
    pub lak_panel: f64,
    pub lake: f64,
}

impl MaterialPrices {
    pub fn get(&self, material: Material) -> f64 {
        match material {
            Material::Mdflam => self.mdflam,
            Material::HGloss => self.h_gloss,
            Material::LakPanel => self.lak_panel,
            Material::Lake => self.lake,
        }
    }

    /// Build from a key→price map; keys missing from the map price at 0.
    pub fn from_map(map: &HashMap<String, f64>) -> Self {
        let get = |m: Material| map.get(m.key()).copied().unwrap_or(0.0);
        Self {
            mdflam: get(Material::Mdflam),
            h_gloss: get(Material::HGloss),
            lak_panel: get(Material::LakPanel),
            lake: get(Material::Lake),
        }
    }
}

impl Default for MaterialPrices {
    fn default() -> Self {
        Self {
            mdflam: 100.0,
            h_gloss: 120.0,
            lak_panel: 150.0,
            lake: 200.0,
        }
    }
}

/// Per-category scaling knobs, independent of material price.
///
/// A stored value of 0 resolves to 1.0 — the original app read these as
/// `coefficient || 1`, and an accidental zero must not zero out a quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub hilton: f64,
    pub tv: f64,
    pub seperator: f64,
    pub coffee: f64,
}

impl Coefficients {
    /// Build from a category→value map. Older snapshots spelled the keys
    /// `separator` and `tvunit`; both are accepted as fallbacks.
    pub fn from_map(map: &HashMap<String, f64>) -> Self {
        let get = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| map.get(*k))
                .copied()
                .filter(|v| *v != 0.0)
                .unwrap_or(1.0)
        };
        Self {
            hilton: get(&["hilton"]),
            tv: get(&["tv", "tvunit"]),
            seperator: get(&["seperator", "separator"]),
            coffee: get(&["coffee"]),
        }
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            hilton: 1.0,
            tv: 1.0,
            seperator: 1.0,
            coffee: 1.0,
        }
    }
}

/// A catalog accessory (bottle rack, carousel mechanism, ...). Selections
/// reference these by id; `is_active` only hides the entry from new
/// selection, existing selections keep pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryDef {
    pub id: String,
    pub name: String,
    pub unit_price: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Settings as they may arrive from storage or a legacy state export:
/// every section optional, camelCase field names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSettings {
    pub material_prices: Option<HashMap<String, f64>>,
    pub coefficients: Option<HashMap<String, f64>>,
    pub accessories: Option<Vec<AccessoryDef>>,
    pub door_price: Option<f64>,
    pub skirting_price_per_meter: Option<f64>,
}

/// Everything the pricing engine needs, fully resolved. Plain data passed
/// by value into the pure pricing functions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingSettings {
    pub material_prices: MaterialPrices,
    pub coefficients: Coefficients,
    pub accessories: Vec<AccessoryDef>,
    pub door_price: f64,
    pub skirting_price_per_meter: f64,
}

pub const DEFAULT_DOOR_PRICE: f64 = 12000.0;
pub const DEFAULT_SKIRTING_PRICE_PER_METER: f64 = 300.0;

impl PricingSettings {
    /// Resolve possibly-partial settings, falling back per section: an
    /// absent price table gets the default table, absent coefficients all
    /// resolve to 1.0, absent unit prices get their defaults. A *present*
    /// price table with missing keys prices those keys at 0.
    pub fn resolve(raw: &RawSettings) -> Self {
        Self {
            material_prices: raw
                .material_prices
                .as_ref()
                .map(MaterialPrices::from_map)
                .unwrap_or_default(),
            coefficients: raw
                .coefficients
                .as_ref()
                .map(Coefficients::from_map)
                .unwrap_or_default(),
            accessories: raw.accessories.clone().unwrap_or_default(),
            door_price: raw.door_price.unwrap_or(DEFAULT_DOOR_PRICE),
            skirting_price_per_meter: raw
                .skirting_price_per_meter
                .unwrap_or(DEFAULT_SKIRTING_PRICE_PER_METER),
        }
    }

    pub fn accessory(&self, id: &str) -> Option<&AccessoryDef> {
        self.accessories.iter().find(|a| a.id == id)
    }
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self::resolve(&RawSettings::default())
    }
}
