use serde::{Deserialize, Serialize};

use crate::core::calc::{Coefficients, MaterialPrices, PricingSettings};

/// Display-only letterhead fields consumed by the offer renderer. Not part
/// of the pricing core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub instagram: String,
    pub logo_data_url: String,
}

/// Workspace-wide configuration, resolved with defaults on every read.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceSettings {
    pub pricing: PricingSettings,
    pub next_project_number: i64,
    pub company: CompanyInfo,
}

/// Partial settings write; only present fields are stored.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub material_prices: Option<MaterialPrices>,
    pub coefficients: Option<Coefficients>,
    pub door_price: Option<f64>,
    pub skirting_price_per_meter: Option<f64>,
    pub company: Option<CompanyInfo>,
}

pub trait SettingsRepository {
    fn get_settings(&self) -> impl Future<Output = anyhow::Result<WorkspaceSettings>>;
    fn update_settings(&self, update: SettingsUpdate) -> impl Future<Output = anyhow::Result<()>>;
}
