use crate::core::calc::{AccessoryDef, AccessorySelection};

#[derive(Debug, Clone)]
pub struct NewAccessory {
    pub name: String,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Default)]
pub struct AccessoryUpdate {
    pub name: Option<String>,
    pub unit_price: Option<f64>,
    pub is_active: Option<bool>,
}

/// The workspace-wide accessory catalog. Newest entries list first.
pub trait AccessoryCatalogRepository {
    fn get_accessories(&self) -> impl Future<Output = anyhow::Result<Vec<AccessoryDef>>>;
    fn add_accessory(
        &self,
        accessory: &NewAccessory,
    ) -> impl Future<Output = anyhow::Result<AccessoryDef>>;
    fn update_accessory(
        &self,
        id: &str,
        update: &AccessoryUpdate,
    ) -> impl Future<Output = anyhow::Result<AccessoryDef>>;
    /// Remove a catalog entry. Selections referencing it stay behind and
    /// are skipped when totalling.
    fn delete_accessory(&self, id: &str) -> impl Future<Output = anyhow::Result<()>>;
}

/// A project's chosen accessories.
pub trait SelectionRepository {
    fn get_selections(&self) -> impl Future<Output = anyhow::Result<Vec<AccessorySelection>>>;
    /// Set the piece count for an accessory. The quantity is floored and
    /// clamped at zero; zero removes the selection entirely.
    fn set_accessory_quantity(
        &self,
        accessory_id: &str,
        quantity: f64,
    ) -> impl Future<Output = anyhow::Result<Option<AccessorySelection>>>;
}
