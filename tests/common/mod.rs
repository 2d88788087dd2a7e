#![allow(dead_code)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from mobilya_teklif for tests
pub use mobilya_teklif::{
    AccessoryCatalogRepository, AccessoryDef, AccessorySelection, AccessoryUpdate,
    BoundProjectRepository, Category, Coefficients, CompanyInfo, ItemData, ItemRepository,
    ItemUpdate, LineItem, Material, MaterialPrices, NewAccessory, NewItem, NewProject,
    PricingSettings, Project, ProjectRepository, ProjectStatus, ProjectStore, ProjectUpdate,
    RawSettings, SelectionRepository, SettingsRepository, SettingsUpdate, WorkspaceDb,
    WorkspaceSettings,
};
