pub mod core;

pub use crate::core::calc::{
    AccessoryDef, AccessorySelection, Category, Coefficients, ComputedItem, ItemData, LineItem,
    Material, MaterialPrices, PricingSettings, ProjectTotals, Quote, RawSettings,
    approved_revenue, compute_item_price, compute_project_totals, normalize_type_label, price_for,
    round_up_thousands, to_num, to_num_str,
};
pub use crate::core::db::{
    AccessoryCatalogRepository, AccessoryUpdate, BoundProjectRepository, CompanyInfo,
    FIRST_PROJECT_NUMBER, ItemRepository, ItemUpdate, NewAccessory, NewItem, NewProject, Project,
    ProjectRepository, ProjectStatus, ProjectStore, ProjectUpdate, SelectionRepository,
    SettingsRepository, SettingsUpdate, WorkspaceDb, WorkspaceSettings, next_version,
};
