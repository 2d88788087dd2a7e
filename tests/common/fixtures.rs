use mobilya_teklif::{
    AccessoryDef, ItemData, LineItem, NewItem, NewProject, PricingSettings, WorkspaceDb,
};

/// Creates a WorkspaceDb backed by a file in a temp directory.
/// Returns both the workspace and the temp directory (which must be kept alive).
pub async fn create_test_workspace() -> (WorkspaceDb, tempfile::TempDir) {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("test.teklif");
    let db = WorkspaceDb::new(&path)
        .await
        .expect("Failed to create test workspace");
    (db, dir)
}

/// Default pricing settings plus a two-entry accessory catalog.
pub fn test_settings() -> PricingSettings {
    PricingSettings {
        accessories: vec![
            AccessoryDef {
                id: "sis".to_string(),
                name: "Şişelik".to_string(),
                unit_price: 3500.0,
                is_active: true,
            },
            AccessoryDef {
                id: "doner".to_string(),
                name: "Döner mekanizma".to_string(),
                unit_price: 4500.0,
                is_active: true,
            },
        ],
        ..PricingSettings::default()
    }
}

/// A line item for pure pricing tests; the id is arbitrary.
pub fn make_item(item_type: &str, data: ItemData) -> LineItem {
    LineItem {
        id: 1,
        item_type: item_type.to_string(),
        name: item_type.to_string(),
        data,
    }
}

pub fn make_new_item(item_type: &str, name: &str, data: ItemData) -> NewItem {
    NewItem {
        item_type: item_type.to_string(),
        name: name.to_string(),
        data,
    }
}

pub fn make_new_project(name: &str, customer: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        customer_name: customer.to_string(),
        phone: None,
        address: None,
    }
}

/// Float comparison for hand-computed formula expectations.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
