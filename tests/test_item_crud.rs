//! Integration tests for offer lines and accessory selections.
//!
//! Tests cover:
//! - Item CRUD with raw form data surviving the JSON column round trip
//! - Selection quantity rules (floor, clamp, zero removes)
//! - Store totals matching the pure engine over the same lines

mod common;

use common::*;
use mobilya_teklif::compute_project_totals;

#[tokio::test]
async fn test_add_and_list_items() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_workspace().await;
    let store = db
        .create_project(make_new_project("Mutfak", "Ayşe"))
        .await?;

    let data = ItemData::new()
        .with("shape", "L")
        .with("wallAcm", "420")
        .with("wallBcm", "510")
        .with("material", "HGloss");
    let item = store
        .add_item(&make_new_item("Mutfak", "L Mutfak", data.clone()))
        .await?;
    assert!(item.id > 0);
    assert_eq!(item.data, data);

    store
        .add_item(&make_new_item("Kapı", "İç Kapılar", ItemData::new().with("qty", "4")))
        .await?;

    let items = store.get_items().await?;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "L Mutfak");
    assert_eq!(items[1].item_type, "Kapı");

    Ok(())
}

#[tokio::test]
async fn test_item_data_round_trips_mixed_value_types() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_workspace().await;
    let store = db
        .create_project(make_new_project("Banyo", "Ayşe"))
        .await?;

    // legacy records mix strings, booleans and numbers freely
    let data = ItemData::new()
        .with("size", "100")
        .with("mirrorCabinet", true)
        .with("tip", "Tip3")
        .with("wmW", 55);
    let item = store
        .add_item(&make_new_item("Hilton", "Banyo Dolabı", data.clone()))
        .await?;

    let fetched = store
        .get_item_by_id(item.id)
        .await?
        .expect("item just added");
    assert_eq!(fetched.data, data);
    assert!(fetched.data.flag("mirrorCabinet"));
    assert_eq!(fetched.data.num_or("wmW", 60.0), 55.0);

    Ok(())
}

#[tokio::test]
async fn test_update_and_delete_item() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_workspace().await;
    let store = db
        .create_project(make_new_project("Salon", "Ayşe"))
        .await?;
    let item = store
        .add_item(&make_new_item("TV Ünitesi", "TV Duvarı", ItemData::new()))
        .await?;

    let update = ItemUpdate {
        name: Some("TV Duvarı (revize)".to_string()),
        data: Some(ItemData::new().with("w", "320")),
        ..ItemUpdate::default()
    };
    let updated = store.update_item(&item, &update).await?;
    assert_eq!(updated.name, "TV Duvarı (revize)");
    assert_eq!(updated.item_type, "TV Ünitesi"); // untouched
    assert_eq!(updated.data.num_or("w", 300.0), 320.0);

    store.delete_item(updated).await?;
    assert!(store.get_items().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_selection_quantities_floor_clamp_and_remove() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_workspace().await;
    let store = db
        .create_project(make_new_project("Mutfak", "Ayşe"))
        .await?;

    // fractional input floors
    let selection = store.set_accessory_quantity("sis", 2.9).await?;
    assert_eq!(selection.map(|s| s.quantity), Some(2));

    // setting again overwrites, no duplicate rows
    store.set_accessory_quantity("sis", 5.0).await?;
    let selections = store.get_selections().await?;
    assert_eq!(selections.len(), 1);
    assert_eq!(selections[0].quantity, 5);

    // zero (or anything that floors to it) removes the selection
    let removed = store.set_accessory_quantity("sis", 0.9).await?;
    assert!(removed.is_none());
    assert!(store.get_selections().await?.is_empty());

    // negative input clamps to zero and also removes
    store.set_accessory_quantity("doner", 3.0).await?;
    store.set_accessory_quantity("doner", -2.0).await?;
    assert!(store.get_selections().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_store_totals_match_the_pure_engine() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_workspace().await;
    db.add_accessory(&NewAccessory {
        name: "Şişelik".to_string(),
        unit_price: 3500.0,
    })
    .await?;
    let catalog = db.get_accessories().await?;

    let store = db
        .create_project(make_new_project("Mutfak", "Ayşe"))
        .await?;
    store
        .add_item(&make_new_item("Kapı", "Kapılar", ItemData::new().with("qty", "3")))
        .await?;
    store
        .add_item(&make_new_item("Süpürgelik", "Süpürgelik", ItemData::new().with("m", "12")))
        .await?;
    store.set_accessory_quantity(&catalog[0].id, 2.0).await?;

    let settings = db.get_settings().await?;
    let store_totals = store.totals(&settings.pricing).await?;

    // the same lines through the pure engine give identical figures
    let items = store.get_items().await?;
    let selections = store.get_selections().await?;
    let engine_totals = compute_project_totals(&settings.pricing, &items, &selections);
    assert_eq!(store_totals, engine_totals);

    // and the figures themselves: doors 36000, skirting 3600 → 4000,
    // items 40000, accessories 7000, grand 47000
    assert_eq!(store_totals.items_total, 40000.0);
    assert_eq!(store_totals.accessories_total, 7000.0);
    assert_eq!(store_totals.grand_total, 47000.0);

    Ok(())
}
