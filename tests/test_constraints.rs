//! Integration tests for database constraint enforcement.
//!
//! Tests cover:
//! - Items require an existing project (foreign key constraint)
//! - Deleting a project cascades to its items and selections
//! - Selections are never stored at zero or negative quantities

mod common;

use common::*;

#[tokio::test]
async fn test_items_require_an_existing_project() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_workspace().await;
    let store = db
        .create_project(make_new_project("Mutfak", "Ayşe"))
        .await?;
    let id = store.get_project().await?.id;

    // keep a second handle, delete the project through the first
    let stale = db.open_project(id).await?;
    store.delete().await?;

    let result = stale
        .add_item(&make_new_item("Kapı", "Kapılar", ItemData::new()))
        .await;
    assert!(result.is_err(), "adding an item to a deleted project should fail");
    let error_msg = result.unwrap_err().to_string();
    assert!(
        error_msg.contains("FOREIGN KEY") || error_msg.contains("foreign key"),
        "Error should mention foreign key constraint, got: {}",
        error_msg
    );

    Ok(())
}

#[tokio::test]
async fn test_delete_project_cascades_to_lines_and_selections() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_workspace().await;
    let store = db
        .create_project(make_new_project("Mutfak", "Ayşe"))
        .await?;
    let id = store.get_project().await?.id;

    store
        .add_item(&make_new_item("Kapı", "Kapılar", ItemData::new().with("qty", "2")))
        .await?;
    store.set_accessory_quantity("sis", 3.0).await?;

    let stale = db.open_project(id).await?;
    store.delete().await?;

    // child rows went with the project
    assert!(stale.get_items().await?.is_empty());
    assert!(stale.get_selections().await?.is_empty());

    // an unrelated project is untouched
    let other = db
        .create_project(make_new_project("Banyo", "Mehmet"))
        .await?;
    other
        .add_item(&make_new_item("Hilton", "Banyo Dolabı", ItemData::new()))
        .await?;
    assert_eq!(other.get_items().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_selections_never_store_zero_quantities() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_workspace().await;
    let store = db
        .create_project(make_new_project("Mutfak", "Ayşe"))
        .await?;

    // every path that would produce 0 removes the row instead
    assert!(store.set_accessory_quantity("sis", 0.0).await?.is_none());
    assert!(store.set_accessory_quantity("sis", 0.9).await?.is_none());
    assert!(store.set_accessory_quantity("sis", -4.0).await?.is_none());
    assert!(store.get_selections().await?.is_empty());

    // a real quantity stores once, upserts thereafter
    store.set_accessory_quantity("sis", 1.0).await?;
    store.set_accessory_quantity("sis", 4.0).await?;
    let selections = store.get_selections().await?;
    assert_eq!(selections.len(), 1);
    assert_eq!(selections[0].quantity, 4);

    Ok(())
}
