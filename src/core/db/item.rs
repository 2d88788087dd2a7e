use crate::core::calc::{ItemData, LineItem};

#[derive(Debug, Clone)]
pub struct NewItem {
    pub item_type: String,
    pub name: String,
    pub data: ItemData,
}

#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub item_type: Option<String>,
    pub name: Option<String>,
    pub data: Option<ItemData>,
}

pub trait ItemRepository {
    fn get_items(&self) -> impl Future<Output = anyhow::Result<Vec<LineItem>>>;
    fn get_item_by_id(&self, id: i64) -> impl Future<Output = anyhow::Result<Option<LineItem>>>;
    fn add_item(&self, item: &NewItem) -> impl Future<Output = anyhow::Result<LineItem>>;
    fn update_item(
        &self,
        item: &LineItem,
        update: &ItemUpdate,
    ) -> impl Future<Output = anyhow::Result<LineItem>>;
    fn delete_item(&self, item: LineItem) -> impl Future<Output = anyhow::Result<()>>;
}
