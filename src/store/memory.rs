//! In-process item store

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::{Item, ItemId, NewItem};
use crate::store::ItemStore;

#[derive(Debug)]
struct Table {
    items: BTreeMap<ItemId, Item>,
    next_id: ItemId,
}

impl Table {
    fn name_taken(&self, name: &str, except: Option<ItemId>) -> bool {
        self.items
            .values()
            .any(|item| item.name == name && Some(item.id) != except)
    }
}

/// Item store held in process memory. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct InMemoryItemStore {
    table: RwLock<Table>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                items: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        Ok(self.table.read().await.items.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Item>, StoreError> {
        Ok(self.table.read().await.items.values().cloned().collect())
    }

    async fn create(&self, item: NewItem) -> Result<Item, StoreError> {
        let mut table = self.table.write().await;
        if table.name_taken(&item.name, None) {
            return Err(StoreError::DuplicateName(item.name));
        }

        let id = table.next_id;
        table.next_id += 1;

        let item = item.into_item(id, Utc::now());
        table.items.insert(id, item.clone());
        Ok(item)
    }

    async fn save(&self, mut item: Item) -> Result<Item, StoreError> {
        let mut table = self.table.write().await;
        let created_at = table
            .items
            .get(&item.id)
            .map(|existing| existing.created_at)
            .ok_or(StoreError::NotFound(item.id))?;

        if table.name_taken(&item.name, Some(item.id)) {
            return Err(StoreError::DuplicateName(item.name));
        }

        item.created_at = created_at;
        item.updated_at = Utc::now();
        table.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn delete(&self, id: ItemId) -> Result<bool, StoreError> {
        Ok(self.table.write().await.items.remove(&id).is_some())
    }
}
