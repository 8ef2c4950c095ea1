//! Item Store Module
//!
//! The persistent source of truth for inventory items. The item cache holds
//! disposable copies of what this store returns.

mod memory;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Item, ItemId, NewItem};

pub use memory::InMemoryItemStore;

// == Item Store ==
/// Persistent storage for inventory items.
///
/// Implementations enforce name uniqueness and own id and timestamp
/// assignment.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, StoreError>;

    /// All items ordered by id.
    async fn find_all(&self) -> Result<Vec<Item>, StoreError>;

    /// Persists a new item, assigning `id`, `created_at` and `updated_at`.
    async fn create(&self, item: NewItem) -> Result<Item, StoreError>;

    /// Overwrites the stored item with the same id and bumps `updated_at`.
    ///
    /// `created_at` is never changed by a save.
    async fn save(&self, item: Item) -> Result<Item, StoreError>;

    /// Removes the item, returning whether it existed.
    async fn delete(&self, id: ItemId) -> Result<bool, StoreError>;
}
