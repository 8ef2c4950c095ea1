//! Inventory item record

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Store-assigned item identifier.
pub type ItemId = i64;

/// One inventory record as held by the item store.
///
/// The same shape is serialized into cache entries and HTTP responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub quantity: i64,
    /// Fixed-point price, serialized as a string such as `"999.99"`
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields of an item that the store has not persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub quantity: i64,
    pub price: Decimal,
}

impl NewItem {
    /// Materializes the record with identity and timestamps assigned by a store.
    pub fn into_item(self, id: ItemId, now: DateTime<Utc>) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            quantity: self.quantity,
            price: self.price,
            created_at: now,
            updated_at: now,
        }
    }
}
