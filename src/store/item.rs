//! Item record.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Identifier assigned by the store.
pub type ItemId = u64;

/// A stored item.
///
/// `quantity` keeps the exact JSON number the client sent, so an integer
/// quantity is echoed back as an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub quantity: Number,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, quantity: impl Into<Number>) -> Self {
        Self {
            id,
            name: name.into(),
            quantity: quantity.into(),
        }
    }
}
