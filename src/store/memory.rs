//! Mutex-guarded item collection.
//!
//! # Responsibilities
//! - Own the ordered item list and the next-id counter
//! - Provide list / create / find / update / delete
//! - Make every operation atomic with respect to concurrent handlers
//!
//! # Design Decisions
//! - One lock for the whole collection, held for exactly one operation
//! - Locks are never held across an `.await`
//! - Lookups are linear scans; the collection is a demo-sized list

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Number;

use crate::store::item::{Item, ItemId};

#[derive(Debug)]
struct Inner {
    items: Vec<Item>,
    next_id: ItemId,
}

/// Process-wide item store, shared between handlers via `Arc`.
#[derive(Debug)]
pub struct ItemStore {
    inner: Mutex<Inner>,
}

impl ItemStore {
    /// Create an empty store. The first id handed out is 1.
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Create a store holding the two startup items (Notebook, Pencil).
    pub fn seeded() -> Self {
        Self::with_items(vec![
            Item::new(1, "Notebook", 5u64),
            Item::new(2, "Pencil", 10u64),
        ])
    }

    /// Create a store from existing items.
    /// The counter starts one past the highest id present.
    pub fn with_items(items: Vec<Item>) -> Self {
        let next_id = items.iter().map(|i| i.id).max().map_or(1, |max| max.saturating_add(1));
        Self {
            inner: Mutex::new(Inner { items, next_id }),
        }
    }

    // Every operation restores consistency before it could panic,
    // so a poisoned lock still guards valid data.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All items in insertion order.
    pub fn list(&self) -> Vec<Item> {
        self.lock().items.clone()
    }

    /// Append a new item under the next id.
    pub fn create(&self, name: impl Into<String>, quantity: Number) -> Item {
        let mut inner = self.lock();
        let item = Item::new(inner.next_id, name, quantity);
        inner.next_id = inner.next_id.saturating_add(1);
        inner.items.push(item.clone());
        item
    }

    pub fn find(&self, id: ItemId) -> Option<Item> {
        self.lock().items.iter().find(|i| i.id == id).cloned()
    }

    /// Replace name and quantity in place. Returns `None` if the id is unknown.
    pub fn update(&self, id: ItemId, name: impl Into<String>, quantity: Number) -> Option<Item> {
        let mut inner = self.lock();
        let item = inner.items.iter_mut().find(|i| i.id == id)?;
        item.name = name.into();
        item.quantity = quantity;
        Some(item.clone())
    }

    /// Remove an item and hand it back. Returns `None` if the id is unknown.
    pub fn delete(&self, id: ItemId) -> Option<Item> {
        let mut inner = self.lock();
        let index = inner.items.iter().position(|i| i.id == id)?;
        Some(inner.items.remove(index))
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}
