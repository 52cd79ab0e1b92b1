//! Canonical item state.
//!
//! Each item lives behind its own `Arc<RwLock<Item>>` inside a
//! `DashMap`, so readers of unrelated items never contend and no
//! reader can observe a half-written item.

use std::sync::Arc;

use curio_core::{Item, ItemId, Price};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{MarketError, Result};

type ItemEntry = Arc<RwLock<Item>>;

/// Concurrent store of all listed items.
#[derive(Default)]
pub struct ItemStore {
    items: DashMap<ItemId, ItemEntry>,
}

impl ItemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
        }
    }

    /// Get a point-in-time copy of one item.
    pub fn get(&self, id: &ItemId) -> Option<Item> {
        self.items.get(id).map(|entry| entry.read().clone())
    }

    /// Check whether an item exists.
    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains_key(id)
    }

    /// Number of listed items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Snapshot of all items. Iteration order is unspecified.
    pub fn list(&self) -> Vec<Item> {
        self.items
            .iter()
            .map(|entry| entry.value().read().clone())
            .collect()
    }

    /// Insert an item under a caller-supplied id.
    ///
    /// Used by seeding and by creation requests that fix their own id.
    /// Fails if the id is already taken.
    pub fn insert(
        &self,
        id: ItemId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Price,
    ) -> Result<Item> {
        let item = Item::new(id.clone(), name, description, price);
        match self.items.entry(id) {
            Entry::Occupied(occupied) => Err(MarketError::AlreadyExists {
                id: occupied.key().clone(),
            }),
            Entry::Vacant(vacant) => {
                debug!(id = %item.id, price = %item.price, "Item listed");
                vacant.insert(Arc::new(RwLock::new(item.clone())));
                Ok(item)
            }
        }
    }

    /// Insert an item under a freshly generated id. Always succeeds.
    pub fn create(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Price,
    ) -> Item {
        let item = Item::new(ItemId::generate(), name, description, price);
        self.items
            .insert(item.id.clone(), Arc::new(RwLock::new(item.clone())));
        debug!(id = %item.id, price = %item.price, "Item listed");
        item
    }

    /// Overwrite one item's price.
    ///
    /// Takes the item's write lock, so concurrent `get` calls see
    /// either the old or the new price, never a torn value. Callers
    /// that need read-decide-write atomicity must additionally hold
    /// the bidding engine's per-item gate.
    pub fn set_price(&self, id: &ItemId, new_price: Price) -> Result<()> {
        let entry = self
            .items
            .get(id)
            .ok_or_else(|| MarketError::ItemNotFound { id: id.clone() })?;
        entry.write().price = new_price;
        Ok(())
    }
}
