//! Thread-safe handle to an `ItemStore`
//!
//! Mutations take the write lock; lookups and search share the read
//! lock. Results are returned as owned snapshots so no guard escapes.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::Config;
use crate::error::StoreResult;
use crate::models::Item;
use crate::store::ItemStore;

/// Cloneable, lock-protected store shared between callers
#[derive(Debug, Clone, Default)]
pub struct SharedItemStore {
    inner: Arc<RwLock<ItemStore>>,
}

impl SharedItemStore {
    /// Create an empty shared store
    pub fn new() -> Self {
        Self::from_store(ItemStore::new())
    }

    /// Create an empty shared store sized from configuration
    pub fn with_config(config: &Config) -> Self {
        Self::from_store(ItemStore::with_config(config))
    }

    /// Wrap an existing store
    pub fn from_store(store: ItemStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    // Every operation checks before it mutates, so a poisoned lock still
    // guards a consistent store.
    fn read(&self) -> RwLockReadGuard<'_, ItemStore> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, ItemStore> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get_all(&self) -> Vec<Item> {
        self.read().get_all().to_vec()
    }

    pub fn get_by_id(&self, id: &str) -> Option<Item> {
        self.read().get_by_id(id).cloned()
    }

    pub fn search(&self, query: Option<&str>) -> Vec<Item> {
        self.read().search(query)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn add(&self, name: &str, quantity: u32, notes: Option<String>) -> StoreResult<Item> {
        self.write().add(name, quantity, notes)
    }

    pub fn update(
        &self,
        id: &str,
        name: &str,
        quantity: u32,
        notes: Option<String>,
    ) -> StoreResult<Item> {
        self.write().update(id, name, quantity, notes)
    }

    pub fn delete(&self, id: &str) -> StoreResult<Item> {
        self.write().delete(id)
    }

    pub fn clear_purchased(&self) -> usize {
        self.write().clear_purchased()
    }

    pub fn toggle_purchased(&self, id: &str) -> StoreResult<bool> {
        self.write().toggle_purchased(id)
    }

    pub fn reorder<S: AsRef<str>>(&self, ordered_ids: &[S]) -> StoreResult<()> {
        self.write().reorder(ordered_ids)
    }
}
