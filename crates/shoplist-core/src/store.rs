//! In-memory item store
//!
//! `ItemStore` owns the ordered list of items. Insertion order is the
//! display order; only `reorder` changes it.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = ItemStore::new();
//!
//! let milk = store.add("Milk", 2, None)?;
//! store.toggle_purchased(&milk.id.to_string())?;
//!
//! let results = store.search(Some("milk"));
//! ```
//!
//! Every operation validates first and mutates second, so a failed call
//! leaves the list exactly as it was.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{InvalidInput, ReorderError, StoreError, StoreResult};
use crate::models::{Item, ItemId};

/// Ordered, growable collection of shopping items
#[derive(Debug, Clone)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    /// Create an empty store with the default initial capacity
    pub fn new() -> Self {
        Self::with_capacity(Config::default().initial_capacity)
    }

    /// Create an empty store sized from configuration
    pub fn with_config(config: &Config) -> Self {
        Self::with_capacity(config.initial_capacity)
    }

    /// Create an empty store with room for `capacity` items before growing
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity.max(1)),
        }
    }

    // ==================== Queries ====================

    /// All items in display order
    pub fn get_all(&self) -> &[Item] {
        &self.items
    }

    /// Look up an item by id
    ///
    /// Empty, malformed, and unknown ids all yield `None`.
    pub fn get_by_id(&self, id: &str) -> Option<&Item> {
        self.position(id).map(|idx| &self.items[idx])
    }

    /// Items whose name or notes contain `query`, ignoring case
    ///
    /// A missing or blank query returns every item.
    pub fn search(&self, query: Option<&str>) -> Vec<Item> {
        let needle = match query {
            Some(q) if !q.trim().is_empty() => q.to_lowercase(),
            _ => return self.items.clone(),
        };

        self.items
            .iter()
            .filter(|item| item.matches(&needle))
            .cloned()
            .collect()
    }

    /// Number of items held
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Slots available before the backing storage has to grow
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Number of items marked as purchased
    pub fn purchased_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_purchased).count()
    }

    // ==================== Mutations ====================

    /// Append a new item and return it
    pub fn add(
        &mut self,
        name: &str,
        quantity: u32,
        notes: Option<String>,
    ) -> StoreResult<Item> {
        let name = validate(name, quantity)?;

        let item = Item::new(name, quantity, notes);
        if self.items.len() == self.items.capacity() {
            debug!(capacity = self.items.capacity(), "Growing item storage");
        }
        self.items.push(item.clone());

        debug!(id = %item.id, name = %item.name, "Added item");
        Ok(item)
    }

    /// Replace name, quantity and notes of an existing item
    ///
    /// Id, purchase state and position are left alone.
    pub fn update(
        &mut self,
        id: &str,
        name: &str,
        quantity: u32,
        notes: Option<String>,
    ) -> StoreResult<Item> {
        let idx = self.require(id)?;
        let name = validate(name, quantity)?;

        let item = &mut self.items[idx];
        item.set_details(name, quantity, notes);

        debug!(id = %item.id, "Updated item");
        Ok(item.clone())
    }

    /// Remove an item, closing the gap it leaves
    pub fn delete(&mut self, id: &str) -> StoreResult<Item> {
        let idx = self.require(id)?;
        let item = self.items.remove(idx);

        debug!(id = %item.id, position = idx, "Deleted item");
        Ok(item)
    }

    /// Remove every purchased item, returning how many were removed
    pub fn clear_purchased(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.is_purchased);
        let removed = before - self.items.len();

        info!(removed, remaining = self.items.len(), "Cleared purchased items");
        removed
    }

    /// Flip the purchased flag, returning the new value
    pub fn toggle_purchased(&mut self, id: &str) -> StoreResult<bool> {
        let idx = self.require(id)?;
        let item = &mut self.items[idx];
        let purchased = item.toggle_purchased();

        debug!(id = %item.id, purchased, "Toggled item");
        Ok(purchased)
    }

    /// Rearrange items to match `ordered_ids`
    ///
    /// The ids must name every current item exactly once.
    pub fn reorder<S: AsRef<str>>(&mut self, ordered_ids: &[S]) -> StoreResult<()> {
        let order = self.resolve_permutation(ordered_ids).map_err(|e| {
            debug!(error = %e, "Rejected reorder");
            e
        })?;

        let mut slots: Vec<Option<Item>> = self.items.drain(..).map(Some).collect();
        self.items = order
            .into_iter()
            .filter_map(|idx| slots[idx].take())
            .collect();

        info!(count = self.items.len(), "Reordered items");
        Ok(())
    }

    // ==================== Helpers ====================

    fn position(&self, id: &str) -> Option<usize> {
        let id = ItemId::parse(id)?;
        self.items.iter().position(|item| item.id == id)
    }

    fn require(&self, id: &str) -> StoreResult<usize> {
        self.position(id).ok_or_else(|| {
            debug!(id, "No item with id");
            StoreError::NotFound(id.to_string())
        })
    }

    /// Map each requested id to its current index
    ///
    /// Fails unless the input is an exact bijection with current ids.
    fn resolve_permutation<S: AsRef<str>>(
        &self,
        ordered_ids: &[S],
    ) -> Result<Vec<usize>, ReorderError> {
        if ordered_ids.is_empty() && !self.items.is_empty() {
            return Err(ReorderError::Empty(self.items.len()));
        }

        let index: HashMap<ItemId, usize> = self
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| (item.id, idx))
            .collect();

        let mut seen = HashSet::with_capacity(ordered_ids.len());
        let mut order = Vec::with_capacity(ordered_ids.len());

        for raw in ordered_ids {
            let raw = raw.as_ref();
            let id = ItemId::parse(raw)
                .filter(|id| index.contains_key(id))
                .ok_or_else(|| ReorderError::UnknownId(raw.to_string()))?;
            if !seen.insert(id) {
                return Err(ReorderError::DuplicateId(id));
            }
            order.push(index[&id]);
        }

        // Unique known ids: fewer than the items means one was left out
        if let Some(missing) = self.items.iter().find(|item| !seen.contains(&item.id)) {
            return Err(ReorderError::MissingId(missing.id));
        }

        Ok(order)
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Check `add`/`update` arguments, returning the trimmed name
fn validate(name: &str, quantity: u32) -> Result<&str, InvalidInput> {
    let name = name.trim();
    if name.is_empty() {
        return Err(InvalidInput::EmptyName);
    }
    if quantity == 0 {
        return Err(InvalidInput::ZeroQuantity);
    }
    Ok(name)
}
