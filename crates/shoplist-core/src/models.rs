//! Data models for shoplist
//!
//! Defines the shopping list entry (`Item`) and its identifier (`ItemId`).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of an item
///
/// Generated once at creation and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an id from user-supplied text
    ///
    /// Returns `None` for empty or malformed input instead of an error,
    /// since a bad id is just an id that matches nothing. Surrounding
    /// whitespace counts as malformed.
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() || s.trim() != s {
            return None;
        }
        Uuid::parse_str(s).ok().map(Self)
    }

    /// First eight characters, used for compact display
    pub fn short(&self) -> String {
        let mut s = self.0.to_string();
        s.truncate(8);
        s
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A shopping list entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// What to buy
    pub name: String,
    /// How many
    pub quantity: u32,
    /// Optional free-form notes
    pub notes: Option<String>,
    /// Whether the item has been bought
    pub is_purchased: bool,
    /// When this item was added
    pub created_at: DateTime<Utc>,
    /// When this item was last changed
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Create a new, not yet purchased item
    pub fn new(name: impl Into<String>, quantity: u32, notes: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::generate(),
            name: name.into(),
            quantity,
            notes: normalize_notes(notes),
            is_purchased: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable fields, keeping id and purchase state
    pub fn set_details(&mut self, name: impl Into<String>, quantity: u32, notes: Option<String>) {
        self.name = name.into();
        self.quantity = quantity;
        self.notes = normalize_notes(notes);
        self.updated_at = Utc::now();
    }

    /// Flip the purchased flag and return the new value
    pub fn toggle_purchased(&mut self) -> bool {
        self.is_purchased = !self.is_purchased;
        self.updated_at = Utc::now();
        self.is_purchased
    }

    /// Case-insensitive substring match against name or notes
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        if self.name.to_lowercase().contains(needle) {
            return true;
        }
        self.notes
            .as_deref()
            .is_some_and(|notes| notes.to_lowercase().contains(needle))
    }
}

/// Blank notes are stored as no notes
fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes.filter(|n| !n.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_new() {
        let item = Item::new("Banana", 3, Some("ripe".to_string()));
        assert_eq!(item.name, "Banana");
        assert_eq!(item.quantity, 3);
        assert_eq!(item.notes.as_deref(), Some("ripe"));
        assert!(!item.is_purchased);
        assert_eq!(item.created_at, item.updated_at);
    }

    #[test]
    fn test_item_new_generates_distinct_ids() {
        let a = Item::new("Milk", 1, None);
        let b = Item::new("Milk", 1, None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_blank_notes_become_none() {
        let item = Item::new("Bread", 1, Some("   ".to_string()));
        assert!(item.notes.is_none());
    }

    #[test]
    fn test_set_details_keeps_id_and_flag() {
        let mut item = Item::new("Coffee", 1, None);
        item.toggle_purchased();
        let id = item.id;
        let original_updated = item.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(10));

        item.set_details("Tea", 2, Some("green".to_string()));

        assert_eq!(item.id, id);
        assert!(item.is_purchased);
        assert_eq!(item.name, "Tea");
        assert_eq!(item.quantity, 2);
        assert!(item.updated_at > original_updated);
    }

    #[test]
    fn test_toggle_purchased() {
        let mut item = Item::new("Eggs", 12, None);
        assert!(item.toggle_purchased());
        assert!(!item.toggle_purchased());
    }

    #[test]
    fn test_matches_name_and_notes() {
        let item = Item::new("Oat Milk", 1, Some("Barista edition".to_string()));
        assert!(item.matches("milk"));
        assert!(item.matches("barista"));
        assert!(!item.matches("soy"));
    }

    #[test]
    fn test_item_id_parse() {
        let id = ItemId::generate();
        assert_eq!(ItemId::parse(&id.to_string()), Some(id));
        assert_eq!(ItemId::parse(&id.to_string().to_uppercase()), Some(id));
        assert_eq!(ItemId::parse(""), None);
        assert_eq!(ItemId::parse("   "), None);
        assert_eq!(ItemId::parse("not-a-uuid"), None);
        assert_eq!(ItemId::parse(&format!(" {} ", id)), None);
        assert_eq!(ItemId::parse(&format!("{}\n", id)), None);
    }

    #[test]
    fn test_item_id_short() {
        let id = ItemId::generate();
        assert_eq!(id.short().len(), 8);
        assert!(id.to_string().starts_with(&id.short()));
    }

    #[test]
    fn test_item_serialization() {
        let item = Item::new("Kaffe", 3, Some("En fin kaffe".to_string()));
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(&format!("\"id\":\"{}\"", item.id)));
        let deserialized: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(item, deserialized);
    }
}
