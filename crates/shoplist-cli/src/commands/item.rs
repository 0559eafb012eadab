//! Item command handlers

use anyhow::{bail, Context, Result};

use shoplist_core::{Item, ItemStore};

use crate::output::Output;

/// Add a new item
pub fn add(
    store: &mut ItemStore,
    name: &str,
    quantity: u32,
    notes: Option<String>,
    output: &Output,
) -> Result<()> {
    let item = store
        .add(name, quantity, notes)
        .context("Failed to add item")?;

    output.success(&format!("Added item: {}", item.id));
    output.print_item(&item);
    Ok(())
}

/// List all items in display order
pub fn list(store: &ItemStore, output: &Output) -> Result<()> {
    output.print_items(store.get_all());
    Ok(())
}

/// Show a single item
pub fn show(store: &ItemStore, id: &str, output: &Output) -> Result<()> {
    let id = resolve_item_id(store, id)?;
    let item = store
        .get_by_id(&id)
        .ok_or_else(|| anyhow::anyhow!("Item not found: {}", id))?;

    output.print_item(item);
    Ok(())
}

/// Fields to change on an existing item; `None` keeps the current value
#[derive(Debug, Default)]
pub struct ItemEdit {
    pub name: Option<String>,
    pub quantity: Option<u32>,
    pub notes: Option<String>,
    pub clear_notes: bool,
}

/// Edit an item
pub fn edit(store: &mut ItemStore, id: &str, edit: ItemEdit, output: &Output) -> Result<()> {
    let id = resolve_item_id(store, id)?;
    let current = store
        .get_by_id(&id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Item not found: {}", id))?;

    let merged = merge_edit(current, edit);
    let item = store
        .update(&id, &merged.name, merged.quantity, merged.notes)
        .context("Failed to update item")?;

    output.success("Item updated");
    output.print_item(&item);
    Ok(())
}

/// Delete an item
pub fn delete(store: &mut ItemStore, id: &str, output: &Output) -> Result<()> {
    let id = resolve_item_id(store, id)?;
    let item = store.delete(&id).context("Failed to delete item")?;

    output.success(&format!("Deleted item: {} - {}", item.id.short(), item.name));
    Ok(())
}

/// Search items by name or notes
pub fn search(store: &ItemStore, query: Option<&str>, output: &Output) -> Result<()> {
    let items = store.search(query);
    output.print_items(&items);
    Ok(())
}

/// Flip an item between bought and not bought
pub fn toggle(store: &mut ItemStore, id: &str, output: &Output) -> Result<()> {
    let id = resolve_item_id(store, id)?;
    let purchased = store
        .toggle_purchased(&id)
        .context("Failed to toggle item")?;

    let item = store
        .get_by_id(&id)
        .ok_or_else(|| anyhow::anyhow!("Item not found: {}", id))?;

    let state = if purchased { "purchased" } else { "not purchased" };
    output.success(&format!("Marked {} - {} as {}", item.id.short(), item.name, state));
    Ok(())
}

/// Remove every purchased item
pub fn clear_purchased(store: &mut ItemStore, output: &Output) -> Result<()> {
    let removed = store.clear_purchased();
    output.success(&format!("Removed {} purchased item(s)", removed));
    Ok(())
}

/// Put items in the given order
///
/// Prefixes are expanded where they are unambiguous; anything else is
/// passed through so the store reports exactly what was wrong.
pub fn reorder(store: &mut ItemStore, ids: &[String], output: &Output) -> Result<()> {
    let resolved: Vec<String> = ids
        .iter()
        .map(|raw| resolve_item_id(store, raw).unwrap_or_else(|_| raw.clone()))
        .collect();

    store
        .reorder(&resolved)
        .context("Failed to reorder items")?;

    output.success(&format!("Reordered {} item(s)", resolved.len()));
    output.print_items(store.get_all());
    Ok(())
}

/// Apply an edit on top of the current values
fn merge_edit(mut current: Item, edit: ItemEdit) -> Item {
    if let Some(name) = edit.name {
        current.name = name;
    }
    if let Some(quantity) = edit.quantity {
        current.quantity = quantity;
    }
    if edit.clear_notes {
        current.notes = None;
    } else if edit.notes.is_some() {
        current.notes = edit.notes;
    }
    current
}

/// Resolve an item ID (supports full UUID or prefix)
pub fn resolve_item_id(store: &ItemStore, id: &str) -> Result<String> {
    let id = id.trim();

    // Try full UUID first
    if let Some(item) = store.get_by_id(id) {
        return Ok(item.id.to_string());
    }

    let prefix = id.to_lowercase();
    if prefix.is_empty() {
        bail!("No item id given");
    }

    // Try prefix match
    let matches: Vec<_> = store
        .get_all()
        .iter()
        .filter(|item| item.id.to_string().starts_with(&prefix))
        .collect();

    match matches.len() {
        0 => bail!("No item found matching: {}", id),
        1 => Ok(matches[0].id.to_string()),
        n => {
            let candidates: Vec<String> = matches
                .iter()
                .map(|item| format!("{} - {}", item.id, item.name))
                .collect();
            bail!(
                "Ambiguous ID '{}' matches {} items:\n  {}\nPlease provide more characters.",
                id,
                n,
                candidates.join("\n  ")
            );
        }
    }
}
