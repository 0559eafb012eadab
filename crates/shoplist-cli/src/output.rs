//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use shoplist_core::{Item, ItemStore};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single item
    pub fn print_item(&self, item: &Item) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:        {}", item.id);
                println!("Name:      {}", item.name);
                println!("Quantity:  {}", item.quantity);
                if let Some(ref notes) = item.notes {
                    println!("Notes:     {}", notes);
                }
                println!(
                    "Purchased: {}",
                    if item.is_purchased { "yes" } else { "no" }
                );
                println!("Added:     {}", item.created_at.format("%Y-%m-%d %H:%M"));
                println!("Updated:   {}", item.updated_at.format("%Y-%m-%d %H:%M"));
            }
            OutputFormat::Json => print_json(item),
            OutputFormat::Quiet => {
                println!("{}", item.id);
            }
        }
    }

    /// Print a list of items
    pub fn print_items(&self, items: &[Item]) {
        match self.format {
            OutputFormat::Human => {
                if items.is_empty() {
                    println!("No items found.");
                    return;
                }
                for item in items {
                    println!("{}", item_line(item));
                }
                println!("\n{} item(s)", items.len());
            }
            OutputFormat::Json => print_json(&items),
            OutputFormat::Quiet => {
                for item in items {
                    println!("{}", item.id);
                }
            }
        }
    }

    /// Print store counters
    pub fn print_status(&self, store: &ItemStore) {
        match self.format {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "items": store.len(),
                        "purchased": store.purchased_count(),
                        "capacity": store.capacity()
                    })
                );
            }
            OutputFormat::Quiet => {
                println!("{}", store.len());
            }
            OutputFormat::Human => {
                println!("Items:     {}", store.len());
                println!("Purchased: {}", store.purchased_count());
                println!("Capacity:  {}", store.capacity());
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Report a failed command; the session carries on afterwards
    pub fn error(&self, error: &anyhow::Error) {
        match self.format {
            OutputFormat::Human => eprintln!("✗ {:#}", error),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "error", "message": format!("{:#}", error)})
                );
            }
            OutputFormat::Quiet => eprintln!("{:#}", error),
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

/// One-line summary used in list output
fn item_line(item: &Item) -> String {
    let mark = if item.is_purchased { "[x]" } else { "[ ]" };
    let mut line = format!(
        "{} | {} {} x{}",
        item.id.short(),
        mark,
        truncate(&item.name, 30),
        item.quantity
    );
    if let Some(ref notes) = item.notes {
        line.push_str(" | ");
        line.push_str(&truncate_line(notes, 40));
    }
    line
}

/// Truncate a string to max length in characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Truncate to first line and max length
fn truncate_line(s: &str, max_len: usize) -> String {
    let first_line = s.lines().next().unwrap_or("");
    truncate(first_line, max_len)
}
