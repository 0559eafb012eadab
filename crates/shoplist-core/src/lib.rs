//! shoplist Core Library
//!
//! This crate provides the core functionality for shoplist, an in-memory
//! shopping list: items with a name, quantity, optional notes and a
//! purchased flag, kept in a user-controlled order.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = ItemStore::new();
//!
//! // Add items
//! let bananas = store.add("Banana", 6, Some("ripe".into()))?;
//! store.add("Milk", 2, None)?;
//!
//! // Mark as bought, then tidy up
//! store.toggle_purchased(&bananas.id.to_string())?;
//! let removed = store.clear_purchased();
//! ```
//!
//! # Modules
//!
//! - `store`: The item store (main entry point)
//! - `shared`: Lock-protected store handle for concurrent callers
//! - `models`: Item and ItemId
//! - `error`: Store error types
//! - `config`: Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod shared;
pub mod store;

pub use config::Config;
pub use error::{InvalidInput, ReorderError, StoreError, StoreResult};
pub use models::{Item, ItemId};
pub use shared::SharedItemStore;
pub use store::ItemStore;
