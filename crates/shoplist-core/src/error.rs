//! Store error handling
//!
//! Every expected failure (unknown id, rejected input, bad permutation)
//! is reported through these types. A failed operation never leaves the
//! store partially modified.

use thiserror::Error;

use crate::models::ItemId;

/// Errors returned by store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No item with the given id
    #[error("Item not found: '{0}'")]
    NotFound(String),

    /// Name or quantity rejected
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// Reorder list is not a permutation of the current ids
    #[error("Invalid reorder: {0}")]
    InvalidReorder(#[from] ReorderError),
}

/// Reasons `add` and `update` reject their arguments
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("name must not be empty")]
    EmptyName,

    #[error("quantity must be greater than zero")]
    ZeroQuantity,
}

/// Reasons a reorder request is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReorderError {
    #[error("no ids given for a list of {0} item(s)")]
    Empty(usize),

    #[error("'{0}' is not an item in the list")]
    UnknownId(String),

    #[error("id {0} appears more than once")]
    DuplicateId(ItemId),

    #[error("id {0} is missing")]
    MissingId(ItemId),
}

impl StoreError {
    /// Check if this error means the id did not resolve
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
