//! Command handlers, one module per command group

pub mod item;
pub mod status;
