//! Status command handler

use anyhow::Result;

use shoplist_core::ItemStore;

use crate::output::Output;

/// Show item counts and storage capacity
pub fn show(store: &ItemStore, output: &Output) -> Result<()> {
    output.print_status(store);
    Ok(())
}
