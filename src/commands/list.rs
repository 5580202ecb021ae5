// The `list` command: print the unified application catalog so an operator
// can see what `refresh --id`/`--name` would resolve against.

use anyhow::Result;
use colored::Colorize;
use prettytable::{Table, row};

use crate::errors::RunError;
use crate::libs::{catalog_builder, config_loading, inventory, preflight, registry};
use crate::log_info;

pub fn run(include_store: bool, config_path: Option<String>) -> Result<()> {
    let config = config_loading::load_config(config_path.as_deref());
    preflight::ensure_tool_available(&config.winget_path)?;

    let raw_listing = inventory::fetch_listing(&config.winget_path)?;
    let inventory_records = inventory::parse_listing(&raw_listing);
    if inventory_records.is_empty() {
        return Err(RunError::EmptyInventory.into());
    }

    let system_records = registry::read_system_inventory();
    let mut catalog = catalog_builder::join(inventory_records, &system_records);
    catalog.retain(|app| include_store || app.source != config.store_source);
    catalog.sort_by(|a, b| a.name.cmp(&b.name));

    let mut table = Table::new();
    table.add_row(row!["Name", "Identifier", "Version", "Source", "Install location"]);
    for app in &catalog {
        table.add_row(row![
            app.name,
            app.identifier,
            app.version,
            app.source,
            app.install_location.as_deref().unwrap_or("-"),
        ]);
    }
    table.printstd();

    log_info!("[Catalog] {} application(s) listed", catalog.len());
    Ok(())
}
