use prettytable::{row, Table};

use crate::config::ConfigMap;
use crate::error::Result;
use crate::util::expand_user;
use crate::ConfigManager;

/// Arguments following `load`: nothing, or `--file PATH`.
/// Returns `None` for anything else.
pub fn parse_load_args(args: &[String]) -> Option<Option<&str>> {
    match args {
        [] => Some(None),
        [flag, file] if flag == "--file" => Some(Some(file.as_str())),
        _ => None,
    }
}

/// Load the config (from `file` if given) and print it as a table.
pub fn show_config(manager: &ConfigManager, file: Option<&str>) -> Result<()> {
    let path = file.map(expand_user);
    let values = manager.load(path.as_deref())?;

    if values.is_empty() {
        let shown = path.as_deref().unwrap_or(manager.config_filepath());
        println!("No configuration found at {}", shown.display());
        return Ok(());
    }

    config_table(manager, &values).printstd();
    Ok(())
}

/// One row per configured item present in `values`, in item order.
pub fn config_table(manager: &ConfigManager, values: &ConfigMap) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Key", "Value"]);
    for item in manager.config_items() {
        if let Some(v) = values.get(item.name()) {
            table.add_row(row![item.name(), v.to_string()]);
        }
    }
    table
}
