//! Subcommands of the `appconfig` binary.
pub mod configure;
pub mod load;
pub mod path;

use crate::error::Result;
use crate::models::{ConfigItem, DisplayStyle, NULL_VALUE};
use crate::ConfigManager;

/// Name of the demo config file, `~/.example`.
pub const DEMO_CONFIG_NAME: &str = "example";

/// Items driven by the binary: an API token, a path and a proxy URI.
pub fn demo_items() -> Result<Vec<ConfigItem>> {
    Ok(vec![
        ConfigItem::builder("token")
            .initial_value(NULL_VALUE)
            .prompt_text("API Token")
            .display_style(DisplayStyle::PartVisible)
            .build()?,
        ConfigItem::builder("path")
            .prompt_text("Path")
            .initial_value(".")
            .build()?,
        ConfigItem::builder("proxy")
            .prompt_text("Proxy Server URI")
            .initial_value("")
            .build()?,
    ])
}

pub fn demo_manager() -> Result<ConfigManager> {
    ConfigManager::new(DEMO_CONFIG_NAME, demo_items()?)
}

pub use configure::run_configure;
pub use load::{parse_load_args, show_config};
pub use path::show_path;
