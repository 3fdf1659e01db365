//! Library root for appconfig
pub mod error;
pub mod logger;
pub mod models;
pub mod prompt;
pub mod util;

pub mod config;
pub mod commands;

// Convenience re-exports
pub use config::{ConfigManager, ConfigMap, ConfigureStatus};
pub use error::{Error, Result};
pub use logger::{set_log_level, set_logger, LogFacade, Logger, NullLogger};
pub use models::{ConfigItem, ConfigItemBuilder, ConfigValue, DisplayStyle, ValueType, NULL_VALUE};
pub use prompt::{InquirePrompter, LinePrompter, PromptRequest, Prompter};
