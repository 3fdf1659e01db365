//! Config file handling: path derivation, JSON I/O and the manager.
pub mod io;
pub mod manager;
pub mod path;

pub use manager::{ConfigManager, ConfigMap, ConfigureStatus, EINTR};
pub use path::{config_path, validate_config_name};
