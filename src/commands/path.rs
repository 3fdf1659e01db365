use crate::ConfigManager;

pub fn show_path(manager: &ConfigManager) {
    let state = if manager.exists() { "exists" } else { "not created yet" };
    println!("{} ({})", manager.config_filepath().display(), state);
}
