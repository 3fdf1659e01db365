use crate::config::ConfigureStatus;
use crate::error::Result;
use crate::ConfigManager;

/// Run the interactive configuration and return the process exit code.
pub fn run_configure(manager: &ConfigManager) -> Result<i32> {
    let status = manager.configure()?;
    match &status {
        ConfigureStatus::Success => {
            println!("Saved {}", manager.config_filepath().display());
        }
        // keep the shell prompt on its own line
        ConfigureStatus::Interrupted => println!(),
        ConfigureStatus::Filesystem(e) => {
            eprintln!("Cannot write {}: {e}", manager.config_filepath().display());
        }
    }
    Ok(status.code())
}
