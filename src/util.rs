use std::path::PathBuf;

/// Expand a leading `~` to the user's home directory.
pub fn expand_user(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
