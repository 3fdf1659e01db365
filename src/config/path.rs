use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};

const MAX_FILENAME_LEN: usize = 255;

const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

fn invalid_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[\x00-\x1f\x7f/\\:*?"<>|]"#).expect("static regex"))
}

/// Check that `name` can be used as a file name on any common platform.
pub fn validate_config_name(name: &str) -> Result<()> {
    let bare = name.trim_start_matches('.');
    if bare.is_empty() {
        return Err(Error::invalid_name(name, "config name must not be empty"));
    }
    if name.len() > MAX_FILENAME_LEN {
        return Err(Error::invalid_name(
            name,
            format!("longer than {MAX_FILENAME_LEN} bytes"),
        ));
    }
    if let Some(m) = invalid_chars().find(name) {
        return Err(Error::invalid_name(
            name,
            format!("invalid character {:?}", m.as_str()),
        ));
    }
    let stem = bare.split('.').next().unwrap_or(bare);
    if RESERVED_NAMES.iter().any(|r| r.eq_ignore_ascii_case(stem)) {
        return Err(Error::invalid_name(name, "reserved device name"));
    }
    Ok(())
}

/// `base/.name`, with any leading dots of `name` collapsed to one.
pub fn config_path_in(base: &Path, name: &str) -> PathBuf {
    let file_name = format!(".{}", name.trim_start_matches('.'));
    normalize(&base.join(file_name))
}

/// `~/.name` for the current user.
pub fn config_path(name: &str) -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(Error::HomeDirNotFound)?;
    Ok(config_path_in(&home, name))
}

/// Lexically resolve `.` and `..` components without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_dots_collapse_to_one() {
        let base = Path::new("/home/user");
        assert_eq!(config_path_in(base, "myapp"), PathBuf::from("/home/user/.myapp"));
        assert_eq!(config_path_in(base, ".myapp"), PathBuf::from("/home/user/.myapp"));
        assert_eq!(config_path_in(base, "...myapp"), PathBuf::from("/home/user/.myapp"));
    }

    #[test]
    fn test_base_is_normalized() {
        let base = Path::new("/home/user/./tmp/../");
        assert_eq!(config_path_in(base, "example"), PathBuf::from("/home/user/.example"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(normalize(Path::new("./")), PathBuf::from("."));
    }

    #[test]
    fn test_home_config_path() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config_path(".myapp").unwrap(), normalize(&home.join(".myapp")));
        }
    }

    #[test]
    fn test_validate_accepts_plain_names() {
        for name in ["example", ".example", "my-app_2", "app.json", "設定"] {
            assert!(validate_config_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        for name in ["", ".", "..", "a/b", "a\\b", "a:b", "a*b", "a?b", "a|b", "a\0b", "CON", "nul.txt"] {
            assert!(
                matches!(validate_config_name(name), Err(Error::InvalidName { .. })),
                "{name:?}"
            );
        }
        assert!(validate_config_name(&"x".repeat(256)).is_err());
    }
}
