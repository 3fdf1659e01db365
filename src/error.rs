//! Error type shared by the whole crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::ValueType;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A config item name or config file name was rejected at construction.
    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// A display style string did not match any known style.
    #[error("invalid display style: actual={0}")]
    InvalidStyle(String),

    #[error("could not determine the home directory")]
    HomeDirNotFound,

    /// The config file is not valid JSON, or not a JSON object.
    #[error("failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// A configured key holds a nested value (array or object).
    #[error("unsupported value for '{key}': only scalar values are allowed")]
    UnsupportedValue { key: String },

    /// Required items absent from the loaded file. The message keeps the
    /// names concatenated as they were historically reported.
    #[error("required configs not found: {}", names.concat())]
    MissingRequiredConfig { names: Vec<String> },

    #[error("Error: {input} is not a valid {expected}")]
    TypeCoercion { input: String, expected: ValueType },

    /// The user cancelled an interactive prompt.
    #[error("interrupted")]
    Interrupted,

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_name(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Names reported by a [`Error::MissingRequiredConfig`], empty otherwise.
    pub fn missing_names(&self) -> &[String] {
        match self {
            Self::MissingRequiredConfig { names } => names,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_joins_without_separator() {
        let err = Error::MissingRequiredConfig {
            names: vec!["token".to_string(), "path".to_string()],
        };
        assert_eq!(err.to_string(), "required configs not found: tokenpath");
        assert_eq!(err.missing_names(), ["token", "path"]);
    }

    #[test]
    fn test_type_coercion_message_names_input_and_type() {
        let err = Error::TypeCoercion {
            input: "abc".to_string(),
            expected: ValueType::Integer,
        };
        assert_eq!(err.to_string(), "Error: abc is not a valid integer");
    }

    #[test]
    fn test_missing_names_empty_for_other_variants() {
        assert!(Error::Interrupted.missing_names().is_empty());
    }
}
