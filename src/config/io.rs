use std::fs;
use std::io;
use std::path::Path;

use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::models::ConfigValue;

/// Read the config file as a JSON object.
///
/// Returns `Ok(None)` when no regular file exists at `path`.
pub fn read_config_file(path: &Path) -> Result<Option<Map<String, Value>>> {
    if !path.is_file() {
        return Ok(None);
    }

    // invalid UTF-8 must surface as a parse error
    let content = fs::read(path)?;
    let value: Value = serde_json::from_slice(&content).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(Some(map)),
        other => Err(Error::Parse {
            path: path.to_path_buf(),
            reason: format!("expected a JSON object, found {}", json_kind(&other)),
        }),
    }
}

/// Keeps entries in the order they were collected.
struct Ordered<'a>(&'a [(String, ConfigValue)]);

impl Serialize for Ordered<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

/// Render entries as the on-disk document: 4-space indent, non-ASCII kept
/// literal, trailing newline.
pub fn render_config(entries: &[(String, ConfigValue)]) -> io::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    Ordered(entries).serialize(&mut ser)?;
    buf.push(b'\n');
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Overwrite the config file in place. No temp file, no rename.
pub fn write_config_file(path: &Path, entries: &[(String, ConfigValue)]) -> io::Result<()> {
    let json = render_config(entries)?;
    fs::write(path, json)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entries() -> Vec<(String, ConfigValue)> {
        vec![
            ("token".to_string(), ConfigValue::from("abc")),
            ("path".to_string(), ConfigValue::from("日本語")),
            ("number".to_string(), ConfigValue::Integer(89)),
            ("proxy".to_string(), ConfigValue::Null),
        ]
    }

    #[test]
    fn test_render_format() {
        let out = render_config(&entries()).unwrap();
        assert_eq!(
            out,
            "{\n    \"token\": \"abc\",\n    \"path\": \"日本語\",\n    \"number\": 89,\n    \"proxy\": null\n}\n"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_config(&[]).unwrap(), "{}\n");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(read_config_file(&dir.path().join(".none")).unwrap().is_none());
        // a directory is not a config file
        assert!(read_config_file(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".example");
        write_config_file(&path, &entries()).unwrap();

        let map = read_config_file(&path).unwrap().unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(map["path"], Value::String("日本語".to_string()));
        assert_eq!(map["proxy"], Value::Null);
    }

    #[test]
    fn test_read_rejects_non_json_and_non_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".example");

        fs::write(&path, "not json").unwrap();
        assert!(matches!(read_config_file(&path), Err(Error::Parse { .. })));

        fs::write(&path, b"{\"path\": \"\xff\xfe\"}").unwrap();
        assert!(matches!(read_config_file(&path), Err(Error::Parse { .. })));

        fs::write(&path, "[1, 2]").unwrap();
        let err = read_config_file(&path).unwrap_err();
        assert!(err.to_string().contains("an array"), "{err}");
    }
}
