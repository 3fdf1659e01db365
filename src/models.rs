use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// Scalar value stored in the config file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// JSON `null`
    Null,
    /// "Explicitly no value" marker. Never read back from disk, written as `null`.
    Unset,
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`.
    Unsigned(u64),
    Float(f64),
    String(String),
}

/// Marker for an item whose initial value is deliberately empty.
/// Suppresses the masked hint of `PartVisible` items.
pub const NULL_VALUE: ConfigValue = ConfigValue::Unset;

impl ConfigValue {
    /// Null, unset, false, zero and "" are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null | Self::Unset => false,
            Self::Bool(b) => *b,
            Self::Integer(i) => *i != 0,
            Self::Unsigned(u) => *u != 0,
            Self::Float(f) => *f != 0.0,
            Self::String(s) => !s.is_empty(),
        }
    }

    pub fn is_null_marker(&self) -> bool {
        *self == NULL_VALUE
    }

    /// Convert a value parsed from the config file. Arrays and objects have
    /// no scalar counterpart and yield `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;
        match value {
            Value::Null => Some(Self::Null),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self::Integer(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Self::Unsigned(u))
                } else {
                    n.as_f64().map(Self::Float)
                }
            }
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null | Self::Unset => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Unsigned(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for ConfigValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Scalar type a prompted answer is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueType {
    #[default]
    String,
    Integer,
    Float,
}

impl ValueType {
    /// Coerce one line of user input.
    ///
    /// Strings keep the line verbatim (minus the line terminator). Numbers are
    /// trimmed first; an empty answer becomes [`ConfigValue::Null`]. Floats
    /// must be finite, JSON has no encoding for `inf` or `NaN`.
    pub fn coerce(self, input: &str) -> Result<ConfigValue> {
        let line = input.trim_end_matches(&['\r', '\n'][..]);
        let trimmed = line.trim();

        let value = match self {
            Self::String => return Ok(ConfigValue::String(line.to_string())),
            _ if trimmed.is_empty() => return Ok(ConfigValue::Null),
            Self::Integer => trimmed.parse::<i64>().ok().map(ConfigValue::Integer),
            Self::Float => trimmed
                .parse::<f64>()
                .ok()
                .filter(|x| x.is_finite())
                .map(ConfigValue::Float),
        };

        value.ok_or_else(|| Error::TypeCoercion {
            input: line.to_string(),
            expected: self,
        })
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
        }
    }
}

/// How the current value is shown when prompting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayStyle {
    /// Show the current value as the default.
    #[default]
    Visible,
    /// Show only the last four characters behind a mask.
    PartVisible,
    /// Never show the current value.
    Hidden,
}

impl DisplayStyle {
    pub fn show_default(self) -> bool {
        self == Self::Visible
    }
}

impl FromStr for DisplayStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "VISIBLE" => Ok(Self::Visible),
            "PART_VISIBLE" => Ok(Self::PartVisible),
            "HIDDEN" => Ok(Self::Hidden),
            _ => Err(Error::InvalidStyle(s.to_string())),
        }
    }
}

impl fmt::Display for DisplayStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visible => write!(f, "VISIBLE"),
            Self::PartVisible => write!(f, "PART_VISIBLE"),
            Self::Hidden => write!(f, "HIDDEN"),
        }
    }
}

/// One configuration field. Immutable once built, see [`ConfigItem::builder`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigItem {
    name: String,
    initial_value: ConfigValue,
    value_type: ValueType,
    prompt_text: String,
    display_style: DisplayStyle,
    required: bool,
}

impl ConfigItem {
    pub fn builder(name: impl Into<String>) -> ConfigItemBuilder {
        ConfigItemBuilder {
            name: name.into(),
            initial_value: ConfigValue::Null,
            value_type: ValueType::default(),
            prompt_text: String::new(),
            display_style: Ok(DisplayStyle::default()),
            required: false,
        }
    }

    /// Key under which the value is stored in the config file.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initial_value(&self) -> &ConfigValue {
        &self.initial_value
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    pub fn display_style(&self) -> DisplayStyle {
        self.display_style
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn show_default(&self) -> bool {
        self.display_style.show_default()
    }
}

/// Validating builder for [`ConfigItem`].
#[derive(Debug, Clone)]
pub struct ConfigItemBuilder {
    name: String,
    initial_value: ConfigValue,
    value_type: ValueType,
    prompt_text: String,
    display_style: std::result::Result<DisplayStyle, String>,
    required: bool,
}

impl ConfigItemBuilder {
    pub fn initial_value(mut self, value: impl Into<ConfigValue>) -> Self {
        self.initial_value = value.into();
        self
    }

    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    pub fn prompt_text(mut self, text: impl Into<String>) -> Self {
        self.prompt_text = text.into();
        self
    }

    pub fn display_style(mut self, style: DisplayStyle) -> Self {
        self.display_style = Ok(style);
        self
    }

    /// Style given by name (`VISIBLE`, `PART_VISIBLE`, `HIDDEN`). An unknown
    /// name is reported by [`ConfigItemBuilder::build`].
    pub fn display_style_str(mut self, style: &str) -> Self {
        self.display_style = style.parse::<DisplayStyle>().map_err(|_| style.to_string());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn build(self) -> Result<ConfigItem> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_name(&self.name, "item name must not be empty"));
        }
        let display_style = self.display_style.map_err(Error::InvalidStyle)?;
        let prompt_text = if self.prompt_text.is_empty() {
            self.name.clone()
        } else {
            self.prompt_text
        };

        Ok(ConfigItem {
            name: self.name,
            initial_value: self.initial_value,
            value_type: self.value_type,
            prompt_text,
            display_style,
            required: self.required,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let item = ConfigItem::builder("path").build().unwrap();
        assert_eq!(item.name(), "path");
        assert_eq!(item.prompt_text(), "path");
        assert_eq!(item.initial_value(), &ConfigValue::Null);
        assert_eq!(item.value_type(), ValueType::String);
        assert_eq!(item.display_style(), DisplayStyle::Visible);
        assert!(!item.required());
        assert!(item.show_default());
    }

    #[test]
    fn test_builder_rejects_empty_name() {
        assert!(matches!(
            ConfigItem::builder("").build(),
            Err(Error::InvalidName { .. })
        ));
        assert!(matches!(
            ConfigItem::builder("   ").build(),
            Err(Error::InvalidName { .. })
        ));
    }

    #[test]
    fn test_builder_rejects_unknown_style() {
        let err = ConfigItem::builder("token")
            .display_style_str("BLINKING")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidStyle(ref s) if s == "BLINKING"));
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("visible".parse::<DisplayStyle>().unwrap(), DisplayStyle::Visible);
        assert_eq!(
            "PART_VISIBLE".parse::<DisplayStyle>().unwrap(),
            DisplayStyle::PartVisible
        );
        assert_eq!("Hidden".parse::<DisplayStyle>().unwrap(), DisplayStyle::Hidden);
        assert!("part-visible".parse::<DisplayStyle>().is_err());
    }

    #[test]
    fn test_show_default_only_for_visible() {
        assert!(DisplayStyle::Visible.show_default());
        assert!(!DisplayStyle::PartVisible.show_default());
        assert!(!DisplayStyle::Hidden.show_default());
    }

    #[test]
    fn test_truthiness() {
        assert!(!ConfigValue::Null.is_truthy());
        assert!(!NULL_VALUE.is_truthy());
        assert!(!ConfigValue::from("").is_truthy());
        assert!(!ConfigValue::Integer(0).is_truthy());
        assert!(!ConfigValue::Float(0.0).is_truthy());
        assert!(!ConfigValue::Bool(false).is_truthy());
        assert!(ConfigValue::from("x").is_truthy());
        assert!(ConfigValue::Integer(-1).is_truthy());
    }

    #[test]
    fn test_null_marker_is_distinct_from_null() {
        assert!(NULL_VALUE.is_null_marker());
        assert!(!ConfigValue::Null.is_null_marker());
        assert_ne!(NULL_VALUE, ConfigValue::Null);
    }

    #[test]
    fn test_coerce_string_keeps_spaces() {
        assert_eq!(
            ValueType::String.coerce("  a b \n").unwrap(),
            ConfigValue::from("  a b ")
        );
    }

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(ValueType::Integer.coerce(" 42\n").unwrap(), ConfigValue::Integer(42));
        assert_eq!(ValueType::Float.coerce("1.5").unwrap(), ConfigValue::Float(1.5));
        assert_eq!(ValueType::Integer.coerce("  \n").unwrap(), ConfigValue::Null);
    }

    #[test]
    fn test_coerce_rejects_non_finite_floats() {
        for input in ["inf", "-inf", "NaN", "infinity", "1e400"] {
            assert!(
                matches!(
                    ValueType::Float.coerce(input),
                    Err(Error::TypeCoercion { expected: ValueType::Float, .. })
                ),
                "{input}"
            );
        }
        assert_eq!(ValueType::Float.coerce("-0.5").unwrap(), ConfigValue::Float(-0.5));
    }

    #[test]
    fn test_coerce_failure_reports_input() {
        let err = ValueType::Integer.coerce("4x2\n").unwrap_err();
        assert!(matches!(
            err,
            Error::TypeCoercion { ref input, expected: ValueType::Integer } if input == "4x2"
        ));
    }

    #[test]
    fn test_from_json_scalars() {
        use serde_json::json;
        assert_eq!(ConfigValue::from_json(&json!(89)), Some(ConfigValue::Integer(89)));
        assert_eq!(ConfigValue::from_json(&json!(0.5)), Some(ConfigValue::Float(0.5)));
        assert_eq!(
            ConfigValue::from_json(&json!(u64::MAX)),
            Some(ConfigValue::Unsigned(u64::MAX))
        );
        assert_eq!(ConfigValue::from_json(&json!("aaa")), Some(ConfigValue::from("aaa")));
        assert_eq!(ConfigValue::from_json(&json!(null)), Some(ConfigValue::Null));
        assert_eq!(ConfigValue::from_json(&json!([1])), None);
    }

    #[test]
    fn test_unset_serializes_as_null() {
        assert_eq!(serde_json::to_string(&NULL_VALUE).unwrap(), "null");
        assert_eq!(serde_json::to_string(&ConfigValue::from("é")).unwrap(), "\"é\"");
    }
}
