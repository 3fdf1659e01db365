//! Interactive prompting: label rules and the [`Prompter`] backends.
//!
//! Backends only read raw answers. Defaults, coercion and the retry on a bad
//! answer live in [`prompt_value`] so every backend behaves the same.

pub mod interactive;
pub mod line;

use std::io::IsTerminal;

use crate::error::{Error, Result};
use crate::models::{ConfigItem, ConfigValue, DisplayStyle, ValueType};

pub use interactive::InquirePrompter;
pub use line::LinePrompter;

const MASK: &str = "**********";

/// One question put to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    label: String,
    value_type: ValueType,
    current: ConfigValue,
    show_default: bool,
}

impl PromptRequest {
    pub fn new(
        label: impl Into<String>,
        value_type: ValueType,
        current: ConfigValue,
        show_default: bool,
    ) -> Self {
        Self {
            label: label.into(),
            value_type,
            current,
            show_default,
        }
    }

    /// Request for `item` whose value so far is `current`.
    pub fn for_item(item: &ConfigItem, current: &ConfigValue) -> Self {
        Self::new(
            build_label(item, current),
            item.value_type(),
            current.clone(),
            item.show_default(),
        )
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn current(&self) -> &ConfigValue {
        &self.current
    }

    pub fn show_default(&self) -> bool {
        self.show_default
    }

    /// Text shown to the user, without the trailing `": "`.
    pub fn message(&self) -> String {
        if self.show_default {
            format!("{} [{}]", self.label, self.current)
        } else {
            self.label.clone()
        }
    }
}

/// A source of answers.
pub trait Prompter {
    /// Ask once and return the raw answer. A cancelled prompt is
    /// [`Error::Interrupted`].
    fn read_answer(&mut self, request: &PromptRequest) -> Result<String>;

    /// Tell the user an answer was rejected.
    fn report_error(&mut self, message: &str);
}

/// The prompt label for `item`: prompt text, required marker and, for
/// part-visible items with a real value, the masked hint.
pub fn build_label(item: &ConfigItem, current: &ConfigValue) -> String {
    let mut label = item.prompt_text().to_string();
    if item.required() {
        label.push_str(" (required)");
    }
    if item.display_style() == DisplayStyle::PartVisible
        && current.is_truthy()
        && !current.is_null_marker()
    {
        label.push(' ');
        label.push_str(&mask_hint(current));
    }
    label
}

/// `[**********` + last four characters + `]`.
pub fn mask_hint(value: &ConfigValue) -> String {
    let text = value.to_string();
    let skip = text.chars().count().saturating_sub(4);
    let tail: String = text.chars().skip(skip).collect();
    format!("[{MASK}{tail}]")
}

/// Ask until the answer coerces to the requested type.
///
/// An empty answer keeps the current value. For numeric types a
/// whitespace-only answer counts as empty.
pub fn prompt_value(prompter: &mut dyn Prompter, request: &PromptRequest) -> Result<ConfigValue> {
    loop {
        let answer = prompter.read_answer(request)?;
        if is_blank(&answer, request.value_type()) {
            return Ok(match request.current() {
                ConfigValue::Unset => ConfigValue::Null,
                other => other.clone(),
            });
        }
        match request.value_type().coerce(&answer) {
            Ok(value) => return Ok(value),
            Err(err @ Error::TypeCoercion { .. }) => prompter.report_error(&err.to_string()),
            Err(err) => return Err(err),
        }
    }
}

fn is_blank(answer: &str, value_type: ValueType) -> bool {
    match value_type {
        ValueType::String => answer.trim_end_matches(&['\r', '\n'][..]).is_empty(),
        ValueType::Integer | ValueType::Float => answer.trim().is_empty(),
    }
}

/// `inquire` on a terminal, plain line reading otherwise.
pub fn default_prompter() -> Box<dyn Prompter> {
    if std::io::stdin().is_terminal() {
        Box::new(InquirePrompter::new())
    } else {
        Box::new(LinePrompter::stdio())
    }
}
