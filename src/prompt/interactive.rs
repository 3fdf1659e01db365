use inquire::{InquireError, Text};

use super::{PromptRequest, Prompter};
use crate::error::{Error, Result};
use crate::models::ValueType;

/// Terminal prompting through `inquire`. Ctrl-C and Esc cancel.
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl InquirePrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for InquirePrompter {
    fn read_answer(&mut self, request: &PromptRequest) -> Result<String> {
        let message = request.message();
        let help = (request.value_type() != ValueType::String)
            .then(|| format!("expects {}", request.value_type()));

        let mut text = Text::new(&message);
        if let Some(help) = help.as_deref() {
            text = text.with_help_message(help);
        }

        match text.prompt() {
            Ok(answer) => Ok(answer),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                Err(Error::Interrupted)
            }
            Err(e) => Err(Error::Prompt(e.to_string())),
        }
    }

    fn report_error(&mut self, message: &str) {
        eprintln!("{message}");
    }
}
