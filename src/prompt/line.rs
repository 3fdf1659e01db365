use std::io::{self, BufRead, Stderr, StdinLock, Write};

use super::{PromptRequest, Prompter};
use crate::error::{Error, Result};

/// Plain line-based prompting over any reader/writer pair.
/// End of input counts as a cancelled prompt.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl LinePrompter<StdinLock<'static>, Stderr> {
    /// Read from stdin, prompt on stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn read_answer(&mut self, request: &PromptRequest) -> Result<String> {
        write!(self.writer, "{}: ", request.message())?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(Error::Interrupted);
        }
        Ok(line)
    }

    fn report_error(&mut self, message: &str) {
        let _ = writeln!(self.writer, "{message}");
    }
}
