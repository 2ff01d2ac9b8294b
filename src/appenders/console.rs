//! Console appender implementation

use crate::core::{Result, Sink};
use std::io::Write;

/// Writes every line to standard error.
///
/// Colors are decided by the formatter, not by this sink.
#[derive(Debug, Default)]
pub struct ConsoleAppender;

impl ConsoleAppender {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for ConsoleAppender {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let mut stderr = std::io::stderr().lock();
        stderr.write_all(line.as_bytes())?;
        stderr.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
