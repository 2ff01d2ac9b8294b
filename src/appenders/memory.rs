//! In-memory appender for capturing output

use crate::core::{Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared view of the lines a [`MemoryAppender`] has received.
///
/// Cloning is cheap; every clone sees the same lines.
#[derive(Debug, Clone, Default)]
pub struct MemoryBuffer {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryBuffer {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// All lines joined with `\n`
    pub fn contents(&self) -> String {
        self.lines.lock().join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|l| l.contains(needle))
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

/// Keeps every formatted line in memory.
///
/// ```
/// use pretty_logger::appenders::MemoryAppender;
/// use pretty_logger::core::{Handler, LogLevel, Logger};
/// use pretty_logger::format::Template;
/// use std::sync::Arc;
///
/// let sink = MemoryAppender::new();
/// let captured = sink.buffer();
/// let handler = Arc::new(Handler::new(sink, Template::parse("{message}").unwrap(), LogLevel::Info));
///
/// let logger = Logger::get("docs.memory");
/// logger.set_level(Some(LogLevel::Info));
/// logger.set_propagate(false);
/// logger.add_handler(Arc::clone(&handler));
/// logger.info("captured");
///
/// assert_eq!(captured.lines(), vec!["captured".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryAppender {
    buffer: MemoryBuffer,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> MemoryBuffer {
        self.buffer.clone()
    }
}

impl Sink for MemoryAppender {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.buffer.lines.lock().push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
