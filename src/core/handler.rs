//! Handlers: a sink paired with a formatter and a level threshold

use super::{error::Result, log_level::LogLevel, record::LogRecord};
use crate::format::Formatter;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;

/// Output destination for formatted lines
pub trait Sink: Send {
    /// Write one formatted record. `line` carries no trailing newline.
    fn write_line(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    /// Release the underlying resource. Defaults to a flush.
    fn close(&mut self) -> Result<()> {
        self.flush()
    }
    fn name(&self) -> &str;
}

/// A sink that only accepts records at or above its level, formatted by its
/// formatter.
///
/// A handler always owns exactly one formatter and one level; both can be
/// swapped but never removed. Handlers are shared as `Arc<Handler>` between
/// the loggers they are attached to and the scopes that attached them.
pub struct Handler {
    level: RwLock<LogLevel>,
    formatter: RwLock<Arc<dyn Formatter>>,
    sink: Mutex<Box<dyn Sink>>,
}

impl Handler {
    pub fn new(
        sink: impl Sink + 'static,
        formatter: impl Formatter + 'static,
        level: LogLevel,
    ) -> Self {
        Self::from_parts(Box::new(sink), Arc::new(formatter), level)
    }

    pub fn from_parts(sink: Box<dyn Sink>, formatter: Arc<dyn Formatter>, level: LogLevel) -> Self {
        Self {
            level: RwLock::new(level),
            formatter: RwLock::new(formatter),
            sink: Mutex::new(sink),
        }
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    pub fn formatter(&self) -> Arc<dyn Formatter> {
        Arc::clone(&self.formatter.read())
    }

    pub fn set_formatter(&self, formatter: Arc<dyn Formatter>) {
        *self.formatter.write() = formatter;
    }

    pub fn sink_name(&self) -> String {
        self.sink.lock().name().to_string()
    }

    pub fn accepts(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    /// Format and write `record` if it meets the threshold.
    pub fn handle(&self, record: &LogRecord) -> Result<()> {
        if !self.accepts(record.level) {
            return Ok(());
        }
        let line = self.formatter().format(record);
        self.sink.lock().write_line(&line)
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.lock().flush()
    }

    pub fn close(&self) -> Result<()> {
        self.sink.lock().close()
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("sink", &self.sink_name())
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemoryAppender;
    use crate::format::Template;

    #[test]
    fn test_threshold_filters() {
        let sink = MemoryAppender::new();
        let buffer = sink.buffer();
        let handler = Handler::new(sink, Template::parse("{message}").unwrap(), LogLevel::Warn);

        handler.handle(&LogRecord::new("t", LogLevel::Info, "dropped")).unwrap();
        handler.handle(&LogRecord::new("t", LogLevel::Error, "kept")).unwrap();

        assert_eq!(buffer.lines(), vec!["kept".to_string()]);
    }

    #[test]
    fn test_swap_formatter_and_level() {
        let sink = MemoryAppender::new();
        let buffer = sink.buffer();
        let handler = Handler::new(sink, Template::parse("{message}").unwrap(), LogLevel::Warn);

        handler.set_level(LogLevel::Debug);
        handler.set_formatter(Arc::new(Template::parse("[{levelname}] {message}").unwrap()));
        handler.handle(&LogRecord::new("t", LogLevel::Debug, "now visible")).unwrap();

        assert_eq!(buffer.lines(), vec!["[DEBUG] now visible".to_string()]);
    }
}
