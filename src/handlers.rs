//! Ready-made console and file handlers

use crate::appenders::{ConsoleAppender, FileAppender};
use crate::core::{Handler, LogLevel, Result};
use crate::format::{ExceptionFormatter, Formatter, MultiLevelFormatter, FILE_FORMAT};
use std::path::Path;
use std::sync::Arc;

pub const DEFAULT_CONSOLE_LEVEL: LogLevel = LogLevel::Info;
pub const DEFAULT_FILE_LEVEL: LogLevel = LogLevel::Warn;

/// Create a handler that writes to standard error.
///
/// # Arguments
///
/// * `level` - threshold, [`DEFAULT_CONSOLE_LEVEL`] when `None`
/// * `formatter` - overrides the default colorized [`MultiLevelFormatter`]
///
/// ```
/// use pretty_logger::core::LogLevel;
/// use pretty_logger::handlers::create_console_handler;
///
/// let handler = create_console_handler(None, None);
/// assert_eq!(handler.level(), LogLevel::Info);
/// ```
pub fn create_console_handler(
    level: Option<LogLevel>,
    formatter: Option<Arc<dyn Formatter>>,
) -> Arc<Handler> {
    let formatter = formatter.unwrap_or_else(|| Arc::new(MultiLevelFormatter::default()));
    Arc::new(Handler::from_parts(
        Box::new(ConsoleAppender::new()),
        formatter,
        level.unwrap_or(DEFAULT_CONSOLE_LEVEL),
    ))
}

/// Create a handler that appends to the file at `path`, creating it if needed.
///
/// # Arguments
///
/// * `path` - log file location; opening errors are returned to the caller
/// * `level` - threshold, [`DEFAULT_FILE_LEVEL`] when `None`
/// * `formatter` - overrides the default uncolored [`ExceptionFormatter`]
///   using [`FILE_FORMAT`]
pub fn create_file_handler(
    path: impl AsRef<Path>,
    level: Option<LogLevel>,
    formatter: Option<Arc<dyn Formatter>>,
) -> Result<Arc<Handler>> {
    let formatter = match formatter {
        Some(formatter) => formatter,
        None => Arc::new(ExceptionFormatter::plain(FILE_FORMAT)?),
    };
    let appender = FileAppender::new(path.as_ref())?;

    Ok(Arc::new(Handler::from_parts(
        Box::new(appender),
        formatter,
        level.unwrap_or(DEFAULT_FILE_LEVEL),
    )))
}
