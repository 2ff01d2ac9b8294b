//! Bridge from the `log` facade into the logger registry
//!
//! Libraries log through `log::info!` and friends; once [`LogBridge::install`]
//! has run, those records reach the same loggers and handlers as records
//! created through [`Logger`] directly. A record's target `app::net` maps to
//! the logger `app.net`.

use crate::core::{LogLevel, LogRecord, Logger, LoggerError, Result};
use log::{Level, LevelFilter, Log, Metadata, Record};

pub struct LogBridge;

impl LogBridge {
    /// Register the bridge as the global `log` implementation.
    ///
    /// Fails if another `log` implementation was installed first.
    pub fn install() -> Result<()> {
        log::set_boxed_logger(Box::new(LogBridge))
            .map_err(|e| LoggerError::other(format!("cannot install log bridge: {}", e)))?;
        // Filtering happens in the registry
        log::set_max_level(LevelFilter::Trace);
        Ok(())
    }

    pub fn logger_name(target: &str) -> String {
        target.replace("::", ".")
    }

    pub fn map_level(level: Level) -> LogLevel {
        match level {
            Level::Error => LogLevel::Error,
            Level::Warn => LogLevel::Warn,
            Level::Info => LogLevel::Info,
            Level::Debug => LogLevel::Debug,
            Level::Trace => LogLevel::Trace,
        }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        Logger::get(&Self::logger_name(metadata.target()))
            .is_enabled_for(Self::map_level(metadata.level()))
    }

    fn log(&self, record: &Record) {
        let logger = Logger::get(&Self::logger_name(record.target()));
        let level = Self::map_level(record.level());
        if !logger.is_enabled_for(level) {
            return;
        }

        let mut entry = LogRecord::new(logger.name(), level, record.args().to_string());
        if let (Some(file), Some(line)) = (record.file(), record.line()) {
            entry = entry.with_location(file, line, record.module_path().unwrap_or_default());
        }
        logger.handle(&entry);
    }

    fn flush(&self) {
        if let Err(e) = Logger::root().flush() {
            eprintln!("[LOGGER ERROR] Failed to flush root handlers: {}", e);
        }
    }
}
