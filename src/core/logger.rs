//! Logger registry and record dispatch
//!
//! Loggers are named, process-wide and organised by dotted names: `app.db`
//! is a child of `app`, which is a child of the root logger. Each logger owns
//! an optional level and an ordered set of handlers. A record created on a
//! logger is offered to that logger's handlers and then to its ancestors'
//! handlers, for as long as `propagate` is set.
//!
//! Loggers are shared mutable state. Nothing here serialises a read-modify-write
//! of a logger's level or handler set across threads; callers that reconfigure
//! the same logger from several threads must coordinate themselves.

use super::{
    error::Result,
    failure::Failure,
    handler::Handler,
    log_level::LogLevel,
    record::LogRecord,
};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

pub const ROOT_LOGGER_NAME: &str = "root";

/// Level the root logger starts with
pub const DEFAULT_ROOT_LEVEL: LogLevel = LogLevel::Warn;

fn root_logger() -> &'static Arc<Logger> {
    static ROOT: OnceLock<Arc<Logger>> = OnceLock::new();
    ROOT.get_or_init(|| Arc::new(Logger::new(ROOT_LOGGER_NAME, None, Some(DEFAULT_ROOT_LEVEL))))
}

fn registry() -> &'static Mutex<HashMap<String, Arc<Logger>>> {
    static REGISTRY: OnceLock<Mutex<HashMap<String, Arc<Logger>>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

pub struct Logger {
    name: String,
    parent: Option<Arc<Logger>>,
    level: RwLock<Option<LogLevel>>,
    handlers: RwLock<Vec<Arc<Handler>>>,
    propagate: AtomicBool,
}

impl Logger {
    fn new(name: &str, parent: Option<Arc<Logger>>, level: Option<LogLevel>) -> Self {
        Self {
            name: name.to_string(),
            parent,
            level: RwLock::new(level),
            handlers: RwLock::new(Vec::new()),
            propagate: AtomicBool::new(true),
        }
    }

    /// The root logger. Its level starts at [`DEFAULT_ROOT_LEVEL`].
    pub fn root() -> Arc<Logger> {
        Arc::clone(root_logger())
    }

    /// Look up a logger by dotted name, creating it and any missing ancestors.
    ///
    /// The same name always yields the same logger. `""` and `"root"` name
    /// the root logger.
    ///
    /// ```
    /// use pretty_logger::core::Logger;
    /// use std::sync::Arc;
    ///
    /// let db = Logger::get("docs.get.db");
    /// assert!(Arc::ptr_eq(&db, &Logger::get("docs.get.db")));
    /// assert_eq!(db.parent().unwrap().name(), "docs.get");
    /// ```
    pub fn get(name: &str) -> Arc<Logger> {
        if name.is_empty() || name == ROOT_LOGGER_NAME {
            return Self::root();
        }
        if let Some(logger) = registry().lock().get(name) {
            return Arc::clone(logger);
        }

        // Resolve the parent without holding the registry lock
        let parent = match name.rsplit_once('.') {
            Some((parent_name, _)) => Self::get(parent_name),
            None => Self::root(),
        };

        let mut registry = registry().lock();
        let logger = registry
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Logger::new(name, Some(parent), None)));
        Arc::clone(logger)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<Logger>> {
        self.parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// The level set on this logger; `None` means inherited.
    pub fn level(&self) -> Option<LogLevel> {
        *self.level.read()
    }

    pub fn set_level(&self, level: impl Into<Option<LogLevel>>) {
        *self.level.write() = level.into();
    }

    /// Go back to inheriting the level from the parent.
    pub fn clear_level(&self) {
        *self.level.write() = None;
    }

    /// First level set on this logger or an ancestor. With none set
    /// anywhere, everything is enabled.
    pub fn effective_level(&self) -> LogLevel {
        let mut current = Some(self);
        while let Some(logger) = current {
            if let Some(level) = logger.level() {
                return level;
            }
            current = logger.parent.as_deref();
        }
        LogLevel::Trace
    }

    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        level >= self.effective_level()
    }

    pub fn propagate(&self) -> bool {
        self.propagate.load(Ordering::Acquire)
    }

    pub fn set_propagate(&self, propagate: bool) {
        self.propagate.store(propagate, Ordering::Release);
    }

    /// Attach `handler` unless it is already attached. Returns whether it was added.
    pub fn add_handler(&self, handler: Arc<Handler>) -> bool {
        let mut handlers = self.handlers.write();
        if handlers.iter().any(|h| Arc::ptr_eq(h, &handler)) {
            return false;
        }
        handlers.push(handler);
        true
    }

    /// Detach `handler`. Returns whether it was attached.
    pub fn remove_handler(&self, handler: &Arc<Handler>) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|h| !Arc::ptr_eq(h, handler));
        handlers.len() != before
    }

    pub fn has_handler(&self, handler: &Arc<Handler>) -> bool {
        self.handlers.read().iter().any(|h| Arc::ptr_eq(h, handler))
    }

    /// Snapshot of the attached handlers, in attachment order
    pub fn handlers(&self) -> Vec<Arc<Handler>> {
        self.handlers.read().clone()
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if !self.is_enabled_for(level) {
            return;
        }
        self.handle(&LogRecord::new(&self.name, level, message));
    }

    /// Log with the source location attached; used by the logging macros.
    pub fn log_at(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        file: &str,
        line: u32,
        module_path: &str,
    ) {
        if !self.is_enabled_for(level) {
            return;
        }
        let record = LogRecord::new(&self.name, level, message).with_location(file, line, module_path);
        self.handle(&record);
    }

    pub fn log_failure(&self, level: LogLevel, message: impl Into<String>, failure: Failure) {
        if !self.is_enabled_for(level) {
            return;
        }
        self.handle(&LogRecord::new(&self.name, level, message).with_failure(failure));
    }

    /// Log `err` at ERROR level with its failure info.
    pub fn exception<E: Error>(&self, message: impl Into<String>, err: &E) {
        if !self.is_enabled_for(LogLevel::Error) {
            return;
        }
        self.log_failure(LogLevel::Error, message, Failure::from_error(err));
    }

    /// Offer `record` to this logger's handlers and, while propagating, to
    /// each ancestor's. The logger's own level is not consulted here.
    ///
    /// **Per-Handler Isolation**: a handler that fails or panics is reported
    /// on stderr and the remaining handlers still receive the record.
    pub fn handle(&self, record: &LogRecord) {
        let mut current = Some(self);
        while let Some(logger) = current {
            let handlers = logger.handlers();
            for (idx, handler) in handlers.iter().enumerate() {
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    handler.handle(record)
                }));

                match result {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        eprintln!(
                            "[LOGGER ERROR] Handler #{} ({}) on '{}' failed: {}",
                            idx,
                            handler.sink_name(),
                            logger.name,
                            e
                        );
                    }
                    Err(panic_info) => {
                        let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                            s.to_string()
                        } else if let Some(s) = panic_info.downcast_ref::<String>() {
                            s.clone()
                        } else {
                            "Unknown panic".to_string()
                        };
                        eprintln!(
                            "[LOGGER CRITICAL] Handler #{} on '{}' panicked: {}. \
                             Other handlers continue to function.",
                            idx, logger.name, panic_msg
                        );
                    }
                }
            }

            if !logger.propagate() {
                break;
            }
            current = logger.parent.as_deref();
        }
    }

    /// Flush every handler attached to this logger.
    pub fn flush(&self) -> Result<()> {
        for handler in self.handlers() {
            handler.flush()?;
        }
        Ok(())
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("handlers", &self.handlers.read().len())
            .field("propagate", &self.propagate())
            .finish()
    }
}
