//! Scoped logging configuration
//!
//! A [`LoggingContext`] changes one logger's level and/or attaches one handler
//! for the duration of a scope, then puts things back. A [`MultiContext`]
//! stacks several of them: entered in order, exited in reverse.
//!
//! ```no_run
//! use pretty_logger::context::{logging_context, Scope};
//! use pretty_logger::core::{LogLevel, Logger};
//!
//! # fn main() -> pretty_logger::core::Result<()> {
//! let _guard = logging_context()
//!     .console_level(LogLevel::Debug)
//!     .file("run.log")
//!     .build()?
//!     .entered()?;
//!
//! Logger::root().info("visible on the console");
//! Logger::root().error("also written to run.log");
//! # Ok(())
//! # }
//! ```
//!
//! # Threads
//!
//! Entering saves the logger's current level and exiting writes it back.
//! Nothing prevents another thread from changing the same logger in between;
//! overlapping scopes over one logger on several threads must be serialised
//! by the caller, e.g. by holding a mutex across the enter/exit pair.

use crate::config::LoggingConfig;
use crate::core::{Handler, LogLevel, Logger, LoggerError, Result};
use crate::handlers::{create_console_handler, create_file_handler};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// A temporary change to logging state with explicit enter and exit.
pub trait Scope {
    /// Apply the change. Fails if the scope is already active.
    fn enter(&mut self) -> Result<()>;

    /// Undo the change. Does nothing when the scope is not active.
    fn exit(&mut self) -> Result<()>;

    fn is_active(&self) -> bool;

    /// Enter and return a guard that exits on drop, unwinding included.
    fn entered(mut self) -> Result<ScopeGuard<Self>>
    where
        Self: Sized,
    {
        self.enter()?;
        Ok(ScopeGuard {
            scope: self,
            exited: false,
        })
    }

    /// Run `f` inside the scope.
    fn scoped<R>(self, f: impl FnOnce() -> R) -> Result<R>
    where
        Self: Sized,
    {
        let guard = self.entered()?;
        let out = f();
        guard.exit()?;
        Ok(out)
    }
}

impl<S: Scope + ?Sized> Scope for Box<S> {
    fn enter(&mut self) -> Result<()> {
        (**self).enter()
    }

    fn exit(&mut self) -> Result<()> {
        (**self).exit()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}

/// Exits its scope when dropped.
///
/// Use [`ScopeGuard::exit`] to observe errors from exiting; on drop they are
/// reported on stderr.
#[must_use = "the scope exits as soon as the guard is dropped"]
pub struct ScopeGuard<S: Scope> {
    scope: S,
    exited: bool,
}

impl<S: Scope> ScopeGuard<S> {
    pub fn scope(&self) -> &S {
        &self.scope
    }

    pub fn exit(mut self) -> Result<()> {
        self.exited = true;
        self.scope.exit()
    }
}

impl<S: Scope> Drop for ScopeGuard<S> {
    fn drop(&mut self) {
        if self.exited {
            return;
        }
        if let Err(e) = self.scope.exit() {
            eprintln!("[LOGGER ERROR] Failed to restore logging scope: {}", e);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Inactive,
    Active {
        /// Level to restore, when this scope overrode it
        saved_level: Option<Option<LogLevel>>,
        /// Whether this scope attached the handler (it may already have been)
        attached: bool,
    },
}

/// Temporarily set a logger's level and/or attach a handler.
///
/// On exit the saved level is restored and the handler detached, then closed
/// if `close_on_exit` is set (the default). A handler that was already
/// attached when the scope was entered is left attached and open.
///
/// ```
/// use pretty_logger::context::{LoggingContext, Scope};
/// use pretty_logger::core::{LogLevel, Logger};
///
/// let logger = Logger::get("docs.context");
/// logger.set_level(LogLevel::Warn);
///
/// LoggingContext::for_logger(logger.clone())
///     .with_level(LogLevel::Debug)
///     .scoped(|| assert_eq!(logger.level(), Some(LogLevel::Debug)))
///     .unwrap();
///
/// assert_eq!(logger.level(), Some(LogLevel::Warn));
/// ```
pub struct LoggingContext {
    logger: Arc<Logger>,
    level: Option<LogLevel>,
    handler: Option<Arc<Handler>>,
    close: bool,
    state: State,
}

impl LoggingContext {
    /// A context over the root logger that changes nothing until configured.
    pub fn new() -> Self {
        Self::for_logger(Logger::root())
    }

    pub fn for_logger(logger: Arc<Logger>) -> Self {
        Self {
            logger,
            level: None,
            handler: None,
            close: true,
            state: State::Inactive,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_handler(mut self, handler: Arc<Handler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Close the handler's sink on exit. Turn this off for handlers that
    /// outlive the scope, such as a console handler shared by nested scopes.
    #[must_use]
    pub fn close_on_exit(mut self, close: bool) -> Self {
        self.close = close;
        self
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn level(&self) -> Option<LogLevel> {
        self.level
    }

    pub fn handler(&self) -> Option<&Arc<Handler>> {
        self.handler.as_ref()
    }
}

impl Default for LoggingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope for LoggingContext {
    fn enter(&mut self) -> Result<()> {
        if self.is_active() {
            return Err(LoggerError::scope_active(self.logger.name()));
        }

        let saved_level = self.level.map(|level| {
            let old = self.logger.level();
            self.logger.set_level(level);
            old
        });
        let attached = match self.handler {
            Some(ref handler) => self.logger.add_handler(Arc::clone(handler)),
            None => false,
        };

        self.state = State::Active {
            saved_level,
            attached,
        };
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        let State::Active {
            saved_level,
            attached,
        } = self.state
        else {
            return Ok(());
        };
        self.state = State::Inactive;

        if let Some(old) = saved_level {
            self.logger.set_level(old);
        }

        if let (true, Some(handler)) = (attached, &self.handler) {
            self.logger.remove_handler(handler);
            if self.close {
                handler.close()?;
            }
        }
        Ok(())
    }

    fn is_active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }
}

impl fmt::Debug for LoggingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingContext")
            .field("logger", &self.logger.name())
            .field("level", &self.level)
            .field("handler", &self.handler)
            .field("close", &self.close)
            .field("state", &self.state)
            .finish()
    }
}

/// Several scopes entered in order and exited in reverse order.
///
/// If entering one of them fails, the ones already entered are exited
/// (in reverse) before the error is returned. Exiting runs every inner exit
/// even when one fails and returns the first error.
#[derive(Default)]
pub struct MultiContext {
    scopes: Vec<Box<dyn Scope + Send>>,
    entered: usize,
    active: bool,
}

impl MultiContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, scope: impl Scope + Send + 'static) -> Self {
        self.push(scope);
        self
    }

    pub fn push(&mut self, scope: impl Scope + Send + 'static) {
        self.scopes.push(Box::new(scope));
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Exit the first `self.entered` scopes, last first.
    fn unwind(&mut self) -> Result<()> {
        let mut first_error = None;
        while self.entered > 0 {
            self.entered -= 1;
            if let Err(e) = self.scopes[self.entered].exit() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl From<Vec<Box<dyn Scope + Send>>> for MultiContext {
    fn from(scopes: Vec<Box<dyn Scope + Send>>) -> Self {
        Self {
            scopes,
            entered: 0,
            active: false,
        }
    }
}

impl Scope for MultiContext {
    fn enter(&mut self) -> Result<()> {
        if self.active {
            return Err(LoggerError::scope_active("multi-context"));
        }

        for i in 0..self.scopes.len() {
            if let Err(e) = self.scopes[i].enter() {
                if let Err(rollback) = self.unwind() {
                    eprintln!(
                        "[LOGGER ERROR] Failed to roll back logging scopes after enter error: {}",
                        rollback
                    );
                }
                return Err(e);
            }
            self.entered = i + 1;
        }

        self.active = true;
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.unwind()
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl fmt::Debug for MultiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiContext")
            .field("scopes", &self.scopes.len())
            .field("entered", &self.entered)
            .field("active", &self.active)
            .finish()
    }
}

/// Start building the usual console (+ file) logging setup.
pub fn logging_context() -> ContextBuilder {
    ContextBuilder::default()
}

/// Builds a [`MultiContext`] made of, in order:
///
/// 1. a level-only scope setting the logger to the loosest handler
///    threshold (or the explicit `level`),
/// 2. the console handler, left open on exit,
/// 3. one scope per extra handler (the file handler included), closed on exit.
///
/// Lowering the logger's own level to the loosest handler threshold makes
/// sure no handler misses a record it would have accepted.
#[derive(Debug, Default)]
pub struct ContextBuilder {
    logger: Option<Arc<Logger>>,
    level: Option<LogLevel>,
    console_handler: Option<Arc<Handler>>,
    console_level: Option<LogLevel>,
    extra_handlers: Vec<Arc<Handler>>,
    file: Option<PathBuf>,
    file_level: Option<LogLevel>,
}

impl ContextBuilder {
    /// Builder pre-filled from a [`LoggingConfig`].
    pub fn from_config(config: &LoggingConfig) -> Self {
        Self {
            logger: config.logger.as_deref().map(Logger::get),
            level: config.level,
            console_handler: None,
            console_level: config.console_level,
            extra_handlers: Vec::new(),
            file: config.file.clone(),
            file_level: config.file_level,
        }
    }

    /// Logger to configure (default: root)
    #[must_use]
    pub fn logger(mut self, logger: Arc<Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Force the logger level instead of deriving it from the handlers
    #[must_use]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Use this handler instead of building the default console handler
    #[must_use]
    pub fn console_handler(mut self, handler: Arc<Handler>) -> Self {
        self.console_handler = Some(handler);
        self
    }

    /// Threshold for the default console handler
    #[must_use]
    pub fn console_level(mut self, level: LogLevel) -> Self {
        self.console_level = Some(level);
        self
    }

    #[must_use]
    pub fn extra_handler(mut self, handler: Arc<Handler>) -> Self {
        self.extra_handlers.push(handler);
        self
    }

    #[must_use]
    pub fn extra_handlers(mut self, handlers: impl IntoIterator<Item = Arc<Handler>>) -> Self {
        self.extra_handlers.extend(handlers);
        self
    }

    /// Also log to this file through [`create_file_handler`]
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Threshold for the file handler
    #[must_use]
    pub fn file_level(mut self, level: LogLevel) -> Self {
        self.file_level = Some(level);
        self
    }

    /// Create the handlers and assemble the context. Fails if the log file
    /// cannot be opened or the options contradict each other.
    pub fn build(self) -> Result<MultiContext> {
        if self.console_handler.is_some() && self.console_level.is_some() {
            return Err(LoggerError::config(
                "ContextBuilder",
                "console_level only applies to the default console handler",
            ));
        }
        if self.file.is_none() && self.file_level.is_some() {
            return Err(LoggerError::config(
                "ContextBuilder",
                "file_level was set without a file",
            ));
        }

        let logger = self.logger.unwrap_or_else(Logger::root);
        let console = self
            .console_handler
            .unwrap_or_else(|| create_console_handler(self.console_level, None));

        let mut extras = self.extra_handlers;
        if let Some(path) = self.file {
            extras.push(create_file_handler(path, self.file_level, None)?);
        }

        let level = self.level.unwrap_or_else(|| {
            extras
                .iter()
                .map(|h| h.level())
                .fold(console.level(), std::cmp::min)
        });

        let mut context = MultiContext::new()
            .with(LoggingContext::for_logger(Arc::clone(&logger)).with_level(level))
            .with(
                LoggingContext::for_logger(Arc::clone(&logger))
                    .with_handler(console)
                    .close_on_exit(false),
            );
        for handler in extras {
            context.push(LoggingContext::for_logger(Arc::clone(&logger)).with_handler(handler));
        }

        Ok(context)
    }
}

/// Configure logging for the rest of the process.
///
/// Builds the context described by `config` and enters it without ever
/// exiting, which suits a program's `main`. Use [`logging_context`] with a
/// guard when the configuration must be undone.
pub fn setup(config: &LoggingConfig) -> Result<()> {
    let mut context = ContextBuilder::from_config(config).build()?;
    context.enter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::{MemoryAppender, MemoryBuffer};
    use crate::format::Template;
    use parking_lot::Mutex;

    fn capture(level: LogLevel) -> (Arc<Handler>, MemoryBuffer) {
        let sink = MemoryAppender::new();
        let buffer = sink.buffer();
        let handler = Handler::new(sink, Template::parse("{message}").unwrap(), level);
        (Arc::new(handler), buffer)
    }

    /// Records the order of enter/exit calls and can be told to fail.
    struct Probe {
        id: &'static str,
        journal: Arc<Mutex<Vec<String>>>,
        fail_enter: bool,
        active: bool,
    }

    impl Probe {
        fn new(id: &'static str, journal: &Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                id,
                journal: Arc::clone(journal),
                fail_enter: false,
                active: false,
            }
        }

        fn failing(mut self) -> Self {
            self.fail_enter = true;
            self
        }
    }

    impl Scope for Probe {
        fn enter(&mut self) -> Result<()> {
            if self.fail_enter {
                return Err(LoggerError::other(format!("{} refused", self.id)));
            }
            self.active = true;
            self.journal.lock().push(format!("enter {}", self.id));
            Ok(())
        }

        fn exit(&mut self) -> Result<()> {
            if self.active {
                self.active = false;
                self.journal.lock().push(format!("exit {}", self.id));
            }
            Ok(())
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }

    #[test]
    fn test_noop_scope_changes_nothing() {
        let logger = Logger::get("unit.ctx.noop");
        logger.set_level(LogLevel::Error);
        let (handler, _) = capture(LogLevel::Info);
        logger.add_handler(Arc::clone(&handler));

        LoggingContext::for_logger(Arc::clone(&logger))
            .scoped(|| ())
            .unwrap();

        assert_eq!(logger.level(), Some(LogLevel::Error));
        assert_eq!(logger.handlers().len(), 1);
        assert!(logger.has_handler(&handler));
    }

    #[test]
    fn test_level_override_restored_when_nested() {
        let logger = Logger::get("unit.ctx.nested");
        logger.clear_level();

        let outer = LoggingContext::for_logger(Arc::clone(&logger))
            .with_level(LogLevel::Info)
            .entered()
            .unwrap();
        assert_eq!(logger.level(), Some(LogLevel::Info));

        {
            let _inner = LoggingContext::for_logger(Arc::clone(&logger))
                .with_level(LogLevel::Trace)
                .entered()
                .unwrap();
            assert_eq!(logger.level(), Some(LogLevel::Trace));
        }

        assert_eq!(logger.level(), Some(LogLevel::Info));
        outer.exit().unwrap();
        assert_eq!(logger.level(), None);
    }

    #[test]
    fn test_handler_attached_then_detached_and_closed() {
        struct CloseFlag(Arc<Mutex<bool>>);
        impl crate::core::Sink for CloseFlag {
            fn write_line(&mut self, _line: &str) -> Result<()> {
                Ok(())
            }
            fn flush(&mut self) -> Result<()> {
                Ok(())
            }
            fn close(&mut self) -> Result<()> {
                *self.0.lock() = true;
                Ok(())
            }
            fn name(&self) -> &str {
                "close-flag"
            }
        }

        let logger = Logger::get("unit.ctx.close");
        let closed = Arc::new(Mutex::new(false));
        let handler = Arc::new(Handler::new(
            CloseFlag(Arc::clone(&closed)),
            Template::parse("{message}").unwrap(),
            LogLevel::Info,
        ));

        let guard = LoggingContext::for_logger(Arc::clone(&logger))
            .with_handler(Arc::clone(&handler))
            .entered()
            .unwrap();
        assert!(logger.has_handler(&handler));
        drop(guard);

        assert!(!logger.has_handler(&handler));
        assert!(*closed.lock());
    }

    #[test]
    fn test_preattached_handler_survives_scope() {
        let logger = Logger::get("unit.ctx.preattached");
        let (handler, _) = capture(LogLevel::Info);
        logger.add_handler(Arc::clone(&handler));

        LoggingContext::for_logger(Arc::clone(&logger))
            .with_handler(Arc::clone(&handler))
            .scoped(|| ())
            .unwrap();

        assert!(logger.has_handler(&handler));
    }

    #[test]
    fn test_double_enter_is_rejected() {
        let mut ctx = LoggingContext::for_logger(Logger::get("unit.ctx.double"))
            .with_level(LogLevel::Debug);
        ctx.enter().unwrap();
        assert!(matches!(ctx.enter(), Err(LoggerError::ScopeActive { .. })));
        ctx.exit().unwrap();
        ctx.exit().unwrap();
        assert!(!ctx.is_active());
    }

    #[test]
    fn test_multi_exits_in_reverse_order() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let multi = MultiContext::new()
            .with(Probe::new("a", &journal))
            .with(Probe::new("b", &journal))
            .with(Probe::new("c", &journal));

        multi.scoped(|| ()).unwrap();

        assert_eq!(
            *journal.lock(),
            ["enter a", "enter b", "enter c", "exit c", "exit b", "exit a"]
        );
    }

    #[test]
    fn test_multi_rolls_back_on_partial_enter() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let mut multi = MultiContext::new()
            .with(Probe::new("a", &journal))
            .with(Probe::new("b", &journal))
            .with(Probe::new("c", &journal).failing())
            .with(Probe::new("d", &journal));

        let err = multi.enter().unwrap_err();
        assert_eq!(err.to_string(), "c refused");
        assert!(!multi.is_active());
        assert_eq!(*journal.lock(), ["enter a", "enter b", "exit b", "exit a"]);
    }

    #[test]
    fn test_multi_rollback_restores_logger_state() {
        let logger = Logger::get("unit.ctx.rollback");
        logger.set_level(LogLevel::Error);
        let (handler, _) = capture(LogLevel::Debug);
        let journal = Arc::new(Mutex::new(Vec::new()));

        let result = MultiContext::new()
            .with(LoggingContext::for_logger(Arc::clone(&logger)).with_level(LogLevel::Debug))
            .with(LoggingContext::for_logger(Arc::clone(&logger)).with_handler(Arc::clone(&handler)))
            .with(Probe::new("boom", &journal).failing())
            .entered();

        assert!(result.is_err());
        assert_eq!(logger.level(), Some(LogLevel::Error));
        assert!(!logger.has_handler(&handler));
    }

    #[test]
    fn test_builder_uses_loosest_level() {
        let logger = Logger::get("unit.ctx.loosest");
        logger.set_level(LogLevel::Fatal);
        let (console, _) = capture(LogLevel::Warn);
        let (extra, _) = capture(LogLevel::Info);

        let guard = logging_context()
            .logger(Arc::clone(&logger))
            .console_handler(console)
            .extra_handler(extra)
            .build()
            .unwrap()
            .entered()
            .unwrap();
        assert_eq!(logger.level(), Some(LogLevel::Info));
        drop(guard);

        assert_eq!(logger.level(), Some(LogLevel::Fatal));
    }

    #[test]
    fn test_builder_level_override() {
        let logger = Logger::get("unit.ctx.override");
        let (console, _) = capture(LogLevel::Warn);

        logging_context()
            .logger(Arc::clone(&logger))
            .console_handler(console)
            .level(LogLevel::Trace)
            .build()
            .unwrap()
            .scoped(|| assert_eq!(logger.level(), Some(LogLevel::Trace)))
            .unwrap();
    }

    #[test]
    fn test_builder_keeps_console_open_and_closes_extras() {
        let logger = Logger::get("unit.ctx.open_close");
        logger.set_propagate(false);
        let (console, console_buf) = capture(LogLevel::Info);
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("extra.log");
        let file = create_file_handler(&path, Some(LogLevel::Info), None).unwrap();

        logging_context()
            .logger(Arc::clone(&logger))
            .console_handler(Arc::clone(&console))
            .extra_handler(Arc::clone(&file))
            .build()
            .unwrap()
            .scoped(|| logger.info("inside"))
            .unwrap();

        // The console handler still works, the file handler is closed
        console.handle(&crate::core::LogRecord::new("x", LogLevel::Info, "after")).unwrap();
        assert_eq!(console_buf.lines(), ["inside", "after"]);
        assert!(file
            .handle(&crate::core::LogRecord::new("x", LogLevel::Error, "late"))
            .is_err());
    }

    #[test]
    fn test_builder_rejects_contradictions() {
        let (console, _) = capture(LogLevel::Info);
        let err = logging_context()
            .console_handler(console)
            .console_level(LogLevel::Debug)
            .build()
            .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = logging_context().file_level(LogLevel::Error).build().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }
}
