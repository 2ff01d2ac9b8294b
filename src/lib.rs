//! # Pretty Logger
//!
//! Readable, colorized console logging for command-line tools, with optional
//! file logging and scoped configuration that always restores what it changed.
//!
//! ## Features
//!
//! - **Per-level formatting**: a colored template for each level, plain text for files
//! - **Pretty failures**: error chains rendered as an indented block under the message
//! - **Scoped configuration**: guards that restore logger levels and handlers on exit
//! - **`log` bridge**: route the `log` facade into the same handlers
//!
//! ```no_run
//! use pretty_logger::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let _guard = logging_context()
//!     .console_level(LogLevel::Debug)
//!     .file("tool.log")
//!     .build()?
//!     .entered()?;
//!
//! let log = Logger::root();
//! log.debug("shown on the console only");
//! log.warn("shown on the console and written to tool.log");
//! # Ok(())
//! # }
//! ```

pub mod appenders;
#[cfg(feature = "log-bridge")]
pub mod bridge;
pub mod config;
pub mod context;
pub mod core;
pub mod format;
pub mod handlers;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, MemoryAppender, MemoryBuffer};
    pub use crate::config::LoggingConfig;
    pub use crate::context::{
        logging_context, setup, ContextBuilder, LoggingContext, MultiContext, Scope, ScopeGuard,
    };
    pub use crate::core::{
        Failure, Handler, LogLevel, LogRecord, Logger, LoggerError, Result, Sink, TimestampFormat,
    };
    pub use crate::format::{
        default_formats, style, ExceptionFormatter, FormatOptions, Formatter, MultiLevelFormatter,
        PrettyFailure, RenderFailure,
    };
    pub use crate::handlers::{create_console_handler, create_file_handler};
}

pub use appenders::{ConsoleAppender, FileAppender, MemoryAppender};
#[cfg(feature = "log-bridge")]
pub use bridge::LogBridge;
pub use config::LoggingConfig;
pub use context::{logging_context, setup, LoggingContext, MultiContext, Scope, ScopeGuard};
pub use core::{Failure, Handler, LogLevel, LogRecord, Logger, LoggerError, Result};
pub use format::{
    default_formats, style, ExceptionFormatter, FormatOptions, Formatter, MultiLevelFormatter,
    FILE_FORMAT,
};
pub use handlers::{create_console_handler, create_file_handler};
