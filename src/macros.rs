//! Logging macros for ergonomic log message formatting.
//!
//! These macros format like `format!` and attach the call site (file, line,
//! module) to the record.
//!
//! # Examples
//!
//! ```
//! use pretty_logger::prelude::*;
//! use pretty_logger::info;
//!
//! let logger = Logger::get("docs.macros");
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at the given level.
///
/// # Examples
///
/// ```
/// # use pretty_logger::prelude::*;
/// # let logger = Logger::get("docs.macros.log");
/// use pretty_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_at($level, format!($($arg)+), file!(), line!(), module_path!())
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use pretty_logger::prelude::*;
/// # let logger = Logger::get("docs.macros.debug");
/// use pretty_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

/// Log an error value at ERROR level, rendered as an indented failure block.
///
/// # Examples
///
/// ```
/// # use pretty_logger::prelude::*;
/// # let logger = Logger::get("docs.macros.exception");
/// use pretty_logger::exception;
/// if let Err(err) = "x".parse::<i32>() {
///     exception!(logger, &err, "could not parse {:?}", "x");
/// }
/// ```
#[macro_export]
macro_rules! exception {
    ($logger:expr, $err:expr, $($arg:tt)+) => {
        $logger.exception(format!($($arg)+), $err)
    };
}
