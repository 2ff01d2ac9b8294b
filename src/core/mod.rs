//! Core logger types and traits

pub mod error;
pub mod failure;
pub mod handler;
pub mod log_level;
pub mod logger;
pub mod record;
pub mod timestamp;

pub use error::{LoggerError, Result};
pub use failure::Failure;
pub use handler::{Handler, Sink};
pub use log_level::LogLevel;
pub use logger::{Logger, DEFAULT_ROOT_LEVEL, ROOT_LOGGER_NAME};
pub use record::LogRecord;
pub use timestamp::TimestampFormat;
