//! Serializable logging configuration

use crate::core::{LogLevel, LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What [`crate::setup`] and [`crate::context::ContextBuilder::from_config`] build.
///
/// Every field is optional. An empty config means: root logger, console
/// handler at INFO, no file, logger level derived from the handlers.
///
/// ```
/// use pretty_logger::LoggingConfig;
/// use pretty_logger::core::LogLevel;
///
/// let config = LoggingConfig::from_json_str(r#"{ "file": "app.log", "file_level": "Error" }"#).unwrap();
/// assert_eq!(config.file_level, Some(LogLevel::Error));
/// assert_eq!(config.console_level, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logger to configure; the root logger when absent
    pub logger: Option<String>,
    /// Logger level for the scope; the loosest handler level when absent
    pub level: Option<LogLevel>,
    /// Console handler threshold
    pub console_level: Option<LogLevel>,
    /// Log file to append to
    pub file: Option<PathBuf>,
    /// File handler threshold
    pub file_level: Option<LogLevel>,
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logging config",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&json)
    }

    #[must_use]
    pub fn with_logger(mut self, name: impl Into<String>) -> Self {
        self.logger = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_console_level(mut self, level: LogLevel) -> Self {
        self.console_level = Some(level);
        self
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_file_level(mut self, level: LogLevel) -> Self {
        self.file_level = Some(level);
        self
    }
}
