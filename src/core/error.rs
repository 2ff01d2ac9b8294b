//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unknown color name passed to the style helper
    #[error("Invalid color '{name}': expected one of black, red, green, yellow, blue, magenta, cyan, white (optionally prefixed with bright_)")]
    InvalidColor { name: String },

    /// Template string could not be parsed
    #[error("Invalid template '{template}': {message}")]
    InvalidTemplate { template: String, message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Sink was written to after being closed
    #[error("Sink '{name}' is closed")]
    SinkClosed { name: String },

    /// A scope was entered twice without exiting
    #[error("Logging scope for '{logger}' is already active")]
    ScopeActive { logger: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn invalid_color(name: impl Into<String>) -> Self {
        LoggerError::InvalidColor { name: name.into() }
    }

    pub fn template(template: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidTemplate {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn sink_closed(name: impl Into<String>) -> Self {
        LoggerError::SinkClosed { name: name.into() }
    }

    pub fn scope_active(logger: impl Into<String>) -> Self {
        LoggerError::ScopeActive {
            logger: logger.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
