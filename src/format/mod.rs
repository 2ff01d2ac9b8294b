//! Formatting: styling, templates and the formatters handlers use
//!
//! - [`ExceptionFormatter`]: one template plus an indented failure block
//! - [`MultiLevelFormatter`]: one [`ExceptionFormatter`] per level, with a fallback
//! - [`style`]: ANSI styling with named colors

pub mod exception;
pub mod failure;
pub mod multi;
pub mod style;
pub mod template;

pub use exception::ExceptionFormatter;
pub use failure::{PrettyFailure, RenderFailure};
pub use multi::{default_formats, MultiLevelFormatter};
pub use style::{paint, parse_color, strip_ansi, style};
pub use template::Template;

use crate::core::{LogRecord, TimestampFormat};
use serde::{Deserialize, Serialize};

/// Plain layout used by file handlers
pub const FILE_FORMAT: &str = "{levelname}:{asctime}:{name}:{message}";

/// Turns a record into the text a sink writes.
///
/// Implementations take the record by shared reference and must give the
/// same output for the same record every time.
pub trait Formatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> String;
}

impl Formatter for Template {
    fn format(&self, record: &LogRecord) -> String {
        self.render(record, &TimestampFormat::default())
    }
}

/// Options shared by every formatter a [`MultiLevelFormatter`] builds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Colorize failure blocks
    pub color: bool,
    /// Layout of the `{asctime}` field
    pub timestamp_format: TimestampFormat,
    /// Spaces in front of each failure line
    pub indent: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            color: true,
            timestamp_format: TimestampFormat::default(),
            indent: 4,
        }
    }
}

impl FormatOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults without color, for files and other non-terminal sinks
    #[must_use]
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}
