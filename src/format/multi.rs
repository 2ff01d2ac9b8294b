//! Per-level formatter selection

use super::exception::ExceptionFormatter;
use super::style::paint;
use super::{FormatOptions, Formatter};
use crate::core::{LogLevel, LogRecord, Result};
use colored::Color;
use std::collections::BTreeMap;

/// The built-in colorized templates.
///
/// INFO is the bare message; the other levels carry a colored label and a
/// `" | "` separator. TRACE has no entry and therefore uses the fallback.
pub fn default_formats() -> BTreeMap<LogLevel, String> {
    let labelled = |label: &str, fg: Color| {
        format!(
            "{} | {}",
            paint(label, Some(fg), None, false),
            paint("{message}", Some(fg), None, false)
        )
    };

    let mut formats = BTreeMap::new();
    formats.insert(LogLevel::Debug, labelled("DEBUG", Color::Cyan));
    formats.insert(LogLevel::Info, "{message}".to_string());
    formats.insert(LogLevel::Warn, labelled("WARN ", Color::Yellow));
    formats.insert(LogLevel::Error, labelled("ERROR", Color::Red));
    formats.insert(
        LogLevel::Fatal,
        format!(
            "{} | {}",
            paint("FATAL", Some(Color::White), Some(Color::Red), true),
            paint("{message}", Some(Color::Red), None, true)
        ),
    );
    formats
}

/// Picks a formatter by the record's exact level.
///
/// Levels without an entry go to a fallback [`ExceptionFormatter`] built from
/// the same options. An empty table therefore formats everything with the
/// fallback; use [`MultiLevelFormatter::new`] for the built-in table.
///
/// ```
/// use pretty_logger::core::{LogLevel, LogRecord};
/// use pretty_logger::format::{FormatOptions, Formatter, MultiLevelFormatter};
///
/// let formatter = MultiLevelFormatter::with_formats(
///     [(LogLevel::Warn, "WARNING | {message}")],
///     FormatOptions::default(),
/// )
/// .unwrap();
///
/// let warn = LogRecord::new("app", LogLevel::Warn, "low disk");
/// let info = LogRecord::new("app", LogLevel::Info, "started");
/// assert_eq!(formatter.format(&warn), "WARNING | low disk");
/// assert_eq!(formatter.format(&info), "started");
/// ```
#[derive(Debug, Clone)]
pub struct MultiLevelFormatter {
    formatters: BTreeMap<LogLevel, ExceptionFormatter>,
    fallback: ExceptionFormatter,
}

impl MultiLevelFormatter {
    /// Built-in colorized table with the given shared options.
    pub fn new(options: FormatOptions) -> Self {
        Self::with_formats(default_formats(), options).expect("built-in templates are valid")
    }

    pub fn with_formats<I, S>(formats: I, options: FormatOptions) -> Result<Self>
    where
        I: IntoIterator<Item = (LogLevel, S)>,
        S: AsRef<str>,
    {
        let formatters = formats
            .into_iter()
            .map(|(level, template)| {
                ExceptionFormatter::new(template.as_ref(), options.clone()).map(|f| (level, f))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Self {
            formatters,
            fallback: ExceptionFormatter::new(ExceptionFormatter::DEFAULT_TEMPLATE, options)?,
        })
    }

    /// Replace the template used for levels missing from the table.
    pub fn with_fallback_template(mut self, template: &str) -> Result<Self> {
        self.fallback = ExceptionFormatter::new(template, self.fallback.options().clone())?;
        Ok(self)
    }

    pub fn formatter_for(&self, level: LogLevel) -> &ExceptionFormatter {
        self.formatters.get(&level).unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &ExceptionFormatter {
        &self.fallback
    }
}

impl Default for MultiLevelFormatter {
    fn default() -> Self {
        Self::new(FormatOptions::default())
    }
}

impl Formatter for MultiLevelFormatter {
    fn format(&self, record: &LogRecord) -> String {
        self.formatter_for(record.level).format(record)
    }
}
