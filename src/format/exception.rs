//! Formatter that renders failures as an indented block under the message

use super::failure::{PrettyFailure, RenderFailure};
use super::template::Template;
use super::{FormatOptions, Formatter};
use crate::core::{LogRecord, Result};
use std::fmt;
use std::sync::Arc;

/// Renders the record through a template and, when the record carries a
/// failure, appends the rendered failure indented on the following lines.
///
/// Set `color` to `false` in the options for sinks that are not terminals.
///
/// ```
/// use pretty_logger::core::{Failure, LogLevel, LogRecord};
/// use pretty_logger::format::{ExceptionFormatter, FormatOptions, Formatter};
///
/// let formatter = ExceptionFormatter::new("{levelname} | {message}", FormatOptions::plain()).unwrap();
/// let record = LogRecord::new("app", LogLevel::Error, "request failed")
///     .with_failure(Failure::new("timed out").with_kind("Timeout"));
///
/// assert_eq!(formatter.format(&record), "ERROR | request failed\n    Timeout: timed out");
/// ```
#[derive(Clone)]
pub struct ExceptionFormatter {
    template: Template,
    options: FormatOptions,
    renderer: Arc<dyn RenderFailure>,
}

impl ExceptionFormatter {
    pub const DEFAULT_TEMPLATE: &'static str = "{message}";

    /// Fails on an unparsable template, or on a custom timestamp format that
    /// the template would need but chrono cannot render.
    pub fn new(template: &str, options: FormatOptions) -> Result<Self> {
        let template = Template::parse(template)?;
        if template.uses_time() {
            options.timestamp_format.validate()?;
        }
        Ok(Self {
            template,
            options,
            renderer: Arc::new(PrettyFailure),
        })
    }

    /// Same template, no color anywhere in the failure block.
    pub fn plain(template: &str) -> Result<Self> {
        Self::new(template, FormatOptions::plain())
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn RenderFailure>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    pub fn color(&self) -> bool {
        self.options.color
    }

    fn indent(&self, block: &str) -> String {
        let prefix = " ".repeat(self.options.indent);
        block
            .lines()
            .map(|line| {
                if line.trim().is_empty() {
                    line.to_string()
                } else {
                    format!("{}{}", prefix, line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ExceptionFormatter {
    fn default() -> Self {
        Self {
            template: Template::parse(Self::DEFAULT_TEMPLATE)
                .expect("default template is valid"),
            options: FormatOptions::default(),
            renderer: Arc::new(PrettyFailure),
        }
    }
}

impl Formatter for ExceptionFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let mut out = self.template.render(record, &self.options.timestamp_format);

        if let Some(ref failure) = record.failure {
            let block = self.renderer.render_failure(failure, self.options.color);
            if block.trim().is_empty() {
                return out;
            }
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&self.indent(&block));
        }

        out
    }
}

impl fmt::Debug for ExceptionFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExceptionFormatter")
            .field("template", &self.template.source())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
