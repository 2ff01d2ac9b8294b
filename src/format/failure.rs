//! Pretty rendering of [`Failure`] blocks

use super::style::paint;
use crate::core::Failure;
use colored::Color;

/// Turns failure info into a multi-line block.
///
/// Implementations must not emit blank lines: the exception formatter indents
/// every line of the block under the message it belongs to.
pub trait RenderFailure: Send + Sync {
    fn render_failure(&self, failure: &Failure, color: bool) -> String;
}

/// Default renderer.
///
/// ```text
/// ParseIntError: invalid digit found in string
/// Caused by: ...
/// Backtrace:
///    0: ...
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyFailure;

impl PrettyFailure {
    fn paint_if(color: bool, text: &str, fg: Color, bold: bool) -> String {
        if color {
            paint(text, Some(fg), None, bold)
        } else {
            text.to_string()
        }
    }
}

impl RenderFailure for PrettyFailure {
    fn render_failure(&self, failure: &Failure, color: bool) -> String {
        let mut lines: Vec<String> = Vec::new();

        let mut message_lines = failure.message().lines().filter(|l| !l.trim().is_empty());
        let first = message_lines.next();
        let kind = failure.kind().filter(|k| !k.trim().is_empty());
        match (kind, first) {
            (Some(kind), Some(first)) => lines.push(format!(
                "{}: {}",
                Self::paint_if(color, kind, Color::Red, true),
                Self::paint_if(color, first, Color::Red, false)
            )),
            (Some(kind), None) => lines.push(Self::paint_if(color, kind, Color::Red, true)),
            (None, Some(first)) => lines.push(Self::paint_if(color, first, Color::Red, false)),
            // Empty `Display` and no type name: no head line at all
            (None, None) => {}
        }
        lines.extend(message_lines.map(|l| Self::paint_if(color, l, Color::Red, false)));

        for cause in failure.causes() {
            let label = Self::paint_if(color, "Caused by:", Color::Yellow, true);
            for (i, text) in cause.lines().filter(|l| !l.trim().is_empty()).enumerate() {
                if i == 0 {
                    lines.push(format!("{} {}", label, text));
                } else {
                    lines.push(text.to_string());
                }
            }
        }

        if let Some(backtrace) = failure.backtrace() {
            lines.push(Self::paint_if(color, "Backtrace:", Color::Cyan, true));
            lines.extend(
                backtrace
                    .lines()
                    .filter(|l| !l.trim().is_empty())
                    .map(|l| Self::paint_if(color, l.trim_end(), Color::BrightBlack, false)),
            );
        }

        lines.join("\n")
    }
}
