//! Terminal styling helpers
//!
//! [`style`] takes color names the way a config file or a caller would spell
//! them and fails on anything it does not know. [`paint`] is the typed core
//! used by the built-in templates.

use crate::core::{LoggerError, Result};
use colored::Color;

const RESET: &str = "\x1b[0m";

/// Wrap `text` in SGR escape sequences for the requested colors and weight.
///
/// Returns `text` unchanged when nothing is requested.
///
/// ```
/// use pretty_logger::format::style;
///
/// assert_eq!(style("plain", None, None, false).unwrap(), "plain");
/// assert_eq!(style("warn", Some("yellow"), None, false).unwrap(), "\x1b[33mwarn\x1b[0m");
/// assert!(style("oops", Some("chartreuse"), None, false).is_err());
/// ```
pub fn style(text: &str, fg: Option<&str>, bg: Option<&str>, bold: bool) -> Result<String> {
    let fg = fg.map(parse_color).transpose()?;
    let bg = bg.map(parse_color).transpose()?;
    Ok(paint(text, fg, bg, bold))
}

/// Typed core of [`style`].
///
/// Escape codes come from `colored::Color` but are assembled here rather than
/// through `Colorize`, which drops them off a TTY or under `NO_COLOR`. Output
/// depends only on the arguments.
#[must_use]
pub fn paint(text: &str, fg: Option<Color>, bg: Option<Color>, bold: bool) -> String {
    let mut codes: Vec<String> = Vec::with_capacity(3);
    if bold {
        codes.push("1".to_string());
    }
    if let Some(fg) = fg {
        codes.push(fg.to_fg_str().into_owned());
    }
    if let Some(bg) = bg {
        codes.push(bg.to_bg_str().into_owned());
    }

    if codes.is_empty() {
        return text.to_string();
    }
    format!("\x1b[{}m{}{}", codes.join(";"), text, RESET)
}

/// Resolve a color name. Accepts `bright_red`, `Bright-Red` and `bright red` alike.
pub fn parse_color(name: &str) -> Result<Color> {
    let normalized = name.trim().to_lowercase().replace(['-', ' '], "_");
    let color = match normalized.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "bright_black" => Color::BrightBlack,
        "bright_red" => Color::BrightRed,
        "bright_green" => Color::BrightGreen,
        "bright_yellow" => Color::BrightYellow,
        "bright_blue" => Color::BrightBlue,
        "bright_magenta" => Color::BrightMagenta,
        "bright_cyan" => Color::BrightCyan,
        "bright_white" => Color::BrightWhite,
        _ => return Err(LoggerError::invalid_color(name)),
    };
    Ok(color)
}

/// Remove SGR escape sequences, leaving the visible text.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // Parameters run until the final byte in '@'..='~'
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
