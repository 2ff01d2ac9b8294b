//! Failure information attached to a log record
//!
//! A [`Failure`] is an owned snapshot of an error: its type, message, the chain
//! of `source()` causes and, when enabled through `RUST_BACKTRACE`, a backtrace.
//! Being owned, it can be rendered any number of times by any number of
//! formatters without touching the error it came from.

use serde::{Deserialize, Serialize};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    kind: Option<String>,
    message: String,
    causes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    backtrace: Option<String>,
}

impl Failure {
    /// A failure with only a message, no type and no causes.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: None,
            message: message.into(),
            causes: Vec::new(),
            backtrace: None,
        }
    }

    /// Snapshot a concrete error, recording its type name and source chain.
    ///
    /// ```
    /// use pretty_logger::core::Failure;
    ///
    /// let err = "x".parse::<i32>().unwrap_err();
    /// let failure = Failure::from_error(&err);
    /// assert_eq!(failure.kind(), Some("ParseIntError"));
    /// ```
    pub fn from_error<E: Error>(err: &E) -> Self {
        let mut failure = Self::from_dyn(err);
        failure.kind = Some(short_type_name(std::any::type_name::<E>()));
        failure
    }

    /// Snapshot a type-erased error. The type name is not recoverable here.
    pub fn from_dyn(err: &dyn Error) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            kind: None,
            message: err.to_string(),
            causes,
            backtrace: None,
        }
        .capture_backtrace()
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: impl Into<String>) -> Self {
        self.backtrace = Some(backtrace.into());
        self
    }

    /// Capture the current backtrace if `RUST_BACKTRACE` asks for one.
    #[must_use]
    pub fn capture_backtrace(mut self) -> Self {
        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            self.backtrace = Some(backtrace.to_string());
        }
        self
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn causes(&self) -> &[String] {
        &self.causes
    }

    pub fn backtrace(&self) -> Option<&str> {
        self.backtrace.as_deref()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(ref kind) => write!(f, "{}: {}", kind, self.message)?,
            None => write!(f, "{}", self.message)?,
        }
        for cause in &self.causes {
            write!(f, ": {}", cause)?;
        }
        Ok(())
    }
}

impl<E: Error> From<&E> for Failure {
    fn from(err: &E) -> Self {
        Failure::from_error(err)
    }
}

/// `std::io::error::Error` -> `Error`, `Foo<Bar>` -> `Foo`
fn short_type_name(full: &str) -> String {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Debug)]
    struct Wrapper(io::Error);

    impl fmt::Display for Wrapper {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "failed to load settings")
        }
    }

    impl Error for Wrapper {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_from_error_walks_sources() {
        let err = Wrapper(io::Error::new(io::ErrorKind::NotFound, "settings.toml missing"));
        let failure = Failure::from_error(&err);

        assert_eq!(failure.kind(), Some("Wrapper"));
        assert_eq!(failure.message(), "failed to load settings");
        assert_eq!(failure.causes(), ["settings.toml missing".to_string()]);
    }

    #[test]
    fn test_from_dyn_has_no_kind() {
        let boxed: Box<dyn Error> = Box::new(io::Error::other("boom"));
        let failure = Failure::from_dyn(boxed.as_ref());
        assert_eq!(failure.kind(), None);
        assert_eq!(failure.message(), "boom");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("std::io::error::Error"), "Error");
        assert_eq!(short_type_name("my::Foo<alloc::string::String>"), "Foo");
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn test_display_joins_chain() {
        let failure = Failure::new("outer").with_kind("Io").with_cause("inner");
        assert_eq!(failure.to_string(), "Io: outer: inner");
    }
}
