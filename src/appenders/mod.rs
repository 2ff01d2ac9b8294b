//! Appender implementations

pub mod console;
pub mod file;
pub mod memory;

pub use console::ConsoleAppender;
pub use file::FileAppender;
pub use memory::{MemoryAppender, MemoryBuffer};

pub use crate::core::Sink;
