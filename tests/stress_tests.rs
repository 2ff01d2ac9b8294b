//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - No line is lost or interleaved when many threads share a file handler
//! - Scopes on distinct loggers can be entered and exited concurrently
//! - A handler that keeps failing does not stop the others

use pretty_logger::appenders::MemoryAppender;
use pretty_logger::context::{logging_context, LoggingContext, Scope};
use pretty_logger::core::{Handler, LogLevel, Logger, LoggerError, Result, Sink};
use pretty_logger::format::Template;
use std::collections::HashSet;
use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const MESSAGES_PER_THREAD: usize = 250;

#[test]
fn test_concurrent_file_logging_keeps_every_line() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("concurrent.log");

    let logger = Logger::get("stress.file");
    logger.set_propagate(false);
    logger.set_level(LogLevel::Error);

    let guard = logging_context()
        .logger(Arc::clone(&logger))
        .console_handler(Arc::new(Handler::new(
            MemoryAppender::new(),
            Template::parse("{message}").expect("Failed to parse template"),
            LogLevel::Fatal,
        )))
        .file(&log_file)
        .file_level(LogLevel::Info)
        .build()
        .expect("Failed to build context")
        .entered()
        .expect("Failed to enter context");

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..MESSAGES_PER_THREAD {
                    logger.info(format!("thread {} message {}", t, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Logging thread panicked");
    }

    guard.exit().expect("Failed to exit context");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let messages: HashSet<&str> = content
        .lines()
        .map(|line| line.rsplit(':').next().unwrap_or_default())
        .collect();

    assert_eq!(content.lines().count(), THREADS * MESSAGES_PER_THREAD);
    assert_eq!(messages.len(), THREADS * MESSAGES_PER_THREAD);
    assert!(messages.contains("thread 7 message 249"));
}

#[test]
fn test_concurrent_scopes_on_distinct_loggers() {
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            thread::spawn(move || {
                let logger = Logger::get(&format!("stress.scopes.{}", t));
                logger.set_propagate(false);
                logger.set_level(LogLevel::Warn);

                let sink = MemoryAppender::new();
                let captured = sink.buffer();
                let handler = Arc::new(Handler::new(
                    sink,
                    Template::parse("{message}").expect("Failed to parse template"),
                    LogLevel::Debug,
                ));

                for i in 0..100 {
                    LoggingContext::for_logger(Arc::clone(&logger))
                        .with_level(LogLevel::Debug)
                        .with_handler(Arc::clone(&handler))
                        .close_on_exit(false)
                        .scoped(|| logger.debug(format!("{}", i)))
                        .expect("Failed to run scope");
                    assert_eq!(logger.level(), Some(LogLevel::Warn));
                }

                assert!(logger.handlers().is_empty());
                captured.len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("Scope thread panicked"), 100);
    }
}

/// Fails every write
struct BrokenSink;

impl Sink for BrokenSink {
    fn write_line(&mut self, _line: &str) -> Result<()> {
        Err(LoggerError::other("disk on fire"))
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "broken"
    }
}

#[test]
fn test_failing_handler_is_isolated() {
    let logger = Logger::get("stress.broken");
    logger.set_propagate(false);
    logger.set_level(LogLevel::Info);

    let template = || Template::parse("{message}").expect("Failed to parse template");
    let broken = Arc::new(Handler::new(BrokenSink, template(), LogLevel::Info));
    let sink = MemoryAppender::new();
    let captured = sink.buffer();
    let healthy = Arc::new(Handler::new(sink, template(), LogLevel::Info));
    logger.add_handler(Arc::clone(&broken));
    logger.add_handler(Arc::clone(&healthy));

    for i in 0..500 {
        logger.info(format!("message {}", i));
    }

    assert_eq!(captured.len(), 500);
    logger.remove_handler(&broken);
    logger.remove_handler(&healthy);
}
