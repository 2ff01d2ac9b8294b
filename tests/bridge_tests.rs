//! Records from the `log` facade reaching registry loggers

#![cfg(feature = "log-bridge")]

use pretty_logger::appenders::MemoryAppender;
use pretty_logger::core::{Handler, LogLevel, Logger};
use pretty_logger::format::Template;
use pretty_logger::LogBridge;
use std::sync::Arc;

#[test]
fn test_log_facade_routes_to_logger() {
    LogBridge::install().expect("Failed to install bridge");
    assert!(LogBridge::install().is_err());

    let logger = Logger::get("bridge_it.net");
    logger.set_propagate(false);
    logger.set_level(LogLevel::Info);

    let sink = MemoryAppender::new();
    let captured = sink.buffer();
    logger.add_handler(Arc::new(Handler::new(
        sink,
        Template::parse("{levelname} {name} {message}").expect("Failed to parse template"),
        LogLevel::Trace,
    )));

    log::debug!(target: "bridge_it::net", "filtered by level");
    log::info!(target: "bridge_it::net", "connected to {}", "db");
    log::warn!(target: "bridge_it::net::tcp", "slow peer");

    assert!(log::log_enabled!(target: "bridge_it::net", log::Level::Warn));
    assert!(!log::log_enabled!(target: "bridge_it::net", log::Level::Debug));

    // `bridge_it.net.tcp` has no handlers of its own and propagates to its parent
    assert_eq!(
        captured.lines(),
        [
            "INFO bridge_it.net connected to db",
            "WARN bridge_it.net.tcp slow peer",
        ]
    );
}
