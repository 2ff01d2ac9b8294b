//! Colorized console logging with a plain-text log file
//!
//! Everything from DEBUG up is shown on the console; WARN and above is also
//! appended to `test.log`. The last record carries an error, rendered as an
//! indented block under the message.
//!
//! Run with: cargo run --example pretty_cli

use pretty_logger::prelude::*;

#[derive(Debug, thiserror::Error)]
#[error("A critical message from an exception")]
struct ValueError;

fn run(log: &Logger) -> std::result::Result<(), ValueError> {
    log.debug("A debug message");
    log.info("An info message");
    log.warn("A warning message");
    log.error("An error message");
    Err(ValueError)
}

fn main() -> Result<()> {
    let _guard = logging_context()
        .console_handler(create_console_handler(Some(LogLevel::Debug), None))
        .extra_handler(create_file_handler("test.log", None, None)?)
        .build()?
        .entered()?;

    let log = Logger::root();
    if let Err(err) = run(&log) {
        log.log_failure(LogLevel::Fatal, err.to_string(), Failure::from_error(&err));
    }

    Ok(())
}
