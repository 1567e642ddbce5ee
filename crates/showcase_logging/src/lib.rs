#![deny(missing_docs)]
//! Shared logging utilities for the showcase workspace.
//!
//! This crate provides the `showcase_*` logging macros used across the
//! codebase, a terminal logger for native hosts and tests, and a logger
//! that forwards records to a caller-supplied sink (the browser console in
//! the web app).

use std::sync::OnceLock;

use log::{LevelFilter, Log, Metadata, Record};

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! showcase_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! showcase_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! showcase_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! showcase_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! showcase_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Destination for log output on native hosts.
pub enum LogDestination {
    /// Write to the terminal (stdout/stderr).
    Terminal,
}

/// Initialize the global logger for a native host.
///
/// Safely no-ops if another logger has already been installed.
pub fn initialize(destination: LogDestination) {
    use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

    let level = match destination {
        LogDestination::Terminal => LevelFilter::Info,
    };
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .build();

    let _ = TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto);
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

/// Receives formatted log lines from [`SinkLogger`].
pub type LineSink = fn(level: log::Level, line: &str);

/// A logger that formats records as `[LEVEL target] message` and hands them
/// to a plain function, for hosts without a terminal.
pub struct SinkLogger {
    level: LevelFilter,
    sink: LineSink,
}

impl Log for SinkLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{} {}] {}", record.level(), record.target(), record.args());
        (self.sink)(record.level(), &line);
    }

    fn flush(&self) {}
}

static SINK_LOGGER: OnceLock<SinkLogger> = OnceLock::new();

/// Install a [`SinkLogger`] as the global logger.
///
/// Returns `false` when a logger was already installed.
pub fn initialize_with_sink(level: LevelFilter, sink: LineSink) -> bool {
    let logger = SINK_LOGGER.get_or_init(|| SinkLogger { level, sink });
    if log::set_logger(logger).is_err() {
        return false;
    }
    log::set_max_level(level);
    true
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use log::{Level, LevelFilter, Log, Record};

    use super::SinkLogger;

    thread_local! {
        static LINES: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
    }

    fn capture(level: Level, line: &str) {
        LINES.with(|lines| lines.borrow_mut().push((level, line.to_string())));
    }

    #[test]
    fn sink_logger_formats_and_filters() {
        let logger = SinkLogger {
            level: LevelFilter::Info,
            sink: capture,
        };

        logger.log(
            &Record::builder()
                .args(format_args!("nav stuck at {}", 300))
                .level(Level::Warn)
                .target("scroll")
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("relayout"))
                .level(Level::Debug)
                .target("responsive")
                .build(),
        );

        let lines = LINES.with(|lines| lines.borrow().clone());
        assert_eq!(
            lines,
            vec![(Level::Warn, "[WARN scroll] nav stuck at 300".to_string())]
        );
    }
}
