/// Diagnostics - process-wide diagnostic stream
///
/// Every human-readable line the core produces (driver logs, reflection
/// reports, lifecycle events) goes through the logger installed here.
/// The logger and the severity filter are global, initialized on first use,
/// and never torn down.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Entries below this severity are dropped before reaching the logger
static MIN_SEVERITY: RwLock<LogSeverity> = RwLock::new(LogSeverity::Trace);

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

/// Diagnostic stream entry points
///
/// # Example
///
/// ```no_run
/// use hello_triangle::triangle::{Diagnostics, log::{Logger, LogEntry}};
///
/// struct FileLogger;
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Write to file...
///     }
/// }
///
/// Diagnostics::set_logger(FileLogger);
/// ```
pub struct Diagnostics;

impl Diagnostics {
    /// Replace the current logger
    pub fn set_logger<L: Logger + 'static>(logger_impl: L) {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(logger_impl);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Drop entries below `severity`
    pub fn set_min_severity(severity: LogSeverity) {
        if let Ok(mut min) = MIN_SEVERITY.write() {
            *min = severity;
        }
    }

    /// Current severity filter
    pub fn min_severity() -> LogSeverity {
        MIN_SEVERITY.read().map(|min| *min).unwrap_or(LogSeverity::Trace)
    }

    fn enabled(severity: LogSeverity) -> bool {
        severity >= Self::min_severity()
    }

    /// Log without file:line
    ///
    /// Used by the tri_info!, tri_warn!, ... macros.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if !Self::enabled(severity) {
            return;
        }
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Log with file:line (used by tri_error!, tri_err!, tri_bail!)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if !Self::enabled(severity) {
            return;
        }
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }

    /// Emit a multi-line block, one entry per line
    pub fn log_lines(severity: LogSeverity, source: &str, text: &str) {
        for line in text.lines() {
            Self::log(severity, source, line.to_string());
        }
    }
}
