use super::Severity;
use chrono::{DateTime, Local};
use std::fmt;

/// A log record at the instant of writing.
///
/// Derived from a classified message, rendered into one line, and never
/// stored after the line has been written.
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    pub timestamp: DateTime<Local>,
    pub severity: Severity,
    pub body: &'a str,
}

impl<'a> LogRecord<'a> {
    pub fn now(severity: Severity, body: &'a str) -> Self {
        Self {
            timestamp: Local::now(),
            severity,
            body,
        }
    }
}

impl fmt::Display for LogRecord<'_> {
    /// `[YYYY-MM-DD HH:MM:SS] [LEVELNAME] body`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.severity,
            self.body
        )
    }
}
