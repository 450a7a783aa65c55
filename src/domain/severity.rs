use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Ordered severity of a log message.
///
/// The total order follows declaration order (`Info < Warning < Error`)
/// and is the basis of the sink's minimum-severity filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Tag used both in the `[LEVEL]` input prefix and in persisted records.
    pub fn as_tag(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }

    /// Validated mapping from the CLI's numeric level (0/1/2).
    ///
    /// Out-of-range values yield `None` rather than wrapping, so no raw
    /// integer is ever cast into the enum.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Severity::Info),
            1 => Some(Severity::Warning),
            2 => Some(Severity::Error),
            _ => None,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown severity name: {0}")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    /// Case-insensitive match against the three known names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("INFO") {
            Ok(Severity::Info)
        } else if s.eq_ignore_ascii_case("WARNING") {
            Ok(Severity::Warning)
        } else if s.eq_ignore_ascii_case("ERROR") {
            Ok(Severity::Error)
        } else {
            Err(UnknownSeverity(s.to_string()))
        }
    }
}
