use crate::domain::Severity;
use clap::Parser;
use std::path::PathBuf;

/// Log file used when the positional argument is omitted.
pub const DEFAULT_LOG_FILE: &str = "app.log";

/// Command-line surface: two optional positional arguments, no flags.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Interactive stdin-to-file logger with severity filtering", long_about = None)]
pub struct Config {
    /// Log file opened in append mode
    #[arg(value_name = "LOGFILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Minimum severity written: 0 = INFO, 1 = WARNING, 2 = ERROR
    #[arg(
        value_name = "MIN_LEVEL",
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=2)
    )]
    pub min_level: u8,
}

impl Config {
    pub fn min_severity(&self) -> Severity {
        // The range parser already rejected anything outside 0..=2.
        Severity::from_index(self.min_level).unwrap_or(Severity::Info)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            min_level: 0,
        }
    }
}
