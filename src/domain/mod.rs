//! Domain layer for logscribe.
//!
//! Contains the canonical types shared across all modules:
//! - `Severity`: ordered log severity (Info/Warning/Error)
//! - `LogRecord`: a record at the instant of writing
//! - `ScribeError`: top-level error type

pub mod error;
pub mod record;
pub mod severity;

pub use error::ScribeError;
pub use record::LogRecord;
pub use severity::Severity;
