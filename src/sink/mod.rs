//! Append-only file sink with a minimum-severity filter.

use crate::domain::{LogRecord, Severity};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use tracing::{error, warn};

/// Append-only text destination for formatted log records.
///
/// Writes are serialized by an internal lock, independent of the message
/// queue, so concurrent writers can never interleave partial lines. The
/// minimum-severity threshold is mutable while writers are active and
/// takes effect on the next filter check.
///
/// A sink whose destination could not be opened is permanently
/// *unavailable*: the failure is reported once at construction and every
/// later `write` is a silent no-op.
#[derive(Debug)]
pub struct FileSink {
    file: Mutex<Option<File>>,
    min_severity: AtomicU8,
    records_written: AtomicU64,
    path: PathBuf,
}

impl FileSink {
    /// Open `path` in append mode (creating it if missing).
    ///
    /// Never fails: an open error leaves the sink unavailable instead.
    pub fn open(path: impl AsRef<Path>, min_severity: Severity) -> Self {
        let path = path.as_ref().to_path_buf();
        let file = match OpenOptions::new().append(true).create(true).open(&path) {
            Ok(file) => Some(file),
            Err(e) => {
                error!("failed to open log file {}: {e}", path.display());
                None
            }
        };

        Self {
            file: Mutex::new(file),
            min_severity: AtomicU8::new(min_severity.index()),
            records_written: AtomicU64::new(0),
            path,
        }
    }

    pub fn is_available(&self) -> bool {
        self.file.lock().is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn min_severity(&self) -> Severity {
        // The atomic only ever holds values stored from a Severity.
        Severity::from_index(self.min_severity.load(Ordering::Relaxed))
            .unwrap_or(Severity::Info)
    }

    /// Update the threshold. Safe to call concurrently with `write`;
    /// writes already past their filter check are unaffected.
    pub fn set_min_severity(&self, level: Severity) {
        self.min_severity.store(level.index(), Ordering::Relaxed);
    }

    /// Number of records accepted and flushed so far.
    pub fn records_written(&self) -> u64 {
        self.records_written.load(Ordering::Relaxed)
    }

    /// Append one formatted record and flush it.
    ///
    /// Filtered-out severities and an unavailable sink are silent no-ops;
    /// neither surfaces an error to the caller.
    pub fn write(&self, severity: Severity, body: &str) {
        if severity < self.min_severity() {
            return;
        }

        let mut guard = self.file.lock();
        let Some(file) = guard.as_mut() else { return };

        let record = LogRecord::now(severity, body);
        match writeln!(file, "{record}").and_then(|()| file.flush()) {
            Ok(()) => {
                self.records_written.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                warn!("dropped record after write error on {}: {e}", self.path.display());
            }
        }
    }
}
