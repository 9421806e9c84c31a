//! Durable, append-only error ledger
//!
//! The ledger records every resource-level and asset-level failure of a run
//! in `<export-root>/export_errors.log`. It survives the process, so a user
//! can inspect failures after a long unattended export.
//!
//! Appends are serialized by a mutex and each line or block reaches the file
//! in a single `write_all`, so lines from concurrently exported assets never
//! interleave.

use crate::domain::{ExporterError, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default ledger filename inside the export root
pub const DEFAULT_LEDGER_NAME: &str = "export_errors.log";

/// Append-only text file of export failures
///
/// The file is created on first append; a run without failures leaves no
/// ledger behind.
#[derive(Debug)]
pub struct ErrorLedger {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ErrorLedger {
    /// Ledger writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Ledger named `file_name` inside `export_root`
    pub fn in_directory(export_root: &Path, file_name: &str) -> Self {
        Self::new(export_root.join(file_name))
    }

    /// Location of the ledger file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether anything has ever been written to this ledger's file
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Appends one line
    ///
    /// # Errors
    ///
    /// Returns [`ExporterError::Ledger`] if the file cannot be opened or written.
    pub fn append_line(&self, line: &str) -> Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        self.write(&buf)
    }

    /// Appends a header followed by each line indented by two spaces
    ///
    /// # Errors
    ///
    /// Returns [`ExporterError::Ledger`] if the file cannot be opened or written.
    pub fn append_block<S: AsRef<str>>(&self, header: &str, lines: &[S]) -> Result<()> {
        let mut buf = String::new();
        buf.push_str(header);
        buf.push('\n');
        for line in lines {
            buf.push_str("  ");
            buf.push_str(line.as_ref());
            buf.push('\n');
        }
        self.write(&buf)
    }

    /// Appends a line, logging instead of failing
    pub fn record_line(&self, line: &str) {
        if let Err(e) = self.append_line(line) {
            tracing::warn!(ledger = %self.path.display(), error = %e, "Could not append to error ledger");
        }
    }

    /// Appends a block, logging instead of failing
    pub fn record_block<S: AsRef<str>>(&self, header: &str, lines: &[S]) {
        if let Err(e) = self.append_block(header, lines) {
            tracing::warn!(ledger = %self.path.display(), error = %e, "Could not append to error ledger");
        }
    }

    fn write(&self, text: &str) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| ExporterError::Ledger("ledger lock poisoned".to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                ExporterError::Ledger(format!("Failed to open {}: {e}", self.path.display()))
            })?;

        file.write_all(text.as_bytes()).map_err(|e| {
            ExporterError::Ledger(format!("Failed to write {}: {e}", self.path.display()))
        })
    }
}
