//! Error context extension trait
//!
//! Mirrors `anyhow::Context` for `Result<T, ExporterError>`, so library code
//! can attach context while keeping domain error types.
//!
//! # Examples
//!
//! ```rust
//! use photos_export::domain::Result;
//! use photos_export::domain::context::ResultExt;
//!
//! fn read_manifest(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_context(|| format!("Failed to read library manifest: {}", path))
//! }
//! ```

use crate::domain::errors::ExporterError;
use crate::domain::result::Result;

/// Extension trait for adding context to `Result` types
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static;

    /// Add context to an error, computing it only on failure
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ExporterError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| wrap(e.into(), context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| wrap(e.into(), f()))
    }
}

/// Prefixes the message while keeping the variant, so callers can still match on it
fn wrap(err: ExporterError, context: impl std::fmt::Display) -> ExporterError {
    match err {
        ExporterError::Configuration(m) => ExporterError::Configuration(format!("{context}: {m}")),
        ExporterError::Library(m) => ExporterError::Library(format!("{context}: {m}")),
        ExporterError::Export(m) => ExporterError::Export(format!("{context}: {m}")),
        ExporterError::Validation(m) => ExporterError::Validation(format!("{context}: {m}")),
        ExporterError::Ledger(m) => ExporterError::Ledger(format!("{context}: {m}")),
        ExporterError::Serialization(m) => ExporterError::Serialization(format!("{context}: {m}")),
        ExporterError::Io(m) => ExporterError::Io(format!("{context}: {m}")),
        ExporterError::Other(m) => ExporterError::Other(format!("{context}: {m}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_context_keeps_variant() {
        let result: Result<()> = Err(ExporterError::Configuration("Invalid config".to_string()));
        let err = result.context("Failed to load configuration").unwrap_err();

        assert!(matches!(err, ExporterError::Configuration(_)));
        let msg = err.to_string();
        assert!(msg.contains("Failed to load configuration"));
        assert!(msg.contains("Invalid config"));
    }

    #[test]
    fn test_with_context_is_lazy_on_ok() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = called.clone();

        let result: Result<i32> = Ok(42);
        let with_context = result.with_context(|| {
            flag.store(true, Ordering::SeqCst);
            "expensive"
        });

        assert_eq!(with_context.unwrap(), 42);
        assert!(!called.load(Ordering::SeqCst));
    }

    #[test]
    fn test_context_chaining() {
        let result: Result<()> = Err(ExporterError::Library("manifest missing".to_string()));
        let msg = result
            .context("Failed to enumerate assets")
            .context("Export aborted")
            .unwrap_err()
            .to_string();

        assert!(msg.contains("Export aborted"));
        assert!(msg.contains("Failed to enumerate assets"));
        assert!(msg.contains("manifest missing"));
    }

    #[test]
    fn test_io_error_with_context() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err = Err::<(), _>(io_error)
            .context("Failed to read configuration file 'photos-export.toml'")
            .unwrap_err();

        assert!(matches!(err, ExporterError::Io(_)));
        assert!(err.to_string().contains("File not found"));
    }
}
