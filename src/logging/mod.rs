//! Logging and observability
//!
//! This module provides:
//! - Structured logging to stderr and an optional log file
//! - Configurable log levels, overridable through `RUST_LOG`
//! - The error ledger written to the export root
//!
//! # Example
//!
//! ```no_run
//! use photos_export::logging::init_logging;
//! use photos_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod ledger;
pub mod structured;

// Re-export commonly used items
pub use ledger::{ErrorLedger, DEFAULT_LEDGER_NAME};
pub use structured::{init_logging, LoggingGuard};

/// Log the start of an asset export
///
/// # Example
///
/// ```no_run
/// use photos_export::log_asset_start;
/// use photos_export::domain::{AssetId, MediaKind};
///
/// let asset_id = AssetId::new("8F2A-01").unwrap();
/// log_asset_start!(asset_id, "3/120", MediaKind::Image.label());
/// ```
#[macro_export]
macro_rules! log_asset_start {
    ($asset_id:expr, $index:expr, $media:expr) => {
        tracing::debug!(
            asset_id = %$asset_id,
            index = %$index,
            media = $media,
            "Exporting asset"
        );
    };
}

/// Log the completion of an export run
///
/// # Example
///
/// ```no_run
/// use photos_export::log_export_complete;
/// use std::time::Duration;
///
/// let count = 42;
/// let duration = Duration::from_secs(10);
/// log_export_complete!(count, duration);
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($count:expr, $duration:expr) => {
        tracing::info!(
            count = $count,
            duration_ms = $duration.as_millis(),
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use photos_export::log_error_with_context;
/// use photos_export::domain::ExporterError;
///
/// let error = ExporterError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
