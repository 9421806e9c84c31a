//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting the result of
//! one export run.

use std::path::PathBuf;
use std::time::Duration;

/// Summary of an export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Export root directory
    pub export_root: PathBuf,

    /// Assets returned by the library for the requested range
    pub total_assets: usize,

    /// Assets whose resources all reached their destination
    pub exported_assets: usize,

    /// Assets that failed, fully or partially
    pub failed_assets: usize,

    /// Assets never started because shutdown was requested
    pub skipped_assets: usize,

    /// Resources written during this run
    pub resources_written: usize,

    /// Resources left untouched because they were already present
    pub resources_already_present: usize,

    /// Resources the writer could not produce
    pub resources_failed: usize,

    /// Metadata sidecars written
    pub sidecars_written: usize,

    /// Duration of the export
    pub duration: Duration,

    /// Per-asset errors in the order they were recorded
    pub errors: Vec<AssetError>,

    /// Whether a shutdown signal cut the run short
    pub interrupted: bool,

    /// Error ledger path, if anything was written to it
    pub ledger_path: Option<PathBuf>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(export_root: impl Into<PathBuf>) -> Self {
        Self {
            export_root: export_root.into(),
            total_assets: 0,
            exported_assets: 0,
            failed_assets: 0,
            skipped_assets: 0,
            resources_written: 0,
            resources_already_present: 0,
            resources_failed: 0,
            sidecars_written: 0,
            duration: Duration::from_secs(0),
            errors: Vec::new(),
            interrupted: false,
            ledger_path: None,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record an asset-level error
    pub fn add_error(&mut self, error: AssetError) {
        self.failed_assets += 1;
        self.resources_failed += error.failed_resources;
        self.errors.push(error);
    }

    /// Check if every asset was exported
    pub fn is_successful(&self) -> bool {
        self.failed_assets == 0 && !self.interrupted
    }

    /// Line printed when the run ends
    pub fn completion_message(&self) -> String {
        format!(
            "Export complete: {} of {} assets exported to {}",
            self.exported_assets,
            self.total_assets,
            self.export_root.display()
        )
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_assets = self.total_assets,
            exported = self.exported_assets,
            failed = self.failed_assets,
            skipped = self.skipped_assets,
            resources_written = self.resources_written,
            resources_already_present = self.resources_already_present,
            resources_failed = self.resources_failed,
            sidecars = self.sidecars_written,
            duration_secs = self.duration.as_secs(),
            interrupted = self.interrupted,
            "Export completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(error_count = self.errors.len(), "Export completed with errors");
            for error in &self.errors {
                tracing::warn!(
                    asset_id = %error.asset_id,
                    index = %error.index,
                    message = %error.message,
                    "Asset error"
                );
            }
        }
    }
}

/// Asset that could not be exported
#[derive(Debug, Clone)]
pub struct AssetError {
    /// Library identifier
    pub asset_id: String,

    /// `<position>/<total>` within the run
    pub index: String,

    /// Error message
    pub message: String,

    /// Number of resources that failed (0 for asset-level errors)
    pub failed_resources: usize,
}

impl AssetError {
    /// Create a new asset error
    pub fn new(asset_id: impl Into<String>, index: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
            index: index.into(),
            message: message.into(),
            failed_resources: 0,
        }
    }

    /// Set the failed resource count
    pub fn with_failed_resources(mut self, count: usize) -> Self {
        self.failed_resources = count;
        self
    }
}
