//! Export coordinator - main orchestrator for the export process
//!
//! The coordinator asks the library for the assets in the requested date
//! range, places each asset into a `YYYY/MM` folder under the export root
//! and hands it to the [`ResourceExporter`]. Asset failures are recorded in
//! the error ledger and the run moves on to the next asset.

use super::failure::{error_details, AggregateFailure};
use super::pipeline::{ExportStatus, ResourceExporter};
use super::sidecar::write_sidecar;
use super::summary::{AssetError, ExportSummary};
use crate::adapters::traits::{AssetSource, WriteOptions};
use crate::adapters::{ContentTypeTable, FileCopyWriter, LocalFileSystem, ManifestLibrary};
use crate::config::ExporterConfig;
use crate::core::naming::NameRegistry;
use crate::core::timestamp::{iso_now, month_string, year_string, CaptureStamp, DateRange};
use crate::domain::context::ResultExt;
use crate::domain::{Asset, ExporterError, Result};
use crate::logging::ErrorLedger;
use crate::{log_asset_start, log_export_complete};
use chrono::{Local, Utc};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::watch;

/// Settings for one export run
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Directory the `YYYY/MM` folders are created in
    pub export_root: PathBuf,
    /// Capture dates to export
    pub range: DateRange,
    /// Keep files already at their destination
    pub incremental: bool,
    /// Write a metadata sidecar per exported asset
    pub metadata: bool,
    /// Assets processed concurrently
    pub parallel_assets: usize,
}

impl RunSettings {
    /// Derives run settings from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the year range cannot be built.
    pub fn from_config(config: &ExporterConfig) -> Result<Self> {
        Ok(Self {
            export_root: config.export.export_root(),
            range: config.export.date_range()?,
            incremental: config.export.incremental,
            metadata: config.export.metadata,
            parallel_assets: config.export.parallel_assets,
        })
    }
}

/// Why an asset could not be exported
#[derive(Debug, Error)]
enum AssetExportError {
    #[error("Failed to create folder {}: {source}", .path.display())]
    Folder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Resources(AggregateFailure),

    #[error("Failed to write metadata sidecar: {0}")]
    Sidecar(ExporterError),
}

impl AssetExportError {
    fn details(&self) -> String {
        match self {
            Self::Folder { source, .. } => {
                format!("kind=folder code=0 desc={self} underlying={source}")
            }
            Self::Resources(failure) => error_details(failure),
            Self::Sidecar(err) => error_details(err),
        }
    }
}

/// What happened to one asset
enum AssetOutcome {
    Exported {
        written: usize,
        already_present: usize,
        sidecar: bool,
    },
    Failed(AssetError),
    NotStarted,
}

/// Export coordinator
pub struct ExportCoordinator {
    source: Arc<dyn AssetSource>,
    exporter: Arc<ResourceExporter>,
    settings: RunSettings,
    shutdown: watch::Receiver<bool>,
}

impl ExportCoordinator {
    /// Create a coordinator from its collaborators
    pub fn new(
        source: Arc<dyn AssetSource>,
        exporter: Arc<ResourceExporter>,
        settings: RunSettings,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            source,
            exporter,
            settings,
            shutdown,
        }
    }

    /// Create a coordinator exporting the manifest library named in `config`
    ///
    /// Resources are copied from the manifest directory, the ledger lives in
    /// the export root.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be opened or the settings are
    /// invalid.
    pub async fn from_config(
        config: &ExporterConfig,
        shutdown: watch::Receiver<bool>,
    ) -> Result<Self> {
        let settings = RunSettings::from_config(config)?;
        let library = ManifestLibrary::open(config.library.manifest_path()).await?;

        let ledger = ErrorLedger::in_directory(&settings.export_root, &config.export.error_log_name);
        let exporter = ResourceExporter::new(
            Arc::new(FileCopyWriter::new(library.base_dir())),
            Arc::new(ContentTypeTable::new()),
            Arc::new(LocalFileSystem::new()),
            Arc::new(ledger),
        )
        .with_write_options(WriteOptions {
            network_access_allowed: config.export.network_access_allowed,
        });

        Ok(Self::new(
            Arc::new(library),
            Arc::new(exporter),
            settings,
            shutdown,
        ))
    }

    /// Run settings in effect
    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Execute the export
    ///
    /// This is the main entry point for the export process. It:
    /// 1. Creates the export root
    /// 2. Fetches the assets in the date range
    /// 3. Exports every asset into its `YYYY/MM` folder
    /// 4. Records failed assets in the error ledger
    /// 5. Generates the summary
    ///
    /// # Errors
    ///
    /// Returns an error only when the run cannot start: the export root
    /// cannot be created or the library cannot be enumerated. Asset failures
    /// are reported in the summary.
    pub async fn execute_export(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let root = &self.settings.export_root;
        let mut summary = ExportSummary::new(root);

        tracing::info!(
            source = %self.source.describe(),
            export_root = %root.display(),
            start = %self.settings.range.start,
            end = %self.settings.range.end,
            incremental = self.settings.incremental,
            metadata = self.settings.metadata,
            parallel_assets = self.settings.parallel_assets,
            "Starting export process"
        );

        self.exporter
            .file_system()
            .ensure_dir(root)
            .with_context(|| format!("Failed to create export root {}", root.display()))?;

        let assets = self.source.fetch_assets(&self.settings.range).await?;
        let total = assets.len();
        summary.total_assets = total;

        if assets.is_empty() {
            tracing::info!("No assets in the requested date range");
        }

        let mut outcomes: Vec<(usize, AssetOutcome)> = stream::iter(assets.into_iter().enumerate())
            .map(|(idx, asset)| self.process_asset(idx, total, asset))
            .buffer_unordered(self.settings.parallel_assets.max(1))
            .collect()
            .await;
        outcomes.sort_by_key(|(idx, _)| *idx);

        for (_, outcome) in outcomes {
            match outcome {
                AssetOutcome::Exported {
                    written,
                    already_present,
                    sidecar,
                } => {
                    summary.exported_assets += 1;
                    summary.resources_written += written;
                    summary.resources_already_present += already_present;
                    if sidecar {
                        summary.sidecars_written += 1;
                    }
                }
                AssetOutcome::Failed(error) => summary.add_error(error),
                AssetOutcome::NotStarted => {
                    summary.skipped_assets += 1;
                    summary.interrupted = true;
                }
            }
        }

        if summary.interrupted {
            tracing::warn!(
                skipped = summary.skipped_assets,
                "Export interrupted by shutdown signal"
            );
        }

        let ledger = self.exporter.ledger();
        if ledger.exists() {
            summary.ledger_path = Some(ledger.path().to_path_buf());
        }

        let summary = summary.with_duration(start_time.elapsed());
        log_export_complete!(summary.exported_assets, summary.duration);
        summary.log_summary();
        Ok(summary)
    }

    async fn process_asset(&self, idx: usize, total: usize, asset: Asset) -> (usize, AssetOutcome) {
        if *self.shutdown.borrow() {
            tracing::debug!(asset_id = %asset.id, "Shutdown requested, asset not started");
            return (idx, AssetOutcome::NotStarted);
        }

        let index = format!("{}/{}", idx + 1, total);
        log_asset_start!(asset.id, index, asset.media_kind.label());

        let capture = asset.capture_date.unwrap_or_else(|| {
            tracing::warn!(asset_id = %asset.id, "Asset has no capture date, using current time");
            Utc::now()
        });
        let local = capture.with_timezone(&Local);
        let stamp = CaptureStamp::from_datetime(&local);
        let folder = self
            .settings
            .export_root
            .join(year_string(&local))
            .join(month_string(&local));

        let outcome = match self.export_asset(&asset, &stamp, &folder).await {
            Ok(outcome) => outcome,
            Err(err) => {
                let failed = match &err {
                    AssetExportError::Resources(f) => f.failures.len(),
                    _ => 0,
                };
                self.record_asset_error(&asset, &stamp, &index, &err);
                AssetOutcome::Failed(
                    AssetError::new(asset.id.as_str(), index, err.to_string())
                        .with_failed_resources(failed),
                )
            }
        };
        (idx, outcome)
    }

    async fn export_asset(
        &self,
        asset: &Asset,
        stamp: &CaptureStamp,
        folder: &Path,
    ) -> std::result::Result<AssetOutcome, AssetExportError> {
        self.exporter
            .file_system()
            .ensure_dir(folder)
            .map_err(|source| AssetExportError::Folder {
                path: folder.to_path_buf(),
                source,
            })?;

        let mut registry = NameRegistry::new();
        let exported = self
            .exporter
            .export_resources(asset, stamp, folder, self.settings.incremental, &mut registry)
            .await
            .map_err(AssetExportError::Resources)?;

        let written = exported
            .iter()
            .filter(|e| e.status == ExportStatus::Written)
            .count();
        let already_present = exported.len() - written;

        let mut sidecar = false;
        if self.settings.metadata {
            write_sidecar(
                asset,
                stamp,
                folder,
                &exported,
                self.exporter.lookup(),
                self.exporter.file_system(),
                &mut registry,
            )
            .await
            .map_err(AssetExportError::Sidecar)?;
            sidecar = true;
        }

        tracing::debug!(
            asset_id = %asset.id,
            written,
            already_present,
            folder = %folder.display(),
            "Asset exported"
        );

        Ok(AssetOutcome::Exported {
            written,
            already_present,
            sidecar,
        })
    }

    fn record_asset_error(
        &self,
        asset: &Asset,
        stamp: &CaptureStamp,
        index: &str,
        err: &AssetExportError,
    ) {
        let ledger = self.exporter.ledger();
        let ts = iso_now();
        let mut line = format!("{ts} asset={} index={index} {}", asset.id, err.details());

        if let AssetExportError::Resources(failure) = err {
            ledger.record_block(
                &format!("{ts} asset.failed.details asset={} index={index}", asset.id),
                &failure.failure_lines(),
            );
            line.push_str(&format!(
                " capture={stamp} px={} failedCount={}",
                asset.pixel_size(),
                failure.failures.len()
            ));
        }

        tracing::error!(asset_id = %asset.id, index = %index, error = %err, "Asset export failed");
        ledger.record_line(&line);
    }
}
