//! Export command implementation
//!
//! This module implements the `export` command, which copies every asset of
//! the library captured in the selected years into `YYYY/MM` folders.

use crate::config::{load_config_or_default, ExporterConfig, LoggingConfig};
use crate::core::export::ExportCoordinator;
use crate::domain::ExporterError;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Keep files that already exist at their destination
    #[arg(long)]
    pub incremental: bool,

    /// Write a JSON metadata sidecar next to each asset
    #[arg(long)]
    pub metadata: bool,

    /// Export a single year (sets both start and end year)
    #[arg(long, value_name = "YYYY")]
    pub year: Option<i32>,

    /// First year to export
    #[arg(long, value_name = "YYYY")]
    pub start_year: Option<i32>,

    /// Last year to export
    #[arg(long, value_name = "YYYY")]
    pub end_year: Option<i32>,

    /// Override the export directory
    #[arg(long, value_name = "DIR")]
    pub export_directory: Option<String>,

    /// Override the library manifest path
    #[arg(long, value_name = "PATH")]
    pub library: Option<String>,

    /// Emit debug logging (to stderr, or to --log-file when given)
    #[arg(long)]
    pub debug: bool,

    /// Write debug logging to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<String>,

    /// Number of assets exported concurrently
    #[arg(long, value_name = "N")]
    pub parallel_assets: Option<usize>,
}

impl ExportArgs {
    /// Applies the logging flags to `config`
    ///
    /// `--log-file` implies `--debug`.
    pub fn apply_logging_overrides(&self, config: &mut LoggingConfig) {
        if self.debug {
            config.debug = true;
        }
        if let Some(path) = &self.log_file {
            config.debug = true;
            config.log_file = Some(path.clone());
        }
    }

    /// Applies every CLI override to `config`
    pub fn apply_overrides(&self, config: &mut ExporterConfig) {
        if self.incremental {
            config.export.incremental = true;
        }
        if self.metadata {
            config.export.metadata = true;
        }
        config
            .export
            .apply_year_flags(self.year, self.start_year, self.end_year);
        if let Some(dir) = &self.export_directory {
            tracing::info!(directory = %dir, "Overriding export directory from CLI");
            config.export.directory = Some(dir.clone());
        }
        if let Some(library) = &self.library {
            tracing::info!(manifest = %library, "Overriding library manifest from CLI");
            config.library.manifest = library.clone();
        }
        if let Some(parallel) = self.parallel_assets {
            config.export.parallel_assets = parallel;
        }
        self.apply_logging_overrides(&mut config.logging);
    }

    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: Option<&str>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2); // Configuration error exit code
        }

        let coordinator = match ExportCoordinator::from_config(&config, shutdown_signal).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(match e {
                    ExporterError::Configuration(_) => 2,
                    _ => 5,
                });
            }
        };

        let settings = coordinator.settings();
        println!(
            "Exporting {} to {}",
            config.library.manifest_path().display(),
            settings.export_root.display()
        );

        let summary = match coordinator.execute_export().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        println!("{}", summary.completion_message());
        if summary.resources_already_present > 0 {
            println!(
                "  {} files already present were kept",
                summary.resources_already_present
            );
        }
        if summary.failed_assets > 0 {
            println!("  {} assets failed", summary.failed_assets);
        }
        if let Some(path) = &summary.ledger_path {
            println!("Errors logged to: {}", path.display());
        }

        let exit_code = if summary.interrupted {
            println!(
                "Export interrupted, {} assets not started. Re-run with --incremental to continue.",
                summary.skipped_assets
            );
            tracing::info!("Export interrupted by user signal");
            130 // SIGINT exit code (standard Unix convention)
        } else if summary.failed_assets > 0 {
            1 // Partial success
        } else {
            0
        };

        Ok(exit_code)
    }
}
