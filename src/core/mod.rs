//! Core business logic for the exporter.
//!
//! # Modules
//!
//! - [`naming`] - Deterministic, collision-free destination filenames
//! - [`timestamp`] - Capture stamps, folder names and year ranges
//! - [`export`] - Resource pipeline, failure aggregation and coordination
//!
//! # Export Workflow
//!
//! 1. **Enumerate**: Ask the library for the assets captured in the date range
//! 2. **Place**: Pick the `YYYY/MM` folder from the local capture time
//! 3. **Name**: Give each resource a filename derived from its capture stamp
//! 4. **Write**: Skip or replace existing files, then invoke the writer
//! 5. **Record**: Append failures to the error ledger and continue
//! 6. **Report**: Generate the export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use photos_export::config::load_config;
//! use photos_export::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("photos-export.toml")?;
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let coordinator = ExportCoordinator::from_config(&config, shutdown_rx).await?;
//!
//! let summary = coordinator.execute_export().await?;
//! println!("{}", summary.completion_message());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod naming;
pub mod timestamp;
