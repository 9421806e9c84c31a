//! Configuration management for the exporter.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Configuration files support:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `PHOTOS_EXPORT_<SECTION>_<KEY>` overrides
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use photos_export::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("photos-export.toml")?;
//!
//! println!("Library: {}", config.library.manifest);
//! println!("Export root: {}", config.export.export_root().display());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`LibraryConfig`] - Location of the library manifest
//! - [`ExportConfig`] - Destination, years, incremental and metadata switches
//! - [`LoggingConfig`] - Debug stream and log file
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [library]
//! manifest = "~/Pictures/library.json"
//!
//! [export]
//! directory = "${HOME}/Pictures/Exports"
//! incremental = true
//! metadata = true
//! start_year = 2023
//! end_year = 2025
//!
//! [logging]
//! debug = true
//! log_file = "export-debug.log"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, DEFAULT_CONFIG_FILE};
pub use schema::{ApplicationConfig, ExportConfig, ExporterConfig, LibraryConfig, LoggingConfig};
