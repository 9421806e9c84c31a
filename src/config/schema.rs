//! Configuration schema types
//!
//! This module defines the configuration structure that maps to the TOML
//! file. Every section is optional; an empty file yields a working
//! configuration that exports the current year of `library.json` into the
//! user's pictures folder.

use crate::core::timestamp::{current_year_range, year_range, DateRange};
use crate::domain::{ExporterError, Result};
use crate::logging::ledger::DEFAULT_LEDGER_NAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Earliest capture year accepted for a date range
pub const MIN_YEAR: i32 = 1970;
/// Latest capture year accepted for a date range
pub const MAX_YEAR: i32 = 9999;
/// Upper bound for `export.parallel_assets`
pub const MAX_PARALLEL_ASSETS: usize = 64;

/// Main exporter configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Media library location
    #[serde(default)]
    pub library: LibraryConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ExporterConfig {
    /// Loads, validates and returns the configuration at `path`
    ///
    /// Shorthand for [`crate::config::load_config`].
    ///
    /// # Errors
    ///
    /// Returns [`ExporterError::Configuration`] if the file is missing,
    /// malformed or invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        crate::config::loader::load_config(path)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.application.validate()?;
        self.library.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level for stderr (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Media library configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Path of the JSON library manifest
    #[serde(default = "default_manifest")]
    pub manifest: String,
}

impl LibraryConfig {
    /// Manifest path with a leading `~/` expanded
    pub fn manifest_path(&self) -> PathBuf {
        expand_home(&self.manifest)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.manifest.trim().is_empty() {
            return Err("library.manifest cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Export root; `~/` is expanded. Defaults to `<pictures>/Exports`
    #[serde(default)]
    pub directory: Option<String>,

    /// Keep files already present at their destination
    #[serde(default)]
    pub incremental: bool,

    /// Write a JSON metadata sidecar per asset
    #[serde(default)]
    pub metadata: bool,

    /// First capture year to export; defaults to the current year
    #[serde(default)]
    pub start_year: Option<i32>,

    /// Last capture year to export
    #[serde(default)]
    pub end_year: Option<i32>,

    /// Assets exported concurrently (1-64)
    #[serde(default = "default_parallel_assets")]
    pub parallel_assets: usize,

    /// Error ledger filename inside the export root
    #[serde(default = "default_error_log_name")]
    pub error_log_name: String,

    /// Allow the writer to fetch content that is not stored locally
    #[serde(default = "default_true")]
    pub network_access_allowed: bool,
}

impl ExportConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        for (key, year) in [("start_year", self.start_year), ("end_year", self.end_year)] {
            if let Some(year) = year {
                if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                    return Err(format!(
                        "Invalid export.{key} '{year}'. Expected a year between {MIN_YEAR} and {MAX_YEAR}"
                    ));
                }
            }
        }

        if let (Some(start), Some(end)) = (self.start_year, self.end_year) {
            if start > end {
                return Err(format!(
                    "export.start_year ({start}) must not be after export.end_year ({end})"
                ));
            }
        }

        if self.parallel_assets == 0 || self.parallel_assets > MAX_PARALLEL_ASSETS {
            return Err(format!(
                "export.parallel_assets must be between 1 and {MAX_PARALLEL_ASSETS}, got {}",
                self.parallel_assets
            ));
        }

        if self.error_log_name.trim().is_empty() {
            return Err("export.error_log_name cannot be empty".to_string());
        }
        if self.error_log_name.contains('/') || self.error_log_name.contains('\\') {
            return Err(format!(
                "export.error_log_name '{}' must be a file name, not a path",
                self.error_log_name
            ));
        }

        Ok(())
    }

    /// Applies `--year`, `--start-year` and `--end-year`
    ///
    /// `year` sets both bounds. A start or end year on its own also sets
    /// both bounds; given together they form a range.
    pub fn apply_year_flags(&mut self, year: Option<i32>, start: Option<i32>, end: Option<i32>) {
        let mut bounds = year.map(|y| (y, y));
        if let Some(s) = start {
            bounds = Some(match bounds {
                Some((_, e)) => (s, e),
                None => (s, s),
            });
        }
        if let Some(e) = end {
            bounds = Some(match bounds {
                Some((s, _)) => (s, e),
                None => (e, e),
            });
        }
        if let Some((s, e)) = bounds {
            self.start_year = Some(s);
            self.end_year = Some(e);
        }
    }

    /// Capture-date range to export
    ///
    /// With no years configured this is the current calendar year. A single
    /// configured bound is used for both ends.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a year cannot be represented.
    pub fn date_range(&self) -> Result<DateRange> {
        let (start, end) = match (self.start_year, self.end_year) {
            (None, None) => return Ok(current_year_range()),
            (Some(s), None) => (s, s),
            (None, Some(e)) => (e, e),
            (Some(s), Some(e)) => (s, e),
        };
        year_range(start, end).ok_or_else(|| {
            ExporterError::Configuration(format!("Invalid year range {start}-{end}"))
        })
    }

    /// Export root directory
    ///
    /// Uses `directory` when set, expanding a leading `~/`. Otherwise the
    /// platform pictures directory plus `Exports`.
    pub fn export_root(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => expand_home(dir),
            None => default_export_root(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            incremental: false,
            metadata: false,
            start_year: None,
            end_year: None,
            parallel_assets: default_parallel_assets(),
            error_log_name: default_error_log_name(),
            network_access_allowed: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Emit the debug stream (to stderr, or to `log_file` when set)
    #[serde(default)]
    pub debug: bool,

    /// File receiving the debug stream
    #[serde(default)]
    pub log_file: Option<String>,

    /// Line format for the log file (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl LoggingConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.format.as_str()) {
            return Err(format!(
                "Invalid logging.format '{}'. Must be one of: {}",
                self.format,
                valid_formats.join(", ")
            ));
        }

        if let Some(path) = &self.log_file {
            if path.trim().is_empty() {
                return Err("logging.log_file cannot be empty when set".to_string());
            }
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            debug: false,
            log_file: None,
            format: default_log_format(),
        }
    }
}

fn expand_home(dir: &str) -> PathBuf {
    if dir == "~" {
        if let Some(base) = directories::BaseDirs::new() {
            return base.home_dir().to_path_buf();
        }
    }
    if let Some(rest) = dir.strip_prefix("~/") {
        if let Some(base) = directories::BaseDirs::new() {
            return base.home_dir().join(rest);
        }
    }
    PathBuf::from(dir)
}

fn default_export_root() -> PathBuf {
    if let Some(pictures) = directories::UserDirs::new().and_then(|u| u.picture_dir().map(Path::to_path_buf)) {
        return pictures.join("Exports");
    }
    match directories::BaseDirs::new() {
        Some(base) => base.home_dir().join("Pictures").join("Exports"),
        None => PathBuf::from("Exports"),
    }
}

// Default value functions
fn default_log_level() -> String {
    "warn".to_string()
}

fn default_manifest() -> String {
    "library.json".to_string()
}

fn default_parallel_assets() -> usize {
    1
}

fn default_error_log_name() -> String {
    DEFAULT_LEDGER_NAME.to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_format() -> String {
    "text".to_string()
}
