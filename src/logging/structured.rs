//! Structured logging setup using tracing
//!
//! Two sinks make up the debug stream:
//! - stderr, at the configured level, raised to `debug` by `--debug`
//! - an optional log file receiving every `debug` event, written by a
//!   single non-blocking worker so concurrent assets never interleave
//!   partial lines
//!
//! Each line starts with an RFC 3339 timestamp with fractional seconds.
//!
//! # Example
//!
//! ```no_run
//! use photos_export::logging::init_logging;
//! use photos_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//! ```

use crate::config::LoggingConfig;
use crate::domain::{ExporterError, Result};
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Guard that must be kept alive for the duration of the program
/// so buffered file log lines are flushed on exit
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    fn new(file_guard: Option<WorkerGuard>) -> Self {
        Self {
            _file_guard: file_guard,
        }
    }

    /// Whether a file sink is active
    pub fn has_file_sink(&self) -> bool {
        self._file_guard.is_some()
    }
}

/// Initialize the logging system
///
/// # Arguments
///
/// * `log_level_str` - stderr level (trace, debug, info, warn, error)
/// * `config` - logging configuration (debug flag, log file, format)
///
/// `RUST_LOG`, when set, replaces the computed filters.
///
/// # Errors
///
/// Returns a configuration error for an unknown level or format, or if the
/// log file's directory cannot be created.
pub fn init_logging(log_level_str: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let configured = parse_log_level(log_level_str)?;
    let json = parse_format(&config.format)?;

    // With a log file the debug stream goes there and stderr stays quiet
    let console_level = if config.debug && config.log_file.is_none() {
        Level::DEBUG
    } else {
        configured
    };

    let mut layers = Vec::new();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter(console_level));
    layers.push(console_layer.boxed());

    let file_guard = match &config.log_file {
        Some(log_file) => {
            let path = Path::new(log_file);
            let (dir, file_name) = split_log_path(path)?;
            std::fs::create_dir_all(&dir).map_err(|e| {
                ExporterError::Configuration(format!(
                    "Failed to create log directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;

            let appender = tracing_appender::rolling::never(&dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);

            let file_layer = if json {
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_writer(non_blocking)
                    .with_filter(env_filter(Level::DEBUG))
                    .boxed()
            } else {
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(non_blocking)
                    .with_filter(env_filter(Level::DEBUG))
                    .boxed()
            };
            layers.push(file_layer);
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| ExporterError::Configuration(format!("Failed to install logger: {e}")))?;

    tracing::debug!(
        debug = config.debug,
        log_file = ?config.log_file,
        format = %config.format,
        "Logging initialized"
    );

    Ok(LoggingGuard::new(file_guard))
}

fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("photos_export={}", level)))
}

fn split_log_path(path: &Path) -> Result<(std::path::PathBuf, std::ffi::OsString)> {
    let file_name = path.file_name().ok_or_else(|| {
        ExporterError::Configuration(format!("Log file path has no file name: {}", path.display()))
    })?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    Ok((dir, file_name.to_os_string()))
}

/// Parse log level from string
pub(crate) fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(ExporterError::Configuration(format!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            level_str
        ))),
    }
}

/// `true` for JSON, `false` for plain text
pub(crate) fn parse_format(format: &str) -> Result<bool> {
    match format.to_lowercase().as_str() {
        "text" => Ok(false),
        "json" => Ok(true),
        _ => Err(ExporterError::Configuration(format!(
            "Invalid log format: {}. Must be one of: text, json",
            format
        ))),
    }
}
