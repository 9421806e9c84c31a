//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ExporterConfig;
use crate::domain::errors::ExporterError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Configuration file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "photos-export.toml";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ExporterConfig
/// 4. Applies environment variable overrides (PHOTOS_EXPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use photos_export::config::loader::load_config;
///
/// let config = load_config("photos-export.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ExporterConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ExporterError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ExporterError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ExporterConfig = toml::from_str(&contents)
        .map_err(|e| ExporterError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);
    validate(&config)?;

    Ok(config)
}

/// Loads `path` if given, else `photos-export.toml` if present, else defaults
///
/// Environment overrides and validation apply in every case.
///
/// # Errors
///
/// Returns an error if an explicitly named file is missing or any loaded
/// configuration is invalid.
pub fn load_config_or_default(path: Option<&str>) -> Result<ExporterConfig> {
    if let Some(path) = path {
        return load_config(path);
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        return load_config(default_path);
    }

    tracing::debug!("No configuration file found, using defaults");
    let mut config = ExporterConfig::default();
    apply_env_overrides(&mut config);
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ExporterConfig) -> Result<()> {
    config.validate().map_err(|e| {
        ExporterError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ExporterError::Configuration(format!("Invalid placeholder pattern: {}", e)))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(ExporterError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using the PHOTOS_EXPORT_* prefix
///
/// Variables follow the pattern PHOTOS_EXPORT_<SECTION>_<KEY>, for example
/// PHOTOS_EXPORT_EXPORT_DIRECTORY or PHOTOS_EXPORT_LOGGING_DEBUG. Values that
/// do not parse are ignored.
fn apply_env_overrides(config: &mut ExporterConfig) {
    if let Ok(val) = std::env::var("PHOTOS_EXPORT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("PHOTOS_EXPORT_LIBRARY_MANIFEST") {
        config.library.manifest = val;
    }

    if let Ok(val) = std::env::var("PHOTOS_EXPORT_EXPORT_DIRECTORY") {
        config.export.directory = Some(val);
    }
    if let Ok(val) = std::env::var("PHOTOS_EXPORT_EXPORT_INCREMENTAL") {
        if let Ok(flag) = val.parse() {
            config.export.incremental = flag;
        }
    }
    if let Ok(val) = std::env::var("PHOTOS_EXPORT_EXPORT_METADATA") {
        if let Ok(flag) = val.parse() {
            config.export.metadata = flag;
        }
    }
    if let Ok(val) = std::env::var("PHOTOS_EXPORT_EXPORT_START_YEAR") {
        if let Ok(year) = val.parse() {
            config.export.start_year = Some(year);
        }
    }
    if let Ok(val) = std::env::var("PHOTOS_EXPORT_EXPORT_END_YEAR") {
        if let Ok(year) = val.parse() {
            config.export.end_year = Some(year);
        }
    }
    if let Ok(val) = std::env::var("PHOTOS_EXPORT_EXPORT_PARALLEL_ASSETS") {
        if let Ok(parallel) = val.parse() {
            config.export.parallel_assets = parallel;
        }
    }
    if let Ok(val) = std::env::var("PHOTOS_EXPORT_EXPORT_NETWORK_ACCESS_ALLOWED") {
        if let Ok(flag) = val.parse() {
            config.export.network_access_allowed = flag;
        }
    }

    if let Ok(val) = std::env::var("PHOTOS_EXPORT_LOGGING_DEBUG") {
        if let Ok(flag) = val.parse() {
            config.logging.debug = flag;
        }
    }
    if let Ok(val) = std::env::var("PHOTOS_EXPORT_LOGGING_LOG_FILE") {
        config.logging.log_file = Some(val);
    }
    if let Ok(val) = std::env::var("PHOTOS_EXPORT_LOGGING_FORMAT") {
        config.logging.format = val;
    }
}
