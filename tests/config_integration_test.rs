//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables are serialized through
//! `ENV_MUTEX` to avoid interference between tests.

use photos_export::config::{load_config, ExporterConfig};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("PHOTOS_EXPORT_APPLICATION_LOG_LEVEL");
    std::env::remove_var("PHOTOS_EXPORT_EXPORT_DIRECTORY");
    std::env::remove_var("PHOTOS_EXPORT_EXPORT_INCREMENTAL");
    std::env::remove_var("PHOTOS_EXPORT_EXPORT_PARALLEL_ASSETS");
    std::env::remove_var("PHOTOS_EXPORT_LOGGING_DEBUG");
    std::env::remove_var("TEST_PHOTOS_EXPORT_ROOT");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[library]
manifest = "/srv/photos/library.json"

[export]
directory = "/srv/exports"
incremental = true
metadata = true
start_year = 2020
end_year = 2023
parallel_assets = 8
error_log_name = "failures.log"
network_access_allowed = false

[logging]
debug = true
log_file = "/tmp/photos-export-debug.log"
format = "json"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.library.manifest, "/srv/photos/library.json");
    assert_eq!(config.export.directory.as_deref(), Some("/srv/exports"));
    assert!(config.export.incremental);
    assert!(config.export.metadata);
    assert_eq!(config.export.start_year, Some(2020));
    assert_eq!(config.export.end_year, Some(2023));
    assert_eq!(config.export.parallel_assets, 8);
    assert_eq!(config.export.error_log_name, "failures.log");
    assert!(!config.export.network_access_allowed);
    assert!(config.logging.debug);
    assert_eq!(config.logging.format, "json");
}

#[test]
fn test_from_file_matches_load_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[export]\nmetadata = true\n");
    let config = ExporterConfig::from_file(file.path()).unwrap();
    assert!(config.export.metadata);
    assert!(!config.export.incremental);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_PHOTOS_EXPORT_ROOT", "/mnt/backup");

    let file = write_config("[export]\ndirectory = \"${TEST_PHOTOS_EXPORT_ROOT}/photos\"\n");
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.export.directory.as_deref(), Some("/mnt/backup/photos"));

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[export]\ndirectory = \"${TEST_PHOTOS_EXPORT_ROOT}\"\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_PHOTOS_EXPORT_ROOT"));
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("PHOTOS_EXPORT_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("PHOTOS_EXPORT_EXPORT_DIRECTORY", "/override/exports");
    std::env::set_var("PHOTOS_EXPORT_EXPORT_INCREMENTAL", "true");
    std::env::set_var("PHOTOS_EXPORT_EXPORT_PARALLEL_ASSETS", "3");
    std::env::set_var("PHOTOS_EXPORT_LOGGING_DEBUG", "true");

    let file = write_config("[application]\nlog_level = \"info\"\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.export.directory.as_deref(), Some("/override/exports"));
    assert!(config.export.incremental);
    assert_eq!(config.export.parallel_assets, 3);
    assert!(config.logging.debug);

    cleanup_env_vars();
}

#[test]
fn test_invalid_override_is_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("PHOTOS_EXPORT_EXPORT_PARALLEL_ASSETS", "many");

    let file = write_config("[export]\nparallel_assets = 2\n");
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.export.parallel_assets, 2);

    cleanup_env_vars();
}

#[test]
fn test_validation_errors() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    for contents in [
        "[application]\nlog_level = \"loud\"\n",
        "[export]\nstart_year = 1969\n",
        "[export]\nend_year = 99\n",
        "[export]\nstart_year = 2024\nend_year = 2020\n",
        "[export]\nparallel_assets = 0\n",
        "[export]\nerror_log_name = \"\"\n",
        "[logging]\nformat = \"yaml\"\n",
    ] {
        let file = write_config(contents);
        let err = load_config(file.path()).unwrap_err();
        assert!(
            err.to_string().contains("Configuration validation failed"),
            "expected validation failure for {contents:?}, got {err}"
        );
    }
}

#[test]
fn test_malformed_toml() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[export\nincremental = true\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML"));
}

#[test]
fn test_non_numeric_year_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[export]\nstart_year = \"abcd\"\n");
    assert!(load_config(file.path()).is_err());
}
