//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the exporter configuration file.

use crate::config::load_config_or_default;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let shown_path = config_path.unwrap_or(crate::config::DEFAULT_CONFIG_FILE);
        tracing::info!(config_path = %shown_path, "Validating configuration");

        println!("Validating configuration file: {shown_path}");
        println!();

        // Loading also validates
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let range = match config.export.date_range() {
            Ok(r) => r,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Library Manifest: {}", config.library.manifest_path().display());
        println!("  Export Directory: {}", config.export.export_root().display());
        println!(
            "  Date Range: {} to {}",
            range.start.format("%Y-%m-%d"),
            range.end.format("%Y-%m-%d")
        );
        println!("  Incremental: {}", config.export.incremental);
        println!("  Metadata Sidecars: {}", config.export.metadata);
        println!("  Parallel Assets: {}", config.export.parallel_assets);
        println!("  Error Ledger: {}", config.export.error_log_name);
        println!(
            "  Debug Log: {}",
            match (&config.logging.log_file, config.logging.debug) {
                (Some(path), _) => path.clone(),
                (None, true) => "stderr".to_string(),
                (None, false) => "off".to_string(),
            }
        );
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[export]\nincremental = true\n").unwrap();
        file.flush().unwrap();

        let path = file.path().to_string_lossy().into_owned();
        let code = ValidateArgs {}.execute(Some(&path)).await.unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_validate_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[export]\nparallel_assets = 0\n").unwrap();
        file.flush().unwrap();

        let path = file.path().to_string_lossy().into_owned();
        let code = ValidateArgs {}.execute(Some(&path)).await.unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_validate_missing_file() {
        let code = ValidateArgs {}
            .execute(Some("/nonexistent/photos-export.toml"))
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
