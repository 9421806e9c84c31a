//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = crate::config::DEFAULT_CONFIG_FILE)]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point library.manifest at your library manifest");
                println!("  2. Set export.directory, or keep the default <Pictures>/Exports");
                println!("  3. Validate configuration: photos-export validate-config");
                println!("  4. Run export: photos-export export --incremental");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Photos Export Configuration File

[application]
log_level = "warn"

[library]
manifest = "library.json"

[export]
# directory = "~/Pictures/Exports"
incremental = false
metadata = false
parallel_assets = 1

[logging]
debug = false
format = "text"
"#
        .to_string()
    }

    /// Generate configuration with every option explained
    fn generate_config_with_examples() -> String {
        r#"# Photos Export Configuration File
#
# Every setting can also be overridden with PHOTOS_EXPORT_<SECTION>_<KEY>,
# e.g. PHOTOS_EXPORT_EXPORT_DIRECTORY. Values may reference environment
# variables with ${VAR_NAME}.

# ============================================================================
# Application
# ============================================================================
[application]
# Log level for stderr: trace | debug | info | warn | error
log_level = "info"

# ============================================================================
# Library
# ============================================================================
[library]
# JSON manifest listing assets and their resources. Resource paths are
# resolved relative to the manifest's directory.
manifest = "~/Pictures/library.json"

# ============================================================================
# Export
# ============================================================================
[export]
# Destination root; files land in <directory>/YYYY/MM/
directory = "${HOME}/Pictures/Exports"

# Keep files that already exist instead of replacing them
incremental = true

# Write a JSON sidecar with asset metadata next to each asset's files
metadata = true

# Capture years to export (inclusive). Without either, the current year
# is exported. A single bound exports just that year.
# Any of --year, --start-year or --end-year on the command line replaces
# BOTH bounds below; --start-year alone exports only that year.
start_year = 2022
end_year = 2025

# Assets exported concurrently (1-64). Resources of one asset are always
# written one after the other.
parallel_assets = 4

# Failures are appended to this file inside the export directory
error_log_name = "export_errors.log"

# Allow the writer to download content that is not stored locally
network_access_allowed = true

# ============================================================================
# Logging
# ============================================================================
[logging]
# Emit the debug stream
debug = false

# Send the debug stream to a file instead of stderr
# log_file = "/tmp/photos-export.log"

# Log file line format: text | json
format = "text"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use tempfile::TempDir;

    #[test]
    fn test_generate_minimal_config() {
        let config = InitArgs::generate_minimal_config();
        assert!(config.contains("[application]"));
        assert!(config.contains("[library]"));
        assert!(config.contains("[export]"));
    }

    #[test]
    fn test_minimal_config_loads() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("photos-export.toml");
        fs::write(&path, InitArgs::generate_minimal_config()).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.library.manifest, "library.json");
    }

    #[test]
    fn test_generate_config_with_examples() {
        let config = InitArgs::generate_config_with_examples();
        assert!(config.contains("parallel_assets"));
        assert!(config.contains("error_log_name"));
        assert!(config.contains("${HOME}"));
        assert!(config.contains("replaces\n# BOTH bounds"));
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("existing.toml");
        fs::write(&path, "keep me").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().into_owned(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");

        let forced = InitArgs { force: true, ..args };
        assert_eq!(forced.execute().await.unwrap(), 0);
        assert!(fs::read_to_string(&path).unwrap().contains("[export]"));
    }
}
