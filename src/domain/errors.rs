//! Domain error types
//!
//! This module defines the error hierarchy for the exporter.
//! Collaborator failures are mapped into these types so that no third-party
//! error type leaks through the public API.

use thiserror::Error;

/// Main exporter error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum ExporterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Asset library enumeration errors
    #[error("Library error: {0}")]
    Library(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error ledger could not be written
    #[error("Error ledger error: {0}")]
    Ledger(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors reported by a resource writer
///
/// A writer retrieves the content behind one resource (possibly over the
/// network) and places it at a destination path.
#[derive(Debug, Error)]
pub enum ResourceWriteError {
    /// Content had to be fetched but the network was unavailable or disallowed
    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),

    /// Destination or source could not be accessed
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Resource content does not exist
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Request was cancelled before completion
    #[error("Request cancelled: {0}")]
    Cancelled(String),

    /// Underlying I/O failure
    #[error("I/O failure: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Any other writer failure
    #[error("{0}")]
    Other(String),
}

impl ResourceWriteError {
    /// Short machine-readable name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NetworkUnavailable(_) => "network",
            Self::PermissionDenied(_) => "permission",
            Self::NotFound(_) => "notFound",
            Self::Cancelled(_) => "cancelled",
            Self::Io { .. } => "io",
            Self::Other(_) => "other",
        }
    }

    /// Stable numeric code for the failure kind
    pub fn code(&self) -> i32 {
        match self {
            Self::NetworkUnavailable(_) => 1,
            Self::PermissionDenied(_) => 2,
            Self::NotFound(_) => 3,
            Self::Cancelled(_) => 4,
            Self::Io { .. } => 5,
            Self::Other(_) => 99,
        }
    }

    /// Maps an I/O error onto the closest writer failure kind
    pub fn from_io(message: impl Into<String>, source: std::io::Error) -> Self {
        let message = message.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(format!("{message}: {source}")),
            std::io::ErrorKind::PermissionDenied => {
                Self::PermissionDenied(format!("{message}: {source}"))
            }
            _ => Self::Io { message, source },
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ExporterError {
    fn from(err: std::io::Error) -> Self {
        ExporterError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ExporterError {
    fn from(err: serde_json::Error) -> Self {
        ExporterError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ExporterError {
    fn from(err: toml::de::Error) -> Self {
        ExporterError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exporter_error_display() {
        let err = ExporterError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: ExporterError = io_err.into();
        assert!(matches!(err, ExporterError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: ExporterError = json_err.into();
        assert!(matches!(err, ExporterError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: ExporterError = toml_err.into();
        assert!(matches!(err, ExporterError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_write_error_from_io_maps_kinds() {
        let not_found = ResourceWriteError::from_io(
            "copy",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(not_found.kind(), "notFound");
        assert_eq!(not_found.code(), 3);

        let denied = ResourceWriteError::from_io(
            "copy",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        );
        assert_eq!(denied.kind(), "permission");

        let other = ResourceWriteError::from_io(
            "copy",
            std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        );
        assert_eq!(other.kind(), "io");
        assert!(std::error::Error::source(&other).is_some());
    }

    #[test]
    fn test_write_error_implements_std_error() {
        let err = ResourceWriteError::NetworkUnavailable("offline".to_string());
        let _: &dyn std::error::Error = &err;
        assert_eq!(err.to_string(), "Network unavailable: offline");
    }
}
