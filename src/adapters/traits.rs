//! Collaborator traits for the export engine
//!
//! The engine never talks to a photo library, a content-type registry or the
//! disk directly. Everything goes through these traits so that the pipeline
//! can be exercised with in-memory mocks.

use crate::core::timestamp::DateRange;
use crate::domain::{Asset, Resource, ResourceWriteError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Enumerates assets from a media library
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Assets whose capture date falls within `range`
    ///
    /// Assets without a capture date are included; the caller decides how
    /// to place them.
    ///
    /// # Errors
    ///
    /// Returns an error if the library cannot be read. Enumeration errors are
    /// fatal to a run.
    async fn fetch_assets(&self, range: &DateRange) -> Result<Vec<Asset>>;

    /// Human-readable description of the library, for logs
    fn describe(&self) -> String;
}

/// Maps a content-type identifier to a preferred filename extension
pub trait ExtensionLookup: Send + Sync {
    /// Preferred extension without the leading dot, if any is known
    fn preferred_extension(&self, content_type: &str) -> Option<String>;
}

/// Options passed to every resource write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Whether content not available locally may be fetched over the network
    pub network_access_allowed: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            network_access_allowed: true,
        }
    }
}

/// Retrieves the content behind a resource and writes it to a path
#[async_trait]
pub trait ResourceWriter: Send + Sync {
    /// Writes `resource` of `asset` to `destination`
    ///
    /// # Errors
    ///
    /// Returns a [`ResourceWriteError`] describing why the content could not
    /// be produced. The caller records it and moves on.
    async fn write_resource(
        &self,
        asset: &Asset,
        resource: &Resource,
        destination: &Path,
        options: &WriteOptions,
    ) -> std::result::Result<(), ResourceWriteError>;
}

/// File system operations the exporter needs
pub trait FileSystem: Send + Sync {
    /// Whether anything exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Removes the file at `path`
    fn remove_file(&self, path: &Path) -> std::io::Result<()>;

    /// Size in bytes of the file at `path`
    fn file_size(&self, path: &Path) -> std::io::Result<u64>;

    /// Last modification time of the file at `path`
    fn modified(&self, path: &Path) -> std::io::Result<DateTime<Utc>>;

    /// Creates `path` and its parents
    ///
    /// Fails if `path` exists and is not a directory.
    fn ensure_dir(&self, path: &Path) -> std::io::Result<()>;
}
