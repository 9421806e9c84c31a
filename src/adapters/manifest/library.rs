//! Manifest-backed asset source

use super::models::ManifestDocument;
use crate::adapters::traits::AssetSource;
use crate::core::timestamp::DateRange;
use crate::domain::context::ResultExt;
use crate::domain::{Asset, ExporterError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// [`AssetSource`] reading a JSON library manifest
///
/// The manifest is parsed once when the library is opened. Resource paths
/// in the manifest are resolved relative to [`ManifestLibrary::base_dir`].
#[derive(Debug, Clone)]
pub struct ManifestLibrary {
    path: PathBuf,
    base_dir: PathBuf,
    assets: Vec<Asset>,
}

impl ManifestLibrary {
    /// Reads and parses the manifest at `path`
    ///
    /// # Errors
    ///
    /// Returns [`ExporterError::Library`] if the file cannot be read or does
    /// not describe valid assets.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| {
                ExporterError::Library(format!(
                    "Failed to read library manifest {}: {e}",
                    path.display()
                ))
            })?;

        let document: ManifestDocument = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid library manifest {}", path.display()))?;

        let assets = document
            .assets
            .iter()
            .map(|a| a.to_domain())
            .collect::<Result<Vec<_>>>()?;

        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        tracing::debug!(
            manifest = %path.display(),
            version = document.version,
            assets = assets.len(),
            "Library manifest loaded"
        );

        Ok(Self {
            path,
            base_dir,
            assets,
        })
    }

    /// Directory resource paths are resolved against
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Number of assets in the manifest, before date filtering
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether the manifest lists no assets
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[async_trait]
impl AssetSource for ManifestLibrary {
    async fn fetch_assets(&self, range: &DateRange) -> Result<Vec<Asset>> {
        let mut selected: Vec<Asset> = self
            .assets
            .iter()
            .filter(|asset| match &asset.capture_date {
                Some(date) => range.contains(date),
                None => true,
            })
            .cloned()
            .collect();

        // Oldest first; undated assets keep their manifest order at the end
        selected.sort_by(|a, b| match (&a.capture_date, &b.capture_date) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        Ok(selected)
    }

    fn describe(&self) -> String {
        format!("manifest {}", self.path.display())
    }
}
