//! File-copy resource writer

use crate::adapters::traits::{ResourceWriter, WriteOptions};
use crate::domain::{Asset, Resource, ResourceWriteError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

/// Unique sibling of `destination` that a copy is staged into
fn staging_path(destination: &Path) -> PathBuf {
    let seq = STAGING_SEQ.fetch_add(1, Ordering::Relaxed);
    let name = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    destination.with_file_name(format!(".{name}.{}.{seq}.part", std::process::id()))
}

/// [`ResourceWriter`] that copies the file named by the resource locator
///
/// Relative locators are resolved against the base directory, normally the
/// directory holding the library manifest. Content is copied into a staging
/// file and renamed over the destination, so two writers targeting the same
/// name leave one complete file (the last rename) rather than mixed bytes.
#[derive(Debug, Clone)]
pub struct FileCopyWriter {
    base_dir: PathBuf,
}

impl FileCopyWriter {
    /// Creates a writer resolving locators against `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn source_path(&self, locator: &str) -> PathBuf {
        let path = Path::new(locator);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

#[async_trait]
impl ResourceWriter for FileCopyWriter {
    async fn write_resource(
        &self,
        asset: &Asset,
        resource: &Resource,
        destination: &Path,
        options: &WriteOptions,
    ) -> Result<(), ResourceWriteError> {
        if resource.locator.is_empty() {
            return Err(ResourceWriteError::NotFound(format!(
                "resource {} of asset {} has no content path",
                resource.kind, asset.id
            )));
        }

        let source = self.source_path(&resource.locator);
        tracing::debug!(
            asset_id = %asset.id,
            source = %source.display(),
            dest = %destination.display(),
            network_allowed = options.network_access_allowed,
            "Copying resource"
        );

        let staging = staging_path(destination);
        if let Err(e) = tokio::fs::copy(&source, &staging).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(ResourceWriteError::from_io(
                format!("copy {} -> {}", source.display(), destination.display()),
                e,
            ));
        }

        if let Err(e) = tokio::fs::rename(&staging, destination).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(ResourceWriteError::from_io(
                format!("rename into {}", destination.display()),
                e,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetId, ResourceKind};
    use tempfile::TempDir;

    fn asset() -> Asset {
        Asset::builder()
            .id(AssetId::new("asset-1").unwrap())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_copies_relative_locator() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("originals")).unwrap();
        std::fs::write(temp.path().join("originals/IMG.JPG"), b"jpeg bytes").unwrap();

        let writer = FileCopyWriter::new(temp.path());
        let resource = Resource::new(ResourceKind::Photo, "IMG.JPG", "public.jpeg")
            .with_locator("originals/IMG.JPG");
        let dest = temp.path().join("out.jpg");

        writer
            .write_resource(&asset(), &resource, &dest, &WriteOptions::default())
            .await
            .unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"jpeg bytes");
    }

    #[tokio::test]
    async fn test_concurrent_writes_to_same_name_leave_one_whole_file() {
        let temp = TempDir::new().unwrap();
        let first = vec![b'a'; 256 * 1024];
        let second = vec![b'b'; 256 * 1024];
        std::fs::write(temp.path().join("a.jpg"), &first).unwrap();
        std::fs::write(temp.path().join("b.jpg"), &second).unwrap();

        let writer = FileCopyWriter::new(temp.path());
        let dest = temp.path().join("20250102030405.jpg");
        let res_a = Resource::new(ResourceKind::Photo, "A.JPG", "public.jpeg").with_locator("a.jpg");
        let res_b = Resource::new(ResourceKind::Photo, "B.JPG", "public.jpeg").with_locator("b.jpg");
        let options = WriteOptions::default();
        let asset = asset();

        let (ra, rb) = tokio::join!(
            writer.write_resource(&asset, &res_a, &dest, &options),
            writer.write_resource(&asset, &res_b, &dest, &options),
        );
        ra.unwrap();
        rb.unwrap();

        let written = std::fs::read(&dest).unwrap();
        assert!(written == first || written == second);

        let leftovers: Vec<_> = std::fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_missing_source_is_not_found() {
        let temp = TempDir::new().unwrap();
        let writer = FileCopyWriter::new(temp.path());
        let resource =
            Resource::new(ResourceKind::Photo, "IMG.JPG", "public.jpeg").with_locator("gone.jpg");
        let dest = temp.path().join("out.jpg");

        let err = writer
            .write_resource(&asset(), &resource, &dest, &WriteOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "notFound");
        assert!(!dest.exists());
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_empty_locator() {
        let temp = TempDir::new().unwrap();
        let writer = FileCopyWriter::new(temp.path());
        let resource = Resource::new(ResourceKind::Video, "", "public.mpeg-4");

        let err = writer
            .write_resource(&asset(), &resource, &temp.path().join("x.mp4"), &WriteOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ResourceWriteError::NotFound(_)));
    }
}
