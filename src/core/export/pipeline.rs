//! Per-asset resource export pipeline
//!
//! For one asset, every resource is given a destination name, the
//! incremental/overwrite policy is applied, and the writer is invoked.
//! Resource failures are recorded and the next resource is tried; the
//! asset fails as a whole only after every resource has been attempted.

use super::failure::{error_details, AggregateFailure, AssetSummary, ResourceFailure};
use crate::adapters::traits::{ExtensionLookup, FileSystem, ResourceWriter, WriteOptions};
use crate::core::naming::{resource_seed, FilenameAssigner, NameRegistry};
use crate::core::timestamp::{iso_now, CaptureStamp};
use crate::domain::{Asset, Resource, ResourceWriteError};
use crate::logging::ErrorLedger;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// How a resource ended up at its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStatus {
    /// The writer produced the file during this run
    Written,
    /// Incremental mode found the file already present and left it alone
    AlreadyPresent,
}

/// A resource whose destination file exists after the export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedResource {
    pub resource: Resource,
    pub destination: PathBuf,
    pub status: ExportStatus,
}

impl ExportedResource {
    /// Final path component of the destination
    pub fn file_name(&self) -> String {
        file_name_of(&self.destination)
    }
}

/// Exports the resources of one asset
///
/// Holds the collaborators shared by all assets of a run. A single exporter
/// may serve several assets concurrently; per-asset state lives in the
/// [`NameRegistry`] passed to each call.
pub struct ResourceExporter {
    writer: Arc<dyn ResourceWriter>,
    lookup: Arc<dyn ExtensionLookup>,
    fs: Arc<dyn FileSystem>,
    ledger: Arc<ErrorLedger>,
    options: WriteOptions,
}

impl ResourceExporter {
    pub fn new(
        writer: Arc<dyn ResourceWriter>,
        lookup: Arc<dyn ExtensionLookup>,
        fs: Arc<dyn FileSystem>,
        ledger: Arc<ErrorLedger>,
    ) -> Self {
        Self {
            writer,
            lookup,
            fs,
            ledger,
            options: WriteOptions::default(),
        }
    }

    /// Sets the options handed to the writer
    pub fn with_write_options(mut self, options: WriteOptions) -> Self {
        self.options = options;
        self
    }

    /// Extension lookup used for naming, shared with the sidecar writer
    pub fn lookup(&self) -> &dyn ExtensionLookup {
        self.lookup.as_ref()
    }

    /// File system handle
    pub fn file_system(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    /// Error ledger
    pub fn ledger(&self) -> &ErrorLedger {
        &self.ledger
    }

    /// Exports every resource of `asset` into `folder`
    ///
    /// Resources are processed one at a time in library order. Names are
    /// claimed in `registry`, which the caller may reuse afterwards (for the
    /// metadata sidecar).
    ///
    /// Returns the resources whose destination now exists, or an
    /// [`AggregateFailure`] listing the ones the writer could not produce.
    /// A resource whose existing destination could not be removed is
    /// skipped; it is recorded in the ledger but appears in neither list.
    pub async fn export_resources(
        &self,
        asset: &Asset,
        stamp: &CaptureStamp,
        folder: &Path,
        incremental: bool,
        registry: &mut NameRegistry,
    ) -> Result<Vec<ExportedResource>, AggregateFailure> {
        let total = asset.resources.len();
        tracing::debug!(asset_id = %asset.id, count = total, "Exporting asset resources");

        let assigner = FilenameAssigner::new(self.lookup.as_ref());
        let mut exported = Vec::with_capacity(total);
        let mut failures = Vec::new();

        for (idx, resource) in asset.resources.iter().enumerate() {
            let file_name = assigner.assign(
                stamp,
                &resource.original_filename,
                &resource_seed(asset, resource),
                &resource.content_type,
                registry,
            );
            let destination = folder.join(&file_name);
            let exists = self.fs.exists(&destination);

            if incremental && exists {
                tracing::debug!(
                    asset_id = %asset.id,
                    resource_type = %resource.kind,
                    dest = %destination.display(),
                    "Skipping existing resource"
                );
                exported.push(ExportedResource {
                    resource: resource.clone(),
                    destination,
                    status: ExportStatus::AlreadyPresent,
                });
                continue;
            }

            if !incremental && exists {
                tracing::debug!(dest = %destination.display(), "Removing existing file before overwrite");
                if let Err(e) = self.fs.remove_file(&destination) {
                    let err = ResourceWriteError::from_io("remove existing file", e);
                    let line = resource_line(
                        asset,
                        stamp,
                        resource,
                        &destination,
                        &format!("removeExistingFailed {}", error_details(&err)),
                    );
                    tracing::error!(asset_id = %asset.id, "{}", line);
                    self.ledger.record_line(&line);
                    continue;
                }
            }

            tracing::debug!(
                asset_id = %asset.id,
                index = %format!("{}/{}", idx + 1, total),
                resource_type = %resource.kind,
                uti = %resource.content_type,
                name = %resource.original_filename,
                dest = %destination.display(),
                "Writing resource"
            );

            if let Err(e) = self
                .writer
                .write_resource(asset, resource, &destination, &self.options)
                .await
            {
                let detail = error_details(&e);
                let line = resource_line(asset, stamp, resource, &destination, &detail);
                tracing::error!(asset_id = %asset.id, "{}", line);
                self.ledger.record_line(&line);

                failures.push(ResourceFailure {
                    kind: resource.kind,
                    content_type: resource.content_type.clone(),
                    original_filename: resource.original_filename.clone(),
                    destination_filename: file_name,
                    detail,
                });
                continue;
            }

            match self.fs.file_size(&destination) {
                Ok(bytes) => tracing::debug!(
                    asset_id = %asset.id,
                    resource_type = %resource.kind,
                    path = %destination.display(),
                    bytes,
                    "Resource written"
                ),
                Err(_) => tracing::debug!(
                    asset_id = %asset.id,
                    resource_type = %resource.kind,
                    path = %destination.display(),
                    "Resource written"
                ),
            }

            exported.push(ExportedResource {
                resource: resource.clone(),
                destination,
                status: ExportStatus::Written,
            });
        }

        if failures.is_empty() {
            return Ok(exported);
        }

        let failure = AggregateFailure {
            asset: AssetSummary::of(asset, stamp),
            total,
            failures,
        };
        self.ledger
            .record_block(&failure.ledger_header(&iso_now()), &failure.failure_lines());
        Err(failure)
    }
}

fn resource_line(
    asset: &Asset,
    stamp: &CaptureStamp,
    resource: &Resource,
    destination: &Path,
    detail: &str,
) -> String {
    format!(
        "{} asset={} capture={} resourceType={} uti={} name={} dest={} {}",
        iso_now(),
        asset.id,
        stamp,
        resource.kind.label(),
        resource.content_type,
        resource.original_filename,
        destination.display(),
        detail
    )
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
