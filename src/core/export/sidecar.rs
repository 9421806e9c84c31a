//! JSON metadata sidecar written next to an asset's exported files

use super::pipeline::ExportedResource;
use crate::adapters::traits::{ExtensionLookup, FileSystem};
use crate::core::naming::{sidecar_seed, FilenameAssigner, NameRegistry, SIDECAR_CONTENT_TYPE};
use crate::core::timestamp::{iso_timestamp, CaptureStamp};
use crate::domain::context::ResultExt;
use crate::domain::{Asset, Result};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};

/// Media subtype bits as reported by photo libraries
const SUBTYPE_FLAGS: &[(&str, u32)] = &[
    ("isPanorama", 1 << 0),
    ("isHDR", 1 << 1),
    ("isScreenshot", 1 << 2),
    ("isLivePhoto", 1 << 3),
    ("isDepthEffect", 1 << 4),
    ("isHighFrameRateVideo", 1 << 17),
    ("isTimeLapseVideo", 1 << 18),
];

/// Builds the sidecar document for `asset`
///
/// Keys are emitted in sorted order. Size and modification date of each
/// exported file are included when the file system can report them.
pub fn sidecar_document(asset: &Asset, exported: &[ExportedResource], fs: &dyn FileSystem) -> Value {
    let mut doc = Map::new();
    doc.insert("localIdentifier".into(), json!(asset.id.as_str()));
    doc.insert("mediaType".into(), json!(asset.media_kind.raw_value()));
    doc.insert("mediaSubtypes".into(), json!(asset.media_subtypes));
    doc.insert("pixelWidth".into(), json!(asset.pixel_width));
    doc.insert("pixelHeight".into(), json!(asset.pixel_height));
    doc.insert("duration".into(), json!(asset.duration));
    doc.insert("favorite".into(), json!(asset.favorite));
    doc.insert("hidden".into(), json!(asset.hidden));

    for (key, bit) in SUBTYPE_FLAGS {
        doc.insert((*key).into(), json!(asset.media_subtypes & bit != 0));
    }

    if let Some(date) = &asset.capture_date {
        doc.insert("creationDate".into(), json!(iso_timestamp(date)));
    }
    if let Some(date) = &asset.modification_date {
        doc.insert("modificationDate".into(), json!(iso_timestamp(date)));
    }

    let resources: Vec<Value> = asset
        .resources
        .iter()
        .map(|r| {
            json!({
                "type": r.kind.raw_value(),
                "originalFilename": r.original_filename,
                "uniformTypeIdentifier": r.content_type,
            })
        })
        .collect();
    doc.insert("resources".into(), Value::Array(resources));

    let files: Vec<Value> = exported
        .iter()
        .map(|e| {
            let name = e.file_name();
            let mut entry = Map::new();
            entry.insert("type".into(), json!(e.resource.kind.raw_value()));
            entry.insert("uniformTypeIdentifier".into(), json!(e.resource.content_type));
            entry.insert("originalFilename".into(), json!(e.resource.original_filename));
            entry.insert("exportedFilename".into(), json!(name));
            entry.insert("path".into(), json!(name));
            if let Ok(size) = fs.file_size(&e.destination) {
                entry.insert("fileSize".into(), json!(size));
            }
            if let Ok(modified) = fs.modified(&e.destination) {
                entry.insert("fileModificationDate".into(), json!(iso_timestamp(&modified)));
            }
            Value::Object(entry)
        })
        .collect();
    doc.insert("exportedFiles".into(), Value::Array(files));

    Value::Object(doc)
}

/// Names and writes the sidecar for `asset` into `folder`
///
/// The name is claimed from the same registry the asset's resources used,
/// so it never collides with them and always ends in `.json`.
///
/// # Errors
///
/// Returns an error if the document cannot be serialized or written.
pub async fn write_sidecar(
    asset: &Asset,
    stamp: &CaptureStamp,
    folder: &Path,
    exported: &[ExportedResource],
    lookup: &dyn ExtensionLookup,
    fs: &dyn FileSystem,
    registry: &mut NameRegistry,
) -> Result<PathBuf> {
    let name = FilenameAssigner::new(lookup).assign(
        stamp,
        "",
        &sidecar_seed(asset),
        SIDECAR_CONTENT_TYPE,
        registry,
    );
    let path = folder.join(name);

    let document = sidecar_document(asset, exported, fs);
    let bytes = serde_json::to_vec_pretty(&document)?;
    tokio::fs::write(&path, &bytes)
        .await
        .with_context(|| format!("Failed to write metadata sidecar {}", path.display()))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Metadata sidecar saved");
    Ok(path)
}
