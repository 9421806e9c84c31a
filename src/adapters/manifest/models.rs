//! Library manifest file models
//!
//! These structures mirror the on-disk JSON manifest and are kept separate
//! from the domain models. Field names are camelCase to match what library
//! dump tools typically emit.

use crate::domain::{Asset, AssetId, ExporterError, MediaKind, Resource, ResourceKind, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level manifest document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestDocument {
    /// Manifest format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Assets in library order
    #[serde(default)]
    pub assets: Vec<ManifestAsset>,
}

fn default_version() -> u32 {
    1
}

/// One asset entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestAsset {
    /// Library identifier
    #[serde(alias = "localIdentifier")]
    pub id: String,

    /// Capture timestamp
    #[serde(default, alias = "creationDate")]
    pub capture_date: Option<DateTime<Utc>>,

    /// Modification timestamp
    #[serde(default)]
    pub modification_date: Option<DateTime<Utc>>,

    /// Media kind (`image`, `video`, `audio`, `unknown`)
    #[serde(default)]
    pub media_type: MediaKind,

    /// Subtype bit set
    #[serde(default)]
    pub media_subtypes: u32,

    #[serde(default)]
    pub pixel_width: u32,

    #[serde(default)]
    pub pixel_height: u32,

    /// Duration in seconds
    #[serde(default)]
    pub duration: f64,

    #[serde(default)]
    pub favorite: bool,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default)]
    pub resources: Vec<ManifestResource>,
}

/// One resource entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestResource {
    /// Resource kind label (`photo`, `fullSizeVideo`, `type12`, ...)
    #[serde(rename = "type")]
    pub kind: ResourceKind,

    #[serde(default)]
    pub original_filename: String,

    /// Content-type identifier
    #[serde(alias = "uniformTypeIdentifier", alias = "contentType")]
    pub uti: String,

    /// Path of the content, relative to the manifest directory unless absolute
    #[serde(default)]
    pub path: String,
}

impl ManifestAsset {
    /// Convert to the domain [`Asset`]
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is blank.
    pub fn to_domain(&self) -> Result<Asset> {
        let id = AssetId::new(self.id.clone()).map_err(ExporterError::Library)?;

        let mut builder = Asset::builder()
            .id(id)
            .media_kind(self.media_type)
            .media_subtypes(self.media_subtypes)
            .pixel_size(self.pixel_width, self.pixel_height)
            .duration(self.duration)
            .favorite(self.favorite)
            .hidden(self.hidden);

        if let Some(date) = self.capture_date {
            builder = builder.capture_date(date);
        }
        if let Some(date) = self.modification_date {
            builder = builder.modification_date(date);
        }
        for resource in &self.resources {
            builder = builder.resource(
                Resource::new(resource.kind, resource.original_filename.clone(), resource.uti.clone())
                    .with_locator(resource.path.clone()),
            );
        }

        builder.build().map_err(ExporterError::Library)
    }
}
