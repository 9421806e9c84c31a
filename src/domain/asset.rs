//! Asset and resource domain models
//!
//! Assets and resources are plain value records produced at the library
//! boundary. The exporter reads them and never mutates them.

use super::ids::AssetId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of media an asset represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Unknown media kind
    #[default]
    Unknown,
    /// Still image
    Image,
    /// Video
    Video,
    /// Audio-only
    Audio,
}

impl MediaKind {
    /// Numeric value used in filename seeds and ledger lines
    pub fn raw_value(self) -> u32 {
        match self {
            Self::Unknown => 0,
            Self::Image => 1,
            Self::Video => 2,
            Self::Audio => 3,
        }
    }

    /// Short label used in logs and progress output
    pub fn label(self) -> &'static str {
        match self {
            Self::Video => "video",
            _ => "photo",
        }
    }
}

/// Kind tag of one physical resource of an asset
///
/// Serialized as its label (`photo`, `fullSizeVideo`, `type12`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ResourceKind {
    /// Primary image
    Photo,
    /// Primary video
    Video,
    /// Audio track
    Audio,
    /// Alternate photo (e.g. the JPEG of a RAW+JPEG pair)
    AlternatePhoto,
    /// Full-size rendered photo (auxiliary image)
    FullSizePhoto,
    /// Full-size rendered video (auxiliary video)
    FullSizeVideo,
    /// Edit/adjustment data blob
    AdjustmentData,
    /// Kind the exporter has no name for
    Other(u32),
}

impl ResourceKind {
    /// Builds a kind from its numeric library value
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Self::Photo,
            2 => Self::Video,
            3 => Self::Audio,
            4 => Self::AlternatePhoto,
            5 => Self::FullSizePhoto,
            6 => Self::FullSizeVideo,
            7 => Self::AdjustmentData,
            n => Self::Other(n),
        }
    }

    /// Numeric library value
    pub fn raw_value(self) -> u32 {
        match self {
            Self::Photo => 1,
            Self::Video => 2,
            Self::Audio => 3,
            Self::AlternatePhoto => 4,
            Self::FullSizePhoto => 5,
            Self::FullSizeVideo => 6,
            Self::AdjustmentData => 7,
            Self::Other(n) => n,
        }
    }

    /// Human-readable label used in logs and the error ledger
    pub fn label(self) -> String {
        match self {
            Self::Photo => "photo".to_string(),
            Self::Video => "video".to_string(),
            Self::Audio => "audio".to_string(),
            Self::AlternatePhoto => "alternatePhoto".to_string(),
            Self::FullSizePhoto => "fullSizePhoto".to_string(),
            Self::FullSizeVideo => "fullSizeVideo".to_string(),
            Self::AdjustmentData => "adjustmentData".to_string(),
            Self::Other(n) => format!("type{n}"),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "photo" => Self::Photo,
            "video" => Self::Video,
            "audio" => Self::Audio,
            "alternatePhoto" => Self::AlternatePhoto,
            "fullSizePhoto" => Self::FullSizePhoto,
            "fullSizeVideo" => Self::FullSizeVideo,
            "adjustmentData" => Self::AdjustmentData,
            other => {
                let raw = other
                    .strip_prefix("type")
                    .and_then(|n| n.parse::<u32>().ok())
                    .ok_or_else(|| format!("Unknown resource kind '{other}'"))?;
                Self::from_raw(raw)
            }
        };
        Ok(kind)
    }
}

impl TryFrom<String> for ResourceKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResourceKind> for String {
    fn from(kind: ResourceKind) -> Self {
        kind.label()
    }
}

/// One physical representation of an asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource kind tag
    pub kind: ResourceKind,

    /// Original filename as recorded by the library (may be empty)
    #[serde(default)]
    pub original_filename: String,

    /// Content-type identifier (UTI or MIME), used to infer an extension
    pub content_type: String,

    /// Opaque handle the resource writer uses to find the content
    #[serde(default)]
    pub locator: String,
}

impl Resource {
    /// Creates a resource without a locator
    pub fn new(
        kind: ResourceKind,
        original_filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            original_filename: original_filename.into(),
            content_type: content_type.into(),
            locator: String::new(),
        }
    }

    /// Sets the locator
    pub fn with_locator(mut self, locator: impl Into<String>) -> Self {
        self.locator = locator.into();
        self
    }
}

/// One media item in the library
///
/// # Examples
///
/// ```
/// use photos_export::domain::asset::{Asset, MediaKind, Resource, ResourceKind};
/// use photos_export::domain::ids::AssetId;
/// use chrono::{TimeZone, Utc};
///
/// let asset = Asset::builder()
///     .id(AssetId::new("asset-1").unwrap())
///     .capture_date(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap())
///     .media_kind(MediaKind::Image)
///     .pixel_size(4032, 3024)
///     .resource(Resource::new(ResourceKind::Photo, "IMG_0001.HEIC", "public.heic"))
///     .build()
///     .unwrap();
/// assert_eq!(asset.resources.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Opaque library identifier
    pub id: AssetId,

    /// Capture timestamp, if the library knows it
    #[serde(default)]
    pub capture_date: Option<DateTime<Utc>>,

    /// Last modification timestamp, if known
    #[serde(default)]
    pub modification_date: Option<DateTime<Utc>>,

    /// Media kind
    #[serde(default)]
    pub media_kind: MediaKind,

    /// Library-specific subtype bit set (live photo, panorama, HDR, ...)
    #[serde(default)]
    pub media_subtypes: u32,

    /// Pixel width
    #[serde(default)]
    pub pixel_width: u32,

    /// Pixel height
    #[serde(default)]
    pub pixel_height: u32,

    /// Duration in seconds (0 for stills)
    #[serde(default)]
    pub duration: f64,

    /// Marked as favorite
    #[serde(default)]
    pub favorite: bool,

    /// Hidden in the library
    #[serde(default)]
    pub hidden: bool,

    /// Resources in library enumeration order
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl Asset {
    /// Creates a new builder for constructing an Asset
    pub fn builder() -> AssetBuilder {
        AssetBuilder::default()
    }

    /// `<width>x<height>` as used in seeds and ledger lines
    pub fn pixel_size(&self) -> String {
        format!("{}x{}", self.pixel_width, self.pixel_height)
    }

    /// Duration rendered with at least one fractional digit (`0.0`, `12.5`)
    pub fn duration_string(&self) -> String {
        format!("{:?}", self.duration)
    }
}

/// Builder for constructing Asset instances
#[derive(Debug, Default)]
pub struct AssetBuilder {
    id: Option<AssetId>,
    capture_date: Option<DateTime<Utc>>,
    modification_date: Option<DateTime<Utc>>,
    media_kind: MediaKind,
    media_subtypes: u32,
    pixel_width: u32,
    pixel_height: u32,
    duration: f64,
    favorite: bool,
    hidden: bool,
    resources: Vec<Resource>,
}

impl AssetBuilder {
    /// Creates a new AssetBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the asset ID
    pub fn id(mut self, id: AssetId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the capture date
    pub fn capture_date(mut self, date: DateTime<Utc>) -> Self {
        self.capture_date = Some(date);
        self
    }

    /// Sets the modification date
    pub fn modification_date(mut self, date: DateTime<Utc>) -> Self {
        self.modification_date = Some(date);
        self
    }

    /// Sets the media kind
    pub fn media_kind(mut self, kind: MediaKind) -> Self {
        self.media_kind = kind;
        self
    }

    /// Sets the subtype bit set
    pub fn media_subtypes(mut self, subtypes: u32) -> Self {
        self.media_subtypes = subtypes;
        self
    }

    /// Sets pixel dimensions
    pub fn pixel_size(mut self, width: u32, height: u32) -> Self {
        self.pixel_width = width;
        self.pixel_height = height;
        self
    }

    /// Sets the duration in seconds
    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    /// Marks the asset as favorite
    pub fn favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    /// Marks the asset as hidden
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Appends a resource
    pub fn resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Builds the Asset
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is missing
    pub fn build(self) -> Result<Asset, String> {
        Ok(Asset {
            id: self.id.ok_or("id is required")?,
            capture_date: self.capture_date,
            modification_date: self.modification_date,
            media_kind: self.media_kind,
            media_subtypes: self.media_subtypes,
            pixel_width: self.pixel_width,
            pixel_height: self.pixel_height,
            duration: self.duration,
            favorite: self.favorite,
            hidden: self.hidden,
            resources: self.resources,
        })
    }
}
