//! Deterministic, collision-resistant export filenames
//!
//! Names are derived from the capture stamp and, on collision, a letter
//! picked by hashing resource-identifying metadata. Re-running an export
//! with the same library metadata reproduces the same names, which is what
//! makes incremental mode meaningful.

use super::hash::{hash64, letter_from_hash};
use super::registry::NameRegistry;
use crate::adapters::traits::ExtensionLookup;
use crate::core::timestamp::CaptureStamp;
use crate::domain::{Asset, Resource};
use std::path::Path;

const LETTERS: usize = 26;

/// Content type used for metadata sidecars
pub const SIDECAR_CONTENT_TYPE: &str = "public.json";

/// Assigns export filenames unique within a [`NameRegistry`]
pub struct FilenameAssigner<'a> {
    lookup: &'a dyn ExtensionLookup,
}

impl<'a> FilenameAssigner<'a> {
    /// Creates an assigner using `lookup` for extension inference
    pub fn new(lookup: &'a dyn ExtensionLookup) -> Self {
        Self { lookup }
    }

    /// Returns a filename not yet in `registry` and claims it
    ///
    /// The result depends only on the arguments and the registry contents.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use photos_export::adapters::ContentTypeTable;
    /// use photos_export::core::naming::{FilenameAssigner, NameRegistry};
    /// use photos_export::core::timestamp::CaptureStamp;
    ///
    /// let table = ContentTypeTable::default();
    /// let assigner = FilenameAssigner::new(&table);
    /// let stamp = CaptureStamp::from_datetime(&Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap());
    /// let mut registry = NameRegistry::new();
    ///
    /// let name = assigner.assign(&stamp, "IMG_0001.JPG", "seed", "image/jpeg", &mut registry);
    /// assert_eq!(name, "20250102030405.jpg");
    /// ```
    pub fn assign(
        &self,
        stamp: &CaptureStamp,
        original_filename: &str,
        fallback_seed: &str,
        content_type: &str,
        registry: &mut NameRegistry,
    ) -> String {
        let ts = stamp.as_str();
        let ext = self.extension_for(original_filename, content_type);

        let base = with_extension(ts.to_string(), &ext);
        if !registry.contains(&base) {
            registry.claim(base.clone());
            return base;
        }

        let seed = if original_filename.is_empty() {
            fallback_seed.to_string()
        } else {
            format!("{original_filename}|{fallback_seed}")
        };

        let mut attempt: usize = 0;
        loop {
            let cycle = attempt / LETTERS;
            let offset = (attempt % LETTERS) as i64;
            let hash = if cycle == 0 {
                hash64(&seed)
            } else {
                hash64(&format!("{seed}#{cycle}"))
            };
            let letter = letter_from_hash(hash, offset);

            let mut stem = String::with_capacity(ts.len() + 4);
            stem.push_str(ts);
            stem.push_str(&cycle_tag(cycle));
            stem.push(letter);

            let candidate = with_extension(stem, &ext);
            if !registry.contains(&candidate) {
                registry.claim(candidate.clone());
                return candidate;
            }
            attempt += 1;
        }
    }

    /// Lower-cased extension from the original name, else from the content type
    fn extension_for(&self, original_filename: &str, content_type: &str) -> String {
        let original_ext = Path::new(original_filename)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty());

        match original_ext {
            Some(ext) => ext.to_lowercase(),
            None => self
                .lookup
                .preferred_extension(content_type)
                .map(|e| e.to_lowercase())
                .unwrap_or_default(),
        }
    }
}

/// Seed distinguishing one resource of an asset from its siblings
pub fn resource_seed(asset: &Asset, resource: &Resource) -> String {
    [
        format!("asset={}", asset.id),
        format!("mediaType={}", asset.media_kind.raw_value()),
        format!("subtypes={}", asset.media_subtypes),
        format!("px={}", asset.pixel_size()),
        format!("dur={}", asset.duration_string()),
        format!("resType={}", resource.kind.raw_value()),
        format!("uti={}", resource.content_type),
    ]
    .join("|")
}

/// Seed for an asset's metadata sidecar
pub fn sidecar_seed(asset: &Asset) -> String {
    format!("asset={}|metadata", asset.id)
}

/// Bijective base-26 tag for collision cycles past the first (`1 -> a`, `27 -> aa`)
///
/// Cycle 0 has an empty tag, so first-cycle names carry a single letter.
fn cycle_tag(cycle: usize) -> String {
    let mut n = cycle;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'a' + (n % LETTERS) as u8));
        n /= LETTERS;
    }
    letters.iter().rev().collect()
}

fn with_extension(stem: String, ext: &str) -> String {
    if ext.is_empty() {
        stem
    } else {
        format!("{stem}.{ext}")
    }
}
