//! Content-type to filename extension lookup
//!
//! Libraries describe resources either with Uniform Type Identifiers
//! (`public.jpeg`) or MIME strings (`image/jpeg`). The table covers the
//! identifiers photo libraries commonly emit; MIME strings it does not know
//! fall back to `mime_guess`.

use super::traits::ExtensionLookup;
use std::collections::HashMap;

const BUILTIN: &[(&str, &str)] = &[
    ("public.jpeg", "jpg"),
    ("public.jpg", "jpg"),
    ("public.heic", "heic"),
    ("public.heif", "heif"),
    ("public.png", "png"),
    ("public.tiff", "tiff"),
    ("com.compuserve.gif", "gif"),
    ("com.microsoft.bmp", "bmp"),
    ("org.webmproject.webp", "webp"),
    ("public.avif", "avif"),
    ("com.adobe.raw-image", "dng"),
    ("com.canon.cr2-raw-image", "cr2"),
    ("com.canon.cr3-raw-image", "cr3"),
    ("com.nikon.raw-image", "nef"),
    ("com.sony.arw-raw-image", "arw"),
    ("com.fuji.raw-image", "raf"),
    ("com.olympus.raw-image", "orf"),
    ("com.panasonic.rw2-raw-image", "rw2"),
    ("com.apple.quicktime-movie", "mov"),
    ("public.mpeg-4", "mp4"),
    ("com.apple.m4v-video", "m4v"),
    ("public.avi", "avi"),
    ("public.mpeg-4-audio", "m4a"),
    ("com.apple.m4a-audio", "m4a"),
    ("public.mp3", "mp3"),
    ("com.microsoft.waveform-audio", "wav"),
    ("public.aiff-audio", "aiff"),
    ("public.json", "json"),
    ("public.plain-text", "txt"),
    ("public.xml", "xml"),
    ("com.apple.property-list", "plist"),
    ("image/jpeg", "jpg"),
    ("image/heic", "heic"),
    ("image/heif", "heif"),
    ("image/tiff", "tiff"),
    ("image/x-adobe-dng", "dng"),
    ("video/quicktime", "mov"),
    ("video/mp4", "mp4"),
    ("video/mpeg", "mpg"),
    ("video/x-m4v", "m4v"),
    ("audio/mpeg", "mp3"),
    ("audio/mp4", "m4a"),
    ("audio/x-m4a", "m4a"),
    ("audio/wav", "wav"),
    ("audio/x-wav", "wav"),
    ("audio/aiff", "aiff"),
    ("audio/x-aiff", "aiff"),
    ("application/json", "json"),
];

/// [`ExtensionLookup`] over a static UTI/MIME table with a MIME fallback
#[derive(Debug, Clone)]
pub struct ContentTypeTable {
    entries: HashMap<String, String>,
}

impl Default for ContentTypeTable {
    fn default() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|(ct, ext)| ((*ct).to_string(), (*ext).to_string()))
                .collect(),
        }
    }
}

impl ContentTypeTable {
    /// Creates the built-in table
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a mapping
    pub fn with_mapping(mut self, content_type: impl Into<String>, ext: impl Into<String>) -> Self {
        self.entries
            .insert(content_type.into().to_ascii_lowercase(), ext.into());
        self
    }
}

impl ExtensionLookup for ContentTypeTable {
    fn preferred_extension(&self, content_type: &str) -> Option<String> {
        let key = content_type.trim().to_ascii_lowercase();
        if key.is_empty() {
            return None;
        }
        if let Some(ext) = self.entries.get(&key) {
            return Some(ext.clone());
        }
        match key.split_once('/') {
            Some((_, subtype)) => mime_fallback(&key, subtype),
            None => None,
        }
    }
}

/// Picks an extension from `mime_guess`, whose lists are alphabetical
///
/// An extension spelled like the MIME subtype wins, then a three-letter
/// one, then the first listed.
fn mime_fallback(mime: &str, subtype: &str) -> Option<String> {
    let exts = mime_guess::get_mime_extensions_str(mime)?;
    let subtype = subtype.trim_start_matches("x-");
    exts.iter()
        .find(|ext| **ext == subtype)
        .or_else(|| exts.iter().find(|ext| ext.len() == 3))
        .or_else(|| exts.first())
        .map(|ext| (*ext).to_string())
}
