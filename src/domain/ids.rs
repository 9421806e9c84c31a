//! Domain identifier types with validation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Asset identifier newtype wrapper
///
/// Opaque identifier handed out by the media library. The exporter never
/// interprets it beyond equality and embedding it in seeds and log lines.
///
/// # Examples
///
/// ```
/// use photos_export::domain::ids::AssetId;
/// use std::str::FromStr;
///
/// let id = AssetId::from_str("9F3C2A1B-0000-4000-8000-000000000001/L0/001").unwrap();
/// assert_eq!(id.as_str(), "9F3C2A1B-0000-4000-8000-000000000001/L0/001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetId(String);

impl AssetId {
    /// Creates a new AssetId, rejecting blank identifiers
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Asset ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the asset ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AssetId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AssetId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AssetId> for String {
    fn from(id: AssetId) -> Self {
        id.0
    }
}

impl AsRef<str> for AssetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
