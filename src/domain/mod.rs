//! Domain models and types for the exporter.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`AssetId`])
//! - **Value records** produced by the library boundary ([`Asset`], [`Resource`])
//! - **Error types** ([`ExporterError`], [`ResourceWriteError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, ExporterError>`]:
//!
//! ```rust
//! use photos_export::domain::{ExporterError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = photos_export::config::ExporterConfig::from_file("photos-export.toml")?;
//!     Ok(())
//! }
//! ```

pub mod asset;
pub mod context;
pub mod errors;
pub mod ids;
pub mod result;

// Re-export commonly used types for convenience
pub use asset::{Asset, AssetBuilder, MediaKind, Resource, ResourceKind};
pub use errors::{ExporterError, ResourceWriteError};
pub use ids::AssetId;
pub use result::Result;
