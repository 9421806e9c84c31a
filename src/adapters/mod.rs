//! External system integrations for the exporter.
//!
//! The export engine reaches its collaborators only through the traits in
//! [`traits`]:
//!
//! - [`traits::AssetSource`] - enumerates assets from a media library
//! - [`traits::ResourceWriter`] - retrieves resource content into a file
//! - [`traits::ExtensionLookup`] - content type to filename extension
//! - [`traits::FileSystem`] - existence checks, removal, sizes, directories
//!
//! Concrete implementations:
//!
//! - [`filesystem`] - local disk via `std::fs`
//! - [`content_type`] - built-in UTI/MIME table
//! - [`manifest`] - JSON manifest library and a file-copy writer
//!
//! # Example
//!
//! ```rust,no_run
//! use photos_export::adapters::{AssetSource, ManifestLibrary};
//! use photos_export::core::timestamp::current_year_range;
//!
//! # async fn example() -> photos_export::domain::Result<()> {
//! let library = ManifestLibrary::open("library.json").await?;
//! let assets = library.fetch_assets(&current_year_range()).await?;
//! println!("{} assets this year", assets.len());
//! # Ok(())
//! # }
//! ```

pub mod content_type;
pub mod filesystem;
pub mod manifest;
pub mod traits;

pub use content_type::ContentTypeTable;
pub use filesystem::LocalFileSystem;
pub use manifest::{FileCopyWriter, ManifestLibrary};
pub use traits::{AssetSource, ExtensionLookup, FileSystem, ResourceWriter, WriteOptions};
