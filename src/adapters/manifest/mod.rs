//! JSON manifest library adapter
//!
//! A manifest lists assets and the paths of their resource files. It lets the
//! exporter run against a plain directory dump of a photo library.

pub mod library;
pub mod models;
pub mod writer;

pub use library::ManifestLibrary;
pub use models::{ManifestAsset, ManifestDocument, ManifestResource};
pub use writer::FileCopyWriter;
