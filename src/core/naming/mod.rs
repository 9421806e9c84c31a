//! Export filename assignment
//!
//! - [`hash`] - FNV-1a hashing and letter mapping
//! - [`registry`] - per-asset set of claimed names
//! - [`assigner`] - timestamp-based names with hashed collision suffixes

pub mod assigner;
pub mod hash;
pub mod registry;

pub use assigner::{resource_seed, sidecar_seed, FilenameAssigner, SIDECAR_CONTENT_TYPE};
pub use hash::{hash64, letter_from_hash};
pub use registry::NameRegistry;
