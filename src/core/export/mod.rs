//! Export orchestration
//!
//! This module provides the core export logic:
//! - Per-asset resource pipeline with overwrite/incremental policy
//! - Failure descriptors and the aggregate asset failure
//! - Metadata sidecars
//! - Run coordination and summary reporting

pub mod coordinator;
pub mod failure;
pub mod pipeline;
pub mod sidecar;
pub mod summary;

pub use coordinator::{ExportCoordinator, RunSettings};
pub use failure::{error_details, AggregateFailure, AssetSummary, ResourceFailure, AGGREGATE_FAILURE_CODE};
pub use pipeline::{ExportStatus, ExportedResource, ResourceExporter};
pub use sidecar::{sidecar_document, write_sidecar};
pub use summary::{AssetError, ExportSummary};
