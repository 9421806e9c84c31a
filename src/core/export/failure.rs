//! Resource failure descriptors and the asset-level aggregate failure

use crate::core::timestamp::CaptureStamp;
use crate::domain::{Asset, AssetId, ResourceKind, ResourceWriteError};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// One resource that could not be exported
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceFailure {
    pub kind: ResourceKind,
    pub content_type: String,
    pub original_filename: String,
    /// Filename that was assigned, without directory
    pub destination_filename: String,
    /// Rendered error detail (see [`error_details`])
    pub detail: String,
}

impl ResourceFailure {
    /// Single-line summary used in ledger blocks and the aggregate message
    pub fn summary_line(&self) -> String {
        format!(
            "type={} uti={} name={} dest={} {}",
            self.kind.label(),
            self.content_type,
            self.original_filename,
            self.destination_filename,
            self.detail
        )
    }
}

/// Asset fields carried by an aggregate failure
#[derive(Debug, Clone, PartialEq)]
pub struct AssetSummary {
    pub id: AssetId,
    pub capture: CaptureStamp,
    pub media_type: u32,
    pub subtypes: u32,
    pub pixel_size: String,
    pub duration: String,
}

impl AssetSummary {
    /// Summary of `asset` captured at `capture`
    pub fn of(asset: &Asset, capture: &CaptureStamp) -> Self {
        Self {
            id: asset.id.clone(),
            capture: capture.clone(),
            media_type: asset.media_kind.raw_value(),
            subtypes: asset.media_subtypes,
            pixel_size: asset.pixel_size(),
            duration: asset.duration_string(),
        }
    }
}

impl fmt::Display for AssetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "asset={} capture={} mediaType={} subtypes={} px={} dur={}",
            self.id, self.capture, self.media_type, self.subtypes, self.pixel_size, self.duration
        )
    }
}

/// Error code reported for [`AggregateFailure`]
pub const AGGREGATE_FAILURE_CODE: i32 = 20;

/// Outcome of an asset where at least one resource failed
///
/// Successful resources of the same asset stay on disk; this error only
/// reports the failed ones.
#[derive(Debug, Clone, Error)]
pub struct AggregateFailure {
    pub asset: AssetSummary,
    /// Number of resources the asset had
    pub total: usize,
    /// Failures in resource enumeration order; never empty
    pub failures: Vec<ResourceFailure>,
}

impl AggregateFailure {
    /// `<failed>/<total>`
    pub fn tally(&self) -> String {
        format!("{}/{}", self.failures.len(), self.total)
    }

    /// Summary line per failed resource
    pub fn failure_lines(&self) -> Vec<String> {
        self.failures.iter().map(ResourceFailure::summary_line).collect()
    }

    /// Header of the ledger block written for this failure
    pub fn ledger_header(&self, timestamp: &str) -> String {
        format!(
            "{timestamp} asset.failed {} failures={}",
            self.asset,
            self.tally()
        )
    }
}

impl fmt::Display for AggregateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "One or more resources failed to export ({}) {}. Failed: {}",
            self.tally(),
            self.asset,
            self.failure_lines().join("; ")
        )
    }
}

/// Renders an error as `kind=.. code=.. desc=..` plus its source chain
///
/// Writer errors contribute their kind and code, aggregate failures report
/// `kind=resources code=20`, and any other error is `kind=other code=0`.
pub fn error_details(err: &(dyn StdError + 'static)) -> String {
    let (kind, code) = if let Some(w) = err.downcast_ref::<ResourceWriteError>() {
        (w.kind(), w.code())
    } else if err.is::<AggregateFailure>() {
        ("resources", AGGREGATE_FAILURE_CODE)
    } else {
        ("other", 0)
    };

    let mut parts = vec![format!("kind={kind}"), format!("code={code}")];
    let desc = err.to_string();
    if !desc.is_empty() {
        parts.push(format!("desc={desc}"));
    }

    let mut source = err.source();
    while let Some(cause) = source {
        parts.push(format!("underlying={cause}"));
        source = cause.source();
    }

    parts.join(" ")
}
