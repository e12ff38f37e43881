// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter trait definitions for the agent's external collaborators

use async_trait::async_trait;
use logship_core::{Flavor, GtidError, GtidSet, SegmentName};
use logship_storage::BinlogSentinel;
use std::path::{Path, PathBuf};
use thiserror::Error;

// =============================================================================
// Segment source (database / filesystem)
// =============================================================================

/// Errors from segment enumeration
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read binlog index: {0}")]
    Index(std::io::Error),
    #[error("no binlog segments available")]
    NoSegments,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Enumerates locally available binlog segments.
///
/// `segments` returns names in ascending lexical order, which the engine
/// treats as chronological order.
#[async_trait]
pub trait SegmentSource: Clone + Send + Sync + 'static {
    /// All locally available segment names, sorted ascending.
    async fn segments(&self) -> Result<Vec<SegmentName>, SourceError>;

    /// Directory containing the segment files.
    async fn segments_dir(&self) -> Result<PathBuf, SourceError>;

    /// The segment currently being written. It must never be archived,
    /// since a copy of it would be incomplete.
    async fn current_segment(&self) -> Result<SegmentName, SourceError>;

    /// Best-effort flavor detection.
    async fn flavor(&self) -> Result<Flavor, SourceError>;
}

// =============================================================================
// Coverage reader (binlog headers on local disk)
// =============================================================================

/// Errors from reading coverage out of a segment header
#[derive(Debug, Error)]
pub enum CoverageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a binlog file (bad magic)")]
    BadMagic,
    #[error("no PREVIOUS_GTIDS event near the start of {0}")]
    NoPreviousGtids(PathBuf),
    #[error("malformed PREVIOUS_GTIDS payload: {0}")]
    BadPayload(String),
    #[error("gtid error: {0}")]
    Gtid(#[from] GtidError),
    #[error("coverage extraction unsupported for flavor {0}")]
    UnsupportedFlavor(Flavor),
}

/// Extracts the GTID coverage recorded at the start of a segment file.
///
/// Sync by design: this only reads the first few hundred bytes of a local
/// file, so the async seam the network adapters get does not apply.
pub trait CoverageReader: Clone + Send + Sync + 'static {
    fn coverage_at_start(&self, path: &Path, flavor: Flavor) -> Result<GtidSet, CoverageError>;
}

// =============================================================================
// Remote store (durable backup storage)
// =============================================================================

/// Errors from remote storage operations
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("upload failed: {0}")]
    Upload(String),
    #[error("sentinel fetch failed: {0}")]
    Fetch(String),
    #[error("sentinel write failed: {0}")]
    Put(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable remote storage for segments and the sentinel.
///
/// Uploads are all-or-nothing and idempotent: re-uploading the same segment
/// overwrites it identically.
#[async_trait]
pub trait RemoteStore: Clone + Send + Sync + 'static {
    /// Upload one segment file.
    async fn upload_segment(&self, path: &Path) -> Result<(), RemoteError>;

    /// Fetch the sentinel; `None` when it does not exist yet (normal on
    /// first run).
    async fn fetch_sentinel(&self) -> Result<Option<BinlogSentinel>, RemoteError>;

    /// Overwrite the sentinel.
    async fn put_sentinel(&self, sentinel: &BinlogSentinel) -> Result<(), RemoteError>;
}
