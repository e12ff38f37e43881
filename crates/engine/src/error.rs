// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the archival run

use logship_adapters::{RemoteError, SourceError};
use logship_core::SegmentName;
use logship_storage::StorageError;
use thiserror::Error;

/// Fatal conditions that abort an archival run.
///
/// Whatever cache state was already checkpointed stays on disk and becomes
/// the recovery point for the next run. Termination is the caller's call;
/// the engine only ever returns.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("segment source error: {0}")]
    Source(#[from] SourceError),
    #[error("cache error: {0}")]
    Cache(#[from] StorageError),
    #[error("upload of {segment} failed: {source}")]
    Upload {
        segment: SegmentName,
        source: RemoteError,
    },
    #[error("sentinel write failed: {0}")]
    Sentinel(RemoteError),
}
