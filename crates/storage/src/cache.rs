// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local archival cache
//!
//! A small JSON record under the user's home directory. Loads are
//! permissive: a missing or corrupt file degrades to an empty cache so the
//! filters recompute from scratch rather than aborting the run. Writes
//! replace the whole file.

use logship_core::SegmentName;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// File name of the cache in the user's home directory
pub const CACHE_FILE_NAME: &str = ".logship_binlogs_cache";

/// Errors from cache persistence
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no home directory to place the cache in")]
    NoHomeDir,
}

/// Archival progress persisted between runs.
///
/// Field names match the on-disk JSON produced by earlier agent versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsCache {
    /// Highest segment name ever decided on (uploaded or skipped); the
    /// already-archived filter's watermark.
    #[serde(rename = "LastArchivedBinlog", default)]
    pub last_archived_segment: Option<SegmentName>,
    /// Serialized GTID set of durably archived coverage.
    #[serde(rename = "GtidArchived", default)]
    pub gtid_archived: String,
}

/// Loads and stores the `LogsCache` at a fixed path
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    /// Cache store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> CacheStore {
        CacheStore { path: path.into() }
    }

    /// Cache store at the default per-user location.
    pub fn default_location() -> Result<CacheStore, StorageError> {
        let home = dirs::home_dir().ok_or(StorageError::NoHomeDir)?;
        Ok(CacheStore {
            path: home.join(CACHE_FILE_NAME),
        })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load the cache, substituting an empty one when the file is missing or
    /// unreadable. Absence is the normal first-run condition.
    pub fn load(&self) -> LogsCache {
        match fs::read_to_string(&self.path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(cache) => cache,
                Err(err) => {
                    tracing::error!(path = %self.path.display(), error = %err, "corrupt cache, starting empty");
                    LogsCache::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "binlog cache does not exist");
                LogsCache::default()
            }
            Err(err) => {
                tracing::error!(path = %self.path.display(), error = %err, "cannot read cache, starting empty");
                LogsCache::default()
            }
        }
    }

    /// Overwrite the cache file with the given record.
    pub fn store(&self, cache: &LogsCache) -> Result<(), StorageError> {
        let json = serde_json::to_string(cache)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
