// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem remote store
//!
//! Treats a mounted directory as the remote backup root: segments land under
//! `binlog_005/` and the sentinel is a JSON object next to it. Overwrites
//! are idempotent, matching the upload contract the engine relies on.

use crate::traits::{RemoteError, RemoteStore};
use async_trait::async_trait;
use logship_storage::{BinlogSentinel, SENTINEL_NAME};
use std::path::{Path, PathBuf};

/// Subdirectory of the remote root holding uploaded segments
pub const SEGMENTS_DIR: &str = "binlog_005";

/// Remote store on a local or mounted filesystem
#[derive(Debug, Clone)]
pub struct FsRemote {
    root: PathBuf,
}

impl FsRemote {
    pub fn new(root: impl Into<PathBuf>) -> FsRemote {
        FsRemote { root: root.into() }
    }

    pub fn segment_path(&self, name: &str) -> PathBuf {
        self.root.join(SEGMENTS_DIR).join(name)
    }

    fn sentinel_path(&self) -> PathBuf {
        self.root.join(SENTINEL_NAME)
    }
}

#[async_trait]
impl RemoteStore for FsRemote {
    async fn upload_segment(&self, path: &Path) -> Result<(), RemoteError> {
        let name = path
            .file_name()
            .ok_or_else(|| RemoteError::Upload(format!("no file name in {}", path.display())))?;
        let target_dir = self.root.join(SEGMENTS_DIR);
        tokio::fs::create_dir_all(&target_dir).await?;
        let target = target_dir.join(name);
        tokio::fs::copy(path, &target)
            .await
            .map_err(|e| RemoteError::Upload(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(segment = %name.to_string_lossy(), target = %target.display(), "uploaded");
        Ok(())
    }

    async fn fetch_sentinel(&self) -> Result<Option<BinlogSentinel>, RemoteError> {
        match tokio::fs::read_to_string(self.sentinel_path()).await {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(RemoteError::Fetch(err.to_string())),
        }
    }

    async fn put_sentinel(&self, sentinel: &BinlogSentinel) -> Result<(), RemoteError> {
        tokio::fs::create_dir_all(&self.root).await?;
        let json = serde_json::to_string(sentinel)?;
        tokio::fs::write(self.sentinel_path(), json)
            .await
            .map_err(|e| RemoteError::Put(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "fs_tests.rs"]
mod tests;
