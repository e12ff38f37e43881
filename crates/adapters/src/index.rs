// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Binlog index file segment source
//!
//! Reads the server's binlog index file (the path behind `@@log_bin_index`)
//! straight from disk. `SHOW BINARY LOGS` takes the binlog mutex and can
//! hang behind a huge commit, so the index file is the cheaper and safer
//! enumeration path. The index lists segments in rotation order, one path
//! per line; the last line is the segment currently being written.

use crate::traits::{SegmentSource, SourceError};
use async_trait::async_trait;
use logship_core::{Flavor, SegmentName};
use std::path::{Path, PathBuf};

/// Segment source backed by the binlog index file
#[derive(Debug, Clone)]
pub struct IndexFileSource {
    index_file: PathBuf,
    flavor: Flavor,
}

impl IndexFileSource {
    pub fn new(index_file: impl Into<PathBuf>, flavor: Flavor) -> IndexFileSource {
        IndexFileSource {
            index_file: index_file.into(),
            flavor,
        }
    }

    /// Index entries in file (rotation) order, resolved against the index
    /// file's directory when relative.
    async fn entries(&self) -> Result<Vec<PathBuf>, SourceError> {
        let text = tokio::fs::read_to_string(&self.index_file)
            .await
            .map_err(SourceError::Index)?;
        let base = self.index_file.parent().unwrap_or(Path::new("."));
        let entries: Vec<PathBuf> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                let path = Path::new(line);
                if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    base.join(path)
                }
            })
            .collect();
        if entries.is_empty() {
            return Err(SourceError::NoSegments);
        }
        Ok(entries)
    }
}

fn basename(path: &Path) -> SegmentName {
    SegmentName::from(path.file_name().unwrap_or_default().to_string_lossy().to_string())
}

#[async_trait]
impl SegmentSource for IndexFileSource {
    async fn segments(&self) -> Result<Vec<SegmentName>, SourceError> {
        let mut names: Vec<SegmentName> =
            self.entries().await?.iter().map(|p| basename(p)).collect();
        names.sort();
        Ok(names)
    }

    async fn segments_dir(&self) -> Result<PathBuf, SourceError> {
        let entries = self.entries().await?;
        let first = entries.first().ok_or(SourceError::NoSegments)?;
        Ok(first
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf())
    }

    async fn current_segment(&self) -> Result<SegmentName, SourceError> {
        let entries = self.entries().await?;
        let last = entries.last().ok_or(SourceError::NoSegments)?;
        Ok(basename(last))
    }

    async fn flavor(&self) -> Result<Flavor, SourceError> {
        Ok(self.flavor)
    }
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod tests;
