// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake adapter implementations for testing
//!
//! One `FakeAdapters` value implements all three seams, records every call,
//! and exposes configurable failure modes so engine tests can drive the
//! error taxonomy without touching disk or network.

use crate::traits::{
    CoverageError, CoverageReader, RemoteError, RemoteStore, SegmentSource, SourceError,
};
use async_trait::async_trait;
use logship_core::{Flavor, GtidSet, SegmentName};
use logship_storage::BinlogSentinel;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Recorded call to an adapter method
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterCall {
    ListSegments,
    CurrentSegment,
    ReadCoverage { segment: String },
    UploadSegment { segment: String },
    FetchSentinel,
    PutSentinel { gtid_archived: String },
}

/// Shared state for the fake adapters
#[derive(Default)]
struct FakeState {
    calls: Vec<AdapterCall>,
    segments: Vec<SegmentName>,
    current: Option<SegmentName>,
    flavor: Flavor,
    coverage: HashMap<String, GtidSet>,
    unreadable: HashSet<String>,
    sentinel: Option<BinlogSentinel>,
    uploaded: Vec<SegmentName>,
    // Configurable failure modes
    upload_fails_on: Option<SegmentName>,
    sentinel_fetch_fails: bool,
    sentinel_put_fails: bool,
}

/// Fake segment source, coverage reader, and remote store in one
#[derive(Clone, Default)]
pub struct FakeAdapters {
    state: Arc<Mutex<FakeState>>,
}

impl FakeAdapters {
    pub fn new() -> FakeAdapters {
        FakeAdapters::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Append a segment; the listing preserves insertion order until the
    /// source sorts it.
    pub fn add_segment(&self, name: &str) {
        self.lock().segments.push(SegmentName::from(name));
    }

    /// Active segment reported by the source. Defaults to the highest added
    /// segment when unset.
    pub fn set_current(&self, name: &str) {
        self.lock().current = Some(SegmentName::from(name));
    }

    pub fn set_flavor(&self, flavor: Flavor) {
        self.lock().flavor = flavor;
    }

    /// Coverage recorded at the start of the given segment.
    pub fn set_coverage(&self, name: &str, coverage: GtidSet) {
        self.lock().coverage.insert(name.to_string(), coverage);
    }

    /// Make coverage extraction fail for the given segment.
    pub fn mark_unreadable(&self, name: &str) {
        self.lock().unreadable.insert(name.to_string());
    }

    pub fn set_sentinel(&self, sentinel: BinlogSentinel) {
        self.lock().sentinel = Some(sentinel);
    }

    pub fn fail_upload_of(&self, name: &str) {
        self.lock().upload_fails_on = Some(SegmentName::from(name));
    }

    pub fn fail_sentinel_fetch(&self) {
        self.lock().sentinel_fetch_fails = true;
    }

    pub fn fail_sentinel_put(&self) {
        self.lock().sentinel_put_fails = true;
    }

    /// Segments uploaded so far, in upload order.
    pub fn uploaded(&self) -> Vec<SegmentName> {
        self.lock().uploaded.clone()
    }

    /// Sentinel as last written.
    pub fn sentinel(&self) -> Option<BinlogSentinel> {
        self.lock().sentinel.clone()
    }

    /// Every adapter call in order.
    pub fn calls(&self) -> Vec<AdapterCall> {
        self.lock().calls.clone()
    }
}

fn segment_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[async_trait]
impl SegmentSource for FakeAdapters {
    async fn segments(&self) -> Result<Vec<SegmentName>, SourceError> {
        let mut state = self.lock();
        state.calls.push(AdapterCall::ListSegments);
        let mut names = state.segments.clone();
        names.sort();
        Ok(names)
    }

    async fn segments_dir(&self) -> Result<PathBuf, SourceError> {
        Ok(PathBuf::from("/fake/binlogs"))
    }

    async fn current_segment(&self) -> Result<SegmentName, SourceError> {
        let mut state = self.lock();
        state.calls.push(AdapterCall::CurrentSegment);
        if let Some(current) = &state.current {
            return Ok(current.clone());
        }
        state
            .segments
            .iter()
            .max()
            .cloned()
            .ok_or(SourceError::NoSegments)
    }

    async fn flavor(&self) -> Result<Flavor, SourceError> {
        Ok(self.lock().flavor)
    }
}

impl CoverageReader for FakeAdapters {
    fn coverage_at_start(&self, path: &Path, _flavor: Flavor) -> Result<GtidSet, CoverageError> {
        let segment = segment_of(path);
        let mut state = self.lock();
        state.calls.push(AdapterCall::ReadCoverage {
            segment: segment.clone(),
        });
        if state.unreadable.contains(&segment) {
            return Err(CoverageError::NoPreviousGtids(path.to_path_buf()));
        }
        state
            .coverage
            .get(&segment)
            .cloned()
            .ok_or_else(|| CoverageError::NoPreviousGtids(path.to_path_buf()))
    }
}

#[async_trait]
impl RemoteStore for FakeAdapters {
    async fn upload_segment(&self, path: &Path) -> Result<(), RemoteError> {
        let segment = SegmentName::from(segment_of(path));
        let mut state = self.lock();
        state.calls.push(AdapterCall::UploadSegment {
            segment: segment.to_string(),
        });
        if state.upload_fails_on.as_ref() == Some(&segment) {
            return Err(RemoteError::Upload(format!("injected failure: {}", segment)));
        }
        state.uploaded.push(segment);
        Ok(())
    }

    async fn fetch_sentinel(&self) -> Result<Option<BinlogSentinel>, RemoteError> {
        let mut state = self.lock();
        state.calls.push(AdapterCall::FetchSentinel);
        if state.sentinel_fetch_fails {
            return Err(RemoteError::Fetch("injected failure".to_string()));
        }
        Ok(state.sentinel.clone())
    }

    async fn put_sentinel(&self, sentinel: &BinlogSentinel) -> Result<(), RemoteError> {
        let mut state = self.lock();
        state.calls.push(AdapterCall::PutSentinel {
            gtid_archived: sentinel.gtid_archived.clone(),
        });
        if state.sentinel_put_fails {
            return Err(RemoteError::Put("injected failure".to_string()));
        }
        state.sentinel = Some(sentinel.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
