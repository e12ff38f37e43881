// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for the spec suite

use logship_adapters::FakeAdapters;
use logship_core::{GtidSet, SegmentName};
use logship_engine::Archiver;
use logship_storage::CacheStore;

pub const SID: &str = "6a6f10a9-4c3b-11e6-8ee2-9d8f4c3b0a1e";

pub fn seg(name: &str) -> SegmentName {
    SegmentName::from(name)
}

pub fn gtid(text: &str) -> GtidSet {
    text.parse().unwrap()
}

pub struct Harness {
    pub dir: tempfile::TempDir,
    pub fake: FakeAdapters,
}

impl Harness {
    pub fn new(segments: &[&str]) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let fake = FakeAdapters::new();
        for segment in segments {
            fake.add_segment(segment);
        }
        Harness { dir, fake }
    }

    pub fn cache_store(&self) -> CacheStore {
        CacheStore::at(self.dir.path().join("cache.json"))
    }

    pub fn archiver(&self) -> Archiver<FakeAdapters, FakeAdapters, FakeAdapters> {
        Archiver::new(
            self.fake.clone(),
            self.fake.clone(),
            self.fake.clone(),
            self.cache_store(),
        )
    }
}
