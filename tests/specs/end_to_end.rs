// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Full pipeline over real adapters: synthetic binlog files on disk, the
//! index-file source, the header reader, and a filesystem remote.

use crate::prelude::SID;
use logship_adapters::{BinlogHeaderReader, FsRemote, IndexFileSource, RemoteStore};
use logship_core::Flavor;
use logship_engine::{ArchiveOptions, Archiver};
use logship_storage::CacheStore;
use std::path::Path;
use uuid::Uuid;

const FORMAT_DESCRIPTION_EVENT: u8 = 15;
const PREVIOUS_GTIDS_EVENT: u8 = 35;

fn event(event_type: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&[0u8; 4]);
    out.push(event_type);
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(&((19 + payload.len()) as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 6]);
    out.extend_from_slice(payload);
    out
}

/// A binlog whose PREVIOUS_GTIDS says `1..=executed` transactions ran before
/// it started.
fn write_binlog(dir: &Path, name: &str, executed: u64) {
    let sid = Uuid::parse_str(SID).unwrap();
    let mut payload = Vec::new();
    payload.extend_from_slice(&1u64.to_le_bytes());
    payload.extend_from_slice(sid.as_bytes());
    payload.extend_from_slice(&1u64.to_le_bytes());
    payload.extend_from_slice(&1u64.to_le_bytes());
    payload.extend_from_slice(&(executed + 1).to_le_bytes()); // exclusive end

    let mut bytes = vec![0xfe, 0x62, 0x69, 0x6e];
    bytes.extend_from_slice(&event(FORMAT_DESCRIPTION_EVENT, &[0u8; 57]));
    if executed > 0 {
        bytes.extend_from_slice(&event(PREVIOUS_GTIDS_EVENT, &payload));
    }
    std::fs::write(dir.join(name), bytes).unwrap();
}

#[tokio::test]
async fn push_archives_real_files_and_writes_sentinel() {
    let binlogs = tempfile::tempdir().unwrap();
    let remote_root = tempfile::tempdir().unwrap();
    let state = tempfile::tempdir().unwrap();

    // Three rotated segments plus the active one; coverage grows 0 → 40 →
    // 90 → 130 across the rotation points.
    write_binlog(binlogs.path(), "mysql-bin.000001", 0);
    write_binlog(binlogs.path(), "mysql-bin.000002", 40);
    write_binlog(binlogs.path(), "mysql-bin.000003", 90);
    write_binlog(binlogs.path(), "mysql-bin.000004", 130);
    let index = binlogs.path().join("mysql-bin.index");
    std::fs::write(
        &index,
        "./mysql-bin.000001\n./mysql-bin.000002\n./mysql-bin.000003\n./mysql-bin.000004\n",
    )
    .unwrap();

    let remote = FsRemote::new(remote_root.path());
    let archiver = Archiver::new(
        IndexFileSource::new(&index, Flavor::MySql),
        BinlogHeaderReader::new(),
        remote.clone(),
        CacheStore::at(state.path().join("cache.json")),
    );

    let report = archiver.run(ArchiveOptions::default()).await.unwrap();

    // The active segment stays local; the rest are archived.
    assert_eq!(report.uploaded, 3);
    for name in ["mysql-bin.000001", "mysql-bin.000002", "mysql-bin.000003"] {
        assert!(remote.segment_path(name).exists(), "{name} not uploaded");
    }
    assert!(!remote.segment_path("mysql-bin.000004").exists());

    let sentinel = remote.fetch_sentinel().await.unwrap().unwrap();
    assert!(sentinel.gtid_archived.contains(SID));

    // Nothing new: the next run is a no-op.
    let archiver = Archiver::new(
        IndexFileSource::new(&index, Flavor::MySql),
        BinlogHeaderReader::new(),
        remote.clone(),
        CacheStore::at(state.path().join("cache.json")),
    );
    let rerun = archiver.run(ArchiveOptions::default()).await.unwrap();
    assert_eq!(rerun.uploaded, 0);
}
