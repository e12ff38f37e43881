// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The decision scenarios from the engine's contract

use crate::prelude::*;
use logship_engine::ArchiveOptions;
use logship_storage::LogsCache;

/// Name-only scan: watermark at seg2, boundary at seg5, so exactly seg3 and
/// seg4 upload; seg1/seg2 fall to the watermark and seg5 to the boundary.
#[tokio::test]
async fn name_only_watermark_and_boundary() {
    let harness = Harness::new(&[
        "mysql-bin.000001",
        "mysql-bin.000002",
        "mysql-bin.000003",
        "mysql-bin.000004",
        "mysql-bin.000005",
    ]);
    harness
        .cache_store()
        .store(&LogsCache {
            last_archived_segment: Some(seg("mysql-bin.000002")),
            gtid_archived: String::new(),
        })
        .unwrap();

    let report = harness
        .archiver()
        .run(ArchiveOptions {
            until: Some(seg("mysql-bin.000005")),
            check_gtids: false,
            ..ArchiveOptions::default()
        })
        .await
        .unwrap();

    assert_eq!(
        harness.fake.uploaded(),
        vec![seg("mysql-bin.000003"), seg("mysql-bin.000004")]
    );
    assert_eq!((report.uploaded, report.skipped), (2, 3));
}

/// Coverage-aware skip: the segment's name would pass, but its transaction
/// delta (41-50) is already inside the archived set, so it is rejected.
#[tokio::test]
async fn coverage_rejects_renamed_duplicate_content() {
    let harness = Harness::new(&["mysql-bin.000002", "mysql-bin.000003"]);
    harness.fake.set_current("mysql-bin.000003");
    harness
        .fake
        .set_coverage("mysql-bin.000002", gtid(&format!("{}:1-40", SID)));
    harness
        .fake
        .set_coverage("mysql-bin.000003", gtid(&format!("{}:1-50", SID)));
    harness
        .cache_store()
        .store(&LogsCache {
            last_archived_segment: None,
            gtid_archived: format!("{}:1-50", SID),
        })
        .unwrap();

    let report = harness
        .archiver()
        .run(ArchiveOptions::default())
        .await
        .unwrap();

    assert!(harness.fake.uploaded().is_empty());
    assert_eq!(report.uploaded, 0);
}

/// Coverage extraction failure resolves to "upload", never "skip", no matter
/// how much coverage is already archived.
#[tokio::test]
async fn unreadable_coverage_uploads_unconditionally() {
    let harness = Harness::new(&["mysql-bin.000002", "mysql-bin.000003"]);
    harness.fake.set_current("mysql-bin.000003");
    harness.fake.mark_unreadable("mysql-bin.000003");
    harness
        .cache_store()
        .store(&LogsCache {
            last_archived_segment: None,
            gtid_archived: format!("{}:1-1000000", SID),
        })
        .unwrap();

    harness
        .archiver()
        .run(ArchiveOptions::default())
        .await
        .unwrap();

    assert_eq!(harness.fake.uploaded(), vec![seg("mysql-bin.000002")]);
}

/// The GTID filter can be disabled entirely; only the name filters decide.
#[tokio::test]
async fn disabled_coverage_check_reads_no_headers() {
    let harness = Harness::new(&["mysql-bin.000001", "mysql-bin.000002"]);

    harness
        .archiver()
        .run(ArchiveOptions {
            check_gtids: false,
            ..ArchiveOptions::default()
        })
        .await
        .unwrap();

    assert!(!harness
        .fake
        .calls()
        .iter()
        .any(|c| matches!(c, logship_adapters::AdapterCall::ReadCoverage { .. })));
}
