// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Properties that hold across multiple runs

use crate::prelude::*;
use logship_engine::ArchiveOptions;
use logship_storage::BinlogSentinel;

fn name_only() -> ArchiveOptions {
    ArchiveOptions {
        check_gtids: false,
        ..ArchiveOptions::default()
    }
}

/// Idempotence: with no new segments since the previous successful run, a
/// re-run uploads nothing and leaves the persisted state unchanged.
#[tokio::test]
async fn rerun_without_new_segments_is_a_no_op() {
    let harness = Harness::new(&[
        "mysql-bin.000001",
        "mysql-bin.000002",
        "mysql-bin.000003",
    ]);

    harness.archiver().run(name_only()).await.unwrap();
    let after_first = harness.cache_store().load();
    let uploads_after_first = harness.fake.uploaded().len();

    let report = harness.archiver().run(name_only()).await.unwrap();

    assert_eq!(report.uploaded, 0);
    assert_eq!(harness.fake.uploaded().len(), uploads_after_first);
    assert_eq!(harness.cache_store().load(), after_first);
}

/// New segments produced between runs are picked up from the watermark.
#[tokio::test]
async fn new_segments_archive_on_the_next_run() {
    let harness = Harness::new(&["mysql-bin.000001", "mysql-bin.000002"]);

    harness.archiver().run(name_only()).await.unwrap();
    assert_eq!(harness.fake.uploaded(), vec![seg("mysql-bin.000001")]);

    harness.fake.add_segment("mysql-bin.000003");
    harness.archiver().run(name_only()).await.unwrap();

    assert_eq!(
        harness.fake.uploaded(),
        vec![seg("mysql-bin.000001"), seg("mysql-bin.000002")]
    );
}

/// The remote sentinel's coverage survives the loss of the local cache, so
/// a rebuilt host does not re-upload content another host already archived.
#[tokio::test]
async fn sentinel_substitutes_for_a_lost_cache() {
    let harness = Harness::new(&["mysql-bin.000002", "mysql-bin.000003"]);
    harness.fake.set_current("mysql-bin.000003");
    harness
        .fake
        .set_coverage("mysql-bin.000002", gtid(&format!("{}:1-40", SID)));
    harness
        .fake
        .set_coverage("mysql-bin.000003", gtid(&format!("{}:1-50", SID)));
    harness.fake.set_sentinel(BinlogSentinel {
        gtid_archived: format!("{}:1-50", SID),
    });
    // No cache file exists: this host has never run the agent.

    let report = harness
        .archiver()
        .run(ArchiveOptions::default())
        .await
        .unwrap();

    assert_eq!(report.uploaded, 0);
}

/// The final sentinel always reflects the final cache coverage, so the two
/// persistence mechanisms converge by the end of every successful run.
#[tokio::test]
async fn sentinel_and_cache_converge() {
    let harness = Harness::new(&[
        "mysql-bin.000002",
        "mysql-bin.000003",
        "mysql-bin.000004",
    ]);
    harness
        .fake
        .set_coverage("mysql-bin.000002", gtid(&format!("{}:1-40", SID)));
    harness
        .fake
        .set_coverage("mysql-bin.000003", gtid(&format!("{}:1-60", SID)));
    harness
        .fake
        .set_coverage("mysql-bin.000004", gtid(&format!("{}:1-80", SID)));

    harness
        .archiver()
        .run(ArchiveOptions::default())
        .await
        .unwrap();

    let sentinel = harness.fake.sentinel().unwrap();
    assert_eq!(sentinel.gtid_archived, harness.cache_store().load().gtid_archived);
    assert!(!sentinel.gtid_archived.is_empty());
}
