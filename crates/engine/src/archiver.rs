// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Archival run orchestration
//!
//! One run: fetch the remote sentinel, load the local cache, reconcile them
//! (remote coverage wins), resolve the `until` boundary, build and seed the
//! filter chain, then scan the sorted segment list uploading whatever the
//! chain accepts. The cache is flushed every Nth processed segment and once
//! more at the end, after which the sentinel is rewritten from the final
//! cache state.
//!
//! Failed uploads and sentinel writes are fatal and abort the run; the last
//! checkpoint on disk is the next run's recovery point.

use crate::error::ArchiveError;
use crate::filters::SegmentFilter;
use logship_adapters::{CoverageReader, RemoteStore, SegmentSource};
use logship_core::{Flavor, SegmentName};
use logship_storage::{BinlogSentinel, CacheStore};

/// Per-run options
#[derive(Debug, Clone)]
pub struct ArchiveOptions {
    /// Archive segments strictly below this boundary; defaults to the
    /// currently active segment, and explicit values beyond it are clamped.
    pub until: Option<SegmentName>,
    /// Enable the GTID coverage filter (MySQL flavor only).
    pub check_gtids: bool,
    /// Flush the local cache every N processed segments.
    pub checkpoint_every: usize,
}

impl Default for ArchiveOptions {
    fn default() -> ArchiveOptions {
        ArchiveOptions {
            until: None,
            check_gtids: true,
            checkpoint_every: 10,
        }
    }
}

/// What a completed run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReport {
    pub uploaded: usize,
    pub skipped: usize,
    pub until: SegmentName,
}

/// Drives one archival run over the configured collaborators
pub struct Archiver<S, C, R> {
    source: S,
    coverage: C,
    remote: R,
    cache_store: CacheStore,
}

impl<S, C, R> Archiver<S, C, R>
where
    S: SegmentSource,
    C: CoverageReader,
    R: RemoteStore,
{
    pub fn new(source: S, coverage: C, remote: R, cache_store: CacheStore) -> Archiver<S, C, R> {
        Archiver {
            source,
            coverage,
            remote,
            cache_store,
        }
    }

    pub async fn run(&self, options: ArchiveOptions) -> Result<ArchiveReport, ArchiveError> {
        let span = tracing::info_span!("archive_run");
        let _guard = span.enter();

        // Baseline fetches are non-fatal; absence is the normal first run.
        let sentinel = match self.remote.fetch_sentinel().await {
            Ok(Some(sentinel)) => Some(sentinel),
            Ok(None) => {
                tracing::info!("no remote sentinel yet");
                None
            }
            Err(err) => {
                tracing::error!(error = %err, "cannot fetch remote sentinel, proceeding without");
                None
            }
        };
        let mut cache = self.cache_store.load();

        // Remote precedence: the sentinel's coverage overrides the local
        // value; the local watermark is never touched.
        if let Some(sentinel) = &sentinel {
            if !sentinel.gtid_archived.is_empty() {
                cache.gtid_archived = sentinel.gtid_archived.clone();
                tracing::info!(gtid = %cache.gtid_archived, "adopted archived GTID set from sentinel");
            }
        }

        let current = self.source.current_segment().await?;
        let until = match options.until {
            Some(until) if until <= current => until,
            _ => current,
        };

        let flavor = match self.source.flavor().await {
            Ok(flavor) => flavor,
            Err(err) => {
                tracing::warn!(error = %err, "flavor detection failed, assuming mysql");
                Flavor::MySql
            }
        };
        let segments_dir = self.source.segments_dir().await?;

        // Cost-ascending order: name comparisons first, header reads last.
        let mut filters: Vec<SegmentFilter<C>> =
            vec![SegmentFilter::until(until.clone()), SegmentFilter::archived()];
        if options.check_gtids && flavor == Flavor::MySql {
            filters.push(SegmentFilter::gtid(
                self.coverage.clone(),
                segments_dir.clone(),
                flavor,
            ));
        }
        for filter in &mut filters {
            filter.init(&cache);
        }

        let segments = self.source.segments().await?;
        let mut uploaded = 0;
        let mut skipped = 0;

        for (i, segment) in segments.iter().enumerate() {
            let next = segments.get(i + 1);
            tracing::debug!(segment = %segment, "testing");

            let mut rejected_by = None;
            for filter in filters.iter_mut() {
                if !filter.test(segment, next) {
                    rejected_by = Some(filter.name());
                    break;
                }
            }

            match rejected_by {
                Some(filter) => {
                    tracing::debug!(segment = %segment, filter, "skip");
                    for filter in &filters {
                        filter.on_skip(&mut cache);
                    }
                    skipped += 1;
                }
                None => {
                    let path = segments_dir.join(segment.as_str());
                    tracing::info!(segment = %segment, "archiving");
                    self.remote
                        .upload_segment(&path)
                        .await
                        .map_err(|source| ArchiveError::Upload {
                            segment: segment.clone(),
                            source,
                        })?;
                    for filter in &filters {
                        filter.on_upload(&mut cache);
                    }
                    uploaded += 1;
                }
            }

            // Bounded replay after a crash: checkpoint by processed count,
            // not by upload count.
            if options.checkpoint_every > 0 && (i + 1) % options.checkpoint_every == 0 {
                self.cache_store.store(&cache)?;
            }
        }

        self.cache_store.store(&cache)?;

        let sentinel = BinlogSentinel {
            gtid_archived: cache.gtid_archived.clone(),
        };
        tracing::info!(sentinel = %sentinel, cache = ?cache, "writing binlog sentinel");
        self.remote
            .put_sentinel(&sentinel)
            .await
            .map_err(ArchiveError::Sentinel)?;

        Ok(ArchiveReport {
            uploaded,
            skipped,
            until,
        })
    }
}

#[cfg(test)]
#[path = "archiver_tests.rs"]
mod tests;
