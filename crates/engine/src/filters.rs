// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stateful segment filters
//!
//! Three filters decide whether a segment uploads, composed with AND
//! semantics in cost-ascending order: the two name comparisons first, the
//! GTID filter last since it reads segment headers from disk. They are a
//! closed set, so one enum carries the whole capability contract
//! (`init` / `test` / `on_upload` / `on_skip`) instead of an open trait.
//!
//! Lifecycle per run: `init` seeds each filter from the reconciled cache,
//! `test` runs per segment with short-circuit on the first rejection, and
//! every filter receives the matching `on_upload` / `on_skip` bookkeeping
//! call regardless of which filter rejected, so cross-run state stays
//! consistent.

use logship_adapters::CoverageReader;
use logship_core::{Flavor, GtidSet, SegmentName};
use logship_storage::LogsCache;
use std::path::PathBuf;

/// One unit of the filter chain
pub enum SegmentFilter<C> {
    /// Accepts segments strictly below the `until` boundary; the active
    /// segment must never be archived since a copy would be incomplete.
    Until(UntilFilter),
    /// Name-based watermark over already-decided segments. Coarse but
    /// cheap; necessary, not sufficient, when segments were produced out of
    /// naming order.
    Archived(ArchivedFilter),
    /// Content-aware coverage check over GTID sets.
    Gtid(GtidFilter<C>),
}

impl<C: CoverageReader> SegmentFilter<C> {
    pub fn until(until: SegmentName) -> SegmentFilter<C> {
        SegmentFilter::Until(UntilFilter { until })
    }

    pub fn archived() -> SegmentFilter<C> {
        SegmentFilter::Archived(ArchivedFilter::default())
    }

    pub fn gtid(reader: C, segments_dir: PathBuf, flavor: Flavor) -> SegmentFilter<C> {
        SegmentFilter::Gtid(GtidFilter {
            reader,
            segments_dir,
            flavor,
            gtid_archived: None,
            last_gtid_seen: None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            SegmentFilter::Until(_) => "until",
            SegmentFilter::Archived(_) => "archived",
            SegmentFilter::Gtid(_) => "gtid",
        }
    }

    /// Seed filter state from the loaded, reconciled cache.
    pub fn init(&mut self, cache: &LogsCache) {
        match self {
            SegmentFilter::Until(_) => {}
            SegmentFilter::Archived(f) => f.init(cache),
            SegmentFilter::Gtid(f) => f.init(cache),
        }
    }

    /// Decide whether `segment` should upload. `next` is the following
    /// segment in scan order, when there is one.
    pub fn test(&mut self, segment: &SegmentName, next: Option<&SegmentName>) -> bool {
        match self {
            SegmentFilter::Until(f) => f.test(segment),
            SegmentFilter::Archived(f) => f.test(segment),
            SegmentFilter::Gtid(f) => f.test(segment, next),
        }
    }

    /// Bookkeeping after the segment's upload succeeded.
    pub fn on_upload(&self, cache: &mut LogsCache) {
        match self {
            SegmentFilter::Until(_) => {}
            SegmentFilter::Archived(f) => f.record(cache),
            SegmentFilter::Gtid(f) => f.record(cache),
        }
    }

    /// Bookkeeping after the segment was skipped.
    pub fn on_skip(&self, cache: &mut LogsCache) {
        match self {
            SegmentFilter::Until(_) => {}
            SegmentFilter::Archived(f) => f.record(cache),
            SegmentFilter::Gtid(_) => {}
        }
    }
}

/// Boundary filter: accept iff `segment < until`
pub struct UntilFilter {
    until: SegmentName,
}

impl UntilFilter {
    fn test(&self, segment: &SegmentName) -> bool {
        *segment < self.until
    }
}

/// Watermark filter: accept iff `segment > last_archived`
#[derive(Default)]
pub struct ArchivedFilter {
    last_archived: Option<SegmentName>,
    last_tested: Option<SegmentName>,
}

impl ArchivedFilter {
    fn init(&mut self, cache: &LogsCache) {
        self.last_archived = cache.last_archived_segment.clone();
        self.last_tested = cache.last_archived_segment.clone();
    }

    fn test(&mut self, segment: &SegmentName) -> bool {
        if let Some(last) = &self.last_archived {
            if segment <= last {
                return false;
            }
        }
        self.last_tested = Some(segment.clone());
        true
    }

    /// The watermark is never lowered: `last_tested` only moves up, and both
    /// upload and skip persist it.
    fn record(&self, cache: &mut LogsCache) {
        if let Some(tested) = &self.last_tested {
            cache.last_archived_segment = Some(tested.clone());
        }
    }
}

/// Coverage filter over GTID sets.
///
/// `gtid_archived` is coverage known to be durably uploaded; `last_gtid_seen`
/// is coverage as of the start of the most recently tested segment. The delta
/// between the next segment's starting coverage and `last_gtid_seen` is
/// exactly what the current segment introduced; when that delta is already
/// contained in `gtid_archived` the segment can be skipped. Every uncertainty
/// (missing next segment, unreadable header, unparseable cache) resolves to
/// "upload", never to "skip".
pub struct GtidFilter<C> {
    reader: C,
    segments_dir: PathBuf,
    flavor: Flavor,
    gtid_archived: Option<GtidSet>,
    last_gtid_seen: Option<GtidSet>,
}

impl<C: CoverageReader> GtidFilter<C> {
    fn init(&mut self, cache: &LogsCache) {
        self.gtid_archived = match cache.gtid_archived.parse::<GtidSet>() {
            Ok(set) => Some(set),
            Err(err) => {
                tracing::warn!(error = %err, "cannot parse archived GTID set from cache");
                None
            }
        };
        self.last_gtid_seen = None;
    }

    fn test(&mut self, segment: &SegmentName, next: Option<&SegmentName>) -> bool {
        if self.flavor != Flavor::MySql {
            // MariaDB GTID sets are domain/server/sequence triples with
            // unclear gap semantics, so the containment math is not trusted
            // for them.
            return true;
        }

        // Coverage at the start of the next segment is everything executed
        // up to the end of this one.
        let next_coverage = match next {
            Some(next) => {
                match self
                    .reader
                    .coverage_at_start(&self.segments_dir.join(next.as_str()), self.flavor)
                {
                    Ok(coverage) => coverage,
                    Err(err) => {
                        tracing::info!(segment = %segment, error = %err, "cannot extract PREVIOUS_GTIDS from next segment, uploading");
                        return true;
                    }
                }
            }
            None => {
                tracing::info!(segment = %segment, "no next segment to read coverage from, uploading");
                return true;
            }
        };

        let Some(gtid_archived) = self.gtid_archived.as_mut() else {
            tracing::debug!("no archived GTID baseline in cache, seeding from current segment");
            self.gtid_archived = Some(next_coverage.clone());
            self.last_gtid_seen = Some(next_coverage);
            return true;
        };

        if self.last_gtid_seen.is_none() {
            let own_path = self.segments_dir.join(segment.as_str());
            match self.reader.coverage_at_start(&own_path, self.flavor) {
                Ok(coverage) => {
                    tracing::debug!(segment = %segment, "first segment seen by the gtid filter this run");
                    self.last_gtid_seen = Some(coverage);
                }
                Err(err) => {
                    tracing::info!(segment = %segment, error = %err, "cannot extract PREVIOUS_GTIDS from current segment, uploading");
                    self.last_gtid_seen = Some(next_coverage);
                    return true;
                }
            }
        }

        let delta = match &self.last_gtid_seen {
            Some(seen) => next_coverage.difference(seen),
            None => next_coverage.clone(),
        };

        // When the next segment's starting coverage is already archived, the
        // current segment cannot contain anything new.
        if gtid_archived.contains(&delta) {
            tracing::info!(segment = %segment, delta = %delta, "segment content already archived, skipping");
            self.last_gtid_seen = Some(next_coverage);
            return false;
        }

        gtid_archived.union(&delta);
        tracing::info!(segment = %segment, delta = %delta, "segment introduces new coverage, uploading");
        self.last_gtid_seen = Some(next_coverage);
        true
    }

    /// Persist confirmed coverage. Runs only after the upload succeeded, so
    /// the cache reflects durable archival, not merely a decision.
    fn record(&self, cache: &mut LogsCache) {
        if let Some(archived) = &self.gtid_archived {
            cache.gtid_archived = archived.to_string();
        }
    }
}

#[cfg(test)]
#[path = "filters_tests.rs"]
mod tests;
