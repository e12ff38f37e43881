// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! GTID set arithmetic
//!
//! A `GtidSet` maps a server identity to disjoint, ascending intervals of
//! executed transaction sequence numbers. The archival engine uses set
//! arithmetic over these to detect binlog content that is already covered by
//! an earlier upload even when segment names alone are ambiguous.
//!
//! Operations take `&self` and return owned values, so a filter's working
//! state can never alias the cache's serialized snapshot. `union` is the one
//! in-place mutator and grows coverage monotonically.
//!
//! Text form is the MySQL grammar: `sid:iv[:iv]*(,sid:iv[:iv]*)*` where `iv`
//! is `start[-end]` with inclusive bounds, e.g.
//! `6a6f10a9-4c3b-11e6-8ee2-9d8f4c3b0a1e:1-5:8`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Errors from parsing or building GTID sets
#[derive(Debug, Error)]
pub enum GtidError {
    #[error("invalid server uuid: {0}")]
    InvalidUuid(String),
    #[error("invalid interval: {0}")]
    InvalidInterval(String),
    #[error("missing intervals for server: {0}")]
    MissingIntervals(String),
}

/// One inclusive run of sequence numbers executed for a single server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GtidInterval {
    pub start: u64,
    pub end: u64,
}

impl GtidInterval {
    /// Build an interval, rejecting reversed bounds and zero (sequence
    /// numbers start at 1).
    pub fn new(start: u64, end: u64) -> Result<Self, GtidError> {
        if start == 0 || end < start {
            return Err(GtidError::InvalidInterval(format!("{}-{}", start, end)));
        }
        Ok(GtidInterval { start, end })
    }

    fn covers(&self, other: &GtidInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl std::fmt::Display for GtidInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Executed-transaction coverage: per-server disjoint ascending intervals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GtidSet {
    sets: BTreeMap<Uuid, Vec<GtidInterval>>,
}

impl GtidSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Add one interval for a server, merging overlapping and adjacent
    /// intervals so the per-server list stays disjoint and ascending.
    pub fn insert(&mut self, sid: Uuid, interval: GtidInterval) {
        let intervals = self.sets.entry(sid).or_default();
        intervals.push(interval);
        *intervals = normalize(std::mem::take(intervals));
    }

    /// Grow this set to also cover everything in `other`. Idempotent and
    /// commutative; coverage never shrinks.
    pub fn union(&mut self, other: &GtidSet) {
        for (sid, intervals) in &other.sets {
            for iv in intervals {
                self.insert(*sid, *iv);
            }
        }
    }

    /// Transactions in `self` that are not in `other`. Neither operand is
    /// mutated.
    pub fn difference(&self, other: &GtidSet) -> GtidSet {
        let mut out = GtidSet::new();
        for (sid, intervals) in &self.sets {
            let remaining = match other.sets.get(sid) {
                Some(theirs) => subtract(intervals, theirs),
                None => intervals.clone(),
            };
            if !remaining.is_empty() {
                out.sets.insert(*sid, remaining);
            }
        }
        out
    }

    /// True iff every interval of `other` is covered by this set.
    pub fn contains(&self, other: &GtidSet) -> bool {
        for (sid, intervals) in &other.sets {
            let Some(ours) = self.sets.get(sid) else {
                return false;
            };
            for iv in intervals {
                // Intervals are normalized, so coverage means a single one
                // of ours spans the whole of theirs.
                if !ours.iter().any(|o| o.covers(iv)) {
                    return false;
                }
            }
        }
        true
    }

    pub fn servers(&self) -> impl Iterator<Item = &Uuid> {
        self.sets.keys()
    }

    pub fn intervals(&self, sid: &Uuid) -> Option<&[GtidInterval]> {
        self.sets.get(sid).map(Vec::as_slice)
    }
}

/// Merge a possibly overlapping interval list into disjoint ascending form.
fn normalize(mut intervals: Vec<GtidInterval>) -> Vec<GtidInterval> {
    intervals.sort_by_key(|iv| iv.start);
    let mut out: Vec<GtidInterval> = Vec::with_capacity(intervals.len());
    for iv in intervals {
        match out.last_mut() {
            // Adjacent runs (end + 1 == start) merge too.
            Some(last) if iv.start <= last.end.saturating_add(1) => {
                last.end = last.end.max(iv.end);
            }
            _ => out.push(iv),
        }
    }
    out
}

/// `ours` minus `theirs`; both inputs disjoint ascending.
fn subtract(ours: &[GtidInterval], theirs: &[GtidInterval]) -> Vec<GtidInterval> {
    let mut out = Vec::new();
    for iv in ours {
        let mut start = iv.start;
        let mut exhausted = false;
        for cut in theirs {
            if cut.end < start {
                continue;
            }
            if cut.start > iv.end {
                break;
            }
            if cut.start > start {
                out.push(GtidInterval {
                    start,
                    end: cut.start - 1,
                });
            }
            if cut.end >= iv.end {
                exhausted = true;
                break;
            }
            start = cut.end + 1;
        }
        if !exhausted && start <= iv.end {
            out.push(GtidInterval {
                start,
                end: iv.end,
            });
        }
    }
    out
}

impl FromStr for GtidSet {
    type Err = GtidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = GtidSet::new();
        let text = s.trim();
        if text.is_empty() {
            return Ok(set);
        }
        for part in text.split(',') {
            let part = part.trim();
            let mut pieces = part.split(':');
            let sid_text = pieces.next().unwrap_or_default();
            let sid = Uuid::parse_str(sid_text)
                .map_err(|_| GtidError::InvalidUuid(sid_text.to_string()))?;

            let mut saw_interval = false;
            for iv_text in pieces {
                saw_interval = true;
                let (start, end) = match iv_text.split_once('-') {
                    Some((a, b)) => (parse_seq(a)?, parse_seq(b)?),
                    None => {
                        let n = parse_seq(iv_text)?;
                        (n, n)
                    }
                };
                set.insert(sid, GtidInterval::new(start, end)?);
            }
            if !saw_interval {
                return Err(GtidError::MissingIntervals(sid_text.to_string()));
            }
        }
        Ok(set)
    }
}

fn parse_seq(text: &str) -> Result<u64, GtidError> {
    text.trim()
        .parse::<u64>()
        .map_err(|_| GtidError::InvalidInterval(text.to_string()))
}

impl std::fmt::Display for GtidSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (sid, intervals) in &self.sets {
            if !first {
                write!(f, ",")?;
            }
            first = false;
            write!(f, "{}", sid)?;
            for iv in intervals {
                write!(f, ":{}", iv)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "gtid_tests.rs"]
mod tests;
