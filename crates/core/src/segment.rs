// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Binlog segment names

use serde::{Deserialize, Serialize};

/// Name of one rotated binlog segment, e.g. `mysql-bin.000042`.
///
/// Segments compare lexically, and the engine relies on lexical order as a
/// proxy for chronological order. That holds only while the server's naming
/// scheme keeps a fixed-width, non-wrapping numeric suffix; a rollover from a
/// 6-digit to a 7-digit counter would break the ordering silently.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentName(pub String);

impl SegmentName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SegmentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SegmentName {
    fn from(s: &str) -> Self {
        SegmentName(s.to_string())
    }
}

impl From<String> for SegmentName {
    fn from(s: String) -> Self {
        SegmentName(s)
    }
}

#[cfg(test)]
#[path = "segment_tests.rs"]
mod tests;
