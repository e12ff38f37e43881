// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote archival sentinel
//!
//! A durable marker in the remote backup root recording which coverage has
//! been archived. It is authoritative across hosts: at run start its
//! coverage, when non-empty, overrides the locally cached value. The local
//! watermark (`LastArchivedBinlog`) is never touched by the sentinel.

use serde::{Deserialize, Serialize};

/// Object name of the sentinel in the remote backup root
pub const SENTINEL_NAME: &str = "binlog_sentinel_005.json";

/// Remote marker of archived coverage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinlogSentinel {
    #[serde(rename = "GtidArchived", default)]
    pub gtid_archived: String,
}

impl std::fmt::Display for BinlogSentinel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GtidArchived: {}", self.gtid_archived)
    }
}

#[cfg(test)]
#[path = "sentinel_tests.rs"]
mod tests;
