// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server GTID flavor

use serde::{Deserialize, Serialize};

/// The server variant's GTID encoding scheme.
///
/// Gap-detection arithmetic is only known to be sound for the MySQL range
/// encoding; MariaDB tracks domain/server/sequence triples with unclear gap
/// semantics, so the engine falls back to uploading everything for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    #[default]
    MySql,
    MariaDb,
}

impl Flavor {
    /// Best-effort detection from a server version string; unknown versions
    /// fall back to MySQL.
    pub fn from_version(version: &str) -> Flavor {
        if version.to_ascii_lowercase().contains("mariadb") {
            Flavor::MariaDb
        } else {
            Flavor::MySql
        }
    }
}

impl std::fmt::Display for Flavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Flavor::MySql => write!(f, "mysql"),
            Flavor::MariaDb => write!(f, "mariadb"),
        }
    }
}

#[cfg(test)]
#[path = "flavor_tests.rs"]
mod tests;
