// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent configuration
//!
//! Loaded from a TOML file. Only the paths the agent cannot discover on its
//! own are required; everything else has defaults.

use crate::flavor::Flavor;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading the agent configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Agent configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to the binlog index file (the server's `@@log_bin_index`).
    pub index_file: PathBuf,
    /// Root directory of the remote backup storage.
    pub remote_root: PathBuf,
    /// GTID flavor of the server. When absent, detected from
    /// `server_version` if given, otherwise MySQL.
    #[serde(default)]
    pub flavor: Option<Flavor>,
    /// Server version string (e.g. the output of `SELECT version()`), used
    /// to detect the flavor when `flavor` is not set explicitly.
    #[serde(default)]
    pub server_version: Option<String>,
    /// Override for the local cache file path (defaults to a fixed name in
    /// the user's home directory).
    #[serde(default)]
    pub cache_path: Option<PathBuf>,
    /// Flush the local cache every N processed segments.
    #[serde(default = "default_checkpoint_every")]
    pub checkpoint_every: usize,
}

fn default_checkpoint_every() -> usize {
    10
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Effective flavor: an explicit `flavor` wins, then detection from
    /// `server_version`, then the MySQL default.
    pub fn resolved_flavor(&self) -> Flavor {
        match (self.flavor, &self.server_version) {
            (Some(flavor), _) => flavor,
            (None, Some(version)) => Flavor::from_version(version),
            (None, None) => Flavor::default(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
