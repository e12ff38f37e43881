// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! logship-core: domain types for the binlog archival agent
//!
//! This crate provides:
//! - `SegmentName`, the lexically ordered binlog segment identifier
//! - `GtidSet`, executed-transaction coverage with set arithmetic
//! - `Flavor`, the server's GTID encoding scheme
//! - `Config`, the agent's TOML configuration

pub mod config;
pub mod flavor;
pub mod gtid;
pub mod segment;

pub use config::{Config, ConfigError};
pub use flavor::Flavor;
pub use gtid::{GtidError, GtidInterval, GtidSet};
pub use segment::SegmentName;
