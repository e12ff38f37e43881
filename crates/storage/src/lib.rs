// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! logship-storage: persistent archival state
//!
//! Two independent records track archival progress:
//! - the local `LogsCache`, checkpointed during a run
//! - the remote `BinlogSentinel`, authoritative for coverage across hosts
//!
//! They are reconciled once at run start (remote coverage wins) and written
//! at run end. This is best-effort checkpointing with explicit ordering, not
//! a two-phase commit.

pub mod cache;
pub mod sentinel;

pub use cache::{CacheStore, LogsCache, StorageError};
pub use sentinel::{BinlogSentinel, SENTINEL_NAME};
