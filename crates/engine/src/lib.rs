// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! logship-engine: the binlog archival decision engine
//!
//! Decides which locally available segments are safe to upload, tracks that
//! decision durably across restarts, and reconciles the local cache with the
//! remote sentinel. The scan is strictly sequential; re-running after any
//! interruption is safe because uploads are idempotent and the filters'
//! watermarks never regress.

pub mod archiver;
pub mod error;
pub mod filters;

pub use archiver::{ArchiveOptions, ArchiveReport, Archiver};
pub use error::ArchiveError;
pub use filters::SegmentFilter;
