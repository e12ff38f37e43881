// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! logship-adapters: seams to the agent's external collaborators
//!
//! The decision engine talks to the outside world through three traits:
//! - [`SegmentSource`]: which segments exist, which one is active
//! - [`CoverageReader`]: GTID coverage recorded at the start of a segment
//! - [`RemoteStore`]: durable uploads and the remote sentinel
//!
//! Real implementations here stay deliberately thin; everything with
//! decision logic lives in logship-engine.

pub mod binlog;
pub mod fs;
pub mod index;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use binlog::BinlogHeaderReader;
pub use fs::FsRemote;
pub use index::IndexFileSource;
pub use traits::{
    CoverageError, CoverageReader, RemoteError, RemoteStore, SegmentSource, SourceError,
};

#[cfg(any(test, feature = "test-support"))]
pub use fake::{AdapterCall, FakeAdapters};
