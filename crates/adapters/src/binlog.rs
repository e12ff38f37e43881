// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! PREVIOUS_GTIDS header extraction
//!
//! Reads just enough of a binlog file to find the PREVIOUS_GTIDS_LOG_EVENT
//! the server writes right after the format description event: the GTID set
//! executed before this segment began. This is the only binlog event the
//! agent ever parses; the event stream proper is someone else's job.
//!
//! Layout: 4-byte magic `fe 62 69 6e`, then events with a 19-byte header
//! (type at offset 4, event length at offset 9, both little-endian fields).
//! The PREVIOUS_GTIDS payload is `n_sids`, then per server: 16-byte uuid,
//! `n_intervals`, and per interval a start and an exclusive end, all u64le.
//! A trailing event checksum, when enabled, sits after the self-delimiting
//! payload and is ignored.

use crate::traits::{CoverageError, CoverageReader};
use logship_core::{Flavor, GtidInterval, GtidSet};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use uuid::Uuid;

const BINLOG_MAGIC: [u8; 4] = [0xfe, 0x62, 0x69, 0x6e];
const EVENT_HEADER_LEN: usize = 19;
const PREVIOUS_GTIDS_EVENT: u8 = 35;

/// How many events to inspect before giving up. The format description
/// event comes first; PREVIOUS_GTIDS follows it immediately on any server
/// that writes one at all.
const MAX_HEADER_EVENTS: usize = 4;

/// Coverage reader over real binlog files on local disk
#[derive(Debug, Clone, Default)]
pub struct BinlogHeaderReader;

impl BinlogHeaderReader {
    pub fn new() -> BinlogHeaderReader {
        BinlogHeaderReader
    }
}

impl CoverageReader for BinlogHeaderReader {
    fn coverage_at_start(&self, path: &Path, flavor: Flavor) -> Result<GtidSet, CoverageError> {
        if flavor != Flavor::MySql {
            return Err(CoverageError::UnsupportedFlavor(flavor));
        }

        let mut file = File::open(path)?;
        let mut magic = [0u8; 4];
        file.read_exact(&mut magic)?;
        if magic != BINLOG_MAGIC {
            return Err(CoverageError::BadMagic);
        }

        for _ in 0..MAX_HEADER_EVENTS {
            let mut header = [0u8; EVENT_HEADER_LEN];
            if file.read_exact(&mut header).is_err() {
                break;
            }
            let event_type = header[4];
            let event_len = u32::from_le_bytes([header[9], header[10], header[11], header[12]]);
            let Some(payload_len) = (event_len as usize).checked_sub(EVENT_HEADER_LEN) else {
                return Err(CoverageError::BadPayload(format!(
                    "event length {} shorter than header",
                    event_len
                )));
            };

            if event_type == PREVIOUS_GTIDS_EVENT {
                let mut payload = vec![0u8; payload_len];
                file.read_exact(&mut payload)?;
                return parse_previous_gtids(&payload);
            }
            file.seek(SeekFrom::Current(payload_len as i64))?;
        }

        Err(CoverageError::NoPreviousGtids(path.to_path_buf()))
    }
}

fn parse_previous_gtids(payload: &[u8]) -> Result<GtidSet, CoverageError> {
    let mut cursor = Cursor { buf: payload, pos: 0 };
    let mut set = GtidSet::new();

    let n_sids = cursor.u64()?;
    for _ in 0..n_sids {
        let sid_bytes = cursor.bytes(16)?;
        let sid = Uuid::from_slice(sid_bytes)
            .map_err(|e| CoverageError::BadPayload(e.to_string()))?;
        let n_intervals = cursor.u64()?;
        for _ in 0..n_intervals {
            let start = cursor.u64()?;
            let end_exclusive = cursor.u64()?;
            let Some(end) = end_exclusive.checked_sub(1) else {
                return Err(CoverageError::BadPayload("zero interval end".to_string()));
            };
            set.insert(sid, GtidInterval::new(start, end)?);
        }
    }
    Ok(set)
}

struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn bytes(&mut self, n: usize) -> Result<&'a [u8], CoverageError> {
        let end = self.pos + n;
        let slice = self
            .buf
            .get(self.pos..end)
            .ok_or_else(|| CoverageError::BadPayload("truncated payload".to_string()))?;
        self.pos = end;
        Ok(slice)
    }

    fn u64(&mut self) -> Result<u64, CoverageError> {
        let bytes = self.bytes(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(raw))
    }
}

#[cfg(test)]
#[path = "binlog_tests.rs"]
mod tests;
