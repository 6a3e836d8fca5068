//! Record Codec
//!
//! Reads and writes the flat persistence format:
//!
//! ```text
//! repeated {
//!   i32 (LE)    entry_count
//!   repeated entry_count times {
//!     byte[256]   key    (NUL padded)
//!     byte[1024]  value  (NUL padded)
//!   }
//! }
//! ```
//!
//! There is no header, magic or version field.

use std::io::{self, Read, Write};

use crate::cache::{CacheEntry, ENTRY_SIZE, RECORD_HEADER_SIZE};
use crate::error::{CacheError, Result};

// Upper bound on entries preallocated from an untrusted header.
const MAX_PREALLOC_ENTRIES: usize = 1024;

// == Write Record ==
/// Encodes `entries` as one record and writes it with a single `write_all`.
pub fn write_record<W: Write>(writer: &mut W, entries: &[CacheEntry]) -> Result<()> {
    let count = i32::try_from(entries.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} entries do not fit an i32 record header", entries.len()),
        )
    })?;

    let mut out = Vec::with_capacity(RECORD_HEADER_SIZE + entries.len() * ENTRY_SIZE);
    out.extend_from_slice(&count.to_le_bytes());

    let mut buf = [0u8; ENTRY_SIZE];
    for entry in entries {
        entry.encode(&mut buf);
        out.extend_from_slice(&buf);
    }

    writer.write_all(&out)?;
    Ok(())
}

// == Read Record ==
/// Reads the next record from `reader`.
///
/// Returns `Ok(None)` on a clean end of input. `offset` tracks the position
/// in the stream and is advanced past every byte consumed. The record is
/// decoded in full before it is returned, so a truncated or corrupt record
/// never yields partial entries.
pub fn read_record<R: Read>(reader: &mut R, offset: &mut u64) -> Result<Option<Vec<CacheEntry>>> {
    let record_start = *offset;

    let mut header = [0u8; RECORD_HEADER_SIZE];
    let got = read_full(reader, &mut header)?;
    *offset += got as u64;
    if got == 0 {
        return Ok(None);
    }
    if got < RECORD_HEADER_SIZE {
        return Err(CacheError::TruncatedRecord {
            offset: record_start,
            expected: RECORD_HEADER_SIZE,
            found: got,
        });
    }

    let count = i32::from_le_bytes(header);
    let count = usize::try_from(count).map_err(|_| CacheError::Corrupt {
        offset: record_start,
        reason: format!("negative entry count {}", count),
    })?;

    let mut entries = Vec::with_capacity(count.min(MAX_PREALLOC_ENTRIES));
    let mut buf = [0u8; ENTRY_SIZE];
    for read_so_far in 0..count {
        let got = read_full(reader, &mut buf)?;
        let entry_start = *offset;
        *offset += got as u64;
        if got < ENTRY_SIZE {
            return Err(CacheError::TruncatedRecord {
                offset: record_start,
                expected: RECORD_HEADER_SIZE.saturating_add(count.saturating_mul(ENTRY_SIZE)),
                found: RECORD_HEADER_SIZE + read_so_far * ENTRY_SIZE + got,
            });
        }
        entries.push(CacheEntry::decode(&buf, entry_start)?);
    }

    Ok(Some(entries))
}

/// Like `read_exact`, but reports how many bytes arrived before EOF instead
/// of failing.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
