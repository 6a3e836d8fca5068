//! Cache Entry Module
//!
//! Defines a single key/value pair and its fixed-width on-disk layout.

use crate::cache::{ENTRY_SIZE, KEY_SIZE, MAX_KEY_LENGTH, MAX_VALUE_LENGTH, VALUE_SIZE};
use crate::error::{CacheError, Result};

// == Cache Entry ==
/// A validated key/value pair. Both sides are guaranteed to fit their
/// NUL-padded buffers with room for the terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    key: String,
    value: String,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry, rejecting anything that would not survive the
    /// fixed-width encoding.
    pub fn new(key: &str, value: &str) -> Result<Self> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::KeyTooLong {
                len: key.len(),
                max: MAX_KEY_LENGTH,
            });
        }
        if value.len() > MAX_VALUE_LENGTH {
            return Err(CacheError::ValueTooLong {
                len: value.len(),
                max: MAX_VALUE_LENGTH,
            });
        }
        if key.as_bytes().contains(&0) {
            return Err(CacheError::EmbeddedNul("key"));
        }
        if value.as_bytes().contains(&0) {
            return Err(CacheError::EmbeddedNul("value"));
        }

        Ok(Self {
            key: key.to_owned(),
            value: value.to_owned(),
        })
    }

    // == Accessors ==
    /// Returns the key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the value.
    pub fn value(&self) -> &str {
        &self.value
    }

    // == Encode ==
    /// Writes the entry as `key[256] ++ value[1024]`, zero padded.
    pub fn encode(&self, buf: &mut [u8; ENTRY_SIZE]) {
        buf.fill(0);
        buf[..self.key.len()].copy_from_slice(self.key.as_bytes());
        buf[KEY_SIZE..KEY_SIZE + self.value.len()].copy_from_slice(self.value.as_bytes());
    }

    // == Decode ==
    /// Reads an entry back from its fixed-width form.
    ///
    /// `offset` is the position of `buf` in the source file and is only used
    /// for error reporting.
    pub fn decode(buf: &[u8; ENTRY_SIZE], offset: u64) -> Result<Self> {
        let key = read_field(&buf[..KEY_SIZE], "key", offset)?;
        let value = read_field(
            &buf[KEY_SIZE..KEY_SIZE + VALUE_SIZE],
            "value",
            offset + KEY_SIZE as u64,
        )?;
        Ok(Self { key, value })
    }
}

/// Extracts the text before the first NUL. A buffer without a terminator
/// was not produced by this crate.
fn read_field(field: &[u8], name: &str, offset: u64) -> Result<String> {
    let end = field
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| CacheError::Corrupt {
            offset,
            reason: format!("{} buffer has no NUL terminator", name),
        })?;

    String::from_utf8(field[..end].to_vec()).map_err(|_| CacheError::Corrupt {
        offset,
        reason: format!("{} is not valid UTF-8", name),
    })
}
