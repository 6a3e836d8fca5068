//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A store is already live in the slot
    #[error("Cache already initialized")]
    AlreadyInitialized,

    /// No live store in the slot
    #[error("Cache not initialized")]
    NotInitialized,

    /// Capacity must be at least one entry
    #[error("Invalid capacity: {0}")]
    InvalidCapacity(usize),

    /// Key does not fit its fixed-width buffer
    #[error("Key is {len} bytes, maximum is {max}")]
    KeyTooLong { len: usize, max: usize },

    /// Value does not fit its fixed-width buffer
    #[error("Value is {len} bytes, maximum is {max}")]
    ValueTooLong { len: usize, max: usize },

    /// Interior NUL would be read back as a terminator
    #[error("{0} contains a NUL byte")]
    EmbeddedNul(&'static str),

    /// Every slot is in use
    #[error("Cache full: capacity {0} reached")]
    CacheFull(usize),

    /// Open, read or write failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File ended inside a record
    #[error("Truncated record at byte {offset}: expected {expected} bytes, found {found}")]
    TruncatedRecord {
        offset: u64,
        expected: usize,
        found: usize,
    },

    /// Bytes on disk do not decode as a record
    #[error("Corrupt record at byte {offset}: {reason}")]
    Corrupt { offset: u64, reason: String },
}

impl CacheError {
    /// True for failures that come from the persisted file rather than the
    /// caller's input.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            CacheError::Io(_) | CacheError::TruncatedRecord { .. } | CacheError::Corrupt { .. }
        )
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
