//! Cache Module
//!
//! Fixed-capacity, append-only key/value storage with flat binary
//! persistence.

pub mod codec;
mod entry;
mod slot;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use slot::CacheSlot;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Width of the on-disk key buffer, terminator included
pub const KEY_SIZE: usize = 256;

/// Width of the on-disk value buffer, terminator included
pub const VALUE_SIZE: usize = 1024;

/// Maximum key length in bytes
pub const MAX_KEY_LENGTH: usize = KEY_SIZE - 1;

/// Maximum value length in bytes
pub const MAX_VALUE_LENGTH: usize = VALUE_SIZE - 1;

/// Size of one serialized entry
pub const ENTRY_SIZE: usize = KEY_SIZE + VALUE_SIZE;

/// Size of the little-endian `i32` entry count preceding each record
pub const RECORD_HEADER_SIZE: usize = 4;
