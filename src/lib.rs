//! flatcache - A fixed-capacity, append-only key/value cache
//!
//! Entries are stored in insertion order, looked up by linear scan and
//! persisted as flat fixed-width records.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheEntry, CacheSlot, CacheStats, CacheStore};
pub use config::Config;
pub use error::{CacheError, Result};
