//! Cache Statistics Module
//!
//! Tracks lookups, rejected writes and persistence activity.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache usage counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of lookups that found a key
    pub hits: u64,
    /// Number of lookups that found nothing
    pub misses: u64,
    /// Number of writes refused because the cache was full
    pub rejected_writes: u64,
    /// Number of records appended to disk by `save`
    pub records_saved: u64,
    /// Number of records read back by `load`
    pub records_loaded: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Current capacity
    pub capacity: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Rejected Write ==
    /// Increments the counter of writes refused by a full cache.
    pub fn record_rejected_write(&mut self) {
        self.rejected_writes += 1;
    }

    // == Record Save ==
    /// Increments the counter of records appended to disk.
    pub fn record_save(&mut self) {
        self.records_saved += 1;
    }

    // == Record Loads ==
    /// Adds `records` to the counter of records read back from disk.
    pub fn record_loads(&mut self, records: u64) {
        self.records_loaded += records;
    }
}
