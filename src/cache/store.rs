//! Cache Store Module
//!
//! Fixed-capacity, append-only storage with linear lookup and flat-file
//! persistence.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::cache::codec::{read_record, write_record};
use crate::cache::{CacheEntry, CacheStats};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Append-only key/value storage.
///
/// Entries keep insertion order and are never modified or removed. Lookups
/// scan from the oldest entry, so the first write of a key always wins.
#[derive(Debug)]
pub struct CacheStore {
    /// Entries in insertion order; `entries.len()` is the count in use
    entries: Vec<CacheEntry>,
    /// Maximum number of entries before `set` is refused
    capacity: usize,
    /// Usage counters
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store able to hold `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        debug!(capacity, "cache store initialized");
        // Entries grow on push; capacity is a limit, not a preallocation.
        Ok(Self {
            entries: Vec::new(),
            capacity,
            stats: CacheStats::new(),
        })
    }

    // == Set ==
    /// Appends a key/value pair.
    ///
    /// Setting a key that is already present adds a second entry; lookups
    /// keep returning the first one.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let entry = CacheEntry::new(key, value)?;

        if self.entries.len() >= self.capacity {
            self.stats.record_rejected_write();
            warn!(key, capacity = self.capacity, "cache full, write rejected");
            return Err(CacheError::CacheFull(self.capacity));
        }

        self.entries.push(entry);
        debug!(key, count = self.entries.len(), "entry appended");
        Ok(())
    }

    // == Get ==
    /// Returns the value of the earliest entry whose key equals `key`.
    pub fn get(&mut self, key: &str) -> Option<String> {
        match self.entries.iter().find(|entry| entry.key() == key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value().to_owned())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Save ==
    /// Appends every entry to `path` as one record.
    ///
    /// The file is created if missing and never truncated, so repeated saves
    /// accumulate records.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        let mut writer = BufWriter::new(file);
        write_record(&mut writer, &self.entries)?;
        writer.flush()?;

        self.stats.record_save();
        info!(
            path = %path.display(),
            entries = self.entries.len(),
            "cache record saved"
        );
        Ok(())
    }

    // == Load ==
    /// Appends every record stored in `path`, in file order.
    ///
    /// Capacity grows to exactly the required total when a record does not
    /// fit. Records are applied whole: on a truncated or corrupt record the
    /// error is returned and only the records before it remain loaded.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);

        let mut offset = 0u64;
        let mut records = 0u64;
        let mut appended = 0usize;

        loop {
            let record = match read_record(&mut reader, &mut offset) {
                Ok(Some(record)) => record,
                Ok(None) => break,
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        records_applied = records,
                        error = %e,
                        "cache load stopped"
                    );
                    self.stats.record_loads(records);
                    return Err(e);
                }
            };

            appended += record.len();
            self.append_record(record);
            records += 1;
        }

        self.stats.record_loads(records);
        info!(
            path = %path.display(),
            records,
            entries = appended,
            capacity = self.capacity,
            "cache loaded"
        );
        Ok(())
    }

    /// Appends a decoded record, growing capacity first if it would overflow.
    fn append_record(&mut self, record: Vec<CacheEntry>) {
        let required = self.entries.len() + record.len();
        if required > self.capacity {
            info!(from = self.capacity, to = required, "cache capacity grown");
            self.entries.reserve_exact(required - self.entries.len());
            self.capacity = required;
        }
        self.entries.extend(record);
    }

    // == Release ==
    /// Drops the store and its entries. The store cannot be used afterwards.
    pub fn release(self) {
        debug!(entries = self.entries.len(), "cache store released");
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.entries.len();
        stats.capacity = self.capacity;
        stats
    }

    // == Iter ==
    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CacheEntry> {
        self.entries.iter()
    }

    // == Length ==
    /// Returns the number of entries in use.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if no entry has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Capacity ==
    /// Returns the number of entries the store accepts before `set` fails.
    /// Only `load` raises it.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
