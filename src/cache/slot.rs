//! Cache Slot Module
//!
//! Holds at most one live store for callers that keep the cache in a
//! long-lived field and need the initialize/release lifecycle checked at
//! runtime.

use crate::cache::CacheStore;
use crate::error::{CacheError, Result};

// == Cache Slot ==
/// Uninitialized → Initialized → Released, with re-initialization allowed
/// once the previous store has been released.
#[derive(Debug, Default)]
pub struct CacheSlot {
    store: Option<CacheStore>,
}

impl CacheSlot {
    // == Constructor ==
    /// Creates an empty slot with no live store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Initialize ==
    /// Creates the store. Fails if one is already live.
    pub fn initialize(&mut self, capacity: usize) -> Result<&mut CacheStore> {
        if self.store.is_some() {
            return Err(CacheError::AlreadyInitialized);
        }
        Ok(self.store.insert(CacheStore::new(capacity)?))
    }

    // == Is Live ==
    /// Returns true between `initialize` and `release`.
    pub fn is_live(&self) -> bool {
        self.store.is_some()
    }

    // == Store Access ==
    /// Shared access to the live store, for read-only introspection
    /// (`len`, `capacity`, `iter`, `stats`). Lookups update hit/miss
    /// counters, so `get` needs [`CacheSlot::store_mut`].
    pub fn store(&self) -> Result<&CacheStore> {
        self.store.as_ref().ok_or(CacheError::NotInitialized)
    }

    /// Mutable access to the live store for `set`, `get`, `save` and `load`.
    pub fn store_mut(&mut self) -> Result<&mut CacheStore> {
        self.store.as_mut().ok_or(CacheError::NotInitialized)
    }

    // == Release ==
    /// Releases the live store.
    pub fn release(&mut self) -> Result<()> {
        let store = self.store.take().ok_or(CacheError::NotInitialized)?;
        store.release();
        Ok(())
    }
}
