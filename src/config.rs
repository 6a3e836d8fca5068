//! Configuration Module
//!
//! Loads the inspection binary's settings from environment variables.

use std::env;
use std::path::PathBuf;

const DEFAULT_CAPACITY: usize = 64;
const DEFAULT_CACHE_FILE: &str = "cache.bin";

/// Runtime configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Initial capacity of the store
    pub capacity: usize,
    /// File that records are loaded from
    pub cache_file: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Initial store capacity (default: 64, zero is ignored)
    /// - `CACHE_FILE` - Persistence file (default: cache.bin)
    pub fn from_env() -> Self {
        Self {
            capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&c: &usize| c > 0)
                .unwrap_or(DEFAULT_CAPACITY),
            cache_file: env::var_os("CACHE_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_FILE)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
        }
    }
}
