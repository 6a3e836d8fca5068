//! flatcache inspector
//!
//! Loads a cache file into a fresh store and prints its entries and
//! statistics as JSON.

use anyhow::Context;
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flatcache::{CacheStore, Config};

/// Entry point for the inspector.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create a store with the configured capacity
/// 4. Load every record from the configured file
/// 5. Print entries and stats to stdout
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flatcache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: capacity={}, cache_file={}",
        config.capacity,
        config.cache_file.display()
    );

    let mut store = CacheStore::new(config.capacity)?;
    store
        .load(&config.cache_file)
        .with_context(|| format!("failed to load {}", config.cache_file.display()))?;

    let entries: Vec<_> = store
        .iter()
        .map(|entry| json!({ "key": entry.key(), "value": entry.value() }))
        .collect();
    let report = json!({
        "entries": entries,
        "stats": store.stats(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    store.release();
    Ok(())
}
