//! Two-tier cache store with time-based expiry
//!
//! Tier 1 is an in-process map; tier 2 is a [`DurableStore`]. Writes go to
//! both tiers. Reads prefer tier 1, fall back to tier 2 and promote fresh
//! entries back into tier 1. Expired entries are removed from whichever tier
//! they were found in when they are read.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::DurableStore;

/// How long an entry stays fresh (30 minutes)
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// Errors that can occur when writing to the cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// The durable tier failed to persist the entry
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data could not be encoded as JSON
    #[error("Failed to encode cache entry: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A cached payload together with the time it was written
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    /// The cached data
    data: Value,
    /// Write time in epoch milliseconds
    timestamp: i64,
}

impl CacheEntry {
    fn is_fresh(&self, now_ms: i64, ttl_ms: i64) -> bool {
        now_ms - self.timestamp < ttl_ms
    }
}

/// Two-tier TTL cache shared by every query the client issues
///
/// The memory lock is never held across an `.await`, so each tier-1
/// read-modify-write is atomic. Durable writes are last-write-wins.
pub struct CacheStore {
    memory: Mutex<HashMap<String, CacheEntry>>,
    durable: Arc<dyn DurableStore>,
    ttl: Duration,
}

impl CacheStore {
    /// Creates a cache over `durable` with the default 30 minute TTL
    pub fn new(durable: Arc<dyn DurableStore>) -> Self {
        Self::with_ttl(durable, DEFAULT_TTL)
    }

    /// Creates a cache with a custom TTL
    ///
    /// A zero TTL makes every entry stale as soon as it is written.
    pub fn with_ttl(durable: Arc<dyn DurableStore>, ttl: Duration) -> Self {
        Self {
            memory: Mutex::new(HashMap::new()),
            durable,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn memory(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.memory.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ttl_millis(&self) -> i64 {
        i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX)
    }

    /// Reads a fresh entry for `key`
    ///
    /// Returns `None` when the key is absent, expired, or cannot be decoded.
    /// Never fails: durable-tier errors are logged and treated as a miss.
    pub async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let now = now_millis();
        let ttl = self.ttl_millis();

        {
            let mut memory = self.memory();
            if let Some(entry) = memory.get(key) {
                if entry.is_fresh(now, ttl) {
                    debug!(key, "memory cache hit");
                    return decode(key, entry.data.clone());
                }
                debug!(key, "memory cache entry expired");
                memory.remove(key);
            }
        }

        let raw = match self.durable.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key, "cache miss");
                return None;
            }
            Err(e) => {
                warn!(key, error = %e, "failed to read durable cache entry");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key, error = %e, "ignoring undecodable durable cache entry");
                return None;
            }
        };

        if entry.is_fresh(now, ttl) {
            debug!(key, "durable cache hit, promoting to memory");
            let data = entry.data.clone();
            self.memory().insert(key.to_string(), entry);
            return decode(key, data);
        }

        debug!(key, "durable cache entry expired");
        if let Err(e) = self.durable.remove(key).await {
            warn!(key, error = %e, "failed to remove expired durable cache entry");
        }
        None
    }

    /// Stores `data` under `key` in both tiers, stamped with the current time
    ///
    /// The memory tier is always updated; an error means only the durable
    /// tier could not be written.
    pub async fn write<T: Serialize + ?Sized>(&self, key: &str, data: &T) -> Result<(), CacheError> {
        let entry = CacheEntry {
            data: serde_json::to_value(data)?,
            timestamp: now_millis(),
        };
        let encoded = serde_json::to_string(&entry)?;

        self.memory().insert(key.to_string(), entry);
        self.durable.set(key, &encoded).await?;
        Ok(())
    }

    /// Removes `key` from both tiers
    pub async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.memory().remove(key);
        self.durable.remove(key).await?;
        Ok(())
    }

    /// Drops every tier-1 entry, leaving the durable tier untouched
    pub fn clear_memory(&self) {
        self.memory().clear();
    }
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("memory_entries", &self.memory().len())
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn decode<T: DeserializeOwned>(key: &str, data: Value) -> Option<T> {
    match serde_json::from_value(data) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "cached data has an unexpected shape");
            None
        }
    }
}
