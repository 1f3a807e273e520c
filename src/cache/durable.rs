//! Durable tier of the cache
//!
//! A `DurableStore` is an async string-keyed store that survives restarts.
//! `FileStore` keeps one JSON file per key in an XDG cache directory;
//! `MemoryStore` keeps everything in a process-local map and is used when no
//! cache directory is available (and in tests).

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use directories::ProjectDirs;
use tokio::fs;

/// Async key-value store backing the durable cache tier
#[async_trait]
pub trait DurableStore: Send + Sync {
    /// Returns the stored string for `key`, or `None` if absent
    async fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// Stores `value` under `key`, overwriting any previous value
    async fn set(&self, key: &str, value: &str) -> io::Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> io::Result<()>;
}

/// Stores each entry as a JSON file on disk
///
/// Uses `~/.cache/recipebox/` on Linux, or the equivalent XDG path on other
/// platforms. Keys are escaped into file names so that any key (including
/// `search:<term>` with arbitrary user text) maps to a distinct, safe file.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl FileStore {
    /// Creates a new FileStore using the XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "recipebox")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a new FileStore with a custom cache directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Directory this store writes into
    pub fn dir(&self) -> &std::path::Path {
        &self.cache_dir
    }

    /// Returns the path to the cache file for the given key
    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", escape_key(key)))
    }
}

#[async_trait]
impl DurableStore for FileStore {
    async fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.cache_path(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.cache_dir).await?;
        fs::write(self.cache_path(key), value).await
    }

    async fn remove(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.cache_path(key)).await {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// Maps a cache key to a file stem
///
/// ASCII alphanumerics and `-` pass through; every other byte becomes
/// `_xx` (lowercase hex), so the mapping is injective.
fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("_{:02x}", byte));
        }
    }
    out
}

/// Durable tier held in process memory
///
/// Nothing survives a restart; this only stands in for a real store when
/// the cache directory is unavailable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DurableStore for MemoryStore {
    async fn get(&self, key: &str) -> io::Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> io::Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}
