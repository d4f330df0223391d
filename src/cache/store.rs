//! Persistent LRU store mapping normalized place names to timezone identifiers
//!
//! Provides a `TimezoneStore` with a fixed capacity, least-recently-used eviction,
//! and a JSON snapshot on disk that is rewritten synchronously after every mutation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use hashlink::LruCache;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// File name of the snapshot inside the cache directory
pub const SNAPSHOT_FILE: &str = "timezones.json";

/// Default number of entries kept before eviction kicks in
pub const DEFAULT_CAPACITY: usize = 100;

/// Errors that can occur when constructing or persisting the store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store was configured with a capacity of zero
    #[error("cache capacity must be at least 1")]
    InvalidCapacity,

    /// Writing or removing the snapshot file failed
    #[error("cache snapshot I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Encoding the snapshot as JSON failed
    #[error("cache snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// On-disk representation of the store
///
/// Entries are ordered oldest-first so that replaying them at load time
/// reconstructs the eviction order: the last pair in the file is the one
/// that survives longest.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    capacity: usize,
    entries: Vec<(String, String)>,
}

/// Bounded key→timezone map with LRU eviction and durable snapshotting
///
/// The store exclusively owns its backing file. Every `set` rewrites the full
/// snapshot (write to a temp file, then rename) before returning, so the disk
/// never lags the in-memory state by more than one completed mutation. `get`
/// only bumps recency and leaves the file untouched.
pub struct TimezoneStore {
    entries: LruCache<String, String>,
    path: PathBuf,
}

impl TimezoneStore {
    /// Opens a store backed by `timezones.json` inside the given directory
    pub fn open_in(dir: &Path, capacity: usize) -> Result<Self, StoreError> {
        Self::open(dir.join(SNAPSHOT_FILE), capacity)
    }

    /// Opens a store backed by the given snapshot path
    ///
    /// A missing snapshot yields an empty store. An unreadable or unparseable
    /// snapshot also yields an empty store: a corrupt cache must never prevent
    /// the process from starting, so that case is logged and recovered here
    /// rather than surfaced.
    pub fn open(path: PathBuf, capacity: usize) -> Result<Self, StoreError> {
        if capacity == 0 {
            return Err(StoreError::InvalidCapacity);
        }

        let mut entries = LruCache::new(capacity);
        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Snapshot>(&content) {
                Ok(snapshot) => {
                    // Oldest-first replay; anything beyond capacity evicts
                    // in the same order a live store would have.
                    for (key, value) in snapshot.entries {
                        entries.insert(key, value);
                    }
                    debug!(
                        entries = entries.len(),
                        path = %path.display(),
                        "restored timezone cache snapshot"
                    );
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "timezone cache snapshot is corrupt, starting empty"
                    );
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no timezone cache snapshot, starting empty");
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "timezone cache snapshot is unreadable, starting empty"
                );
            }
        }

        Ok(Self { entries, path })
    }

    /// Returns the cached timezone for `key` and marks it most-recently-used
    ///
    /// Absent keys have no side effect. A hit reorders recency in memory only;
    /// no data changed, so the snapshot is not rewritten.
    pub fn get(&mut self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    /// Inserts or overwrites `key`, makes it most-recently-used, and persists
    ///
    /// Inserting a new key at capacity evicts the single least-recently-used
    /// entry first. Overwriting an existing key never evicts. The snapshot is
    /// rewritten synchronously before this returns; a write failure is
    /// surfaced to the caller, since silently losing durability would defeat
    /// the cache across restarts.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    /// Empties the store and removes the snapshot file entirely
    ///
    /// An absent snapshot and an empty snapshot load identically, so removal
    /// is preferred over rewriting an empty file.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries before eviction
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Path of the backing snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the full snapshot to disk, atomically
    ///
    /// Serializes oldest-first, writes to a sibling temp file, then renames
    /// over the real path so a crash mid-write can never leave a truncated
    /// snapshot behind.
    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let snapshot = Snapshot {
            capacity: self.entries.capacity(),
            // LruCache iterates least-recently-used first, which is exactly
            // the oldest-first order the snapshot format wants.
            entries: self
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
