//! Persistent file tier.
//!
//! Each entry is one JSON file named after the cache key's stable stem,
//! carrying the insertion timestamp and TTL inside the payload so expiry
//! survives restarts. Writes land in a temp file and are renamed into
//! place, so a reader sharing the directory never observes a partial
//! entry. I/O failures flip the tier into an unavailable
//! state: the first failure is logged at `warn`, subsequent operations
//! are silent no-ops, and the manager above degrades to memory-only
//! caching.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::key::CacheKey;

#[derive(Serialize, Deserialize)]
struct Stored<V> {
    inserted_unix_secs: u64,
    ttl_secs: u64,
    value: V,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// File-backed persistent cache tier.
pub struct FileTier {
    dir: PathBuf,
    available: AtomicBool,
}

impl FileTier {
    /// Opens (creating if needed) a tier rooted at `dir`.
    ///
    /// A directory that cannot be created yields a tier that is marked
    /// unavailable from the start; the condition is logged, not returned,
    /// because tier loss is a degradation rather than an error.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let available = match fs::create_dir_all(&dir) {
            Ok(()) => true,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "persistent cache tier unavailable");
                false
            }
        };
        Self {
            dir,
            available: AtomicBool::new(available),
        }
    }

    /// Whether the tier is currently usable.
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }

    fn mark_unavailable(&self, context: &str, err: &std::io::Error) {
        if self.available.swap(false, Ordering::Relaxed) {
            warn!(
                dir = %self.dir.display(),
                error = %err,
                "persistent cache tier failed during {context}; degrading to memory-only"
            );
        }
    }

    fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.file_stem()))
    }

    /// Reads an entry, honoring its stored TTL.
    ///
    /// Expired entries are deleted and reported as misses. A corrupt
    /// file is treated the same way (deleted, miss) rather than failing
    /// the lookup.
    pub fn get<V: DeserializeOwned>(&self, key: &CacheKey) -> Option<V> {
        if !self.is_available() {
            return None;
        }
        let path = self.path_for(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                self.mark_unavailable("read", &e);
                return None;
            }
        };
        let stored: Stored<V> = match serde_json::from_slice(&bytes) {
            Ok(stored) => stored,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "discarding corrupt cache entry");
                let _ = fs::remove_file(&path);
                return None;
            }
        };
        if unix_now().saturating_sub(stored.inserted_unix_secs) > stored.ttl_secs {
            let _ = fs::remove_file(&path);
            return None;
        }
        Some(stored.value)
    }

    /// Writes an entry with the given TTL.
    ///
    /// The entry is written to a temp file in the tier directory and
    /// renamed over the final name. Rename is atomic on the same
    /// filesystem, so another process reading the shared directory sees
    /// either the old entry or the new one, never a torn file.
    pub fn put<V: Serialize>(&self, key: &CacheKey, value: &V, ttl: Duration) {
        if !self.is_available() {
            return;
        }
        let stored = Stored {
            inserted_unix_secs: unix_now(),
            ttl_secs: ttl.as_secs(),
            value,
        };
        let path = self.path_for(key);
        let json = match serde_json::to_vec(&stored) {
            Ok(json) => json,
            Err(e) => {
                debug!(key = %key, error = %e, "unserializable cache value");
                return;
            }
        };
        // Pid in the temp name keeps concurrent writers from clobbering
        // each other's staging file
        let tmp = self
            .dir
            .join(format!("{}.{}.tmp", key.file_stem(), std::process::id()));
        let result = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, &path));
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp);
            self.mark_unavailable("write", &e);
        }
    }

    /// Deletes every entry file.
    pub fn clear(&self) {
        if !self.is_available() {
            return;
        }
        if let Ok(dir) = fs::read_dir(&self.dir) {
            for file in dir.flatten() {
                let _ = fs::remove_file(file.path());
            }
        }
    }

    /// Removes expired entry files; returns how many were purged.
    pub fn sweep(&self) -> usize {
        if !self.is_available() {
            return 0;
        }
        let now = unix_now();
        let mut purged = 0;
        let Ok(dir) = fs::read_dir(&self.dir) else {
            return 0;
        };
        for file in dir.flatten() {
            let path = file.path();
            let Ok(bytes) = fs::read(&path) else { continue };
            // Only the envelope matters here; the value can be anything
            let Ok(envelope) = serde_json::from_slice::<Stored<serde_json::Value>>(&bytes) else {
                let _ = fs::remove_file(&path);
                purged += 1;
                continue;
            };
            if now.saturating_sub(envelope.inserted_unix_secs) > envelope.ttl_secs {
                let _ = fs::remove_file(&path);
                purged += 1;
            }
        }
        purged
    }

    /// Number of entry files currently on disk.
    pub fn len(&self) -> usize {
        fs::read_dir(&self.dir).map(|d| d.flatten().count()).unwrap_or(0)
    }

    /// Whether the tier holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tier root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
