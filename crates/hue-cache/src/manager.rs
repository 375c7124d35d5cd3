//! Tier composition and lifecycle.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::key::CacheKey;
use crate::memory::MemoryTier;
use crate::persistent::FileTier;

/// Cache construction parameters.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Memory tier entry capacity.
    pub memory_capacity: usize,
    /// Default TTL applied to both tiers.
    pub ttl: Duration,
    /// Persistent tier directory; `None` runs memory-only.
    pub persistent_dir: Option<std::path::PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            memory_capacity: 10_000,
            ttl: Duration::from_secs(3600),
            persistent_dir: None,
        }
    }
}

/// Point-in-time cache statistics, part of the engine health report.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// Resident memory tier entries.
    pub memory_entries: usize,
    /// Memory tier hits since construction.
    pub hits: u64,
    /// Memory tier misses since construction.
    pub misses: u64,
    /// Hit ratio over all lookups (0 when no lookups happened).
    pub hit_ratio: f64,
    /// Whether the persistent tier is configured and reachable.
    pub persistent_available: bool,
    /// Persistent tier entry count (0 when unavailable).
    pub persistent_entries: usize,
}

/// Two-tier cache manager.
///
/// Explicitly constructed and injected into the engine; the process
/// bootstrap owns its lifecycle, including periodic [`sweep`] calls.
/// The memory tier sits behind a mutex so batch workers can share the
/// manager; the persistent tier serializes its own writes through the
/// filesystem.
///
/// [`sweep`]: CacheManager::sweep
pub struct CacheManager<V> {
    memory: Mutex<MemoryTier<V>>,
    persistent: Option<FileTier>,
    ttl: Duration,
}

impl<V: Clone + Serialize + DeserializeOwned> CacheManager<V> {
    /// Creates a manager from config, opening the persistent tier if
    /// one is configured.
    pub fn new(config: CacheConfig) -> Self {
        let persistent = config.persistent_dir.as_ref().map(FileTier::open);
        Self {
            memory: Mutex::new(MemoryTier::new(config.memory_capacity, config.ttl)),
            persistent,
            ttl: config.ttl,
        }
    }

    /// Looks up a key: memory first, then the persistent tier.
    ///
    /// Persistent hits are promoted into the memory tier.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        self.get_with_deadline(key, None)
    }

    /// Lookup with an optional deadline.
    ///
    /// When the deadline has already passed, the persistent tier is
    /// skipped and the lookup degrades to memory-only: a slow disk must
    /// not stall a batch beyond its time budget, so tier access past
    /// the deadline is treated as a miss.
    pub fn get_with_deadline(&self, key: &CacheKey, deadline: Option<Instant>) -> Option<V> {
        if let Some(value) = self.memory.lock().expect("cache mutex poisoned").get(key) {
            return Some(value);
        }

        let tier = self.persistent.as_ref()?;
        if deadline.is_some_and(|d| Instant::now() >= d) {
            debug!(key = %key, "batch deadline elapsed; skipping persistent tier");
            return None;
        }
        let value: V = tier.get(key)?;
        // Promote so the next lookup stays off the disk
        self.memory
            .lock()
            .expect("cache mutex poisoned")
            .put(key.clone(), value.clone());
        Some(value)
    }

    /// Writes to both tiers with the default TTL.
    pub fn put(&self, key: CacheKey, value: V) {
        if let Some(tier) = &self.persistent {
            tier.put(&key, &value, self.ttl);
        }
        self.memory
            .lock()
            .expect("cache mutex poisoned")
            .put(key, value);
    }

    /// Drops every entry in both tiers.
    pub fn invalidate_all(&self) {
        self.memory.lock().expect("cache mutex poisoned").clear();
        if let Some(tier) = &self.persistent {
            tier.clear();
        }
    }

    /// Purges expired entries from both tiers.
    ///
    /// Intended to be called periodically by the process bootstrap;
    /// expiry is also enforced lazily on access, so sweeping is about
    /// reclaiming space, not correctness.
    pub fn sweep(&self) {
        self.memory.lock().expect("cache mutex poisoned").sweep();
        if let Some(tier) = &self.persistent {
            let purged = tier.sweep();
            if purged > 0 {
                debug!(purged, "swept expired persistent cache entries");
            }
        }
    }

    /// Current statistics.
    pub fn stats(&self) -> CacheStats {
        let memory = self.memory.lock().expect("cache mutex poisoned");
        let hits = memory.hits();
        let misses = memory.misses();
        let total = hits + misses;
        CacheStats {
            memory_entries: memory.len(),
            hits,
            misses,
            hit_ratio: if total == 0 {
                0.0
            } else {
                hits as f64 / total as f64
            },
            persistent_available: self.persistent.as_ref().is_some_and(FileTier::is_available),
            persistent_entries: self
                .persistent
                .as_ref()
                .filter(|t| t.is_available())
                .map_or(0, FileTier::len),
        }
    }
}
