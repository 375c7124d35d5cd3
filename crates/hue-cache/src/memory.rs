//! In-process memory tier: bounded LRU with per-entry TTL.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use crate::key::CacheKey;

struct Entry<V> {
    value: V,
    inserted: Instant,
    last_access: Instant,
    ttl: Duration,
}

impl<V> Entry<V> {
    fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.inserted) > self.ttl
    }
}

/// Capacity-bounded LRU tier with TTL expiry.
///
/// Not internally synchronized; [`crate::CacheManager`] wraps it in a
/// mutex for concurrent batch workers. Expired entries count as misses
/// even while still resident and are purged on access or by
/// [`MemoryTier::sweep`].
pub struct MemoryTier<V> {
    entries: HashMap<CacheKey, Entry<V>>,
    /// Access order for LRU eviction (front = oldest).
    access_order: VecDeque<CacheKey>,
    capacity: usize,
    default_ttl: Duration,
    hits: u64,
    misses: u64,
}

impl<V: Clone> MemoryTier<V> {
    /// Creates a tier with an entry capacity and default TTL.
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            access_order: VecDeque::new(),
            capacity: capacity.max(1),
            default_ttl,
            hits: 0,
            misses: 0,
        }
    }

    /// Looks up a value, refreshing its LRU position on hit.
    pub fn get(&mut self, key: &CacheKey) -> Option<V> {
        let now = Instant::now();
        match self.entries.get(key) {
            Some(entry) if entry.expired(now) => {
                self.remove(key);
                self.misses += 1;
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
                self.hits += 1;
                self.touch(key, now);
                Some(value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Inserts with the default TTL, evicting LRU entries over capacity.
    pub fn put(&mut self, key: CacheKey, value: V) {
        self.put_with_ttl(key, value, self.default_ttl);
    }

    /// Inserts with an explicit TTL.
    pub fn put_with_ttl(&mut self, key: CacheKey, value: V, ttl: Duration) {
        let now = Instant::now();
        if self.entries.remove(&key).is_some() {
            self.access_order.retain(|k| k != &key);
        }
        self.entries.insert(
            key.clone(),
            Entry {
                value,
                inserted: now,
                last_access: now,
                ttl,
            },
        );
        self.access_order.push_back(key);
        while self.entries.len() > self.capacity {
            self.evict_lru();
        }
    }

    /// Removes a single entry.
    pub fn remove(&mut self, key: &CacheKey) {
        if self.entries.remove(key).is_some() {
            self.access_order.retain(|k| k != key);
        }
    }

    /// Drops everything, keeping counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.access_order.clear();
    }

    /// Purges expired entries eagerly.
    pub fn sweep(&mut self) {
        let now = Instant::now();
        let expired: Vec<CacheKey> = self
            .entries
            .iter()
            .filter(|(_, e)| e.expired(now))
            .map(|(k, _)| k.clone())
            .collect();
        for key in expired {
            self.remove(&key);
        }
    }

    /// Resident entry count (including not-yet-purged expired entries).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tier holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hit count since construction.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Miss count since construction.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    fn evict_lru(&mut self) {
        if let Some(key) = self.access_order.pop_front() {
            self.entries.remove(&key);
        }
    }

    fn touch(&mut self, key: &CacheKey, now: Instant) {
        self.access_order.retain(|k| k != key);
        self.access_order.push_back(key.clone());
        if let Some(entry) = self.entries.get_mut(key) {
            entry.last_access = now;
        }
    }
}
