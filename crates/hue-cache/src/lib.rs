//! # hue-cache
//!
//! Multi-tier result cache for the huelab engine.
//!
//! Two tiers:
//!
//! - **Memory** ([`MemoryTier`]): bounded in-process LRU with per-entry
//!   TTL. Fast, lost on restart.
//! - **Persistent** ([`FileTier`]): a directory of JSON entry files.
//!   Slower, survives restarts, larger by construction (bounded by disk,
//!   not by entry count).
//!
//! [`CacheManager`] composes them: reads check memory first, then the
//! persistent tier (promoting hits into memory); writes go to both.
//! Entries past their TTL are treated as misses wherever they are found
//! and purged lazily or by [`CacheManager::sweep`].
//!
//! A persistent tier that becomes unreachable degrades the manager to
//! memory-only caching: the failure is logged once at `warn` and never
//! surfaced to callers.
//!
//! # Keys
//!
//! [`CacheKey`] is derived deterministically from the normalized input
//! color, the algorithm identifier, and the neighbor count, so identical
//! logical requests always map to the same entry regardless of call
//! order or process.
//!
//! # Usage
//!
//! ```rust
//! use hue_cache::{CacheConfig, CacheKey, CacheManager};
//!
//! let cache: CacheManager<String> = CacheManager::new(CacheConfig::default());
//! let key = CacheKey::new("4682B4", "ciede2000", 5);
//!
//! assert!(cache.get(&key).is_none());
//! cache.put(key.clone(), "result".to_string());
//! assert_eq!(cache.get(&key).as_deref(), Some("result"));
//! ```

#![warn(missing_docs)]

pub mod key;
pub mod manager;
pub mod memory;
pub mod persistent;

pub use key::CacheKey;
pub use manager::{CacheConfig, CacheManager, CacheStats};
pub use memory::MemoryTier;
pub use persistent::FileTier;
