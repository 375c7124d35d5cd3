//! Engine construction parameters.

use std::time::Duration;

use hue_cache::CacheConfig;

/// Engine construction parameters.
///
/// The defaults suit an interactive process: one worker per core,
/// memory-only caching, and no batch time budget. Service deployments
/// usually set `cache.persistent_dir` and a `batch_deadline`.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Cache configuration, handed to the cache manager as-is.
    pub cache: CacheConfig,
    /// Batch worker threads; `0` means one per available core.
    pub workers: usize,
    /// Batch items per dispatch unit. Cancellation and fail-fast are
    /// observed at this granularity.
    pub chunk_size: usize,
    /// Per-batch time budget. Once elapsed, lookups skip the persistent
    /// cache tier; in-flight computation still completes.
    pub batch_deadline: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            workers: 0,
            chunk_size: 32,
            batch_deadline: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.workers, 0);
        assert_eq!(config.chunk_size, 32);
        assert!(config.batch_deadline.is_none());
        assert!(config.cache.persistent_dir.is_none());
    }
}
