//! The engine facade.

use std::sync::Arc;
use std::time::Instant;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info};

use hue_accel::{select_backend, NumericBackend};
use hue_cache::{CacheKey, CacheManager};
use hue_convert::Color;
use hue_core::{Error, Lab, ReferenceEntry, Result, Rgb};
use hue_index::KdTree;
use hue_metric::{DeltaE, Perceptibility};

use crate::analysis::{
    confidence, Analysis, AnalyzeOptions, ColorInfo, Converted, Health, MatchResult, TargetSpace,
};
use crate::config::EngineConfig;
use crate::palette;

/// The perceptual color analysis engine.
///
/// Owns the spatial index, the two-tier cache, the numeric backend, and
/// the batch worker pool. Constructed once per process; all methods take
/// `&self` and are safe to call from many threads.
pub struct Engine {
    pub(crate) index: Arc<KdTree>,
    pub(crate) cache: CacheManager<Analysis>,
    pub(crate) backend: Arc<dyn NumericBackend>,
    pub(crate) pool: ThreadPool,
    pub(crate) config: EngineConfig,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Builds an engine over the embedded reference palette.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_entries(config, palette::builtin_entries()?)
    }

    /// Builds an engine over a caller-supplied reference set.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyIndex`] for an empty reference set, or
    /// [`Error::Other`] if the worker pool cannot be created.
    pub fn with_entries(config: EngineConfig, entries: Vec<ReferenceEntry>) -> Result<Self> {
        let index = Arc::new(KdTree::build(entries)?);
        let backend = select_backend();
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("hue-batch-{i}"))
            .build()
            .map_err(|e| Error::Other(format!("worker pool construction failed: {e}")))?;
        let cache = CacheManager::new(config.cache.clone());

        info!(
            index_size = index.len(),
            backend = backend.name(),
            workers = pool.current_num_threads(),
            "engine ready"
        );
        Ok(Self {
            index,
            cache,
            backend,
            pool,
            config,
        })
    }

    /// Analyzes one color: parse, match against the reference palette,
    /// classify, and score.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFormat`] for malformed input and
    /// [`Error::InvalidK`] for `k == 0`. Degraded subsystems (backend,
    /// persistent cache tier) never surface here.
    ///
    /// [`Error::InvalidFormat`]: hue_core::Error::InvalidFormat
    /// [`Error::InvalidK`]: hue_core::Error::InvalidK
    pub fn analyze_color(&self, input: &str, options: &AnalyzeOptions) -> Result<Analysis> {
        validate(options)?;
        let color = Color::from_hex(input)?;
        self.analyze_parsed(color.rgb, color.lab, options, None)
    }

    /// Analyzes an already-parsed RGB color.
    ///
    /// Same semantics and cache keys as [`Engine::analyze_color`];
    /// callers holding an [`Rgb`] skip the hex round trip.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidK`] for `k == 0`.
    ///
    /// [`Error::InvalidK`]: hue_core::Error::InvalidK
    pub fn analyze_rgb(&self, rgb: Rgb, options: &AnalyzeOptions) -> Result<Analysis> {
        validate(options)?;
        self.analyze_parsed(rgb, hue_convert::rgb_to_lab(rgb), options, None)
    }

    /// Analysis over an already-parsed color, with an optional deadline
    /// bounding persistent cache tier access. Shared by the single-color
    /// and batch paths; `options.k` is assumed validated.
    pub(crate) fn analyze_parsed(
        &self,
        rgb: Rgb,
        lab: Lab,
        options: &AnalyzeOptions,
        deadline: Option<Instant>,
    ) -> Result<Analysis> {
        let key = CacheKey::new(&rgb.to_hex(), options.algorithm.id(), options.k as u32);
        if options.use_cache {
            if let Some(mut hit) = self.cache.get_with_deadline(&key, deadline) {
                debug!(key = %key, "cache hit");
                hit.cached = true;
                return Ok(hit);
            }
        }

        let analysis = self.assemble(rgb, lab, options);
        if options.use_cache {
            self.cache.put(key, analysis.clone());
        }
        Ok(analysis)
    }

    fn assemble(&self, rgb: Rgb, lab: Lab, options: &AnalyzeOptions) -> Analysis {
        let matches: Vec<MatchResult> = self
            .index
            .k_nearest(&lab, options.k, options.algorithm)
            .into_iter()
            .map(|n| MatchResult {
                id: n.entry.id,
                name: n.entry.name.clone(),
                hex: format!("#{}", n.entry.hex()),
                distance: n.distance,
                perceptibility: Perceptibility::classify(n.distance),
            })
            .collect();

        // k >= 1 and the index is non-empty, so matches is non-empty
        let nearest = matches.first().map_or(f64::MAX, |m| m.distance);
        Analysis {
            input: ColorInfo::from_parts(rgb, lab),
            matches,
            algorithm: options.algorithm,
            confidence: confidence(nearest),
            cached: false,
        }
    }

    /// Converts a hex color into the requested representation.
    ///
    /// Pure conversion: no matching, no caching.
    pub fn convert(&self, input: &str, target: TargetSpace) -> Result<Converted> {
        let color = Color::from_hex(input)?;
        Ok(match target {
            TargetSpace::Hex => Converted::Hex(color.hex()),
            TargetSpace::Rgb => Converted::Rgb(color.rgb),
            TargetSpace::Hsl => Converted::Hsl(color.hsl),
            TargetSpace::Lab => Converted::Lab(color.lab),
        })
    }

    /// Batch LAB conversion through the selected numeric backend.
    ///
    /// Exposed for callers that use the engine as a computation
    /// primitive rather than through the analysis surface.
    pub fn labs(&self, rgbs: &[Rgb]) -> Vec<Lab> {
        self.backend.rgb_to_lab_batch(rgbs)
    }

    /// Batch pairwise distances through the selected numeric backend.
    pub fn distances(&self, pairs: &[(Lab, Lab)], algorithm: DeltaE) -> Vec<f64> {
        self.backend.distance_batch(pairs, algorithm)
    }

    /// Purges expired cache entries from both tiers.
    pub fn sweep_cache(&self) {
        self.cache.sweep();
    }

    /// Drops every cached result.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }

    /// The reference entries backing the index, in load order.
    pub fn reference_entries(&self) -> &[ReferenceEntry] {
        self.index.entries()
    }

    /// Current engine health.
    pub fn health(&self) -> Health {
        Health {
            backend: self.backend.name(),
            accelerated: self.backend.is_accelerated(),
            index_size: self.index.len(),
            workers: self.pool.current_num_threads(),
            cache: self.cache.stats(),
        }
    }
}

pub(crate) fn validate(options: &AnalyzeOptions) -> Result<()> {
    if options.k == 0 {
        return Err(Error::InvalidK { k: 0 });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_analyze_exact_palette_entry() {
        let engine = engine();
        let analysis = engine
            .analyze_color("#4682B4", &AnalyzeOptions::default())
            .unwrap();
        assert_eq!(analysis.matches[0].name, "steelblue");
        assert_eq!(analysis.matches[0].distance, 0.0);
        assert_eq!(
            analysis.matches[0].perceptibility,
            Perceptibility::Imperceptible
        );
        assert_eq!(analysis.confidence, 1.0);
        assert!(!analysis.cached);
        assert_eq!(analysis.matches.len(), 5);
    }

    #[test]
    fn test_matches_sorted_ascending() {
        let engine = engine();
        let analysis = engine
            .analyze_color("123456", &AnalyzeOptions::default())
            .unwrap();
        for pair in analysis.matches.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }

    #[test]
    fn test_invalid_input_rejected() {
        let engine = engine();
        let err = engine
            .analyze_color("#12345", &AnalyzeOptions::default())
            .unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_k_zero_rejected() {
        let engine = engine();
        let options = AnalyzeOptions {
            k: 0,
            ..AnalyzeOptions::default()
        };
        let err = engine.analyze_color("4682B4", &options).unwrap_err();
        assert!(matches!(err, Error::InvalidK { k: 0 }));
    }

    #[test]
    fn test_analyze_rgb_shares_cache_with_hex_path() {
        let engine = engine();
        let options = AnalyzeOptions::default();
        let by_hex = engine.analyze_color("#4682B4", &options).unwrap();
        let by_rgb = engine.analyze_rgb(Rgb::new(70, 130, 180), &options).unwrap();
        assert!(by_rgb.cached, "same logical request must share a key");
        assert_eq!(by_hex.matches, by_rgb.matches);
        assert_eq!(by_hex.input, by_rgb.input);
    }

    #[test]
    fn test_convert_targets() {
        let engine = engine();
        match engine.convert("#FF0000", TargetSpace::Hsl).unwrap() {
            Converted::Hsl(hsl) => {
                assert_eq!(hsl.h, 0.0);
                assert_eq!(hsl.s, 100.0);
            }
            other => panic!("expected HSL, got {other:?}"),
        }
        assert_eq!(
            engine.convert("ff0000", TargetSpace::Hex).unwrap(),
            Converted::Hex("#FF0000".to_string())
        );
    }

    #[test]
    fn test_health_reports_index_and_backend() {
        let engine = engine();
        let health = engine.health();
        assert_eq!(health.index_size, hue_core::palette::BUILTIN.len());
        assert!(!health.backend.is_empty());
        assert!(health.workers >= 1);
    }

    #[test]
    fn test_uncacheable_options_bypass_cache() {
        let engine = engine();
        let options = AnalyzeOptions {
            use_cache: false,
            ..AnalyzeOptions::default()
        };
        engine.analyze_color("4682B4", &options).unwrap();
        let second = engine.analyze_color("4682B4", &options).unwrap();
        assert!(!second.cached);
        assert_eq!(engine.health().cache.memory_entries, 0);
    }
}
