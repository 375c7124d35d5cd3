//! # hue-engine
//!
//! The perceptual color analysis engine: the single entry point that
//! composes conversion, metrics, the spatial index, the cache, and the
//! numeric backend into the operations callers actually use.
//!
//! # Operations
//!
//! - [`Engine::analyze_color`] - parse one color, find its `k` nearest
//!   reference entries under a Delta E metric, classify each match,
//!   and score the overall confidence. Cached.
//! - [`Engine::analyze_batch`] - the same over many inputs, dispatched
//!   across a worker pool in chunks. Results come back in input order;
//!   one bad input fails its own slot without aborting its siblings,
//!   and a [`CancelToken`] stops work between chunks.
//! - [`Engine::convert`] - plain representation conversion, no matching.
//! - [`Engine::health`] - backend, index, and cache status for
//!   monitoring.
//!
//! # Construction
//!
//! The engine is built once per process from an [`EngineConfig`] and
//! shared by reference: the index and backend are immutable, the cache
//! synchronizes internally, and the worker pool is owned by the engine.
//!
//! ```rust
//! use hue_engine::{AnalyzeOptions, Engine, EngineConfig};
//!
//! let engine = Engine::new(EngineConfig::default()).unwrap();
//! let analysis = engine
//!     .analyze_color("#4682B4", &AnalyzeOptions::default())
//!     .unwrap();
//! assert_eq!(analysis.matches[0].name, "steelblue");
//! ```

#![warn(missing_docs)]

pub mod analysis;
pub mod batch;
pub mod config;
pub mod engine;
pub mod palette;

pub use analysis::{Analysis, AnalyzeOptions, ColorInfo, Converted, Health, MatchResult, TargetSpace};
pub use batch::{BatchOptions, BatchOutcome, BatchReport, CancelToken};
pub use config::EngineConfig;
pub use engine::Engine;

pub use hue_cache::CacheConfig;
pub use hue_metric::{DeltaE, Perceptibility};
