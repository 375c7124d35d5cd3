//! # hue-metric
//!
//! Perceptual color difference (Delta E) metrics for the huelab engine.
//!
//! # Supported Metrics
//!
//! | Metric | Accuracy | Cost | Notes |
//! |--------|----------|------|-------|
//! | [`DeltaE::Cie76`] | Low | 1 sqrt | Euclidean distance in LAB |
//! | [`DeltaE::Cie94`] | Medium | ~3 sqrt | Chroma-weighted, symmetric variant |
//! | [`DeltaE::Ciede2000`] | High | trig-heavy | Industry standard |
//!
//! # Usage
//!
//! ```rust
//! use hue_core::Lab;
//! use hue_metric::{distance, DeltaE, Perceptibility};
//!
//! let a = Lab::new(50.0, 2.6772, -79.7751);
//! let b = Lab::new(50.0, 0.0, -82.7485);
//!
//! let de = distance(a, b, DeltaE::Ciede2000);
//! assert!((de - 2.0425).abs() < 1e-4);
//! assert_eq!(Perceptibility::classify(de), Perceptibility::Distinct);
//! ```
//!
//! # Symmetry and identity
//!
//! Every metric satisfies `distance(a, b) == distance(b, a)` and
//! `distance(a, a) == 0`. CIE94 is implemented with geometric-mean chroma
//! weighting for this reason; the textbook "reference color" variant is
//! asymmetric.

#![warn(missing_docs)]

pub mod ciede2000;
pub mod delta_e;
pub mod threshold;
pub mod trig;

pub use ciede2000::ciede2000;
pub use delta_e::{cie76, cie94, distance, DeltaE};
pub use threshold::Perceptibility;
pub use trig::HueLut;
