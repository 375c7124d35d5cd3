//! Analysis request and result types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use hue_cache::CacheStats;
use hue_convert::Color;
use hue_core::{Hsl, Lab, Rgb};
use hue_metric::{DeltaE, Perceptibility};

/// Options for a single analysis.
///
/// This is the complete option surface; unknown knobs are a compile
/// error at the call site rather than silently ignored request fields.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Distance metric used for matching.
    pub algorithm: DeltaE,
    /// Number of nearest reference entries to return. Must be at least 1.
    pub k: usize,
    /// Whether to consult and populate the result cache.
    pub use_cache: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            algorithm: DeltaE::default(),
            k: 5,
            use_cache: true,
        }
    }
}

/// All boundary representations of one color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorInfo {
    /// Hex notation with leading `#`, uppercase.
    pub hex: String,
    /// 8-bit sRGB.
    pub rgb: Rgb,
    /// Hue/saturation/lightness.
    pub hsl: Hsl,
    /// CIE LAB (D65).
    pub lab: Lab,
}

impl ColorInfo {
    /// Builds the info bundle from an RGB value and its LAB projection.
    ///
    /// The LAB value is taken as given rather than recomputed so batch
    /// callers can reuse backend-converted coordinates.
    pub fn from_parts(rgb: Rgb, lab: Lab) -> Self {
        Self {
            hex: format!("#{}", rgb.to_hex()),
            rgb,
            hsl: hue_convert::rgb_to_hsl(rgb),
            lab,
        }
    }
}

impl From<Color> for ColorInfo {
    fn from(color: Color) -> Self {
        Self {
            hex: color.hex(),
            rgb: color.rgb,
            hsl: color.hsl,
            lab: color.lab,
        }
    }
}

/// One matched reference entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Reference entry id.
    pub id: u32,
    /// Reference entry name.
    pub name: String,
    /// Reference entry hex, with leading `#`.
    pub hex: String,
    /// Distance from the query under the requested metric.
    pub distance: f64,
    /// Threshold band of `distance`.
    pub perceptibility: Perceptibility,
}

/// Result of analyzing one color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// The analyzed color, in every representation.
    pub input: ColorInfo,
    /// Nearest reference entries, ascending by distance.
    pub matches: Vec<MatchResult>,
    /// Metric the matches were ranked under.
    pub algorithm: DeltaE,
    /// Confidence in the best match, in `(0, 1]`.
    pub confidence: f64,
    /// Whether this result was served from the cache. Never persisted:
    /// the flag describes this lookup, not the stored value.
    #[serde(skip)]
    pub cached: bool,
}

/// Confidence score for a best-match distance.
///
/// `1.0` at an exact match, `0.5` at the edge of the "clearly
/// different" band (Delta E = 2), floored at `0.05` so a score of zero
/// never suggests the match list is unusable.
pub(crate) fn confidence(nearest: f64) -> f64 {
    (1.0 / (1.0 + nearest / 2.0)).max(0.05)
}

/// Conversion target for [`Engine::convert`].
///
/// [`Engine::convert`]: crate::Engine::convert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSpace {
    /// Hex notation.
    Hex,
    /// 8-bit sRGB.
    Rgb,
    /// Hue/saturation/lightness.
    Hsl,
    /// CIE LAB (D65).
    Lab,
}

impl FromStr for TargetSpace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "rgb" => Ok(Self::Rgb),
            "hsl" => Ok(Self::Hsl),
            "lab" => Ok(Self::Lab),
            other => Err(format!(
                "unknown color space {other:?} (expected hex, rgb, hsl, or lab)"
            )),
        }
    }
}

/// A converted color value, shaped by the requested target space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Converted {
    /// Hex notation with leading `#`.
    Hex(String),
    /// 8-bit sRGB.
    Rgb(Rgb),
    /// Hue/saturation/lightness.
    Hsl(Hsl),
    /// CIE LAB (D65).
    Lab(Lab),
}

/// Engine health snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Health {
    /// Selected numeric backend name.
    pub backend: &'static str,
    /// Whether the selected backend is accelerated.
    pub accelerated: bool,
    /// Reference entries in the spatial index.
    pub index_size: usize,
    /// Worker pool width.
    pub workers: usize,
    /// Cache statistics.
    pub cache: CacheStats,
}
