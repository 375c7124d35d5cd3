//! Metric selection and the simpler Delta E formulas.

use std::fmt;
use std::str::FromStr;

use hue_core::Lab;
use serde::{Deserialize, Serialize};

use crate::ciede2000;

/// Color difference algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaE {
    /// CIE 1976: plain Euclidean distance in LAB. Fast, least accurate.
    Cie76,
    /// CIE 1994 (symmetric chroma weighting). Middle ground.
    Cie94,
    /// CIEDE2000, the industry-standard perceptual formula.
    #[default]
    Ciede2000,
}

impl DeltaE {
    /// Stable identifier used in cache keys and CLI arguments.
    pub fn id(self) -> &'static str {
        match self {
            Self::Cie76 => "cie76",
            Self::Cie94 => "cie94",
            Self::Ciede2000 => "ciede2000",
        }
    }

    /// Conservative Euclidean lower-bound factor kappa.
    ///
    /// For any two in-gamut LAB colors, `delta_e >= euclidean / kappa`.
    /// The spatial index divides k-d plane distances by this factor
    /// before pruning, so a subtree is discarded only when no point
    /// inside it can beat the best true distance found so far. The
    /// bounds are derived from the worst-case weighting terms over
    /// L in [0,100], a,b in [-128,127] (chroma <= ~181):
    ///
    /// - CIE94: SC <= 1 + 0.045 * 181 < 9.2
    /// - CIEDE2000: SL < 1.75, SC < 9.2, SH < 6.3, and the RT cross
    ///   term shrinks the quadratic form by at most a factor ~7.5
    ///
    /// Loose on purpose: with a few-hundred-entry palette the index
    /// visits extra nodes instead of risking a wrong neighbor.
    pub fn lower_bound_factor(self) -> f64 {
        match self {
            Self::Cie76 => 1.0,
            Self::Cie94 => 10.0,
            Self::Ciede2000 => 26.0,
        }
    }

    /// All supported algorithms.
    pub const ALL: [DeltaE; 3] = [Self::Cie76, Self::Cie94, Self::Ciede2000];
}

impl fmt::Display for DeltaE {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DeltaE {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cie76" | "76" => Ok(Self::Cie76),
            "cie94" | "94" => Ok(Self::Cie94),
            "ciede2000" | "de2000" | "2000" => Ok(Self::Ciede2000),
            other => Err(format!(
                "unknown algorithm {other:?} (expected cie76, cie94, or ciede2000)"
            )),
        }
    }
}

/// Computes the color difference between two LAB colors.
///
/// # Example
///
/// ```rust
/// use hue_core::Lab;
/// use hue_metric::{distance, DeltaE};
///
/// let a = Lab::new(50.0, 10.0, -10.0);
/// let b = Lab::new(50.0, 10.0, -10.0);
/// assert_eq!(distance(a, b, DeltaE::Ciede2000), 0.0);
/// ```
#[inline]
pub fn distance(lab1: Lab, lab2: Lab, algorithm: DeltaE) -> f64 {
    match algorithm {
        DeltaE::Cie76 => cie76(lab1, lab2),
        DeltaE::Cie94 => cie94(lab1, lab2),
        DeltaE::Ciede2000 => ciede2000::ciede2000(lab1, lab2),
    }
}

/// CIE76: Euclidean distance in LAB space.
#[inline]
pub fn cie76(lab1: Lab, lab2: Lab) -> f64 {
    lab1.distance_sq(lab2).sqrt()
}

/// CIE94, symmetric variant.
///
/// The 1994 formula weights chroma and hue differences by the chroma of
/// the "reference" color, which makes it order-dependent. This
/// implementation uses the geometric mean of both chromas instead, a
/// common correction that preserves the formula's behavior while making
/// it a true symmetric function. Weights are the graphic-arts constants
/// (kL = 1, K1 = 0.045, K2 = 0.015).
pub fn cie94(lab1: Lab, lab2: Lab) -> f64 {
    let dl = lab1.l - lab2.l;
    let c1 = lab1.chroma();
    let c2 = lab2.chroma();
    let dc = c1 - c2;

    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    // dH^2 recovered from the Euclidean a/b difference; clamp guards
    // against negative epsilon when dc ~ sqrt(da^2 + db^2)
    let dh_sq = (da * da + db * db - dc * dc).max(0.0);

    let c = (c1 * c2).sqrt();
    let sc = 1.0 + 0.045 * c;
    let sh = 1.0 + 0.015 * c;

    (dl * dl + (dc / sc).powi(2) + dh_sq / (sh * sh)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn lab(l: f64, a: f64, b: f64) -> Lab {
        Lab::new(l, a, b)
    }

    #[test]
    fn test_cie76_known_value() {
        // 3-4-5 style triangle in LAB
        let de = cie76(lab(50.0, 0.0, 0.0), lab(50.0, 3.0, 4.0));
        assert_abs_diff_eq!(de, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_identity_all_algorithms() {
        let a = lab(37.5, -12.25, 48.0);
        for alg in DeltaE::ALL {
            assert_eq!(distance(a, a, alg), 0.0, "{alg}");
        }
    }

    #[test]
    fn test_symmetry_all_algorithms() {
        let pairs = [
            (lab(50.0, 2.5, 0.0), lab(73.0, 25.0, -18.0)),
            (lab(22.7, 20.1, -46.7), lab(23.0, 15.0, -42.6)),
            (lab(90.8, -2.1, 1.4), lab(91.2, -1.6, 0.0)),
            (lab(5.0, 60.0, 100.0), lab(95.0, -60.0, -100.0)),
        ];
        for (a, b) in pairs {
            for alg in DeltaE::ALL {
                assert_abs_diff_eq!(
                    distance(a, b, alg),
                    distance(b, a, alg),
                    epsilon = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_cie94_weighted_below_cie76() {
        // High-chroma pairs compress under CIE94
        let a = lab(50.0, 80.0, 10.0);
        let b = lab(50.0, 60.0, 5.0);
        assert!(cie94(a, b) < cie76(a, b));
    }

    #[test]
    fn test_lower_bound_factor_holds_on_samples() {
        // kappa contract: de >= euclidean / kappa
        let mut state = 0x2545F4914F6CDD1Du64;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 11) as f64 / (1u64 << 53) as f64
        };
        for _ in 0..2000 {
            let a = lab(next() * 100.0, next() * 255.0 - 128.0, next() * 255.0 - 128.0);
            let b = lab(next() * 100.0, next() * 255.0 - 128.0, next() * 255.0 - 128.0);
            let euclid = cie76(a, b);
            for alg in DeltaE::ALL {
                let de = distance(a, b, alg);
                assert!(
                    de + 1e-9 >= euclid / alg.lower_bound_factor(),
                    "{alg}: de={de} euclid={euclid}"
                );
            }
        }
    }

    #[test]
    fn test_parse_algorithm_names() {
        assert_eq!("cie76".parse::<DeltaE>().unwrap(), DeltaE::Cie76);
        assert_eq!("CIE94".parse::<DeltaE>().unwrap(), DeltaE::Cie94);
        assert_eq!("de2000".parse::<DeltaE>().unwrap(), DeltaE::Ciede2000);
        assert!("cmc".parse::<DeltaE>().is_err());
    }
}
