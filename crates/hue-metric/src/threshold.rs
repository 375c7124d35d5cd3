//! Delta E threshold semantics.
//!
//! The historic interpretation bands for CIEDE2000 values, used by the
//! engine to turn a raw distance into consultation-facing wording and a
//! confidence score.

use serde::{Deserialize, Serialize};

/// Perceptual interpretation of a Delta E value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perceptibility {
    /// dE < 1: not perceptible by the human eye.
    Imperceptible,
    /// 1 <= dE < 2: perceptible on close inspection.
    CloseInspection,
    /// 2 <= dE < 10: clearly different colors.
    Distinct,
    /// dE >= 10: effectively opposite colors.
    Opposite,
}

impl Perceptibility {
    /// Classifies a Delta E value into its threshold band.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hue_metric::Perceptibility;
    ///
    /// assert_eq!(Perceptibility::classify(0.5), Perceptibility::Imperceptible);
    /// assert_eq!(Perceptibility::classify(2.5), Perceptibility::Distinct);
    /// assert_eq!(Perceptibility::classify(40.0), Perceptibility::Opposite);
    /// ```
    pub fn classify(delta_e: f64) -> Self {
        if delta_e < 1.0 {
            Self::Imperceptible
        } else if delta_e < 2.0 {
            Self::CloseInspection
        } else if delta_e < 10.0 {
            Self::Distinct
        } else {
            Self::Opposite
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Imperceptible => "imperceptible",
            Self::CloseInspection => "detectable on close inspection",
            Self::Distinct => "clearly different",
            Self::Opposite => "opposite colors",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(Perceptibility::classify(0.0), Perceptibility::Imperceptible);
        assert_eq!(
            Perceptibility::classify(0.999),
            Perceptibility::Imperceptible
        );
        assert_eq!(
            Perceptibility::classify(1.0),
            Perceptibility::CloseInspection
        );
        assert_eq!(Perceptibility::classify(2.0), Perceptibility::Distinct);
        assert_eq!(Perceptibility::classify(9.999), Perceptibility::Distinct);
        assert_eq!(Perceptibility::classify(10.0), Perceptibility::Opposite);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Perceptibility::Imperceptible.label(), "imperceptible");
        assert_eq!(Perceptibility::Opposite.label(), "opposite colors");
    }
}
