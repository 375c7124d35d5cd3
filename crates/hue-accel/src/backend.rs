//! The numeric backend trait and the reference implementation.

use hue_core::{Lab, Rgb};
use hue_metric::{distance, DeltaE};

/// Batch numeric kernel used by the engine's hot paths.
///
/// Implementations must be pure and agree with each other within `1e-6`
/// per output value; the engine treats backend choice as invisible to
/// callers.
pub trait NumericBackend: Send + Sync {
    /// Backend name for health reporting.
    fn name(&self) -> &'static str;

    /// Whether this is an accelerated (non-reference) backend.
    fn is_accelerated(&self) -> bool;

    /// Converts a batch of sRGB colors to LAB.
    fn rgb_to_lab_batch(&self, rgbs: &[Rgb]) -> Vec<Lab>;

    /// Computes a batch of pairwise distances under one algorithm.
    fn distance_batch(&self, pairs: &[(Lab, Lab)], algorithm: DeltaE) -> Vec<f64>;
}

/// Scalar reference backend; always available, defines correct output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceBackend;

impl NumericBackend for ReferenceBackend {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn is_accelerated(&self) -> bool {
        false
    }

    fn rgb_to_lab_batch(&self, rgbs: &[Rgb]) -> Vec<Lab> {
        rgbs.iter().map(|&rgb| hue_convert::rgb_to_lab(rgb)).collect()
    }

    fn distance_batch(&self, pairs: &[(Lab, Lab)], algorithm: DeltaE) -> Vec<f64> {
        pairs
            .iter()
            .map(|&(a, b)| distance(a, b, algorithm))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_matches_scalar_paths() {
        let backend = ReferenceBackend;
        let rgbs = [Rgb::new(70, 130, 180), Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)];
        let labs = backend.rgb_to_lab_batch(&rgbs);
        assert_eq!(labs.len(), 3);
        assert_eq!(labs[0], hue_convert::rgb_to_lab(rgbs[0]));

        let pairs = [(labs[0], labs[1]), (labs[1], labs[2])];
        let dists = backend.distance_batch(&pairs, DeltaE::Ciede2000);
        assert_eq!(dists[0], distance(labs[0], labs[1], DeltaE::Ciede2000));
    }

    #[test]
    fn test_empty_batches() {
        let backend = ReferenceBackend;
        assert!(backend.rgb_to_lab_batch(&[]).is_empty());
        assert!(backend.distance_batch(&[], DeltaE::Cie76).is_empty());
    }
}
