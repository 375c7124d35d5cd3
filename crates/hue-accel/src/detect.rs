//! Backend detection and startup selection.
//!
//! Selection runs once at engine construction. The `HUE_BACKEND`
//! environment variable (`reference` or `simd`) overrides the automatic
//! choice, which otherwise picks the highest-priority backend whose
//! startup probe passed. A failed probe is logged once at `warn` and is
//! never surfaced to callers: they get the reference path and cannot
//! tell except through timing.

use std::sync::Arc;

use tracing::{info, warn};

use crate::backend::{NumericBackend, ReferenceBackend};
use crate::simd::SimdBackend;

/// Information about one numeric backend.
#[derive(Debug, Clone)]
pub struct BackendInfo {
    /// Backend name.
    pub name: &'static str,
    /// Whether the backend passed its startup probe.
    pub available: bool,
    /// Priority for auto-selection (higher = preferred).
    pub priority: u32,
    /// Description.
    pub description: &'static str,
}

/// Detects all backends and their availability.
pub fn detect_backends() -> Vec<BackendInfo> {
    let simd_available = SimdBackend::probe().is_some();
    let mut backends = vec![
        BackendInfo {
            name: "reference",
            available: true,
            priority: 10,
            description: "scalar reference implementation",
        },
        BackendInfo {
            name: "simd-f64x4",
            available: simd_available,
            priority: if simd_available { 100 } else { 0 },
            description: "portable SIMD (4-wide f64) with quantized hue trig",
        },
    ];
    backends.sort_by(|a, b| b.priority.cmp(&a.priority));
    backends
}

/// Selects the backend to use for the lifetime of the process.
///
/// Honors `HUE_BACKEND=reference|simd`; anything else (including a probe
/// failure under `HUE_BACKEND=simd`) falls back to the reference backend
/// with a single warning.
pub fn select_backend() -> Arc<dyn NumericBackend> {
    match std::env::var("HUE_BACKEND").ok().as_deref() {
        Some("reference") => {
            info!("backend forced to reference via HUE_BACKEND");
            return Arc::new(ReferenceBackend);
        }
        Some("simd") => {
            if let Some(simd) = SimdBackend::probe() {
                info!("backend forced to simd via HUE_BACKEND");
                return Arc::new(simd);
            }
            warn!("HUE_BACKEND=simd but probe failed; falling back to reference");
            return Arc::new(ReferenceBackend);
        }
        Some(other) => {
            warn!("unknown HUE_BACKEND value {other:?}; using automatic selection");
        }
        None => {}
    }

    match SimdBackend::probe() {
        Some(simd) => {
            info!(backend = simd.name(), "accelerated backend selected");
            Arc::new(simd)
        }
        None => {
            warn!("accelerated backend unavailable; using reference implementation");
            Arc::new(ReferenceBackend)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_lists_reference_as_available() {
        let backends = detect_backends();
        let reference = backends.iter().find(|b| b.name == "reference").unwrap();
        assert!(reference.available);
    }

    #[test]
    fn test_detect_sorted_by_priority() {
        let backends = detect_backends();
        for pair in backends.windows(2) {
            assert!(pair[0].priority >= pair[1].priority);
        }
    }

    #[test]
    fn test_select_returns_working_backend() {
        let backend = select_backend();
        let labs = backend.rgb_to_lab_batch(&[hue_core::Rgb::new(70, 130, 180)]);
        assert_eq!(labs.len(), 1);
    }
}
