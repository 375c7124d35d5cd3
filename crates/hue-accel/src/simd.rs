//! Portable SIMD backend.
//!
//! Four colors ride in each `f64x4` through the linear stages of the
//! conversion (the sRGB matrix) and of CIE76. The nonlinear scalar
//! pieces - gamma table lookup, the CIE cube-root function, CIEDE2000
//! trigonometry - stay per-lane: the gamma step is a table gather
//! either way, and the trig is served from the quantized hue table.
//! Constants and tables are shared with the reference implementation,
//! so outputs agree to machine precision, far inside the 1e-6
//! equivalence contract.

use wide::f64x4;

use hue_core::{Lab, Rgb};
use hue_metric::{cie94, ciede2000::ciede2000_lut, DeltaE, HueLut};

use crate::backend::{NumericBackend, ReferenceBackend};

use hue_convert::lab::{cie_f, linearize, D65_WHITE, RGB_TO_XYZ};

/// SIMD lane width for f64.
const LANES: usize = 4;

/// `f64x4`-based accelerated backend.
#[derive(Debug, Clone, Copy)]
pub struct SimdBackend {
    hue_lut: HueLut,
}

impl SimdBackend {
    /// Probes the backend: builds it and verifies a sample of outputs
    /// against the reference implementation.
    ///
    /// Returns `None` when the self-check fails; the caller falls back
    /// to [`ReferenceBackend`]. The check covers gamma extremes, the
    /// neutral axis, and the blue region where the CIEDE2000 rotation
    /// term is active.
    pub fn probe() -> Option<Self> {
        let backend = Self {
            hue_lut: HueLut::new(),
        };
        let reference = ReferenceBackend;

        let rgbs = [
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
            Rgb::new(10, 10, 10),
            Rgb::new(70, 130, 180),
            Rgb::new(255, 0, 128),
            Rgb::new(1, 254, 7),
            Rgb::new(128, 128, 128),
        ];
        let simd_labs = backend.rgb_to_lab_batch(&rgbs);
        let ref_labs = reference.rgb_to_lab_batch(&rgbs);
        for (s, r) in simd_labs.iter().zip(&ref_labs) {
            if (s.l - r.l).abs() > 1e-6 || (s.a - r.a).abs() > 1e-6 || (s.b - r.b).abs() > 1e-6 {
                return None;
            }
        }

        let pairs: Vec<(Lab, Lab)> = simd_labs
            .iter()
            .zip(simd_labs.iter().cycle().skip(1))
            .map(|(&a, &b)| (a, b))
            .take(rgbs.len())
            .collect();
        for algorithm in DeltaE::ALL {
            let simd_d = backend.distance_batch(&pairs, algorithm);
            let ref_d = reference.distance_batch(&pairs, algorithm);
            if simd_d
                .iter()
                .zip(&ref_d)
                .any(|(s, r)| (s - r).abs() > 1e-6)
            {
                return None;
            }
        }

        Some(backend)
    }

    fn rgb_to_lab_x4(chunk: &[Rgb]) -> [Lab; LANES] {
        debug_assert_eq!(chunk.len(), LANES);

        let r = f64x4::from([
            linearize(chunk[0].r),
            linearize(chunk[1].r),
            linearize(chunk[2].r),
            linearize(chunk[3].r),
        ]);
        let g = f64x4::from([
            linearize(chunk[0].g),
            linearize(chunk[1].g),
            linearize(chunk[2].g),
            linearize(chunk[3].g),
        ]);
        let b = f64x4::from([
            linearize(chunk[0].b),
            linearize(chunk[1].b),
            linearize(chunk[2].b),
            linearize(chunk[3].b),
        ]);

        let scale = f64x4::splat(100.0);
        let x = (r * f64x4::splat(RGB_TO_XYZ[0][0])
            + g * f64x4::splat(RGB_TO_XYZ[0][1])
            + b * f64x4::splat(RGB_TO_XYZ[0][2]))
            * scale
            / f64x4::splat(D65_WHITE[0]);
        let y = (r * f64x4::splat(RGB_TO_XYZ[1][0])
            + g * f64x4::splat(RGB_TO_XYZ[1][1])
            + b * f64x4::splat(RGB_TO_XYZ[1][2]))
            * scale
            / f64x4::splat(D65_WHITE[1]);
        let z = (r * f64x4::splat(RGB_TO_XYZ[2][0])
            + g * f64x4::splat(RGB_TO_XYZ[2][1])
            + b * f64x4::splat(RGB_TO_XYZ[2][2]))
            * scale
            / f64x4::splat(D65_WHITE[2]);

        let xs = x.to_array();
        let ys = y.to_array();
        let zs = z.to_array();

        let mut out = [Lab::new(0.0, 0.0, 0.0); LANES];
        for lane in 0..LANES {
            let fx = cie_f(xs[lane]);
            let fy = cie_f(ys[lane]);
            let fz = cie_f(zs[lane]);
            out[lane] = Lab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz));
        }
        out
    }

    fn cie76_x4(chunk: &[(Lab, Lab)]) -> [f64; LANES] {
        debug_assert_eq!(chunk.len(), LANES);
        let pick = |f: fn(&(Lab, Lab)) -> f64| {
            f64x4::from([f(&chunk[0]), f(&chunk[1]), f(&chunk[2]), f(&chunk[3])])
        };
        let dl = pick(|p| p.0.l - p.1.l);
        let da = pick(|p| p.0.a - p.1.a);
        let db = pick(|p| p.0.b - p.1.b);
        (dl * dl + da * da + db * db).sqrt().to_array()
    }
}

impl NumericBackend for SimdBackend {
    fn name(&self) -> &'static str {
        "simd-f64x4"
    }

    fn is_accelerated(&self) -> bool {
        true
    }

    fn rgb_to_lab_batch(&self, rgbs: &[Rgb]) -> Vec<Lab> {
        let mut out = Vec::with_capacity(rgbs.len());
        let chunks = rgbs.chunks_exact(LANES);
        let remainder = chunks.remainder();
        for chunk in chunks {
            out.extend_from_slice(&Self::rgb_to_lab_x4(chunk));
        }
        for &rgb in remainder {
            out.push(hue_convert::rgb_to_lab(rgb));
        }
        out
    }

    fn distance_batch(&self, pairs: &[(Lab, Lab)], algorithm: DeltaE) -> Vec<f64> {
        match algorithm {
            DeltaE::Cie76 => {
                let mut out = Vec::with_capacity(pairs.len());
                let chunks = pairs.chunks_exact(LANES);
                let remainder = chunks.remainder();
                for chunk in chunks {
                    out.extend_from_slice(&Self::cie76_x4(chunk));
                }
                for &(a, b) in remainder {
                    out.push(a.distance_sq(b).sqrt());
                }
                out
            }
            DeltaE::Cie94 => pairs.iter().map(|&(a, b)| cie94(a, b)).collect(),
            DeltaE::Ciede2000 => pairs
                .iter()
                .map(|&(a, b)| ciede2000_lut(a, b, &self.hue_lut))
                .collect(),
        }
    }
}
