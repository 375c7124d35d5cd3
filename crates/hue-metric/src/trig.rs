//! Quantized sin/cos lookup for hue angles.
//!
//! CIEDE2000 evaluates a handful of sines and cosines of hue angles per
//! pair. In batch loops those calls dominate, so the accelerated path
//! serves them from a precomputed table with linear interpolation.
//!
//! # Accuracy
//!
//! With 16384 entries over a full turn the interpolation error of sine is
//! bounded by `(step/2)^2 / 2` with `step = 2*pi/16384`, about `7.4e-8`.
//! The resulting Delta E deviates from the exact-trig value by well under
//! `1e-6`, which is the equivalence tolerance the acceleration backend is
//! held to. The table is an optimization, never a semantic change.

use std::sync::LazyLock;

/// Table resolution. Power of two so index wrapping is a mask.
const LUT_SIZE: usize = 16384;

static SIN_TABLE: LazyLock<Box<[f64; LUT_SIZE]>> = LazyLock::new(|| {
    let mut table = Box::new([0.0; LUT_SIZE]);
    for (i, slot) in table.iter_mut().enumerate() {
        *slot = (i as f64 / LUT_SIZE as f64 * std::f64::consts::TAU).sin();
    }
    table
});

/// Interpolated sin/cos over quantized hue angles in degrees.
///
/// `HueLut` is a zero-sized handle over a process-wide table; constructing
/// it is free and the table is built on first use.
#[derive(Debug, Clone, Copy, Default)]
pub struct HueLut;

impl HueLut {
    /// Creates a handle (the backing table is shared and lazy).
    pub fn new() -> Self {
        Self
    }

    /// Sine of an angle in degrees, linearly interpolated.
    #[inline]
    pub fn sin_deg(&self, degrees: f64) -> f64 {
        let turns = (degrees / 360.0).rem_euclid(1.0);
        let pos = turns * LUT_SIZE as f64;
        let i = pos as usize & (LUT_SIZE - 1);
        let frac = pos - pos.floor();
        let a = SIN_TABLE[i];
        let b = SIN_TABLE[(i + 1) & (LUT_SIZE - 1)];
        a + (b - a) * frac
    }

    /// Cosine of an angle in degrees, linearly interpolated.
    #[inline]
    pub fn cos_deg(&self, degrees: f64) -> f64 {
        self.sin_deg(degrees + 90.0)
    }
}
