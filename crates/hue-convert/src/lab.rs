//! sRGB <-> CIE LAB conversion (D65).
//!
//! The forward path is sRGB -> linear RGB -> XYZ -> LAB:
//!
//! 1. Inverse sRGB gamma (IEC 61966-2-1 piecewise curve), served from a
//!    precomputed 256-entry table indexed by the byte value so the hot
//!    path never calls `powf`.
//! 2. Linear RGB -> XYZ via the D65-referenced sRGB matrix.
//! 3. XYZ -> LAB via the CIE cube-root / linear-segment function,
//!    referenced to the D65 white point.
//!
//! The reverse path inverts each step; results that land outside the
//! 8-bit sRGB cube are clamped and flagged via [`GamutMapped`] rather
//! than rejected. LAB covers colors sRGB cannot represent, so clamping
//! is an expected outcome for synthetic LAB inputs, not a failure.

use std::sync::LazyLock;

use hue_core::{Lab, Rgb};

/// D65 reference white, CIE 1931 2 degree observer.
pub const D65_WHITE: [f64; 3] = [95.047, 100.0, 108.883];

/// CIE epsilon: (6/29)^3, the cube-root/linear split point.
const CIE_EPSILON: f64 = 216.0 / 24389.0;
/// CIE kappa: (29/3)^3, slope of the linear segment.
const CIE_KAPPA: f64 = 24389.0 / 27.0;

/// Linear RGB -> XYZ matrix (sRGB primaries, D65), rows X/Y/Z.
///
/// Public so the accelerated backend evaluates the identical transform.
pub const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.412_456_4, 0.357_576_1, 0.180_437_5],
    [0.212_672_9, 0.715_152_2, 0.072_175_0],
    [0.019_333_9, 0.119_192_0, 0.950_304_1],
];

/// XYZ -> linear RGB matrix, inverse of [`RGB_TO_XYZ`].
const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [3.240_454_2, -1.537_138_5, -0.498_531_4],
    [-0.969_266_0, 1.876_010_8, 0.041_556_0],
    [0.055_643_4, -0.204_025_9, 1.057_225_2],
];

/// Inverse sRGB gamma for one encoded value in [0, 1].
#[inline]
fn srgb_eotf(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Forward sRGB gamma for one linear value in [0, 1].
#[inline]
fn srgb_oetf(l: f64) -> f64 {
    if l <= 0.003_130_8 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

/// Precomputed inverse gamma for all 256 byte values.
static SRGB_LINEAR: LazyLock<[f64; 256]> = LazyLock::new(|| {
    let mut table = [0.0; 256];
    for (i, slot) in table.iter_mut().enumerate() {
        *slot = srgb_eotf(i as f64 / 255.0);
    }
    table
});

/// Linearized value for one sRGB byte, from the precomputed table.
#[inline]
pub fn linearize(byte: u8) -> f64 {
    SRGB_LINEAR[usize::from(byte)]
}

/// CIE f function: cube root above epsilon, linear segment below.
///
/// Public so the accelerated backend evaluates the identical nonlinearity.
#[inline]
pub fn cie_f(t: f64) -> f64 {
    if t > CIE_EPSILON {
        t.cbrt()
    } else {
        (CIE_KAPPA * t + 16.0) / 116.0
    }
}

/// Inverse of [`cie_f`].
#[inline]
fn cie_f_inv(f: f64) -> f64 {
    let f3 = f * f * f;
    if f3 > CIE_EPSILON {
        f3
    } else {
        (116.0 * f - 16.0) / CIE_KAPPA
    }
}

/// Converts 8-bit sRGB to CIE LAB (D65).
///
/// # Example
///
/// ```rust
/// use hue_convert::lab::rgb_to_lab;
/// use hue_core::Rgb;
///
/// let lab = rgb_to_lab(Rgb::new(255, 255, 255));
/// assert!((lab.l - 100.0).abs() < 1e-6);
/// assert!(lab.a.abs() < 0.01 && lab.b.abs() < 0.01);
/// ```
pub fn rgb_to_lab(rgb: Rgb) -> Lab {
    let r = linearize(rgb.r);
    let g = linearize(rgb.g);
    let b = linearize(rgb.b);

    // XYZ scaled to the conventional 0-100 range
    let x = (RGB_TO_XYZ[0][0] * r + RGB_TO_XYZ[0][1] * g + RGB_TO_XYZ[0][2] * b) * 100.0;
    let y = (RGB_TO_XYZ[1][0] * r + RGB_TO_XYZ[1][1] * g + RGB_TO_XYZ[1][2] * b) * 100.0;
    let z = (RGB_TO_XYZ[2][0] * r + RGB_TO_XYZ[2][1] * g + RGB_TO_XYZ[2][2] * b) * 100.0;

    let fx = cie_f(x / D65_WHITE[0]);
    let fy = cie_f(y / D65_WHITE[1]);
    let fz = cie_f(z / D65_WHITE[2]);

    Lab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

/// Result of a LAB -> RGB conversion.
///
/// `out_of_gamut` is set when any channel needed clamping to fit the
/// 8-bit sRGB cube. The clamped value is still returned; callers decide
/// whether the flag matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamutMapped {
    /// The (possibly clamped) sRGB value.
    pub rgb: Rgb,
    /// Whether clamping occurred on any channel.
    pub out_of_gamut: bool,
}

/// Converts CIE LAB (D65) back to 8-bit sRGB, clamping out-of-gamut
/// results.
///
/// # Example
///
/// ```rust
/// use hue_convert::lab::{lab_to_rgb, rgb_to_lab};
/// use hue_core::{Lab, Rgb};
///
/// let mapped = lab_to_rgb(rgb_to_lab(Rgb::new(70, 130, 180)));
/// assert!(!mapped.out_of_gamut);
/// assert_eq!(mapped.rgb, Rgb::new(70, 130, 180));
///
/// // A LAB value no sRGB color reaches: maximally green at full lightness
/// let mapped = lab_to_rgb(Lab::new(100.0, -128.0, 0.0));
/// assert!(mapped.out_of_gamut);
/// ```
pub fn lab_to_rgb(lab: Lab) -> GamutMapped {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = fy + lab.a / 500.0;
    let fz = fy - lab.b / 200.0;

    let x = cie_f_inv(fx) * D65_WHITE[0] / 100.0;
    let y = cie_f_inv(fy) * D65_WHITE[1] / 100.0;
    let z = cie_f_inv(fz) * D65_WHITE[2] / 100.0;

    let lin = [
        XYZ_TO_RGB[0][0] * x + XYZ_TO_RGB[0][1] * y + XYZ_TO_RGB[0][2] * z,
        XYZ_TO_RGB[1][0] * x + XYZ_TO_RGB[1][1] * y + XYZ_TO_RGB[1][2] * z,
        XYZ_TO_RGB[2][0] * x + XYZ_TO_RGB[2][1] * y + XYZ_TO_RGB[2][2] * z,
    ];

    let mut out_of_gamut = false;
    let mut bytes = [0u8; 3];
    for (slot, &l) in bytes.iter_mut().zip(&lin) {
        // Tiny excursions below 0 / above 1 are numeric noise from the
        // matrix round trip (the published matrices are 7-digit and not
        // exact inverses), not genuine gamut misses.
        if !(-1e-4..=1.0 + 1e-4).contains(&l) {
            out_of_gamut = true;
        }
        let encoded = srgb_oetf(l.clamp(0.0, 1.0));
        *slot = (encoded * 255.0).round().clamp(0.0, 255.0) as u8;
    }

    GamutMapped {
        rgb: Rgb::new(bytes[0], bytes[1], bytes[2]),
        out_of_gamut,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hue_core::palette;

    #[test]
    fn test_white_black() {
        let white = rgb_to_lab(Rgb::new(255, 255, 255));
        assert_abs_diff_eq!(white.l, 100.0, epsilon = 1e-6);
        assert_abs_diff_eq!(white.a, 0.0, epsilon = 0.01);
        assert_abs_diff_eq!(white.b, 0.0, epsilon = 0.01);

        let black = rgb_to_lab(Rgb::new(0, 0, 0));
        assert_abs_diff_eq!(black.l, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_steel_blue_reference() {
        // Published LAB values for #4682B4 vary in the first decimal with
        // matrix rounding; the contract is "approximately".
        let lab = rgb_to_lab(Rgb::new(70, 130, 180));
        assert_abs_diff_eq!(lab.l, 52.3, epsilon = 1.0);
        assert_abs_diff_eq!(lab.a, -4.5, epsilon = 1.5);
        assert_abs_diff_eq!(lab.b, -32.2, epsilon = 1.0);
    }

    #[test]
    fn test_round_trip_palette() {
        for (name, hex) in palette::BUILTIN {
            let rgb = crate::hex::parse_hex(hex).unwrap();
            let mapped = lab_to_rgb(rgb_to_lab(rgb));
            assert!(!mapped.out_of_gamut, "{name} flagged out of gamut");
            let back = mapped.rgb;
            assert!(
                (i16::from(back.r) - i16::from(rgb.r)).abs() <= 1
                    && (i16::from(back.g) - i16::from(rgb.g)).abs() <= 1
                    && (i16::from(back.b) - i16::from(rgb.b)).abs() <= 1,
                "{name}: {rgb:?} -> {back:?}"
            );
        }
    }

    #[test]
    fn test_round_trip_byte_grid() {
        for r in (0..=255u16).step_by(15) {
            for g in (0..=255u16).step_by(15) {
                for b in (0..=255u16).step_by(15) {
                    let rgb = Rgb::new(r as u8, g as u8, b as u8);
                    let back = lab_to_rgb(rgb_to_lab(rgb)).rgb;
                    assert!(
                        (i16::from(back.r) - i16::from(rgb.r)).abs() <= 1
                            && (i16::from(back.g) - i16::from(rgb.g)).abs() <= 1
                            && (i16::from(back.b) - i16::from(rgb.b)).abs() <= 1,
                        "{rgb:?} -> {back:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_out_of_gamut_flagged() {
        let mapped = lab_to_rgb(Lab::new(50.0, 120.0, -120.0));
        assert!(mapped.out_of_gamut);

        let mapped = lab_to_rgb(Lab::new(100.0, -128.0, 0.0));
        assert!(mapped.out_of_gamut);
    }

    #[test]
    fn test_linearize_matches_formula() {
        for byte in [0u8, 1, 10, 11, 128, 254, 255] {
            let direct = srgb_eotf(f64::from(byte) / 255.0);
            assert_abs_diff_eq!(linearize(byte), direct, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_lightness_monotonic_in_gray() {
        let mut last = -1.0;
        for v in 0..=255u8 {
            let l = rgb_to_lab(Rgb::new(v, v, v)).l;
            assert!(l > last, "lightness must increase with gray level");
            last = l;
        }
    }
}
