//! RGB <-> HSL conversion.
//!
//! HSL is the design-facing representation: callers reason about hue
//! families and lightness bands, not LAB coordinates. Hue is degrees
//! `[0, 360)`, saturation and lightness are percentages `[0, 100]`.

use hue_core::{Hsl, Rgb};

/// Converts 8-bit sRGB to HSL.
///
/// # Example
///
/// ```rust
/// use hue_convert::hsl::rgb_to_hsl;
/// use hue_core::Rgb;
///
/// let hsl = rgb_to_hsl(Rgb::new(255, 0, 0));
/// assert_eq!(hsl.h, 0.0);
/// assert_eq!(hsl.s, 100.0);
/// assert_eq!(hsl.l, 50.0);
/// ```
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;

    if delta == 0.0 {
        // Achromatic: hue is undefined, reported as 0
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let h = if max == r {
        (g - b) / delta % 6.0
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    Hsl::new(h * 60.0, s * 100.0, l * 100.0)
}

/// Converts HSL back to 8-bit sRGB.
///
/// Saturation and lightness are clamped to `[0, 100]`; hue wraps.
///
/// # Example
///
/// ```rust
/// use hue_convert::hsl::hsl_to_rgb;
/// use hue_core::Hsl;
///
/// let rgb = hsl_to_rgb(Hsl::new(120.0, 100.0, 50.0));
/// assert_eq!((rgb.r, rgb.g, rgb.b), (0, 255, 0));
/// ```
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = hsl.h.rem_euclid(360.0);
    let s = (hsl.s / 100.0).clamp(0.0, 1.0);
    let l = (hsl.l / 100.0).clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r1, g1, b1) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb::new(to_byte(r1), to_byte(g1), to_byte(b1))
}
