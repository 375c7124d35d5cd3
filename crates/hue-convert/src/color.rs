//! The immutable `Color` bundle.

use hue_core::{Hsl, Lab, Result, Rgb};

use crate::{hex, hsl, lab};

/// A color carrying all four boundary representations.
///
/// Built once on input parse (or on palette lookup) and never mutated;
/// the representations denote the same perceptual color within the
/// conversion tolerances documented in [`crate::lab`].
///
/// # Example
///
/// ```rust
/// use hue_convert::Color;
///
/// let color = Color::from_hex("#4682B4").unwrap();
/// assert_eq!(color.hex(), "#4682B4");
/// assert!((color.lab.l - 52.2).abs() < 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// 8-bit sRGB representation.
    pub rgb: Rgb,
    /// HSL representation.
    pub hsl: Hsl,
    /// CIE LAB (D65) representation.
    pub lab: Lab,
}

impl Color {
    /// Parses a hex string and derives the remaining representations.
    pub fn from_hex(input: &str) -> Result<Self> {
        Ok(Self::from_rgb(hex::parse_hex(input)?))
    }

    /// Builds a color from an RGB value.
    pub fn from_rgb(rgb: Rgb) -> Self {
        Self {
            rgb,
            hsl: hsl::rgb_to_hsl(rgb),
            lab: lab::rgb_to_lab(rgb),
        }
    }

    /// Builds a color from an HSL value (via its RGB projection).
    pub fn from_hsl(value: Hsl) -> Self {
        Self::from_rgb(hsl::hsl_to_rgb(value))
    }

    /// Hex notation with a leading `#`.
    pub fn hex(&self) -> String {
        hex::format_hex(self.rgb)
    }
}
