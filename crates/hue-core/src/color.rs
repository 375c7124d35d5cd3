//! Color component value types.
//!
//! Three representations cover the engine's needs:
//!
//! - [`Rgb`] - 8-bit sRGB, the interchange format for hex input/output
//! - [`Hsl`] - hue/saturation/lightness, used by design-facing callers
//! - [`Lab`] - CIE LAB (D65), the canonical space for perceptual math
//!
//! All three are small `Copy` values. Conversion between them lives in
//! `hue-convert`; this crate only defines the shapes and their invariants.

use serde::{Deserialize, Serialize};

/// An 8-bit sRGB color.
///
/// Components are gamma-encoded sRGB bytes, matching the `RRGGBB` hex
/// notation used at the engine boundary.
///
/// # Example
///
/// ```rust
/// use hue_core::Rgb;
///
/// let steel_blue = Rgb::new(70, 130, 180);
/// assert_eq!(steel_blue.to_hex(), "4682B4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red component [0, 255].
    pub r: u8,
    /// Green component [0, 255].
    pub g: u8,
    /// Blue component [0, 255].
    pub b: u8,
}

impl Rgb {
    /// Creates an RGB value from three bytes.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Formats as uppercase six-digit hex without a leading `#`.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Returns the components as an array.
    #[inline]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// A hue/saturation/lightness color.
///
/// Hue is in degrees `[0, 360)`; saturation and lightness are percentages
/// `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue angle in degrees [0, 360).
    pub h: f64,
    /// Saturation percentage [0, 100].
    pub s: f64,
    /// Lightness percentage [0, 100].
    pub l: f64,
}

impl Hsl {
    /// Creates an HSL value, normalizing hue into `[0, 360)`.
    #[inline]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s,
            l,
        }
    }
}

/// A CIE LAB color (D65 reference white).
///
/// `l` is lightness in `[0, 100]`; `a` (green-red) and `b` (blue-yellow)
/// are roughly `[-128, 127]` for colors reachable from sRGB.
///
/// LAB is the canonical space for every perceptual computation in the
/// engine: distance metrics, the spatial index, and cache keys all work
/// from LAB values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    /// Lightness [0, 100].
    pub l: f64,
    /// Green-red axis.
    pub a: f64,
    /// Blue-yellow axis.
    pub b: f64,
}

impl Lab {
    /// Creates a LAB value.
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma: distance from the neutral axis in the a/b plane.
    #[inline]
    pub fn chroma(self) -> f64 {
        self.a.hypot(self.b)
    }

    /// Returns the components as an array in `[L, a, b]` order.
    ///
    /// Index order matches the splitting dimensions of the spatial index
    /// (0 = L, 1 = a, 2 = b).
    #[inline]
    pub const fn to_array(self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }

    /// Component by spatial-index dimension (0 = L, 1 = a, 2 = b).
    ///
    /// # Panics
    ///
    /// Panics if `dim > 2`.
    #[inline]
    pub fn component(self, dim: usize) -> f64 {
        match dim {
            0 => self.l,
            1 => self.a,
            2 => self.b,
            _ => panic!("LAB dimension out of range: {dim}"),
        }
    }

    /// Squared Euclidean distance to another LAB value.
    ///
    /// This is the CIE76 Delta E without the final square root; the
    /// spatial index uses it for pruning bounds.
    #[inline]
    pub fn distance_sq(self, other: Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }
}
