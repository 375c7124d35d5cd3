//! # hue-convert
//!
//! Color space conversion for the huelab engine.
//!
//! Converts between the four representations used at the engine boundary:
//!
//! | Representation | Module | Notes |
//! |----------------|--------|-------|
//! | Hex (`RRGGBB`) | [`hex`] | Input parsing and formatting |
//! | 8-bit sRGB | - | Interchange type ([`hue_core::Rgb`]) |
//! | HSL | [`hsl`] | Design-facing hue/saturation/lightness |
//! | CIE LAB (D65) | [`lab`] | Canonical space for perceptual math |
//!
//! # Usage
//!
//! ```rust
//! use hue_convert::{hex, lab};
//!
//! let rgb = hex::parse_hex("#4682B4").unwrap();
//! let lab = lab::rgb_to_lab(rgb);
//! assert!((lab.l - 52.2).abs() < 1.0);
//! ```
//!
//! # Accuracy
//!
//! The hex -> LAB -> hex round trip reproduces the original value within
//! ±1 per RGB channel. That tolerance is a contract: the inverse gamma
//! step quantizes through a 256-entry table and the final encode rounds
//! to bytes, so exact equality is not promised (and not needed by any
//! consumer).

#![warn(missing_docs)]

pub mod color;
pub mod hex;
pub mod hsl;
pub mod lab;

pub use color::Color;
pub use hex::{format_hex, parse_hex};
pub use hsl::{hsl_to_rgb, rgb_to_hsl};
pub use lab::{lab_to_rgb, rgb_to_lab, GamutMapped};
