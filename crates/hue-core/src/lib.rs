//! # hue-core
//!
//! Core types for the huelab perceptual color engine.
//!
//! This crate provides the foundational types used throughout the huelab
//! workspace:
//!
//! - [`Rgb`], [`Hsl`], [`Lab`] - Color component value types
//! - [`ReferenceEntry`] - A named palette color with a stable identifier
//! - [`palette`] - The built-in reference palette
//! - [`Error`], [`Result`] - Shared error handling
//!
//! ## Design Philosophy
//!
//! Color values are **immutable**: every transformation produces a new
//! value, and a [`ReferenceEntry`] never changes after the palette is
//! loaded. All numeric color math downstream operates on [`Lab`], which is
//! the canonical representation for perceptual work.
//!
//! ## Crate Structure
//!
//! This crate is the foundation of huelab and has no internal dependencies.
//! All other huelab crates depend on `hue-core`:
//!
//! ```text
//! hue-core (this crate)
//!    ^
//!    |
//!    +-- hue-convert (color space conversion)
//!    +-- hue-metric (Delta E formulas)
//!    +-- hue-index (k-d tree nearest neighbor)
//!    +-- hue-cache (result caching)
//!    +-- ... (all other crates)
//! ```

#![warn(missing_docs)]

pub mod color;
pub mod entry;
pub mod error;
pub mod palette;

pub use color::{Hsl, Lab, Rgb};
pub use entry::ReferenceEntry;
pub use error::{Error, Result};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use hue_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{Hsl, Lab, Rgb};
    pub use crate::entry::ReferenceEntry;
    pub use crate::error::{Error, Result};
}
