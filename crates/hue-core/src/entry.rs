//! Reference palette entries.

use serde::{Deserialize, Serialize};

use crate::color::{Lab, Rgb};

/// A named color belonging to the reference database.
///
/// Entries are read-only after the palette loads: the spatial index, the
/// cache, and batch workers all share them immutably. The `id` is stable
/// across runs and is used to break distance ties deterministically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Stable identifier, unique within the palette.
    pub id: u32,
    /// Human-readable color name.
    pub name: String,
    /// sRGB representation.
    pub rgb: Rgb,
    /// LAB representation, precomputed at palette load.
    pub lab: Lab,
}

impl ReferenceEntry {
    /// Creates a reference entry.
    ///
    /// `lab` must denote the same perceptual color as `rgb`; the palette
    /// loader computes it via `hue-convert` so the invariant holds by
    /// construction.
    pub fn new(id: u32, name: impl Into<String>, rgb: Rgb, lab: Lab) -> Self {
        Self {
            id,
            name: name.into(),
            rgb,
            lab,
        }
    }

    /// Six-digit uppercase hex for this entry.
    pub fn hex(&self) -> String {
        self.rgb.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_hex() {
        let entry = ReferenceEntry::new(
            7,
            "steelblue",
            Rgb::new(70, 130, 180),
            Lab::new(52.2, -4.1, -32.2),
        );
        assert_eq!(entry.hex(), "4682B4");
        assert_eq!(entry.id, 7);
        assert_eq!(entry.name, "steelblue");
    }
}
