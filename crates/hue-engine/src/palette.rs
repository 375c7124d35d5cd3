//! Reference database loading.
//!
//! The palette ships embedded as `(name, hex)` pairs in `hue-core`; this
//! module turns it into [`ReferenceEntry`] values with LAB coordinates
//! precomputed once at load. Entry ids are positional, so they are
//! stable across runs as long as the embedded table does not reorder.

use hue_convert::{parse_hex, rgb_to_lab};
use hue_core::{palette, ReferenceEntry, Result};

/// Loads the embedded reference palette.
///
/// # Errors
///
/// Propagates a parse error if an embedded hex literal is malformed,
/// which the palette's own tests rule out.
pub fn builtin_entries() -> Result<Vec<ReferenceEntry>> {
    palette::BUILTIN
        .iter()
        .enumerate()
        .map(|(i, (name, hex))| {
            let rgb = parse_hex(hex)?;
            Ok(ReferenceEntry::new(i as u32, *name, rgb, rgb_to_lab(rgb)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_whole_palette() {
        let entries = builtin_entries().unwrap();
        assert_eq!(entries.len(), palette::BUILTIN.len());
    }

    #[test]
    fn test_ids_positional_and_unique() {
        let entries = builtin_entries().unwrap();
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.id, i as u32);
        }
    }

    #[test]
    fn test_lab_matches_rgb() {
        for entry in builtin_entries().unwrap() {
            assert_eq!(entry.lab, rgb_to_lab(entry.rgb), "{}", entry.name);
        }
    }
}
