//! Deterministic cache keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key identifying one cached analysis result.
///
/// Built from the normalized input color (uppercase six-digit hex), the
/// algorithm identifier, and the neighbor count. The derivation is pure:
/// the same logical request always produces the same key, in any process,
/// in any call order. The string form doubles as the persistent tier's
/// file stem, so it contains only `[0-9A-Za-z-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    hex: String,
    algorithm: String,
    k: u32,
}

impl CacheKey {
    /// Creates a key from normalized request parameters.
    ///
    /// `hex` is uppercased here so that callers cannot accidentally
    /// split the cache by input casing.
    pub fn new(hex: &str, algorithm: &str, k: u32) -> Self {
        Self {
            hex: hex.trim_start_matches('#').to_ascii_uppercase(),
            algorithm: algorithm.to_ascii_lowercase(),
            k,
        }
    }

    /// Filename-safe stable form, e.g. `4682B4-ciede2000-k5`.
    pub fn file_stem(&self) -> String {
        format!("{}-{}-k{}", self.hex, self.algorithm, self.k)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_stem())
    }
}
