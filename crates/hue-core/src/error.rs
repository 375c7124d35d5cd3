//! Error types shared across the huelab engine.
//!
//! The [`Error`] enum covers the failure modes of the engine boundary:
//!
//! - Input validation (malformed hex/RGB/HSL) - rejected before any
//!   computation
//! - Spatial index misuse (querying an empty index) - fail fast
//! - Persistent cache tier I/O - absorbed by the cache with degradation,
//!   surfaced here only for callers that manage tiers directly
//!
//! Degraded-mode conditions (acceleration unavailable, persistent tier
//! unreachable) are deliberately *not* errors at the engine boundary;
//! they are logged and absorbed internally.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the huelab engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed color input.
    ///
    /// Returned when a hex string has the wrong length or contains
    /// non-hex characters, or when HSL components are out of range.
    /// Validation happens at the boundary, before any computation.
    #[error("invalid color format: {input:?} ({reason})")]
    InvalidFormat {
        /// The rejected input, as received.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The spatial index was queried before it contained any entries.
    ///
    /// This is a programming error in the caller, not a recoverable
    /// runtime condition: the reference database must be loaded before
    /// queries are issued.
    #[error("spatial index is empty: build it from a non-empty reference set first")]
    EmptyIndex,

    /// `k_nearest` was called with `k == 0`.
    #[error("k must be at least 1, got {k}")]
    InvalidK {
        /// The rejected neighbor count.
        k: usize,
    },

    /// Persistent cache tier I/O failed.
    ///
    /// The cache absorbs this internally and degrades to memory-only
    /// operation; it is surfaced only through APIs that manipulate the
    /// persistent tier directly.
    #[error("persistent cache tier unavailable: {0}")]
    CacheTier(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with custom message.
    ///
    /// Catch-all for failures that don't fit other categories, such as
    /// worker pool construction. Prefer specific variants when possible.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates an [`Error::InvalidFormat`] error.
    #[inline]
    pub fn invalid_format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::CacheTier`] error.
    #[inline]
    pub fn cache_tier(msg: impl Into<String>) -> Self {
        Self::CacheTier(msg.into())
    }

    /// Returns `true` if this is an input validation error.
    #[inline]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::InvalidFormat { .. } | Self::InvalidK { .. })
    }

    /// Returns `true` if this error indicates programming-level misuse.
    #[inline]
    pub fn is_misuse(&self) -> bool {
        matches!(self, Self::EmptyIndex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_format_message() {
        let err = Error::invalid_format("#12345", "expected 6 hex digits");
        let msg = err.to_string();
        assert!(msg.contains("#12345"));
        assert!(msg.contains("6 hex digits"));
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_empty_index_is_misuse() {
        assert!(Error::EmptyIndex.is_misuse());
        assert!(!Error::EmptyIndex.is_validation_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("missing"));
    }
}
