//! Hex notation parsing and formatting.
//!
//! The engine accepts six-digit `RRGGBB` strings with an optional leading
//! `#`. Anything else (shorthand `RGB`, alpha channels, stray characters)
//! is rejected with [`Error::InvalidFormat`] before any computation runs.

use hue_core::{Error, Result, Rgb};

/// Parses a six-digit hex color, with or without a leading `#`.
///
/// # Example
///
/// ```rust
/// use hue_convert::hex::parse_hex;
///
/// let rgb = parse_hex("#4682B4").unwrap();
/// assert_eq!((rgb.r, rgb.g, rgb.b), (70, 130, 180));
///
/// assert!(parse_hex("4682B4").is_ok());
/// assert!(parse_hex("#46B").is_err());
/// assert!(parse_hex("4682BG").is_err());
/// ```
pub fn parse_hex(input: &str) -> Result<Rgb> {
    let digits = input.strip_prefix('#').unwrap_or(input);

    if digits.len() != 6 {
        return Err(Error::invalid_format(
            input,
            format!("expected 6 hex digits, got {}", digits.len()),
        ));
    }
    if !digits.is_ascii() {
        return Err(Error::invalid_format(input, "non-ASCII input"));
    }

    let channel = |range: std::ops::Range<usize>| -> Result<u8> {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| Error::invalid_format(input, "non-hex character"))
    };

    Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Formats an RGB value as uppercase hex with a leading `#`.
///
/// # Example
///
/// ```rust
/// use hue_convert::hex::format_hex;
/// use hue_core::Rgb;
///
/// assert_eq!(format_hex(Rgb::new(70, 130, 180)), "#4682B4");
/// ```
pub fn format_hex(rgb: Rgb) -> String {
    format!("#{}", rgb.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_hash() {
        assert_eq!(parse_hex("#FF0000").unwrap(), Rgb::new(255, 0, 0));
        assert_eq!(parse_hex("FF0000").unwrap(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_parse_lowercase() {
        assert_eq!(parse_hex("#4682b4").unwrap(), Rgb::new(70, 130, 180));
    }

    #[test]
    fn test_rejects_wrong_length() {
        for bad in ["", "#", "#FFF", "#FFFFF", "#FFFFFFF", "#FFFFFFFF"] {
            let err = parse_hex(bad).unwrap_err();
            assert!(err.is_validation_error(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_rejects_non_hex_characters() {
        for bad in ["#GGGGGG", "12345G", "#12 456", "##12345"] {
            assert!(parse_hex(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_rejects_non_ascii() {
        assert!(parse_hex("#46\u{00e9}2B4").is_err());
    }

    #[test]
    fn test_format_round_trip() {
        let rgb = Rgb::new(18, 52, 86);
        assert_eq!(parse_hex(&format_hex(rgb)).unwrap(), rgb);
    }
}
