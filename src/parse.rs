//! Textual hand source.
//!
//! A hand source is a list of hexadecimal 32-bit words separated by commas
//! and optional whitespace. Each word becomes one hand: its binary digits,
//! most significant first, without leading zeros.
//!
//! ```
//! use bool_ring::parse::parse_hands;
//!
//! let hands = parse_hands("A, 5,0").unwrap();
//! assert_eq!(hands[0].to_string(), "1010");
//! assert_eq!(hands[1].to_string(), "101");
//! assert_eq!(hands[2].to_string(), "0");
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::{Hand, HandParseError, Result};

/// Parse a comma-separated list of hexadecimal words into hands.
pub fn parse_hands(text: &str) -> Result<Vec<Hand>, HandParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(HandParseError::Empty);
    }

    text.split(',')
        .map(str::trim)
        .enumerate()
        .map(|(index, token)| {
            let digits = token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token);
            u32::from_str_radix(digits, 16)
                .map(Hand::from_bits)
                .map_err(|_| HandParseError::InvalidToken {
                    index,
                    token: token.to_string(),
                })
        })
        .collect()
}

/// Read and parse a hand source file.
pub fn read_hands(path: impl AsRef<Path>) -> Result<Vec<Hand>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let hands = parse_hands(&text)?;
    debug!(path = %path.display(), hands = hands.len(), "read hands");
    Ok(hands)
}
