//! Hex byte-string parsing for command-line and golden inputs.

use crate::{Error, Result};

/// Parse a hex byte string such as `"1f2003d5"`.
///
/// Whitespace and `_` separators are ignored. Bytes are taken in order, so
/// the string is the little-endian memory image of the instructions.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let digits: Vec<char> = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect();
    if digits.len() % 2 != 0 {
        return Err(Error::InvalidHex(format!(
            "odd number of digits in {text:?}"
        )));
    }
    digits
        .chunks_exact(2)
        .map(|pair| {
            let hi = pair[0].to_digit(16);
            let lo = pair[1].to_digit(16);
            match (hi, lo) {
                (Some(hi), Some(lo)) => Ok(((hi << 4) | lo) as u8),
                _ => Err(Error::InvalidHex(format!(
                    "non-hex digit in {text:?}: {}{}",
                    pair[0], pair[1]
                ))),
            }
        })
        .collect()
}

/// Render bytes as a lowercase hex string.
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("1f2003d5").unwrap(), [0x1f, 0x20, 0x03, 0xd5]);
        assert_eq!(
            parse_hex("c0 03 5f d6").unwrap(),
            [0xc0, 0x03, 0x5f, 0xd6]
        );
        assert_eq!(parse_hex("C0_03").unwrap(), [0xc0, 0x03]);
        assert!(parse_hex("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_hex_errors() {
        assert!(matches!(parse_hex("abc"), Err(Error::InvalidHex(_))));
        assert!(matches!(parse_hex("zz00"), Err(Error::InvalidHex(_))));
        assert!(matches!(parse_hex("0x1f"), Err(Error::InvalidHex(_))));
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(&[0x01, 0x00, 0x00, 0xd4]), "010000d4");
        assert_eq!(to_hex(&[]), "");
    }
}
