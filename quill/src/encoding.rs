//! Hex input helpers.

use crate::error::Result;

/// Drop one leading `0x` or `0X`, if present.
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode hex in either case, with or without a single `0x` prefix.
pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(strip_hex_prefix(s))?)
}
