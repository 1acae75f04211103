//! Recursive Length Prefix encoding.
//!
//! Only the encoding half is needed: strings, lists and unsigned integers
//! in their minimal big-endian form.

use alloy_primitives::U256;

/// Empty string, also the encoding of integer zero.
pub const EMPTY_STRING: u8 = 0x80;

const EMPTY_LIST: u8 = 0xc0;
const SHORT_LIMIT: usize = 55;

/// Encode a byte string.
pub fn encode_bytes(bytes: &[u8]) -> Vec<u8> {
    if bytes.len() == 1 && bytes[0] < EMPTY_STRING {
        return vec![bytes[0]];
    }

    let mut out = header(EMPTY_STRING, bytes.len());
    out.extend_from_slice(bytes);
    out
}

/// Encode a list of already-encoded items.
pub fn encode_list(items: &[Vec<u8>]) -> Vec<u8> {
    let payload_len = items.iter().map(Vec::len).sum();
    let mut out = header(EMPTY_LIST, payload_len);
    out.reserve(payload_len);
    for item in items {
        out.extend_from_slice(item);
    }
    out
}

/// Encode an integer as a minimal big-endian string.
pub fn encode_u64(value: u64) -> Vec<u8> {
    encode_bytes(trim_leading_zeros(&value.to_be_bytes()))
}

/// Encode a 256-bit integer as a minimal big-endian string.
pub fn encode_u256(value: U256) -> Vec<u8> {
    encode_bytes(trim_leading_zeros(&value.to_be_bytes::<32>()))
}

/// Strip leading zero bytes; all-zero input becomes empty.
pub fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first_nonzero = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[first_nonzero..]
}

fn header(offset: u8, len: usize) -> Vec<u8> {
    if len <= SHORT_LIMIT {
        // len fits in the short form, so the cast cannot truncate
        return vec![offset + len as u8];
    }

    let len_bytes = len.to_be_bytes();
    let len_bytes = trim_leading_zeros(&len_bytes);
    let mut out = Vec::with_capacity(1 + len_bytes.len() + len);
    out.push(offset + SHORT_LIMIT as u8 + len_bytes.len() as u8);
    out.extend_from_slice(len_bytes);
    out
}
