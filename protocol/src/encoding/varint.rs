//! Unsigned 64-bit varint.
//!
//! Seven bits per byte, least-significant group first, high bit set on every
//! byte except the last. The encoding is capped at nine bytes: the ninth byte
//! has no continuation flag and carries a full eight bits, which is exactly
//! enough for the top of a `u64` (8 × 7 + 8 = 64).

use crate::config::VARINT64_MAX_BYTES;
use crate::error::{AccountError, Result};

/// Encode `value` as a varint of 1 to 9 bytes.
pub fn to_varint64(mut value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(VARINT64_MAX_BYTES);
    for i in 0..VARINT64_MAX_BYTES {
        if i == VARINT64_MAX_BYTES - 1 || value < 0x80 {
            out.push(value as u8);
            break;
        }
        out.push((value as u8) | 0x80);
        value >>= 7;
    }
    out
}

/// Decode a varint from the front of `buffer`.
///
/// Returns the value and the number of bytes consumed. A buffer that ends
/// mid-varint is an error.
pub fn from_varint64(buffer: &[u8]) -> Result<(u64, usize)> {
    let mut value = 0u64;
    for (i, &b) in buffer.iter().take(VARINT64_MAX_BYTES).enumerate() {
        if i == VARINT64_MAX_BYTES - 1 {
            value |= u64::from(b) << 56;
            return Ok((value, VARINT64_MAX_BYTES));
        }
        value |= u64::from(b & 0x7f) << (7 * i);
        if b & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(AccountError::InvalidVarint)
}
