//! 11-bit group packing.
//!
//! Every phrase format is the same trick: treat the payload as one long
//! big-endian bit string and cut it into 11-bit dictionary indices, or glue
//! indices back into bytes. What differs between formats is only what happens
//! to the handful of bits left over at the end, so both directions hand that
//! remainder back to the caller instead of guessing.

use crate::config::BITS_PER_WORD;

/// `MASKS[n] == (1 << n) - 1` for every residual bit count the packer can
/// hold between steps.
const MASKS: [u32; 11] = [0, 1, 3, 7, 15, 31, 63, 127, 255, 511, 1023];

/// Bits left in the accumulator after the last full group was emitted.
/// `value` is right-aligned and has exactly `bits` significant bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remainder {
    pub value: u32,
    pub bits: u32,
}

/// Glue 11-bit indices into bytes, most significant bit first.
///
/// Any bits that don't fill a final byte come back in the [`Remainder`].
pub fn pack(indices: &[u16]) -> (Vec<u8>, Remainder) {
    let mut bytes = Vec::with_capacity(indices.len() * BITS_PER_WORD as usize / 8 + 1);
    let mut accumulator: u32 = 0;
    let mut bits: u32 = 0;

    for &index in indices {
        accumulator = (accumulator << BITS_PER_WORD) | (u32::from(index) & 0x7ff);
        bits += BITS_PER_WORD;
        while bits >= 8 {
            bytes.push(((accumulator >> (bits - 8)) & 0xff) as u8);
            bits -= 8;
        }
        accumulator &= MASKS[bits as usize];
    }

    (
        bytes,
        Remainder {
            value: accumulator,
            bits,
        },
    )
}

/// Cut bytes into 11-bit indices, most significant bit first.
///
/// Any bits that don't fill a final index come back in the [`Remainder`].
pub fn unpack(bytes: &[u8]) -> (Vec<u16>, Remainder) {
    let mut indices = Vec::with_capacity(bytes.len() * 8 / BITS_PER_WORD as usize);
    let mut accumulator: u32 = 0;
    let mut bits: u32 = 0;

    for &byte in bytes {
        accumulator = (accumulator << 8) | u32::from(byte);
        bits += 8;
        if bits >= BITS_PER_WORD {
            bits -= BITS_PER_WORD;
            indices.push((accumulator >> bits) as u16);
            accumulator &= MASKS[bits as usize];
        }
    }

    (
        indices,
        Remainder {
            value: accumulator,
            bits,
        },
    )
}
