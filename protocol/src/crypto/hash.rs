//! # Hashing Utilities
//!
//! Two hash functions, two jobs, no overlap:
//!
//! - **SHA3-256**: the network's checksum hash. The first four bytes of
//!   `SHA3-256(payload)` are appended to every seed and account number.
//!   A checksum catches typos and truncation; it is not a signature.
//!
//! - **SHA-256**: used only for the seven check bits of the 13-word recovery
//!   phrase. It's a different hash from the seed checksum for historical
//!   reasons, and historical reasons are load-bearing once phrases are
//!   written down on paper.
//!
//! The V2 key-derivation XOF (SHAKE-256) lives in [`super::kdf`], next to the
//! only code that uses it.

use sha2::{Digest, Sha256};
use sha3::Sha3_256;

use crate::config::CHECKSUM_LENGTH;

/// Compute the SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Compute the SHA3-256 digest of `data`.
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    Sha3_256::digest(data).into()
}

/// The 4-byte checksum appended to seeds and account numbers.
pub fn checksum(data: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let digest = sha3_256(data);
    let mut out = [0u8; CHECKSUM_LENGTH];
    out.copy_from_slice(&digest[..CHECKSUM_LENGTH]);
    out
}

/// Split `data` into payload and trailing checksum and check one against the
/// other. Returns the payload on success, `None` on mismatch or if `data` is
/// too short to hold a checksum at all.
pub fn verify_checksum(data: &[u8]) -> Option<&[u8]> {
    if data.len() < CHECKSUM_LENGTH {
        return None;
    }
    let (payload, expected) = data.split_at(data.len() - CHECKSUM_LENGTH);
    if checksum(payload) == expected {
        Some(payload)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha3_256_known_vector() {
        // NIST SHA3-256 of the empty string. Not Keccak-256, which differs in
        // padding and would silently break every checksum.
        assert_eq!(
            hex::encode(sha3_256(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn test_checksum_is_sha3_prefix() {
        let digest = sha3_256(b"bitmark");
        assert_eq!(checksum(b"bitmark"), digest[..4]);
    }

    #[test]
    fn test_verify_checksum_roundtrip() {
        let mut data = b"payload".to_vec();
        data.extend_from_slice(&checksum(b"payload"));
        assert_eq!(verify_checksum(&data), Some(&b"payload"[..]));
    }

    #[test]
    fn test_verify_checksum_detects_flip() {
        let mut data = b"payload".to_vec();
        data.extend_from_slice(&checksum(b"payload"));
        data[0] ^= 0x01;
        assert_eq!(verify_checksum(&data), None);
    }

    #[test]
    fn test_verify_checksum_short_input() {
        assert_eq!(verify_checksum(&[1, 2, 3]), None);
    }
}
