//! # Seeds
//!
//! The seed core is the entropy every key is derived from. Two versions
//! exist and both must keep decoding forever:
//!
//! ```text
//! V1: 5a fe 01 ∥ network(1) ∥ core(32) ∥ checksum(4)   = 40 bytes
//! V2: 5a fe 02 ∥ core(17)                ∥ checksum(4)   = 24 bytes
//! ```
//!
//! `checksum` is the first four bytes of SHA3-256 over everything before it;
//! the whole thing is base58 encoded.
//!
//! ## Where V2 keeps the network
//!
//! V2 has no network byte. Instead, bit 7 of byte 0, bit 6 of byte 1, bit 5
//! of byte 2 and bit 4 of byte 3 form a 4-bit *mode*, and the high nibble of
//! byte 15 repeats it: verbatim on livenet, inverted on testnet. Any other
//! relationship is a corrupt core. The low nibble of byte 16 is reserved and
//! must be zero.

use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroize;

use crate::config::{
    Network, SEED_CORE_V1_LENGTH, SEED_CORE_V2_LENGTH, SEED_ENTROPY_LENGTH,
    SEED_HEADER_LENGTH, SEED_HEADER_V1, SEED_HEADER_V2, SEED_PREFIX_LENGTH, SEED_PREFIX_LIVENET,
    SEED_PREFIX_TESTNET, SEED_V1_LENGTH, SEED_V2_LENGTH, SEED_V2_MODE_MASK,
    SEED_V2_RESERVED_MASK, SEED_V2_TESTNET_FLIP,
};
use crate::crypto::hash::{checksum, verify_checksum};
use crate::encoding::base58::{from_base58, to_base58};
use crate::error::{AccountError, Result};

// ---------------------------------------------------------------------------
// SeedVersion
// ---------------------------------------------------------------------------

/// Seed format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedVersion {
    /// 32-byte core, explicit network byte, 24-word phrase. Legacy.
    V1,
    /// 17-byte core, network folded into the core, 12 or 13-word phrase.
    V2,
}

impl SeedVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeedVersion::V1 => "v1",
            SeedVersion::V2 => "v2",
        }
    }
}

impl fmt::Display for SeedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SeedCore
// ---------------------------------------------------------------------------

/// Validated seed-core entropy together with the network it belongs to.
///
/// A `SeedCore` can only be built through constructors that check the
/// version's invariants, so anything holding one can derive keys without
/// re-validating. The entropy is wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub enum SeedCore {
    V1 {
        network: Network,
        entropy: [u8; SEED_CORE_V1_LENGTH],
    },
    V2 {
        network: Network,
        entropy: [u8; SEED_CORE_V2_LENGTH],
    },
}

impl SeedCore {
    /// Wrap a V1 core. Every 32-byte value is valid.
    pub fn v1(network: Network, entropy: [u8; SEED_CORE_V1_LENGTH]) -> Self {
        SeedCore::V1 { network, entropy }
    }

    /// Validate and wrap a V2 core, recovering its network from the mode bits.
    pub fn v2(entropy: [u8; SEED_CORE_V2_LENGTH]) -> Result<Self> {
        if entropy[SEED_CORE_V2_LENGTH - 1] & SEED_V2_RESERVED_MASK != 0 {
            return Err(AccountError::InvalidSeedCore("reserved bits are not zero"));
        }
        let network = network_from_v2_core(&entropy)?;
        Ok(SeedCore::V2 { network, entropy })
    }

    /// Like [`SeedCore::v2`], but from a slice of unchecked length.
    pub fn v2_from_slice(bytes: &[u8]) -> Result<Self> {
        let entropy: [u8; SEED_CORE_V2_LENGTH] =
            bytes.try_into().map_err(|_| AccountError::InvalidSeedLength {
                expected: SEED_CORE_V2_LENGTH,
                found: bytes.len(),
            })?;
        Self::v2(entropy)
    }

    /// Draw a fresh V2 core for `network` from a cryptographic RNG.
    ///
    /// Sixteen random bytes are extended to seventeen by copying the high
    /// nibble of byte 15 into byte 16 (reserved low nibble left zero). Byte
    /// 15's high nibble is then overwritten with the mode bits read from
    /// bytes 0..4, inverted for testnet.
    pub fn generate<R: RngCore + CryptoRng>(network: Network, rng: &mut R) -> Result<Self> {
        let mut entropy = [0u8; SEED_CORE_V2_LENGTH];
        rng.try_fill_bytes(&mut entropy[..SEED_ENTROPY_LENGTH])
            .map_err(|e| AccountError::EntropySourceFailure(e.to_string()))?;

        entropy[16] = entropy[15] & SEED_V2_MODE_MASK;

        let mut mode = v2_mode(&entropy);
        if network.is_testnet() {
            mode ^= SEED_V2_TESTNET_FLIP;
        }
        entropy[15] = mode | (entropy[15] & !SEED_V2_MODE_MASK);

        let core = Self::v2(entropy);
        entropy.zeroize();
        core
    }

    pub fn version(&self) -> SeedVersion {
        match self {
            SeedCore::V1 { .. } => SeedVersion::V1,
            SeedCore::V2 { .. } => SeedVersion::V2,
        }
    }

    pub fn network(&self) -> Network {
        match self {
            SeedCore::V1 { network, .. } | SeedCore::V2 { network, .. } => *network,
        }
    }

    /// The raw core bytes (32 for V1, 17 for V2). Secret.
    pub fn entropy(&self) -> &[u8] {
        match self {
            SeedCore::V1 { entropy, .. } => entropy,
            SeedCore::V2 { entropy, .. } => entropy,
        }
    }

    /// Fail with [`AccountError::WrongNetwork`] unless this core belongs to
    /// `expected`.
    pub fn ensure_network(&self, expected: Network) -> Result<()> {
        let found = self.network();
        if found != expected {
            tracing::debug!(%expected, %found, version = %self.version(), "seed rejected: wrong network");
            return Err(AccountError::WrongNetwork { expected, found });
        }
        Ok(())
    }
}

impl Drop for SeedCore {
    fn drop(&mut self) {
        match self {
            SeedCore::V1 { entropy, .. } => entropy.zeroize(),
            SeedCore::V2 { entropy, .. } => entropy.zeroize(),
        }
    }
}

impl fmt::Debug for SeedCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the entropy.
        write!(f, "SeedCore({}, {})", self.version(), self.network())
    }
}

/// The 4-bit network mode spread across bytes 0..4 of a V2 core, returned in
/// the high nibble.
fn v2_mode(core: &[u8; SEED_CORE_V2_LENGTH]) -> u8 {
    core[0] & 0x80 | core[1] & 0x40 | core[2] & 0x20 | core[3] & 0x10
}

/// Recover the network a V2 core was generated for.
pub fn network_from_v2_core(core: &[u8; SEED_CORE_V2_LENGTH]) -> Result<Network> {
    let mode = v2_mode(core);
    let stored = core[15] & SEED_V2_MODE_MASK;
    if mode == stored {
        Ok(Network::Livenet)
    } else if mode == stored ^ SEED_V2_TESTNET_FLIP {
        Ok(Network::Testnet)
    } else {
        Err(AccountError::InvalidSeedCore("network mode bits are inconsistent"))
    }
}

// ---------------------------------------------------------------------------
// SeedCodec
// ---------------------------------------------------------------------------

/// Encode a seed core as base58 seed text.
pub fn encode_seed(core: &SeedCore) -> String {
    let mut buf = Vec::with_capacity(SEED_V1_LENGTH);
    match core {
        SeedCore::V1 { network, entropy } => {
            buf.extend_from_slice(&SEED_HEADER_V1);
            buf.push(match network {
                Network::Livenet => SEED_PREFIX_LIVENET,
                Network::Testnet => SEED_PREFIX_TESTNET,
            });
            buf.extend_from_slice(entropy);
        }
        SeedCore::V2 { entropy, .. } => {
            buf.extend_from_slice(&SEED_HEADER_V2);
            buf.extend_from_slice(entropy);
        }
    }
    let sum = checksum(&buf);
    buf.extend_from_slice(&sum);
    let text = to_base58(&buf);
    buf.zeroize();
    text
}

/// Decode base58 seed text, rejecting it unless it belongs to `expected`.
///
/// Checks run in a fixed order and the first failure wins: base58, total
/// length, checksum, header, core validity, network.
pub fn decode_seed(text: &str, expected: Network) -> Result<SeedCore> {
    let mut raw = from_base58(text.trim())?;
    let core = decode_seed_bytes(&raw);
    raw.zeroize();
    let core = core?;
    core.ensure_network(expected)?;
    Ok(core)
}

fn decode_seed_bytes(raw: &[u8]) -> Result<SeedCore> {
    if raw.len() != SEED_V1_LENGTH && raw.len() != SEED_V2_LENGTH {
        return Err(AccountError::InvalidSeedLength {
            expected: SEED_V2_LENGTH,
            found: raw.len(),
        });
    }

    let payload = verify_checksum(raw).ok_or(AccountError::InvalidSeedChecksum)?;
    let (header, body) = payload.split_at(SEED_HEADER_LENGTH);

    if header == SEED_HEADER_V1 {
        if raw.len() != SEED_V1_LENGTH {
            return Err(AccountError::InvalidSeedLength {
                expected: SEED_V1_LENGTH,
                found: raw.len(),
            });
        }
        let (prefix, core) = body.split_at(SEED_PREFIX_LENGTH);
        let network = match prefix[0] {
            SEED_PREFIX_LIVENET => Network::Livenet,
            SEED_PREFIX_TESTNET => Network::Testnet,
            _ => return Err(AccountError::InvalidSeedCore("unknown network prefix")),
        };
        let mut entropy = [0u8; SEED_CORE_V1_LENGTH];
        entropy.copy_from_slice(core);
        let seed = SeedCore::v1(network, entropy);
        entropy.zeroize();
        Ok(seed)
    } else if header == SEED_HEADER_V2 {
        if raw.len() != SEED_V2_LENGTH {
            return Err(AccountError::InvalidSeedLength {
                expected: SEED_V2_LENGTH,
                found: raw.len(),
            });
        }
        SeedCore::v2_from_slice(body)
    } else {
        Err(AccountError::InvalidSeedHeader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    const TESTNET_V2_SEED: &str = "9J87CAsHdFdoEu6N1unZk3sqhVBkVL8Z8";
    const LIVENET_V2_SEED: &str = "9J87GaPq7FR9Uacdi3FUoWpP6LbEpo1Ax";
    const TESTNET_V1_SEED: &str = "5XEECt18HGBGNET1PpxLhy5CsCLG9jnmM6Q8QGF4U2yGb1DABXZsVeD";
    const LIVENET_V1_SEED: &str = "5XEECqWqA47qWg86DR5HJ29HhbVqwigHUAhgiBMqFSBycbiwnbY639s";

    #[test]
    fn test_known_seeds_roundtrip() {
        for (text, network, version) in [
            (TESTNET_V2_SEED, Network::Testnet, SeedVersion::V2),
            (LIVENET_V2_SEED, Network::Livenet, SeedVersion::V2),
            (TESTNET_V1_SEED, Network::Testnet, SeedVersion::V1),
            (LIVENET_V1_SEED, Network::Livenet, SeedVersion::V1),
        ] {
            let core = decode_seed(text, network).unwrap();
            assert_eq!(core.version(), version);
            assert_eq!(core.network(), network);
            assert_eq!(encode_seed(&core), text);
        }
    }

    #[test]
    fn test_wrong_network_is_policy_not_corruption() {
        assert_eq!(
            decode_seed(TESTNET_V2_SEED, Network::Livenet).unwrap_err(),
            AccountError::WrongNetwork {
                expected: Network::Livenet,
                found: Network::Testnet
            }
        );
        assert_eq!(
            decode_seed(LIVENET_V1_SEED, Network::Testnet).unwrap_err(),
            AccountError::WrongNetwork {
                expected: Network::Testnet,
                found: Network::Livenet
            }
        );
    }

    #[test]
    fn test_generated_core_carries_its_network() {
        for network in [Network::Livenet, Network::Testnet] {
            for _ in 0..32 {
                let core = SeedCore::generate(network, &mut OsRng).unwrap();
                assert_eq!(core.network(), network);
                assert_eq!(core.entropy()[16] & 0x0f, 0);
                let decoded = decode_seed(&encode_seed(&core), network).unwrap();
                assert_eq!(decoded, core);
            }
        }
    }

    #[test]
    fn test_mode_bits() {
        let mut core = [0u8; 17];
        core[0] = 0x80;
        core[3] = 0x10;
        // mode = 1001 0000; livenet stores it as-is.
        core[15] = 0x90;
        assert_eq!(network_from_v2_core(&core).unwrap(), Network::Livenet);
        core[15] = 0x60;
        assert_eq!(network_from_v2_core(&core).unwrap(), Network::Testnet);
        core[15] = 0x10;
        assert!(matches!(
            network_from_v2_core(&core),
            Err(AccountError::InvalidSeedCore(_))
        ));
    }

    #[test]
    fn test_reserved_nibble_rejected() {
        let mut core = [0u8; 17];
        core[16] = 0x01;
        assert_eq!(
            SeedCore::v2(core).unwrap_err(),
            AccountError::InvalidSeedCore("reserved bits are not zero")
        );
    }

    #[test]
    fn test_bad_checksum() {
        let mut raw = from_base58(TESTNET_V2_SEED).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        assert_eq!(
            decode_seed(&to_base58(&raw), Network::Testnet).unwrap_err(),
            AccountError::InvalidSeedChecksum
        );
    }

    #[test]
    fn test_every_single_bit_flip_is_caught() {
        let raw = from_base58(TESTNET_V2_SEED).unwrap();
        for byte in 0..raw.len() {
            for bit in 0..8 {
                let mut flipped = raw.clone();
                flipped[byte] ^= 1 << bit;
                let err = decode_seed(&to_base58(&flipped), Network::Testnet).unwrap_err();
                assert!(!err.is_wrong_network(), "byte {byte} bit {bit}: {err}");
            }
        }
    }

    #[test]
    fn test_unknown_header() {
        let mut raw = vec![0x5a, 0xfe, 0x03];
        raw.extend_from_slice(&[0u8; 17]);
        let sum = checksum(&raw);
        raw.extend_from_slice(&sum);
        assert_eq!(
            decode_seed(&to_base58(&raw), Network::Livenet).unwrap_err(),
            AccountError::InvalidSeedHeader
        );
    }

    #[test]
    fn test_header_length_mismatch() {
        // A V2 header on a V1-sized body.
        let mut raw = SEED_HEADER_V2.to_vec();
        raw.extend_from_slice(&[0u8; 33]);
        let sum = checksum(&raw);
        raw.extend_from_slice(&sum);
        assert!(matches!(
            decode_seed(&to_base58(&raw), Network::Livenet),
            Err(AccountError::InvalidSeedLength { .. })
        ));
    }

    #[test]
    fn test_bad_v1_prefix() {
        let mut raw = SEED_HEADER_V1.to_vec();
        raw.push(0x07);
        raw.extend_from_slice(&[1u8; 32]);
        let sum = checksum(&raw);
        raw.extend_from_slice(&sum);
        assert_eq!(
            decode_seed(&to_base58(&raw), Network::Livenet).unwrap_err(),
            AccountError::InvalidSeedCore("unknown network prefix")
        );
    }

    #[test]
    fn test_garbage_input() {
        assert_eq!(
            decode_seed("not base58 0OIl", Network::Livenet).unwrap_err(),
            AccountError::InvalidBase58
        );
        assert!(matches!(
            decode_seed("abc", Network::Livenet),
            Err(AccountError::InvalidSeedLength { .. })
        ));
    }

    #[test]
    fn test_debug_hides_entropy() {
        let core = SeedCore::v1(Network::Livenet, [0xab; 32]);
        let s = format!("{:?}", core);
        assert_eq!(s, "SeedCore(v1, livenet)");
    }
}
