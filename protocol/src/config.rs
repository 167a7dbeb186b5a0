//! # Protocol Configuration & Constants
//!
//! Every magic number in the account layer lives here. If you're hardcoding a
//! header byte or a bit mask somewhere else, you're doing it wrong.
//!
//! These values are baked into every seed, recovery phrase and account number
//! that has ever been issued. Changing any of them silently produces a
//! *different* identity from the same backup, with no runtime error. Don't.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AccountError;

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// The network an account belongs to.
///
/// There is no process-wide "current network". Every decode and verify path
/// takes the expected network as an argument and rejects input minted for the
/// other one with [`AccountError::WrongNetwork`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// The production network.
    Livenet,
    /// The public test network.
    Testnet,
}

impl Network {
    /// Lowercase name, as used in configuration files and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Livenet => "livenet",
            Network::Testnet => "testnet",
        }
    }

    pub fn is_testnet(&self) -> bool {
        matches!(self, Network::Testnet)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = AccountError;

    /// Accepts `livenet`/`testnet` (case-insensitive). `mainnet` is tolerated
    /// as an alias because people will type it anyway.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "livenet" | "mainnet" => Ok(Network::Livenet),
            "testnet" => Ok(Network::Testnet),
            other => Err(AccountError::UnknownNetwork(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Seed wire format
// ---------------------------------------------------------------------------

/// Length of the version header at the front of every encoded seed.
pub const SEED_HEADER_LENGTH: usize = 3;

/// Header of a V1 (32-byte core, explicit network prefix) seed.
pub const SEED_HEADER_V1: [u8; SEED_HEADER_LENGTH] = [0x5a, 0xfe, 0x01];

/// Header of a V2 (17-byte core, network folded into the core bits) seed.
pub const SEED_HEADER_V2: [u8; SEED_HEADER_LENGTH] = [0x5a, 0xfe, 0x02];

/// V1 only: one byte of network prefix between the header and the core.
pub const SEED_PREFIX_LENGTH: usize = 1;

/// V1 network prefix values.
pub const SEED_PREFIX_LIVENET: u8 = 0x00;
pub const SEED_PREFIX_TESTNET: u8 = 0x01;

/// V1 core: 256 bits of entropy.
pub const SEED_CORE_V1_LENGTH: usize = 32;

/// V2 core: 128 random bits plus a 4-bit extension, padded to 17 bytes.
/// The low nibble of the last byte is reserved and always zero.
pub const SEED_CORE_V2_LENGTH: usize = 17;

/// Random bytes drawn by `Account::new` before extension to the V2 core.
pub const SEED_ENTROPY_LENGTH: usize = 16;

/// Truncated SHA3-256 checksum appended to seeds and account numbers.
pub const CHECKSUM_LENGTH: usize = 4;

/// Decoded V1 seed: header ∥ prefix ∥ core ∥ checksum.
pub const SEED_V1_LENGTH: usize =
    SEED_HEADER_LENGTH + SEED_PREFIX_LENGTH + SEED_CORE_V1_LENGTH + CHECKSUM_LENGTH;

/// Decoded V2 seed: header ∥ core ∥ checksum.
pub const SEED_V2_LENGTH: usize = SEED_HEADER_LENGTH + SEED_CORE_V2_LENGTH + CHECKSUM_LENGTH;

/// Reserved low nibble of the last V2 core byte.
pub const SEED_V2_RESERVED_MASK: u8 = 0x0F;

/// High nibble of V2 core byte 15 that carries the network mode.
pub const SEED_V2_MODE_MASK: u8 = 0xF0;

/// XOR applied to the mode nibble on testnet.
pub const SEED_V2_TESTNET_FLIP: u8 = 0xF0;

// ---------------------------------------------------------------------------
// Recovery phrases
// ---------------------------------------------------------------------------

/// Bits per dictionary index.
pub const BITS_PER_WORD: u32 = 11;

/// Words per dictionary. 2^11.
pub const DICTIONARY_SIZE: usize = 2048;

/// V1: network byte ∥ 32-byte core = 264 bits = 24 words.
pub const PHRASE_V1_WORDS: usize = 24;

/// V2 without checksum: 132 bits = 12 words.
pub const PHRASE_V2_WORDS: usize = 12;

/// V2 with 7 check bits: 143 bits = 13 words.
pub const PHRASE_V2_CHECKED_WORDS: usize = 13;

// ---------------------------------------------------------------------------
// Key derivation
// ---------------------------------------------------------------------------

/// Size of every derived private key seed, both Ed25519 and X25519.
pub const DERIVED_KEY_LENGTH: usize = 32;

/// Number of keys squeezed out of the V2 XOF: auth then encr.
pub const DERIVED_KEY_COUNT: usize = 2;

/// Number of times the V2 core is absorbed into the XOF state.
pub const SEED_V2_ABSORB_ROUNDS: usize = 4;

/// V1 derivation nonce. All zeros, used with exactly two fixed plaintexts.
pub const SEED_V1_NONCE: [u8; 24] = [0u8; 24];

/// V1 plaintext whose sealed output becomes the auth key seed (999).
pub const SEED_V1_AUTH_COUNTER: [u8; 16] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0xe7,
];

/// V1 plaintext whose sealed output becomes the encryption key seed (1000).
pub const SEED_V1_ENCR_COUNTER: [u8; 16] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0xe8,
];

// ---------------------------------------------------------------------------
// Account numbers
// ---------------------------------------------------------------------------

/// Algorithm id of Ed25519 in the key-variant byte.
pub const ALGORITHM_ED25519: u8 = 0x01;

/// Key-variant bit marking a public-key record.
pub const PUBKEY_MASK: u8 = 0x01;

/// Key-variant bit marking testnet.
pub const TESTNET_MASK: u8 = 0x01 << 1;

/// Shift of the algorithm id inside the key-variant byte.
pub const ALGORITHM_SHIFT: u8 = 4;

/// Ed25519 public key length.
pub const AUTH_PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length.
pub const SIGNATURE_LENGTH: usize = 64;

/// Decoded account number: variant ∥ public key ∥ checksum.
pub const ACCOUNT_NUMBER_LENGTH: usize = 1 + AUTH_PUBLIC_KEY_LENGTH + CHECKSUM_LENGTH;

// ---------------------------------------------------------------------------
// Varint
// ---------------------------------------------------------------------------

/// Maximum encoded length of a 64-bit varint. The ninth byte carries a full
/// eight bits, so no continuation flag is needed there.
pub const VARINT64_MAX_BYTES: usize = 9;
