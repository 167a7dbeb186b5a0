//! # Key Derivation
//!
//! Turns seed-core entropy into an [`AuthKeyPair`] and an [`EncrKeyPair`].
//! No randomness enters here: the whole point is that a recovery phrase
//! written down years ago reproduces exactly the same keys today.
//!
//! ## V1: sealed counters
//!
//! ```text
//! auth_seed = secretbox_seal(key = core, nonce = 0^24, msg = 0…03e7)   // 16 + 16 bytes
//! encr_seed = secretbox_seal(key = core, nonce = 0^24, msg = 0…03e8)
//! ```
//!
//! The XSalsa20-Poly1305 output (`tag ∥ ciphertext`) is never opened again;
//! it is used purely as 32 bytes of pseudorandom output per branch. It is an
//! odd KDF, but every V1 account in existence depends on it, so it stays
//! bit-for-bit.
//!
//! ## V2: SHAKE-256
//!
//! ```text
//! xof = SHAKE-256(core ∥ core ∥ core ∥ core)
//! auth_seed = xof[0..32], encr_seed = xof[32..64]
//! ```
//!
//! Four writes of the same 17 bytes into one sponge, then one squeeze.

use crypto_secretbox::aead::generic_array::GenericArray;
use crypto_secretbox::aead::{AeadInPlace, KeyInit};
use crypto_secretbox::XSalsa20Poly1305;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;
use zeroize::Zeroizing;

use super::keys::{AuthKeyPair, EncrKeyPair};
use crate::config::{
    DERIVED_KEY_COUNT, DERIVED_KEY_LENGTH, SEED_CORE_V1_LENGTH, SEED_CORE_V2_LENGTH,
    SEED_V1_AUTH_COUNTER, SEED_V1_ENCR_COUNTER, SEED_V1_NONCE, SEED_V2_ABSORB_ROUNDS,
    SEED_V2_RESERVED_MASK,
};
use crate::error::{AccountError, Result};

/// The key pairs derived from one seed core.
#[derive(Debug)]
pub struct DerivedKeys {
    pub auth: AuthKeyPair,
    pub encr: EncrKeyPair,
}

/// Derive both key pairs from a 32-byte V1 core.
pub fn derive_v1(core: &[u8; SEED_CORE_V1_LENGTH]) -> Result<DerivedKeys> {
    let auth_seed = seal_counter(core, &SEED_V1_AUTH_COUNTER)?;
    let encr_seed = seal_counter(core, &SEED_V1_ENCR_COUNTER)?;
    Ok(DerivedKeys {
        auth: AuthKeyPair::from_seed(&auth_seed),
        encr: EncrKeyPair::from_seed(&encr_seed),
    })
}

/// Derive both key pairs from a 17-byte V2 core.
pub fn derive_v2(core: &[u8]) -> Result<DerivedKeys> {
    let seeds = expand_v2(core, DERIVED_KEY_COUNT)?;
    Ok(DerivedKeys {
        auth: AuthKeyPair::from_seed(&seeds[0]),
        encr: EncrKeyPair::from_seed(&seeds[1]),
    })
}

/// Squeeze `key_count` 32-byte key seeds out of a V2 core.
///
/// The core is validated before anything is hashed: it must be exactly 17
/// bytes with the reserved low nibble of the last byte clear.
pub fn expand_v2(
    core: &[u8],
    key_count: usize,
) -> Result<Zeroizing<Vec<[u8; DERIVED_KEY_LENGTH]>>> {
    if core.len() != SEED_CORE_V2_LENGTH {
        return Err(AccountError::InvalidSeedLength {
            expected: SEED_CORE_V2_LENGTH,
            found: core.len(),
        });
    }
    if core[SEED_CORE_V2_LENGTH - 1] & SEED_V2_RESERVED_MASK != 0 {
        return Err(AccountError::InvalidSeedCore("reserved bits are not zero"));
    }

    let mut hasher = Shake256::default();
    for _ in 0..SEED_V2_ABSORB_ROUNDS {
        hasher.update(core);
    }
    let mut reader = hasher.finalize_xof();

    let mut keys = Zeroizing::new(vec![[0u8; DERIVED_KEY_LENGTH]; key_count]);
    for key in keys.iter_mut() {
        reader.read(key);
    }
    Ok(keys)
}

fn seal_counter(
    core: &[u8; SEED_CORE_V1_LENGTH],
    counter: &[u8; 16],
) -> Result<Zeroizing<[u8; DERIVED_KEY_LENGTH]>> {
    let cipher = XSalsa20Poly1305::new(GenericArray::from_slice(core));
    let mut ciphertext = *counter;
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(&SEED_V1_NONCE), b"", &mut ciphertext)
        .map_err(|_| AccountError::InvalidSeedCore("secretbox seal failed"))?;

    // NaCl layout: the 16-byte tag precedes the ciphertext.
    let mut out = Zeroizing::new([0u8; DERIVED_KEY_LENGTH]);
    out[..16].copy_from_slice(tag.as_slice());
    out[16..].copy_from_slice(&ciphertext);
    Ok(out)
}
