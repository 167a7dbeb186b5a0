//! # Digital Signatures
//!
//! Ed25519 signing and verification for accounts.
//!
//! Signing is deterministic (RFC 8032): the same account signing the same
//! bytes produces the same signature every time. The bytes themselves are the
//! caller's problem. Whoever packs an issuance or transfer record into its
//! canonical form hands us the buffer, and we sign exactly that buffer.

use super::keys::{AuthKeyPair, AuthPublicKey, AuthSignature};
use crate::error::{AccountError, Result};

/// Sign a message with an auth key pair.
pub fn sign(keypair: &AuthKeyPair, message: &[u8]) -> AuthSignature {
    keypair.sign(message)
}

/// Verify a signature, mapping failure to [`AccountError::InvalidSignature`].
///
/// We don't distinguish "bad signature", "signature of the wrong length" and
/// "public key is not a curve point". All three mean the signature does not
/// prove what the caller wanted it to prove.
pub fn verify(public_key: &AuthPublicKey, message: &[u8], signature: &AuthSignature) -> Result<()> {
    if public_key.verify(message, signature) {
        Ok(())
    } else {
        Err(AccountError::InvalidSignature)
    }
}
