//! # Key Management
//!
//! The two key pairs every account owns:
//!
//! - [`AuthKeyPair`]: Ed25519. Signs records, and its public half is what
//!   the account number encodes.
//! - [`EncrKeyPair`]: X25519. Reserved for asset-access features; derived
//!   alongside the auth key so the same backup restores both.
//!
//! Neither type has a `generate()`. Keys in this crate only ever come out of
//! [`super::kdf`], because a key that can't be re-derived from the recovery
//! phrase is a key the user will eventually lose.
//!
//! ## Security considerations
//!
//! - Private keys are zeroized on drop (ed25519-dalek and x25519-dalek both
//!   do this for us).
//! - Key bytes are never logged. `Debug` prints the public half only.

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};

use crate::config::{
    ALGORITHM_ED25519, AUTH_PUBLIC_KEY_LENGTH, DERIVED_KEY_LENGTH, SIGNATURE_LENGTH,
};
use crate::error::{AccountError, Result};

// ---------------------------------------------------------------------------
// AuthKeyPair
// ---------------------------------------------------------------------------

/// An Ed25519 signing key pair derived from a seed core.
pub struct AuthKeyPair {
    signing_key: SigningKey,
}

impl AuthKeyPair {
    /// Build the key pair from a 32-byte derived seed. The seed is used
    /// directly as the Ed25519 secret key (RFC 8032 §5.1.5).
    pub fn from_seed(seed: &[u8; DERIVED_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Algorithm id written into the account number's key-variant byte.
    pub fn algorithm(&self) -> u8 {
        ALGORITHM_ED25519
    }

    pub fn public_key(&self) -> AuthPublicKey {
        AuthPublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// Sign a message. Ed25519 is deterministic: the same key and message
    /// always give the same 64 bytes.
    pub fn sign(&self, message: &[u8]) -> AuthSignature {
        AuthSignature {
            bytes: self.signing_key.sign(message).to_bytes().to_vec(),
        }
    }

    pub fn verify(&self, message: &[u8], signature: &AuthSignature) -> bool {
        self.public_key().verify(message, signature)
    }
}

impl fmt::Debug for AuthKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthKeyPair(pub={})", self.public_key().to_hex())
    }
}

// ---------------------------------------------------------------------------
// AuthPublicKey
// ---------------------------------------------------------------------------

/// The public half of an [`AuthKeyPair`]. This is what an account number
/// carries.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthPublicKey {
    bytes: [u8; AUTH_PUBLIC_KEY_LENGTH],
}

impl AuthPublicKey {
    pub fn from_bytes(bytes: [u8; AUTH_PUBLIC_KEY_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Build from a slice, checking only the length. Whether the bytes are a
    /// valid curve point is decided at verification time.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; AUTH_PUBLIC_KEY_LENGTH] = slice.try_into().map_err(|_| {
            AccountError::InvalidAccountNumberEncoding(format!(
                "public key must be {} bytes, got {}",
                AUTH_PUBLIC_KEY_LENGTH,
                slice.len()
            ))
        })?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; AUTH_PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    /// Verify a signature. Returns `false` for a bad signature, a signature
    /// of the wrong length, or public key bytes that are not a curve point.
    pub fn verify(&self, message: &[u8], signature: &AuthSignature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let Some(sig) = signature.to_dalek_signature() else {
            return false;
        };
        verifying_key.verify(message, &sig).is_ok()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for AuthPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for AuthPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthPublicKey({})", &self.to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// AuthSignature
// ---------------------------------------------------------------------------

/// An Ed25519 signature produced by an account.
///
/// Stored as `Vec<u8>` so signatures read off the wire can be wrapped without
/// a length check up front; anything that isn't 64 bytes simply fails to
/// verify.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSignature {
    bytes: Vec<u8>,
}

impl AuthSignature {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub(crate) fn to_dalek_signature(&self) -> Option<DalekSignature> {
        let arr: [u8; SIGNATURE_LENGTH] = self.bytes.as_slice().try_into().ok()?;
        Some(DalekSignature::from_bytes(&arr))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Parse a hex-encoded signature, as returned by the network's API.
    pub fn from_hex(s: &str) -> std::result::Result<Self, hex::FromHexError> {
        Ok(Self {
            bytes: hex::decode(s)?,
        })
    }
}

impl fmt::Display for AuthSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for AuthSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        if hex_str.len() >= 128 {
            write!(f, "AuthSignature({}...{})", &hex_str[..8], &hex_str[120..])
        } else {
            write!(f, "AuthSignature({})", hex_str)
        }
    }
}

// ---------------------------------------------------------------------------
// EncrKeyPair
// ---------------------------------------------------------------------------

/// An X25519 key pair derived from a seed core.
pub struct EncrKeyPair {
    secret: StaticSecret,
    public: X25519PublicKey,
}

impl EncrKeyPair {
    /// Build the key pair from a 32-byte derived seed. The bytes become the
    /// X25519 scalar as-is; clamping happens inside the scalar multiplication.
    pub fn from_seed(seed: &[u8; DERIVED_KEY_LENGTH]) -> Self {
        let secret = StaticSecret::from(*seed);
        let public = X25519PublicKey::from(&secret);
        Self { secret, public }
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.public.to_bytes()
    }

    /// Diffie-Hellman with a peer's public key.
    pub fn shared_secret(&self, peer_public: &[u8; 32]) -> [u8; 32] {
        let peer = X25519PublicKey::from(*peer_public);
        self.secret.diffie_hellman(&peer).to_bytes()
    }
}

impl fmt::Debug for EncrKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncrKeyPair(pub={})", hex::encode(self.public.as_bytes()))
    }
}
