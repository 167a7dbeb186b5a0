//! # Cryptographic Primitives
//!
//! Everything security-related in the account layer flows through here:
//!
//! - **Ed25519** for the auth key, which signs records and names the account.
//! - **X25519** for the encryption key, derived alongside.
//! - **SHA3-256** for seed and account-number checksums.
//! - **SHA-256** for the check bits of the 13-word phrase.
//! - **SHAKE-256** and **XSalsa20-Poly1305** as the V2 and V1 key-derivation
//!   functions respectively.
//!
//! Each one is a thin, type-safe wrapper around an audited implementation.
//! We don't roll our own.

pub mod hash;
pub mod kdf;
pub mod keys;
pub mod signatures;

pub use hash::{checksum, sha256, sha3_256};
pub use kdf::{derive_v1, derive_v2, DerivedKeys};
pub use keys::{AuthKeyPair, AuthPublicKey, AuthSignature, EncrKeyPair};
pub use signatures::{sign, verify};
