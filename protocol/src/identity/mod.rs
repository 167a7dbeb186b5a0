//! # Identity Module
//!
//! Account identity for the Bitmark network. Every account is one seed core,
//! and the seed core can be carried around in three interchangeable forms:
//!
//! 1. **Seed**: base58 text with a version header and checksum. Secret.
//! 2. **Recovery phrase**: the same core as 12, 13 or 24 dictionary words,
//!    English or Traditional Chinese. Secret, and meant for paper.
//! 3. **Account number**: base58 of the derived Ed25519 public key. Public.
//!    This is what users share and paste into transfer fields.
//!
//! The layers stack bottom-up:
//!
//! - [`dictionary`] and [`bitpack`] turn bytes into words and back.
//! - [`seed`] and [`phrase`] are the two codecs for secret backups.
//! - [`account`] derives keys from a core.
//! - [`account_number`] names and verifies an account from its public key.
//!
//! ## Networks
//!
//! Livenet and testnet accounts are never interchangeable. Every decoder
//! takes the network the caller is on and fails with
//! [`crate::AccountError::WrongNetwork`] for input minted on the other one,
//! even when that input is otherwise perfectly valid.

pub mod account;
pub mod account_number;
pub mod bitpack;
pub mod dictionary;
pub mod phrase;
pub mod seed;

pub use account::Account;
pub use account_number::{
    encode_account_number, extract_auth_public_key, validate_account_number, verify,
    AccountNumber,
};
pub use dictionary::{Language, WordDictionary};
pub use phrase::{decode_phrase, encode_phrase, PhraseFormat};
pub use seed::{decode_seed, encode_seed, SeedCore, SeedVersion};
