// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Bitmark Account: Core Library
//!
//! Account identity for the Bitmark content-registration network: generate
//! a seed, write it down as words, get it back years later, and end up with
//! exactly the same keys and the same public account number.
//!
//! Nothing here talks to a network. This crate is the part of a wallet that
//! has to be right before anything else matters: if a recovery phrase decodes
//! to the wrong key, the user's assets are gone and no error was ever raised.
//!
//! ## Architecture
//!
//! - **encoding**: Base58 text and the network's 64-bit varint.
//! - **crypto**: Hashes, the V1/V2 key derivation functions, Ed25519 and
//!   X25519 key pairs. Thin wrappers over audited crates.
//! - **identity**: Seeds, recovery phrases, accounts, account numbers.
//! - **config**: Wire constants and the [`Network`] enum.
//! - **error**: One error enum for everything.
//! - **logging**: Optional `tracing` subscriber setup.
//!
//! ## Quick start
//!
//! ```
//! use bitmark_account::{Account, Language, Network};
//!
//! let account = Account::new(Network::Testnet)?;
//! let words = account.recovery_phrase(Language::English)?;
//!
//! let restored = Account::from_recovery_phrase(&words, Language::English, Network::Testnet)?;
//! assert_eq!(restored.account_number(), account.account_number());
//! # Ok::<(), bitmark_account::Error>(())
//! ```
//!
//! ## Design Philosophy
//!
//! 1. Both seed versions decode forever. V1 is frozen, quirks included.
//! 2. The network is always an argument. There is no global.
//! 3. Corrupt input and wrong-network input are different errors.
//! 4. Secrets are zeroized and never logged.

pub mod config;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod identity;
pub mod logging;

pub use config::Network;
pub use crypto::{AuthKeyPair, AuthPublicKey, AuthSignature, EncrKeyPair};
pub use error::{AccountError, AccountError as Error, Result};
pub use identity::{
    validate_account_number, verify, Account, AccountNumber, Language, PhraseFormat, SeedCore,
    SeedVersion,
};
