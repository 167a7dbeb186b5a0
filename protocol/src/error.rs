//! Error types for the account layer.
//!
//! Every fallible operation returns an [`AccountError`]. Decoders fail fast on
//! the first problem they find; there is no partial or "best effort" decode,
//! because a silently wrong key derivation is a security bug.
//!
//! Corruption errors (bad checksum, bad word, bad length) and policy errors
//! ([`AccountError::WrongNetwork`]) are always distinct variants. The fix for
//! the first is "re-type the phrase"; the fix for the second is "switch
//! network", and users deserve to be told which one applies.

use thiserror::Error;

use crate::config::Network;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AccountError>;

/// Errors that can occur while encoding, decoding or deriving accounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// A decoded seed (or a seed core handed to key derivation) has the wrong
    /// number of bytes.
    #[error("invalid seed length: expected {expected} bytes, got {found}")]
    InvalidSeedLength {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes.
        found: usize,
    },

    /// The 3-byte seed header matches neither known version.
    #[error("invalid seed header")]
    InvalidSeedHeader,

    /// The trailing 4 checksum bytes of a seed do not match its content.
    #[error("invalid seed checksum")]
    InvalidSeedChecksum,

    /// The seed core is structurally invalid: reserved bits set, network
    /// mode bits inconsistent, or an unknown V1 network prefix.
    #[error("invalid seed core: {0}")]
    InvalidSeedCore(&'static str),

    /// The phrase has an unsupported length or fails its check bits.
    #[error("invalid recovery phrase: {0}")]
    InvalidRecoveryPhrase(String),

    /// A phrase word is not in the selected dictionary.
    #[error("invalid word: {0:?}")]
    InvalidWord(String),

    /// A phrase format was requested that cannot carry this seed version.
    #[error("phrase format of {words} words cannot encode a {version} seed")]
    IncompatiblePhraseFormat {
        /// Word count of the requested format.
        words: usize,
        /// Seed version being encoded.
        version: &'static str,
    },

    /// The input is not valid base58 text.
    #[error("invalid base58 string")]
    InvalidBase58,

    /// An account number is not valid base58 or has the wrong length.
    #[error("invalid account number encoding: {0}")]
    InvalidAccountNumberEncoding(String),

    /// The trailing 4 checksum bytes of an account number do not match.
    #[error("invalid checksum")]
    InvalidChecksum,

    /// Well-formed input that belongs to the other network.
    #[error("wrong network: expected {expected}, found {found}")]
    WrongNetwork {
        /// The network the caller is operating on.
        expected: Network,
        /// The network the input was minted for.
        found: Network,
    },

    /// No dictionary exists for the requested language.
    #[error("language not supported: {0}")]
    LanguageNotSupported(String),

    /// A network name could not be parsed.
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    /// Signature verification failed.
    #[error("invalid signature")]
    InvalidSignature,

    /// The OS random number generator could not supply entropy.
    #[error("entropy source failure: {0}")]
    EntropySourceFailure(String),

    /// A varint is truncated or empty.
    #[error("invalid varint")]
    InvalidVarint,
}

impl AccountError {
    /// `true` for the network policy rejection, `false` for every form of
    /// malformed or corrupted input.
    pub fn is_wrong_network(&self) -> bool {
        matches!(self, AccountError::WrongNetwork { .. })
    }
}
