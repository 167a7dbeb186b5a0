//! # Accounts
//!
//! An [`Account`] is a seed core plus everything derived from it. Build one
//! from fresh entropy, from seed text, or from a recovery phrase; all three
//! paths end in the same place, and the same core always yields the same
//! keys and the same account number.
//!
//! Accounts are immutable. There is no way to swap keys or change network on
//! an existing value; restore a new one instead.

use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};
use std::fmt;

use super::account_number::AccountNumber;
use super::dictionary::Language;
use super::phrase::{decode_phrase, encode_phrase, split_phrase, PhraseFormat};
use super::seed::{decode_seed, encode_seed, SeedCore, SeedVersion};
use crate::config::Network;
use crate::crypto::kdf::{derive_v1, derive_v2, DerivedKeys};
use crate::crypto::keys::{AuthKeyPair, AuthPublicKey, AuthSignature, EncrKeyPair};
use crate::error::Result;

/// A Bitmark account: network, seed core and both derived key pairs.
pub struct Account {
    core: SeedCore,
    auth_key: AuthKeyPair,
    encr_key: EncrKeyPair,
}

impl Account {
    /// Create a brand-new V2 account for `network` using the OS RNG.
    pub fn new(network: Network) -> Result<Self> {
        Self::new_with_rng(network, &mut OsRng)
    }

    /// Create a brand-new V2 account drawing entropy from `rng`.
    pub fn new_with_rng<R: RngCore + CryptoRng>(network: Network, rng: &mut R) -> Result<Self> {
        let core = SeedCore::generate(network, rng)?;
        let account = Self::from_seed_core(core)?;
        tracing::info!(
            network = %account.network(),
            account_number = %account.account_number(),
            "new account created"
        );
        Ok(account)
    }

    /// Restore from base58 seed text (V1 or V2).
    pub fn from_seed(seed: &str, network: Network) -> Result<Self> {
        Self::from_seed_core(decode_seed(seed, network)?)
    }

    /// Restore from recovery phrase words. The word count selects the
    /// phrase format.
    pub fn from_recovery_phrase<S: AsRef<str>>(
        words: &[S],
        language: Language,
        network: Network,
    ) -> Result<Self> {
        Self::from_seed_core(decode_phrase(words, language, network)?)
    }

    /// Restore from a phrase written as one whitespace-separated string.
    pub fn from_recovery_phrase_str(
        phrase: &str,
        language: Language,
        network: Network,
    ) -> Result<Self> {
        Self::from_recovery_phrase(&split_phrase(phrase), language, network)
    }

    /// Derive keys for an already-validated core.
    pub fn from_seed_core(core: SeedCore) -> Result<Self> {
        let DerivedKeys { auth, encr } = match &core {
            SeedCore::V1 { entropy, .. } => derive_v1(entropy)?,
            SeedCore::V2 { entropy, .. } => derive_v2(entropy)?,
        };
        tracing::debug!(version = %core.version(), network = %core.network(), "account keys derived");
        Ok(Self {
            core,
            auth_key: auth,
            encr_key: encr,
        })
    }

    pub fn version(&self) -> SeedVersion {
        self.core.version()
    }

    pub fn network(&self) -> Network {
        self.core.network()
    }

    /// The base58 seed text. Secret: anyone holding it owns the account.
    pub fn seed(&self) -> String {
        encode_seed(&self.core)
    }

    /// Key-variant byte followed by the auth public key: the account number
    /// without its checksum or base58.
    pub fn bytes(&self) -> Vec<u8> {
        self.account_number().key_bytes()
    }

    /// The validated seed core. Secret.
    pub fn seed_core(&self) -> &SeedCore {
        &self.core
    }

    /// The recovery phrase in its default shape: 24 words for V1, 13 for V2.
    pub fn recovery_phrase(&self, language: Language) -> Result<Vec<String>> {
        self.recovery_phrase_with(PhraseFormat::default_for(self.version()), language)
    }

    /// The recovery phrase in a specific shape. V2 accounts can also be
    /// written as 12 words.
    pub fn recovery_phrase_with(
        &self,
        format: PhraseFormat,
        language: Language,
    ) -> Result<Vec<String>> {
        encode_phrase(&self.core, format, language)
    }

    pub fn account_number(&self) -> AccountNumber {
        AccountNumber::new(self.auth_key.public_key(), self.network())
    }

    pub fn auth_key(&self) -> &AuthKeyPair {
        &self.auth_key
    }

    pub fn auth_public_key(&self) -> AuthPublicKey {
        self.auth_key.public_key()
    }

    pub fn encr_key(&self) -> &EncrKeyPair {
        &self.encr_key
    }

    pub fn encr_public_key(&self) -> [u8; 32] {
        self.encr_key.public_key_bytes()
    }

    /// Sign a message with the auth key.
    pub fn sign(&self, message: &[u8]) -> AuthSignature {
        self.auth_key.sign(message)
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("version", &self.version().as_str())
            .field("network", &self.network().as_str())
            .field("account_number", &self.account_number().to_string())
            .finish()
    }
}
