//! # Account Numbers
//!
//! An account number is the public, shareable name of an account: its Ed25519
//! auth public key, tagged with the network and wrapped in a checksum.
//!
//! ```text
//! base58( variant(1) ∥ auth_public_key(32) ∥ checksum(4) )
//!
//! variant = algorithm << 4 | 0x01 (public key) | 0x02 (testnet)
//! ```
//!
//! For Ed25519 that makes the variant byte `0x11` on livenet and `0x13` on
//! testnet, which is why livenet numbers start with `a`/`b` and testnet ones
//! with `e`/`f` once base58 encoded.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::{
    Network, ACCOUNT_NUMBER_LENGTH, ALGORITHM_ED25519, ALGORITHM_SHIFT, CHECKSUM_LENGTH,
    PUBKEY_MASK, TESTNET_MASK,
};
use crate::crypto::hash::{checksum, verify_checksum};
use crate::crypto::keys::{AuthPublicKey, AuthSignature};
use crate::crypto::signatures;
use crate::encoding::base58::{from_base58, to_base58};
use crate::error::{AccountError, Result};

/// A decoded account number: which network, which key.
///
/// Serializes as its base58 text. Deserializing reads the network from the
/// variant byte, like [`FromStr`].
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AccountNumber {
    network: Network,
    public_key: AuthPublicKey,
}

impl AccountNumber {
    pub fn new(public_key: AuthPublicKey, network: Network) -> Self {
        Self {
            network,
            public_key,
        }
    }

    /// Decode account number text, rejecting it unless it belongs to
    /// `expected`.
    pub fn parse(text: &str, expected: Network) -> Result<Self> {
        let account_number = decode(text)?;
        if account_number.network != expected {
            tracing::debug!(%expected, found = %account_number.network, "account number rejected: wrong network");
            return Err(AccountError::WrongNetwork {
                expected,
                found: account_number.network,
            });
        }
        Ok(account_number)
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn public_key(&self) -> &AuthPublicKey {
        &self.public_key
    }

    /// The key-variant byte at the front of the encoded form.
    pub fn variant(&self) -> u8 {
        let mut variant = (ALGORITHM_ED25519 << ALGORITHM_SHIFT) | PUBKEY_MASK;
        if self.network.is_testnet() {
            variant |= TESTNET_MASK;
        }
        variant
    }

    /// Variant byte followed by the public key, without the checksum.
    pub fn key_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(ACCOUNT_NUMBER_LENGTH);
        buf.push(self.variant());
        buf.extend_from_slice(self.public_key.as_bytes());
        buf
    }

    /// The raw 37 bytes before base58.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = self.key_bytes();
        let sum = checksum(&buf);
        buf.extend_from_slice(&sum);
        buf
    }

    pub fn verify_signature(&self, message: &[u8], signature: &AuthSignature) -> Result<()> {
        signatures::verify(&self.public_key, message, signature)
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_base58(&self.to_bytes()))
    }
}

impl fmt::Debug for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountNumber({}, {})", self.network, self)
    }
}

impl FromStr for AccountNumber {
    type Err = AccountError;

    /// Parses without a network policy; the network is read from the variant
    /// byte. Use [`AccountNumber::parse`] where the network matters.
    fn from_str(s: &str) -> Result<Self> {
        decode(s)
    }
}

impl From<AccountNumber> for String {
    fn from(account_number: AccountNumber) -> Self {
        account_number.to_string()
    }
}

impl TryFrom<String> for AccountNumber {
    type Error = AccountError;

    fn try_from(text: String) -> Result<Self> {
        decode(&text)
    }
}

// Everything except the network policy check.
fn decode(text: &str) -> Result<AccountNumber> {
    let raw = from_base58(text.trim())
        .map_err(|_| AccountError::InvalidAccountNumberEncoding("not base58".into()))?;
    if raw.len() != ACCOUNT_NUMBER_LENGTH {
        return Err(AccountError::InvalidAccountNumberEncoding(format!(
            "expected {} bytes, got {}",
            ACCOUNT_NUMBER_LENGTH,
            raw.len()
        )));
    }

    let payload = verify_checksum(&raw).ok_or(AccountError::InvalidChecksum)?;
    debug_assert_eq!(payload.len(), ACCOUNT_NUMBER_LENGTH - CHECKSUM_LENGTH);

    let variant = payload[0];
    if variant & PUBKEY_MASK == 0 || variant >> ALGORITHM_SHIFT != ALGORITHM_ED25519 {
        return Err(AccountError::InvalidAccountNumberEncoding(format!(
            "unsupported key variant {variant:#04x}"
        )));
    }
    let network = if variant & TESTNET_MASK != 0 {
        Network::Testnet
    } else {
        Network::Livenet
    };

    Ok(AccountNumber {
        network,
        public_key: AuthPublicKey::try_from_slice(&payload[1..])?,
    })
}

/// Encode an auth public key as account number text for `network`.
pub fn encode_account_number(public_key: &AuthPublicKey, network: Network) -> String {
    AccountNumber::new(public_key.clone(), network).to_string()
}

/// Pull the auth public key out of account number text.
pub fn extract_auth_public_key(text: &str, expected: Network) -> Result<AuthPublicKey> {
    AccountNumber::parse(text, expected).map(|n| n.public_key)
}

/// Check that `text` is a well-formed account number for `expected`.
pub fn validate_account_number(text: &str, expected: Network) -> Result<()> {
    AccountNumber::parse(text, expected).map(|_| ())
}

/// Verify that `signature` over `message` was made by the owner of
/// `account_number`.
pub fn verify(
    account_number: &str,
    message: &[u8],
    signature: &AuthSignature,
    expected: Network,
) -> Result<()> {
    AccountNumber::parse(account_number, expected)?.verify_signature(message, signature)
}
