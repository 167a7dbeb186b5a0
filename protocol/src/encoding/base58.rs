//! Base58 (Bitcoin alphabet) text encoding.

use crate::error::{AccountError, Result};

/// Encode bytes as base58 text.
pub fn to_base58(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Decode base58 text.
///
/// Empty input decodes to nothing, which is never a valid seed or account
/// number, so it is rejected here rather than by every caller.
pub fn from_base58(text: &str) -> Result<Vec<u8>> {
    let bytes = bs58::decode(text)
        .into_vec()
        .map_err(|_| AccountError::InvalidBase58)?;
    if bytes.is_empty() {
        return Err(AccountError::InvalidBase58);
    }
    Ok(bytes)
}
