//! # Encoding Leaves
//!
//! The two byte-level codecs the rest of the crate stands on:
//!
//! - **base58**: Bitcoin-alphabet text encoding for seeds and account
//!   numbers. A thin wrapper over `bs58` so every caller maps decode failures
//!   onto the same error.
//! - **varint**: the network's unsigned 64-bit varint, used by whatever packs
//!   records into the canonical bytes an account signs.

pub mod base58;
pub mod varint;

pub use base58::{from_base58, to_base58};
pub use varint::{from_varint64, to_varint64};
