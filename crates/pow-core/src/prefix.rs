//! Mining message prefix construction.

use crate::codec::{hex_to_bytes_lenient, u64_to_le};
use crate::name::string_to_name;

/// Length of the fixed message prefix in bytes.
pub const PREFIX_LEN: usize = 16;

/// Length of the full mining message (prefix + nonce).
pub const MESSAGE_LEN: usize = PREFIX_LEN + 8;

/// The 16 bytes shared by every candidate in a run.
///
/// Layout: `account (u64 LE) || first 8 bytes of the reference tx hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefix([u8; PREFIX_LEN]);

impl Prefix {
    /// Build the prefix from an encoded account and a reference tx hash.
    ///
    /// The reference hash is decoded leniently: anything past 16 hex
    /// characters is ignored and a short or malformed hash zero-pads.
    pub fn build(account: u64, reference_hash: &str) -> Self {
        let mut bytes = [0u8; PREFIX_LEN];
        bytes[..8].copy_from_slice(&u64_to_le(account));
        bytes[8..].copy_from_slice(&hex_to_bytes_lenient::<8>(reference_hash));
        Prefix(bytes)
    }

    /// Build the prefix straight from the request strings.
    pub fn from_request(account: &str, reference_hash: &str) -> Self {
        Self::build(string_to_name(account), reference_hash)
    }

    /// Wrap already-assembled prefix bytes.
    pub fn from_bytes(bytes: [u8; PREFIX_LEN]) -> Self {
        Prefix(bytes)
    }

    /// Raw prefix bytes.
    pub fn as_bytes(&self) -> &[u8; PREFIX_LEN] {
        &self.0
    }

    /// Full 24-byte message for a given nonce.
    pub fn message(&self, nonce: u64) -> [u8; MESSAGE_LEN] {
        let mut message = [0u8; MESSAGE_LEN];
        message[..PREFIX_LEN].copy_from_slice(&self.0);
        message[PREFIX_LEN..].copy_from_slice(&u64_to_le(nonce));
        message
    }
}
