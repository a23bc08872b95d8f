//! Check a reported nonce against a request.

use crate::codec::le_to_u64;
use crate::difficulty::Difficulty;
use crate::error::NonceHexError;
use crate::hash::{full_hash, Digest32};
use crate::prefix::Prefix;

/// Outcome of checking a single nonce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedNonce {
    /// The nonce value decoded from its wire form.
    pub nonce: u64,
    /// Digest of the full message, computed without the cached state.
    pub digest: Digest32,
    /// Whether the digest satisfies the difficulty.
    pub valid: bool,
}

/// Parse a wire-format nonce (16 hex chars, little-endian bytes).
///
/// Unlike the reference hash, this is strict: anything other than exactly
/// 8 bytes of hex is rejected.
pub fn parse_nonce_hex(nonce_hex: &str) -> Result<u64, NonceHexError> {
    let mut bytes = [0u8; 8];
    hex::decode_to_slice(nonce_hex, &mut bytes).map_err(NonceHexError)?;
    Ok(le_to_u64(&bytes))
}

/// Recompute the digest for `nonce_hex` and test it.
pub fn verify_nonce<D>(
    account: &str,
    last_mine_tx: &str,
    nonce_hex: &str,
    difficulty: &D,
) -> Result<VerifiedNonce, NonceHexError>
where
    D: Difficulty + ?Sized,
{
    let nonce = parse_nonce_hex(nonce_hex)?;
    let digest = full_hash(&Prefix::from_request(account, last_mine_tx), nonce);
    Ok(VerifiedNonce {
        nonce,
        digest,
        valid: difficulty.is_met(&digest),
    })
}
