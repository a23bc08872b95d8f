//! SHA256 hashing with a cached prefix state.

use sha2::{Digest, Sha256};

use crate::codec::u64_to_le;
use crate::prefix::Prefix;

/// A 32-byte SHA256 digest.
pub type Digest32 = [u8; 32];

/// Single SHA256 hash.
#[inline]
pub fn sha256(data: &[u8]) -> Digest32 {
    Sha256::digest(data).into()
}

/// Hash the full `prefix || nonce` message from scratch.
///
/// This is the reference path that [`Midstate::evaluate`] must match.
#[inline]
pub fn full_hash(prefix: &Prefix, nonce: u64) -> Digest32 {
    sha256(&prefix.message(nonce))
}

/// SHA256 state after absorbing the 16-byte prefix.
///
/// Each evaluation works on a clone, so the cached state itself is never
/// touched after construction and can be reused for the whole search.
#[derive(Clone)]
pub struct Midstate {
    state: Sha256,
}

impl Midstate {
    /// Absorb the prefix once and keep the resulting state.
    pub fn new(prefix: &Prefix) -> Self {
        let mut state = Sha256::new();
        state.update(prefix.as_bytes());
        Midstate { state }
    }

    /// Digest of `prefix || nonce_bytes`.
    #[inline]
    pub fn evaluate_bytes(&self, nonce_bytes: &[u8; 8]) -> Digest32 {
        let mut hasher = self.state.clone();
        hasher.update(nonce_bytes);
        hasher.finalize().into()
    }

    /// Digest of `prefix || nonce.to_le_bytes()`.
    #[inline]
    pub fn evaluate(&self, nonce: u64) -> Digest32 {
        self.evaluate_bytes(&u64_to_le(nonce))
    }

    /// Hash `out.len()` consecutive nonces starting at `start`.
    ///
    /// The nonce wraps around at `u64::MAX`.
    pub fn evaluate_batch(&self, start: u64, out: &mut [Digest32]) {
        let mut nonce = start;
        for digest in out.iter_mut() {
            *digest = self.evaluate(nonce);
            nonce = nonce.wrapping_add(1);
        }
    }
}

impl core::fmt::Debug for Midstate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Midstate").finish_non_exhaustive()
    }
}
