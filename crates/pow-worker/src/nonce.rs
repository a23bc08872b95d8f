//! Random starting nonces.

use pow_core::NonceSource;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Draws the starting nonce from the OS RNG.
///
/// Separate worker processes start at unrelated points of the nonce space,
/// which makes overlap between them unlikely. Not cryptographic: if the OS
/// RNG is unavailable the current time is used instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomNonce;

impl NonceSource for RandomNonce {
    fn start_nonce(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        match getrandom::getrandom(&mut bytes) {
            Ok(()) => u64::from_le_bytes(bytes),
            Err(e) => {
                warn!("OS randomness unavailable ({}), seeding from the clock", e);
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_nonces_differ() {
        let mut source = RandomNonce;
        let draws: Vec<u64> = (0..4).map(|_| source.start_nonce()).collect();
        assert!(draws.windows(2).any(|w| w[0] != w[1]));
    }
}
