//! Difficulty predicates applied to candidate digests.

use crate::hash::Digest32;

/// Protocol target: a digest qualifies when its first three bytes read as
/// `00 00 0x` with `x < 0x10`, i.e. the digest is below `00 00 10 00 ..`.
pub const PROTOCOL_TARGET: Digest32 = {
    let mut target = [0u8; 32];
    target[2] = 0x10;
    target
};

/// A test a digest must pass to count as proof of work.
pub trait Difficulty {
    /// Whether `digest` satisfies this difficulty.
    fn is_met(&self, digest: &Digest32) -> bool;
}

impl<F> Difficulty for F
where
    F: Fn(&Digest32) -> bool,
{
    #[inline]
    fn is_met(&self, digest: &Digest32) -> bool {
        self(digest)
    }
}

/// The fixed mining protocol check, written out byte by byte.
#[inline]
pub fn meets_protocol_difficulty(digest: &Digest32) -> bool {
    digest[0] == 0 && digest[1] == 0 && digest[2] < 16
}

/// A 256-bit big-endian target; the digest must be strictly below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target(pub Digest32);

impl Target {
    /// The mining protocol target.
    pub const fn protocol() -> Self {
        Target(PROTOCOL_TARGET)
    }

    /// Approximate number of hashes needed on average to find a digest
    /// below this target.
    pub fn expected_hashes(&self) -> f64 {
        let target = be_to_f64(&self.0);
        if target == 0.0 {
            return f64::INFINITY;
        }
        let mut space = 1.0f64;
        for _ in 0..32 {
            space *= 256.0;
        }
        space / target
    }
}

impl Default for Target {
    fn default() -> Self {
        Target::protocol()
    }
}

impl Difficulty for Target {
    #[inline]
    fn is_met(&self, digest: &Digest32) -> bool {
        hash_below_target(digest, &self.0)
    }
}

/// Check if a hash is strictly below a target.
///
/// Both are treated as 256-bit big-endian numbers.
#[inline]
pub fn hash_below_target(hash: &Digest32, target: &Digest32) -> bool {
    for i in 0..32 {
        if hash[i] < target[i] {
            return true;
        }
        if hash[i] > target[i] {
            return false;
        }
    }
    false
}

/// Count leading zero bits, most significant byte first.
pub fn count_leading_zeros(hash: &Digest32) -> u32 {
    let mut zeros = 0u32;
    for byte in hash.iter() {
        if *byte == 0 {
            zeros += 8;
        } else {
            zeros += byte.leading_zeros();
            break;
        }
    }
    zeros
}

fn be_to_f64(bytes: &Digest32) -> f64 {
    bytes.iter().fold(0.0, |acc, &b| acc * 256.0 + b as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest_with(head: &[u8]) -> Digest32 {
        let mut digest = [0xFF; 32];
        digest[..head.len()].copy_from_slice(head);
        digest
    }

    #[test]
    fn test_protocol_boundaries() {
        let target = Target::protocol();

        let good = digest_with(&[0x00, 0x00, 0x0F]);
        assert!(meets_protocol_difficulty(&good));
        assert!(target.is_met(&good));

        let third_too_big = digest_with(&[0x00, 0x00, 0x10]);
        assert!(!meets_protocol_difficulty(&third_too_big));
        assert!(!target.is_met(&third_too_big));

        let second_nonzero = digest_with(&[0x00, 0x01, 0x00]);
        assert!(!meets_protocol_difficulty(&second_nonzero));
        assert!(!target.is_met(&second_nonzero));
    }

    #[test]
    fn test_target_agrees_with_bytewise_check() {
        for b0 in [0x00u8, 0x01] {
            for b1 in [0x00u8, 0x01, 0xFF] {
                for b2 in 0x00u8..=0x20 {
                    for tail in [0x00u8, 0xFF] {
                        let mut digest = [tail; 32];
                        digest[0] = b0;
                        digest[1] = b1;
                        digest[2] = b2;
                        assert_eq!(
                            Target::protocol().is_met(&digest),
                            meets_protocol_difficulty(&digest),
                            "{:02x}{:02x}{:02x}..{:02x}",
                            b0, b1, b2, tail
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_closure_difficulty() {
        let first_byte_zero = |d: &Digest32| d[0] == 0;
        assert!(first_byte_zero.is_met(&digest_with(&[0x00])));
        assert!(!first_byte_zero.is_met(&digest_with(&[0x01])));
    }

    #[test]
    fn test_leading_zero_bits() {
        assert_eq!(count_leading_zeros(&[0u8; 32]), 256);
        assert_eq!(count_leading_zeros(&digest_with(&[0x00, 0x00, 0x0F])), 20);
        assert_eq!(count_leading_zeros(&digest_with(&[0x80])), 0);
    }

    #[test]
    fn test_expected_hashes_protocol() {
        // 16 / 2^24 of the digest space qualifies.
        assert_eq!(Target::protocol().expected_hashes(), 1_048_576.0);
        assert_eq!(Target([0u8; 32]).expected_hashes(), f64::INFINITY);
    }
}
