//! Byte and hex conversions used to build the mining message.

use alloc::string::String;

/// Encode a `u64` as 8 little-endian bytes.
#[inline]
pub fn u64_to_le(value: u64) -> [u8; 8] {
    value.to_le_bytes()
}

/// Decode 8 little-endian bytes into a `u64`.
#[inline]
pub fn le_to_u64(bytes: &[u8; 8]) -> u64 {
    u64::from_le_bytes(*bytes)
}

/// Value of a single hex digit, if it is one.
#[inline]
fn hex_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Leniently decode the first `N` bytes of a hex string.
///
/// Each byte is read from its own two-character pair:
/// - a pair whose first character isn't a hex digit decodes as zero;
/// - a pair whose second character isn't one (or is missing) keeps only the
///   first digit (`"1z"` decodes as `0x01`);
/// - pairs past the end of the string decode as zero.
///
/// A bad pair never affects the pairs after it, and no input fails.
pub fn hex_to_bytes_lenient<const N: usize>(hex: &str) -> [u8; N] {
    let digits = hex.as_bytes();
    let mut out = [0u8; N];

    for (i, slot) in out.iter_mut().enumerate() {
        let hi = digits.get(2 * i).copied().and_then(hex_nibble);
        let lo = digits.get(2 * i + 1).copied().and_then(hex_nibble);
        *slot = match (hi, lo) {
            (Some(hi), Some(lo)) => (hi << 4) | lo,
            (Some(hi), None) => hi,
            (None, _) => 0,
        };
    }

    out
}

/// Encode bytes as lowercase hex.
#[inline]
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
