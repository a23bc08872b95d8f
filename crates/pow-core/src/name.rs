//! Account name encoding.
//!
//! Account names are packed into a `u64` using a 5-bit alphabet
//! (`.12345abcdefghijklmnopqrstuvwxyz`). The first 12 characters take 5 bits
//! each from the most significant end; an optional 13th character fills the
//! remaining low 4 bits.

/// The account name alphabet, indexed by symbol value.
pub const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// Maximum number of significant characters in an account name.
pub const MAX_NAME_LEN: usize = 13;

/// An account name as supplied by the request.
///
/// No validation happens on construction: characters outside the alphabet
/// encode as `.` (zero).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountName<'a>(&'a str);

impl<'a> AccountName<'a> {
    /// Wrap a raw account string.
    pub fn new(name: &'a str) -> Self {
        AccountName(name)
    }

    /// The raw string this name was built from.
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Packed 64-bit value of this name.
    pub fn encode(&self) -> u64 {
        string_to_name(self.0)
    }

    /// The name as the chain sees it after packing.
    ///
    /// Differs from [`as_str`](Self::as_str) when the input held characters
    /// outside the alphabet or more than 13 characters.
    pub fn normalized(&self) -> alloc::string::String {
        name_to_string(self.encode())
    }
}

/// Map one character to its 5-bit symbol value.
#[inline]
fn char_to_symbol(c: u8) -> u64 {
    match c {
        b'a'..=b'z' => (c - b'a') as u64 + 6,
        b'1'..=b'5' => (c - b'1') as u64 + 1,
        _ => 0,
    }
}

/// Pack an account name into its 64-bit representation.
///
/// Characters past the 13th are ignored. The 13th character keeps only its
/// low 4 bits.
pub fn string_to_name(name: &str) -> u64 {
    let bytes = name.as_bytes();
    let mut value = 0u64;

    for (i, &c) in bytes.iter().take(12).enumerate() {
        value |= char_to_symbol(c) << (64 - 5 * (i + 1));
    }

    if let Some(&c) = bytes.get(12) {
        value |= char_to_symbol(c) & 0x0F;
    }

    value
}

/// Unpack a 64-bit name value back into its string form.
///
/// Trailing `.` characters are trimmed, so `string_to_name(name_to_string(v))`
/// round-trips for any value produced by [`string_to_name`] on a name that
/// doesn't end in `.`.
pub fn name_to_string(value: u64) -> alloc::string::String {
    let mut out = [b'.'; MAX_NAME_LEN];

    for (i, slot) in out.iter_mut().take(12).enumerate() {
        let symbol = (value >> (64 - 5 * (i + 1))) & 0x1F;
        *slot = CHARMAP[symbol as usize];
    }
    out[12] = CHARMAP[(value & 0x0F) as usize];

    let len = out.iter().rposition(|&c| c != b'.').map_or(0, |p| p + 1);
    out[..len].iter().map(|&c| c as char).collect()
}
