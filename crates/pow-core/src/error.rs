//! Error types for request validation and nonce parsing.

use alloc::string::String;

/// Problems with the mining request that stop a search from starting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Nothing was read from the input channel.
    Empty,
    /// The request could not be parsed.
    Malformed(String),
    /// A required field was absent or null.
    MissingField(&'static str),
}

impl core::fmt::Display for InputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InputError::Empty => write!(f, "No input"),
            InputError::Malformed(reason) => write!(f, "Invalid JSON: {}", reason),
            InputError::MissingField(field) => write!(f, "Missing required field: {}", field),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InputError {}

/// A nonce string that is not 16 hex characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonceHexError(pub hex::FromHexError);

impl core::fmt::Display for NonceHexError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Invalid nonce hex: {}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NonceHexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}
