//! Nonce search core for the mining proof-of-work challenge.
//!
//! This crate provides pure Rust implementations of:
//! - Account name packing into the 64-bit on-chain form
//! - Little-endian and lenient hex byte conversions
//! - Mining prefix construction (`account || tx[..8]`)
//! - SHA256 with a cached prefix state, so each candidate hashes 8 bytes
//! - Batched, deadline-bounded nonce search
//! - Outcome reporting and standalone nonce verification

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod codec;
pub mod difficulty;
pub mod error;
pub mod hash;
pub mod job;
pub mod name;
pub mod prefix;
pub mod report;
pub mod search;
pub mod verify;

pub use difficulty::{meets_protocol_difficulty, Difficulty, Target};
pub use error::{InputError, NonceHexError};
pub use hash::{full_hash, Digest32, Midstate};
pub use job::{mine, Job};
pub use name::{name_to_string, string_to_name, AccountName};
pub use prefix::Prefix;
pub use report::MiningReport;
#[cfg(feature = "std")]
pub use search::SystemClock;
pub use search::{search, Clock, FixedNonce, NonceSource, SearchConfig, SearchOutcome, Solution};
pub use verify::{verify_nonce, VerifiedNonce};
