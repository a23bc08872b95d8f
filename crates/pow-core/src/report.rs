//! Response record for a finished run.

use alloc::format;
use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};

use crate::codec::{bytes_to_hex, u64_to_le};
use crate::search::SearchOutcome;

/// The single-line record written back to the caller.
///
/// Fields that don't apply to an outcome are omitted from the serialized
/// form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiningReport {
    /// Whether a nonce was found.
    pub success: bool,
    /// Winning nonce: 16 lowercase hex chars, little-endian byte order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// Why the run failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Candidates hashed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u64>,
    /// Elapsed wall-clock milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_ms: Option<u64>,
    /// Hashes per second.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashrate: Option<u64>,
}

impl MiningReport {
    /// A failure report with no search statistics.
    pub fn error(message: impl Into<String>) -> Self {
        MiningReport {
            success: false,
            nonce: None,
            error: Some(message.into()),
            iterations: None,
            time_ms: None,
            hashrate: None,
        }
    }
}

/// Hex form of a nonce as it goes on the wire.
pub fn nonce_to_hex(nonce: u64) -> String {
    bytes_to_hex(&u64_to_le(nonce))
}

impl From<&SearchOutcome> for MiningReport {
    fn from(outcome: &SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Found(solution) => MiningReport {
                success: true,
                nonce: Some(nonce_to_hex(solution.nonce)),
                error: None,
                iterations: Some(solution.iterations),
                time_ms: Some(solution.elapsed.as_millis() as u64),
                hashrate: Some(solution.hashrate),
            },
            SearchOutcome::TimedOut {
                iterations,
                timeout,
            } => MiningReport {
                iterations: Some(*iterations),
                ..MiningReport::error(format!("Timeout after {}s", timeout.as_secs()))
            },
            SearchOutcome::InputError(err) => MiningReport::error(err.to_string()),
        }
    }
}
