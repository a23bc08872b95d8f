//! Single-shot proof-of-work worker.
//!
//! This crate wires the `pow-core` search to a process boundary:
//! - One JSON request line on stdin
//! - One JSON result line on stdout
//! - Diagnostics through `tracing` on stderr
//! - Exit status 0 only when a nonce was found (or verified)

use std::io::{Read, Write};

use pow_core::{
    mine, Clock, Difficulty, Digest32, MiningReport, NonceSource, SearchConfig, SearchOutcome,
    Target,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub mod config;
pub mod error;
pub mod logging;
pub mod nonce;
pub mod request;

pub use config::Config;
pub use error::{Result, WorkerError};
pub use nonce::RandomNonce;
pub use request::{parse_request, MineRequest};

/// Read the whole request from `reader`.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than failing, so a garbled
/// request still gets a response line.
pub fn read_input<R: Read>(mut reader: R) -> Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parse `input` and search against the protocol target.
pub fn run<N, C>(input: &str, config: &Config, nonces: &mut N, clock: &C) -> SearchOutcome
where
    N: NonceSource + ?Sized,
    C: Clock + ?Sized,
{
    let target = Target::protocol();
    debug!(expected_hashes = target.expected_hashes(), "searching against protocol target");
    run_with(input, &config.search_config(), &target, nonces, clock)
}

/// Parse `input` and search against an arbitrary difficulty.
pub fn run_with<N, D, C>(
    input: &str,
    search: &SearchConfig,
    difficulty: &D,
    nonces: &mut N,
    clock: &C,
) -> SearchOutcome
where
    N: NonceSource + ?Sized,
    D: Difficulty + ?Sized,
    C: Clock + ?Sized,
{
    let request = match parse_request(input) {
        Ok(request) => request,
        Err(e) => {
            warn!("rejecting request: {}", e);
            return SearchOutcome::InputError(e);
        }
    };

    let outcome = mine(
        request.account,
        request.last_mine_tx,
        nonces,
        difficulty,
        search,
        clock,
    );

    match &outcome {
        SearchOutcome::Found(solution) => info!(
            "found nonce after {} hashes in {} ms ({})",
            solution.iterations,
            solution.elapsed.as_millis(),
            logging::format_hashrate(solution.hashrate)
        ),
        SearchOutcome::TimedOut { iterations, timeout } => warn!(
            "no nonce within {}s after {} hashes",
            timeout.as_secs(),
            iterations
        ),
        SearchOutcome::InputError(e) => warn!("rejecting request: {}", e),
    }

    outcome
}

/// Result line for `--verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyReport {
    /// Whether the nonce meets the protocol difficulty
    pub valid: bool,
    /// Hex digest of `prefix || nonce`
    pub digest: String,
}

/// Check `nonce_hex` against the request in `input`.
pub fn verify(input: &str, nonce_hex: &str) -> Result<VerifyReport> {
    let request = parse_request(input)?;
    let job = pow_core::Job::from_fields(request.account, request.last_mine_tx)?;
    let verified = pow_core::verify_nonce(
        &job.account,
        &job.last_mine_tx,
        nonce_hex,
        &Target::protocol(),
    )?;
    info!(nonce = verified.nonce, valid = verified.valid, "verified nonce");
    Ok(VerifyReport {
        valid: verified.valid,
        digest: digest_hex(&verified.digest),
    })
}

fn digest_hex(digest: &Digest32) -> String {
    hex::encode(digest)
}

/// Response record for a finished search.
pub fn report(outcome: &SearchOutcome) -> MiningReport {
    MiningReport::from(outcome)
}

/// Write `record` as one JSON line and flush.
pub fn write_line<W: Write, T: Serialize>(mut writer: W, record: &T) -> Result<()> {
    serde_json::to_writer(&mut writer, record)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
