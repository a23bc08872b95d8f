//! Batched nonce search with a wall-clock budget.
//!
//! The search hashes `batch_size` consecutive nonces at a time against a
//! cached [`Midstate`], scans the batch in nonce order, and stops on the
//! first qualifying digest. The deadline is only checked each time the
//! running iteration count crosses a multiple of `check_interval`, so a
//! timeout can land slightly late but the loop stays free of clock reads.

use alloc::vec;
use core::time::Duration;

use crate::difficulty::{count_leading_zeros, Difficulty};
use crate::error::InputError;
use crate::hash::{Digest32, Midstate};

/// Iterations between deadline checks.
pub const CHECK_INTERVAL: u64 = 100_000;

/// Default number of nonces hashed per batch.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Largest batch the search allocates for: one deadline interval.
pub const MAX_BATCH_SIZE: usize = CHECK_INTERVAL as usize;

/// Default wall-clock budget for one search, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default wall-clock budget for one search.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

/// Floor on elapsed seconds when computing the hash rate.
pub const MIN_ELAPSED_SECS: f64 = 0.001;

/// Source of elapsed wall-clock time for a search.
pub trait Clock {
    /// Time since the clock was started.
    fn elapsed(&self) -> Duration;
}

/// Real time, measured from when the clock was created.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// Start measuring now.
    pub fn start() -> Self {
        SystemClock {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Supplies the first nonce of a search.
pub trait NonceSource {
    /// The nonce to start searching from.
    fn start_nonce(&mut self) -> u64;
}

/// Always starts at the same nonce. Makes searches reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedNonce(pub u64);

impl NonceSource for FixedNonce {
    fn start_nonce(&mut self) -> u64 {
        self.0
    }
}

/// Tunables for one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Nonces hashed per batch. Clamped to `1..=MAX_BATCH_SIZE`.
    pub batch_size: usize,
    /// Give up once this much time has passed at a deadline check.
    pub timeout: Duration,
    /// Iterations between deadline checks.
    pub check_interval: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            batch_size: DEFAULT_BATCH_SIZE,
            timeout: DEFAULT_TIMEOUT,
            check_interval: CHECK_INTERVAL,
        }
    }
}

/// A qualifying nonce and the statistics of the search that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// The winning nonce.
    pub nonce: u64,
    /// Its digest.
    pub digest: Digest32,
    /// Candidates hashed, counting the whole final batch.
    pub iterations: u64,
    /// Wall-clock time spent searching.
    pub elapsed: Duration,
    /// Hashes per second, floored.
    pub hashrate: u64,
}

/// Terminal state of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A qualifying nonce was found.
    Found(Solution),
    /// The deadline passed first.
    TimedOut {
        /// Candidates hashed before giving up.
        iterations: u64,
        /// The budget that was exceeded.
        timeout: Duration,
    },
    /// The request was unusable; no search ran.
    InputError(InputError),
}

impl SearchOutcome {
    /// Whether a nonce was found.
    pub fn is_success(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    /// Candidates hashed, if a search ran.
    pub fn iterations(&self) -> Option<u64> {
        match self {
            SearchOutcome::Found(solution) => Some(solution.iterations),
            SearchOutcome::TimedOut { iterations, .. } => Some(*iterations),
            SearchOutcome::InputError(_) => None,
        }
    }
}

impl From<InputError> for SearchOutcome {
    fn from(err: InputError) -> Self {
        SearchOutcome::InputError(err)
    }
}

/// Hashes per second, with elapsed time floored to [`MIN_ELAPSED_SECS`].
pub fn hashrate(iterations: u64, elapsed: Duration) -> u64 {
    let secs = elapsed.as_secs_f64().max(MIN_ELAPSED_SECS);
    (iterations as f64 / secs) as u64
}

/// Search for a nonce whose digest satisfies `difficulty`.
///
/// Nonces are tried in increasing order (wrapping at `u64::MAX`) starting at
/// `start_nonce`. When several nonces in one batch qualify, the lowest wins.
pub fn search<D, C>(
    midstate: &Midstate,
    start_nonce: u64,
    difficulty: &D,
    config: &SearchConfig,
    clock: &C,
) -> SearchOutcome
where
    D: Difficulty + ?Sized,
    C: Clock + ?Sized,
{
    let batch_size = config.batch_size.clamp(1, MAX_BATCH_SIZE);
    let check_interval = config.check_interval.max(1);

    let mut digests = vec![[0u8; 32]; batch_size];
    let mut cursor = start_nonce;
    let mut iterations = 0u64;
    let mut next_check = check_interval;

    tracing::debug!(start_nonce, batch_size, "starting nonce search");

    loop {
        midstate.evaluate_batch(cursor, &mut digests);
        iterations += batch_size as u64;

        if let Some(offset) = digests.iter().position(|d| difficulty.is_met(d)) {
            let elapsed = clock.elapsed();
            let solution = Solution {
                nonce: cursor.wrapping_add(offset as u64),
                digest: digests[offset],
                iterations,
                elapsed,
                hashrate: hashrate(iterations, elapsed),
            };
            tracing::info!(
                nonce = solution.nonce,
                iterations,
                elapsed_ms = elapsed.as_millis() as u64,
                hashrate = solution.hashrate,
                leading_zero_bits = count_leading_zeros(&solution.digest),
                "found nonce"
            );
            return SearchOutcome::Found(solution);
        }

        cursor = cursor.wrapping_add(batch_size as u64);

        if iterations >= next_check {
            next_check = (iterations / check_interval + 1) * check_interval;
            let elapsed = clock.elapsed();
            tracing::debug!(iterations, elapsed_ms = elapsed.as_millis() as u64, "deadline check");
            if elapsed > config.timeout {
                tracing::info!(iterations, "search timed out");
                return SearchOutcome::TimedOut {
                    iterations,
                    timeout: config.timeout,
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::{meets_protocol_difficulty, Target};
    use crate::hash::full_hash;
    use crate::prefix::Prefix;
    use core::cell::Cell;

    /// A clock that never moves.
    struct FrozenClock(Duration);

    impl Clock for FrozenClock {
        fn elapsed(&self) -> Duration {
            self.0
        }
    }

    /// A clock that advances one second per read, recording each read.
    struct SteppingClock {
        reads: Cell<u64>,
    }

    impl Clock for SteppingClock {
        fn elapsed(&self) -> Duration {
            let n = self.reads.get() + 1;
            self.reads.set(n);
            Duration::from_secs(n)
        }
    }

    fn test_prefix() -> Prefix {
        Prefix::from_request("abc.1234", "00112233445566778899aabbccddeeff")
    }

    fn config(batch_size: usize) -> SearchConfig {
        SearchConfig {
            batch_size,
            ..SearchConfig::default()
        }
    }

    /// Lowest nonce at or above `start` whose digest has a zero first byte.
    fn first_zero_byte_nonce(prefix: &Prefix, start: u64) -> u64 {
        (start..).find(|&n| full_hash(prefix, n)[0] == 0).unwrap()
    }

    #[test]
    fn test_finds_lowest_qualifying_nonce() {
        let prefix = test_prefix();
        let midstate = Midstate::new(&prefix);
        let easy = |d: &Digest32| d[0] == 0;
        let expected = first_zero_byte_nonce(&prefix, 1000);

        let outcome = search(&midstate, 1000, &easy, &config(64), &FrozenClock(Duration::ZERO));
        match outcome {
            SearchOutcome::Found(solution) => {
                assert_eq!(solution.nonce, expected);
                assert_eq!(solution.digest, full_hash(&prefix, expected));
            }
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[test]
    fn test_iterations_count_whole_batches() {
        let prefix = test_prefix();
        let midstate = Midstate::new(&prefix);
        let easy = |d: &Digest32| d[0] == 0;
        let expected = first_zero_byte_nonce(&prefix, 0);

        for batch_size in [1usize, 7, 64, 1000] {
            let outcome = search(&midstate, 0, &easy, &config(batch_size), &FrozenClock(Duration::ZERO));
            let SearchOutcome::Found(solution) = outcome else {
                panic!("batch {} did not find a nonce", batch_size);
            };
            let batches = expected / batch_size as u64 + 1;
            assert_eq!(solution.nonce, expected, "batch {}", batch_size);
            assert_eq!(solution.iterations, batches * batch_size as u64, "batch {}", batch_size);
        }
    }

    #[test]
    fn test_found_nonce_meets_protocol_difficulty() {
        let prefix = test_prefix();
        let midstate = Midstate::new(&prefix);

        let outcome = search(
            &midstate,
            0,
            &Target::protocol(),
            &config(256),
            &FrozenClock(Duration::from_millis(500)),
        );
        let SearchOutcome::Found(solution) = outcome else {
            panic!("expected Found");
        };
        assert!(meets_protocol_difficulty(&full_hash(&prefix, solution.nonce)));
        assert_eq!(solution.hashrate, solution.iterations * 2);
    }

    #[test]
    fn test_times_out_at_first_check() {
        let midstate = Midstate::new(&test_prefix());
        let never = |_: &Digest32| false;
        let clock = SteppingClock { reads: Cell::new(0) };
        let config = SearchConfig {
            batch_size: 64,
            timeout: Duration::ZERO,
            check_interval: CHECK_INTERVAL,
        };

        let outcome = search(&midstate, 0, &never, &config, &clock);
        // First multiple of 64 at or past 100_000.
        assert_eq!(
            outcome,
            SearchOutcome::TimedOut {
                iterations: 100_032,
                timeout: Duration::ZERO,
            }
        );
        assert_eq!(clock.reads.get(), 1);
    }

    #[test]
    fn test_deadline_checked_once_per_interval() {
        let midstate = Midstate::new(&test_prefix());
        let never = |_: &Digest32| false;
        let clock = SteppingClock { reads: Cell::new(0) };
        let config = SearchConfig {
            batch_size: 30,
            timeout: Duration::from_secs(2),
            check_interval: 100,
        };

        // Reads happen at 120, 210, 300 iterations; the third read (3s) exceeds 2s.
        let outcome = search(&midstate, 0, &never, &config, &clock);
        assert_eq!(outcome.iterations(), Some(300));
        assert!(!outcome.is_success());
        assert_eq!(clock.reads.get(), 3);
    }

    #[test]
    fn test_cursor_wraps_around() {
        let prefix = test_prefix();
        let midstate = Midstate::new(&prefix);
        let expected = first_zero_byte_nonce(&prefix, 0);
        let target_only = move |d: &Digest32| *d == full_hash(&prefix, expected);

        let start = u64::MAX - 9;
        let outcome = search(&midstate, start, &target_only, &config(16), &FrozenClock(Duration::ZERO));
        let SearchOutcome::Found(solution) = outcome else {
            panic!("expected Found");
        };
        assert_eq!(solution.nonce, expected);
    }

    #[test]
    fn test_oversized_batch_is_clamped() {
        let prefix = test_prefix();
        let midstate = Midstate::new(&prefix);
        let first = |_: &Digest32| true;

        let outcome = search(&midstate, 0, &first, &config(usize::MAX / 8), &FrozenClock(Duration::ZERO));
        assert_eq!(outcome.iterations(), Some(MAX_BATCH_SIZE as u64));
    }

    #[test]
    fn test_hashrate_floor() {
        assert_eq!(hashrate(5, Duration::ZERO), 5000);
        assert_eq!(hashrate(3_000_000, Duration::from_secs(2)), 1_500_000);
    }

    #[test]
    fn test_fixed_nonce_source() {
        let mut source = FixedNonce(77);
        assert_eq!(source.start_nonce(), 77);
        assert_eq!(source.start_nonce(), 77);
    }
}
