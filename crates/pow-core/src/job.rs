//! A validated mining request and the glue that runs it.

use alloc::string::String;

use crate::difficulty::Difficulty;
use crate::error::InputError;
use crate::hash::Midstate;
use crate::name::AccountName;
use crate::prefix::Prefix;
use crate::search::{search, Clock, NonceSource, SearchConfig, SearchOutcome};

/// The two inputs a search needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Miner account name.
    pub account: String,
    /// Hex hash of the miner's last mining transaction.
    pub last_mine_tx: String,
}

impl Job {
    /// Build a job from optional request fields.
    ///
    /// `account` is checked first, so a request missing both fields reports
    /// the account.
    pub fn from_fields(
        account: Option<String>,
        last_mine_tx: Option<String>,
    ) -> Result<Self, InputError> {
        let account = account.ok_or(InputError::MissingField("account"))?;
        let last_mine_tx = last_mine_tx.ok_or(InputError::MissingField("lastMineTx"))?;
        Ok(Job {
            account,
            last_mine_tx,
        })
    }

    /// The 16-byte message prefix for this job.
    pub fn prefix(&self) -> Prefix {
        Prefix::build(AccountName::new(&self.account).encode(), &self.last_mine_tx)
    }

    /// Run one search for this job.
    pub fn run<N, D, C>(
        &self,
        nonces: &mut N,
        difficulty: &D,
        config: &SearchConfig,
        clock: &C,
    ) -> SearchOutcome
    where
        N: NonceSource + ?Sized,
        D: Difficulty + ?Sized,
        C: Clock + ?Sized,
    {
        let midstate = Midstate::new(&self.prefix());
        let start_nonce = nonces.start_nonce();
        tracing::debug!(
            account = %self.account,
            encoded_as = %AccountName::new(&self.account).normalized(),
            start_nonce,
            "running job"
        );
        search(&midstate, start_nonce, difficulty, config, clock)
    }
}

/// Validate the request fields and run the search, or report why not.
pub fn mine<N, D, C>(
    account: Option<String>,
    last_mine_tx: Option<String>,
    nonces: &mut N,
    difficulty: &D,
    config: &SearchConfig,
    clock: &C,
) -> SearchOutcome
where
    N: NonceSource + ?Sized,
    D: Difficulty + ?Sized,
    C: Clock + ?Sized,
{
    match Job::from_fields(account, last_mine_tx) {
        Ok(job) => job.run(nonces, difficulty, config, clock),
        Err(err) => SearchOutcome::InputError(err),
    }
}
