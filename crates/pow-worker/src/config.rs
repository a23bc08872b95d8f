//! Command line and environment configuration.

use clap::{Parser, ValueEnum};
use pow_core::search::{
    SearchConfig, CHECK_INTERVAL, DEFAULT_BATCH_SIZE, DEFAULT_TIMEOUT_SECS, MAX_BATCH_SIZE,
};
use std::time::Duration;

use crate::error::{Result, WorkerError};

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive string understood by `EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Log level used when neither `--log-level` nor RUST_LOG is given.
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Warn;

/// Log output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

/// Worker configuration.
///
/// The request itself always arrives on stdin; these settings only tune the
/// search and the diagnostics written to stderr.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pow_worker",
    version = env!("CARGO_PKG_VERSION"),
    about = "Find a proof-of-work nonce for a mining request read from stdin",
    long_about = "Reads one JSON line {\"account\":..,\"lastMineTx\":..} from stdin, searches for a \
                  qualifying nonce and writes one JSON result line to stdout. Exits non-zero unless \
                  a nonce was found."
)]
pub struct Config {
    /// Nonces hashed per batch
    #[arg(long, env = "POW_BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Give up after this many seconds
    #[arg(long, env = "POW_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Start from this nonce instead of a random one
    #[arg(long, env = "POW_START_NONCE")]
    pub start_nonce: Option<u64>,

    /// Check a nonce (16 hex chars, as reported) instead of searching
    #[arg(long, value_name = "NONCE_HEX")]
    pub verify: Option<String>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, value_enum, default_value_t = DEFAULT_LOG_LEVEL)]
    pub log_level: LogLevel,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            batch_size: DEFAULT_BATCH_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            start_nonce: None,
            verify: None,
            log_level: DEFAULT_LOG_LEVEL,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Reject settings the search can't run with.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(WorkerError::config("batch size must be at least 1"));
        }
        if self.batch_size > MAX_BATCH_SIZE {
            return Err(WorkerError::config(format!(
                "batch size must be at most {}, got {}",
                MAX_BATCH_SIZE, self.batch_size
            )));
        }
        Ok(())
    }

    /// Search tunables derived from this configuration.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            batch_size: self.batch_size,
            timeout: Duration::from_secs(self.timeout_secs),
            check_interval: CHECK_INTERVAL,
        }
    }
}
