//! Tracing setup.
//!
//! stdout carries exactly one response line, so all diagnostics go to stderr.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{LogFormat, LogLevel};

/// Install the global subscriber. `RUST_LOG` wins over `level` when set.
pub fn init(level: LogLevel, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

/// Format a hash rate for log output.
pub fn format_hashrate(rate: u64) -> String {
    let rate = rate as f64;
    if rate >= 1_000_000_000.0 {
        format!("{:.2} GH/s", rate / 1_000_000_000.0)
    } else if rate >= 1_000_000.0 {
        format!("{:.2} MH/s", rate / 1_000_000.0)
    } else if rate >= 1_000.0 {
        format!("{:.2} KH/s", rate / 1_000.0)
    } else {
        format!("{:.2} H/s", rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hashrate() {
        assert_eq!(format_hashrate(950), "950.00 H/s");
        assert_eq!(format_hashrate(1_500), "1.50 KH/s");
        assert_eq!(format_hashrate(2_340_000), "2.34 MH/s");
        assert_eq!(format_hashrate(1_000_000_000), "1.00 GH/s");
    }
}
