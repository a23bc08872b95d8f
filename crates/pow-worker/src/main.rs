//! `pow_worker`: read one mining request from stdin, answer on stdout.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use pow_core::{FixedNonce, MiningReport, NonceSource, SystemClock};
use pow_worker::{logging, Config, RandomNonce};
use tracing::error;

fn main() -> anyhow::Result<ExitCode> {
    let config = Config::parse();
    logging::init(config.log_level, config.log_format);
    config.validate()?;

    let input = pow_worker::read_input(io::stdin().lock())?;
    let stdout = io::stdout().lock();

    if let Some(nonce_hex) = config.verify.as_deref() {
        return match pow_worker::verify(&input, nonce_hex) {
            Ok(report) => {
                pow_worker::write_line(stdout, &report)?;
                Ok(exit_code(report.valid))
            }
            Err(e) if e.is_request_error() => {
                pow_worker::write_line(stdout, &MiningReport::error(e.to_string()))?;
                Ok(ExitCode::FAILURE)
            }
            Err(e) => {
                error!("verification failed: {}", e);
                Err(e.into())
            }
        };
    }

    let mut nonces: Box<dyn NonceSource> = match config.start_nonce {
        Some(start) => Box::new(FixedNonce(start)),
        None => Box::new(RandomNonce),
    };

    let clock = SystemClock::start();
    let outcome = pow_worker::run(&input, &config, &mut *nonces, &clock);

    pow_worker::write_line(stdout, &pow_worker::report(&outcome))?;
    Ok(exit_code(outcome.is_success()))
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
