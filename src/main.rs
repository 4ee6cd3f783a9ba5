//! Unit Book - Binary Entry Point
//!
//! Loads configuration from the environment, installs logging, optionally
//! replays the demo orders and then runs the interactive menu on
//! stdin/stdout.

use std::io;
use std::process::ExitCode;

use tracing::{error, info};

use unit_book::cli::Session;
use unit_book::config::AppConfig;
use unit_book::logging::init_logging;
use unit_book::OrderBook;

fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&config.log) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }
    info!(capacity = config.capacity, seed_demo = config.seed_demo, "starting unit-book");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        OrderBook::with_capacity(config.capacity),
        stdin.lock(),
        stdout.lock(),
    );

    let result = if config.seed_demo {
        session.seed_demo().and_then(|()| session.run())
    } else {
        session.run()
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "session aborted");
            ExitCode::FAILURE
        }
    }
}
