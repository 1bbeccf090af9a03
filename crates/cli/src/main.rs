mod commands;

use std::process::ExitCode;

use anyhow::Result;
use argrig::Dispatch;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let commander = commands::commander()?;
    let tokens: Vec<String> = std::env::args().skip(1).collect();
    tracing::debug!(?tokens, "dispatching");

    match commander.execute(tokens) {
        Ok(Dispatch::Executed) => Ok(ExitCode::SUCCESS),
        Ok(Dispatch::Help(text)) => {
            print!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("error: {err}");
            if err.is_input_error() {
                Ok(ExitCode::from(2))
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
