#![forbid(unsafe_code)]

use clap::Parser;
use cmdterm::cli::{self, Cli};
use cmdterm::logging::init_logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging() {
        eprintln!("error: {}", e);
        return ExitCode::from(cli::EXIT_STARTUP_ERROR as u8);
    }

    ExitCode::from(cli::run(&cli) as u8)
}
