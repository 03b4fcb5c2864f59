//! Binary entry logic: resolve configuration, build the terminal, run

use super::args::Cli;
use super::repl::{Renderer, RunSummary, Session};
use crate::config::{ColorOption, Config, ConfigError, OutputFormat};
use crate::output::{HumanFormatter, JsonlFormatter};
use crate::shell::{RegistryError, Terminal};
use std::io::{self, IsTerminal};
use termcolor::{ColorChoice, StandardStream};
use thiserror::Error;

/// Exit codes for the binary
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_STARTUP_ERROR: i32 = 2;

/// Failures that stop the binary before or while running
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("command registration failed: {0}")]
    Registry(#[from] RegistryError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Run the binary and return its exit code
pub fn run(cli: &Cli) -> i32 {
    match run_inner(cli) {
        Ok(summary) if summary.failed > 0 && !cli.commands.is_empty() => EXIT_FAILURE,
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            EXIT_STARTUP_ERROR
        }
    }
}

fn run_inner(cli: &Cli) -> Result<RunSummary, AppError> {
    let config = resolve_config(cli)?;
    let terminal = Terminal::new(&config.shell)?;

    let color = color_choice(config.output.color);
    let renderer = match config.output.format {
        OutputFormat::Human => Renderer::Human(HumanFormatter::new(config.shell.prompt.clone())),
        OutputFormat::Jsonl => Renderer::Jsonl(JsonlFormatter::new()),
    };

    let stdout = StandardStream::stdout(color);
    let mut session = Session::new(terminal, renderer, stdout, config.shell.prompt.clone());

    let summary = if cli.commands.is_empty() {
        let stdin = io::stdin();
        let show_prompt =
            stdin.is_terminal() && config.output.format == OutputFormat::Human;
        session.run_interactive(stdin.lock(), show_prompt)?
    } else {
        session.run_script(&cli.commands)?
    };

    tracing::debug!(?summary, "session finished");
    Ok(summary)
}

/// Load the config file and apply command-line overrides
fn resolve_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default(std::path::Path::new("."))?,
    };

    if let Some(format) = cli.format {
        config.output.format = format.into();
    }
    if let Some(color) = cli.color {
        config.output.color = color.into();
    }

    Ok(config)
}

fn color_choice(option: ColorOption) -> ColorChoice {
    match option {
        ColorOption::Always => ColorChoice::Always,
        ColorOption::Never => ColorChoice::Never,
        ColorOption::Auto if io::stdout().is_terminal() => ColorChoice::Auto,
        ColorOption::Auto => ColorChoice::Never,
    }
}
