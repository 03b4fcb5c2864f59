//! Command-line argument definitions

use crate::config::{ColorOption, OutputFormat as ConfigOutputFormat};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Interactive command shell with typed arguments
#[derive(Debug, Parser)]
#[command(name = "cmdterm", version, about)]
pub struct Cli {
    /// Path to a config file (defaults to ./cmdterm.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// When to use colors in human output
    #[arg(long, value_enum)]
    pub color: Option<ColorChoice>,

    /// Execute this line instead of reading stdin (repeatable)
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    pub commands: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Jsonl,
}

impl From<OutputFormat> for ConfigOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => ConfigOutputFormat::Human,
            OutputFormat::Jsonl => ConfigOutputFormat::Jsonl,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl From<ColorChoice> for ColorOption {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => ColorOption::Auto,
            ColorChoice::Always => ColorOption::Always,
            ColorChoice::Never => ColorOption::Never,
        }
    }
}
