//! Configuration file parsing and validation

pub mod shell_toml;

pub use shell_toml::{
    ColorOption, Config, ConfigError, DEFAULT_CONFIG_FILE, OutputConfig, OutputFormat, ShellConfig,
};
