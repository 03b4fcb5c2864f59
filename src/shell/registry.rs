#![forbid(unsafe_code)]

//! Name-to-command registry, populated once at startup
//!
//! Commands are declared by providers: plain functions returning the
//! [`CommandSpec`]s a module exposes. The registry is built from a list of
//! providers and is read-only afterwards.

use super::command::CommandSpec;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

/// A declaration site contributing commands to the registry
pub type CommandProvider = fn() -> Vec<CommandSpec>;

/// Errors raised while registering or looking up commands
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two commands claim the same (case-insensitive) name
    #[error("command {0} is already registered")]
    DuplicateCommand(String),

    /// Name is empty or contains whitespace
    #[error("invalid command name {0:?}")]
    InvalidName(String),

    /// Maximum argument count is below the minimum
    #[error("command {name} has max_args {max} below min_args {min}")]
    InvalidArity { name: String, min: usize, max: usize },

    /// No command with the given name
    #[error("Command not found: {0}")]
    CommandNotFound(String),
}

/// Mapping from canonical (upper-case) command name to its spec
///
/// Enumeration preserves registration order.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from every spec the providers declare
    ///
    /// # Errors
    ///
    /// Fails on the first invalid or duplicate command.
    pub fn from_providers(providers: &[CommandProvider]) -> Result<Self, RegistryError> {
        let mut registry = CommandRegistry::new();
        for provider in providers {
            for spec in provider() {
                registry.register(spec)?;
            }
        }
        info!(commands = registry.len(), "command registry built");
        Ok(registry)
    }

    /// Register one command
    ///
    /// # Errors
    ///
    /// - `DuplicateCommand` if a command with the same name exists
    /// - `InvalidName` if the name is empty or contains whitespace
    /// - `InvalidArity` if max_args is below min_args
    pub fn register(&mut self, spec: CommandSpec) -> Result<(), RegistryError> {
        let name = spec.name().to_string();

        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(RegistryError::InvalidName(name));
        }

        let arity = spec.arity();
        if let Some(max) = arity.max
            && max < arity.min
        {
            return Err(RegistryError::InvalidArity {
                name,
                min: arity.min,
                max,
            });
        }

        if self.index.contains_key(&name) {
            return Err(RegistryError::DuplicateCommand(name));
        }

        debug!(command = %name, arity = %arity, "registered command");
        self.index.insert(name, self.commands.len());
        self.commands.push(spec);
        Ok(())
    }

    /// Look up a command by name, ignoring case
    ///
    /// # Errors
    ///
    /// Returns `CommandNotFound` carrying the canonical name.
    pub fn lookup(&self, name: &str) -> Result<&CommandSpec, RegistryError> {
        let canonical = name.to_uppercase();
        match self.index.get(&canonical) {
            Some(&position) => Ok(&self.commands[position]),
            None => Err(RegistryError::CommandNotFound(canonical)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&name.to_uppercase())
    }

    /// All commands in registration order
    pub fn enumerate(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
