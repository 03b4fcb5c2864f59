#![forbid(unsafe_code)]

//! Command metadata and the context handed to command handlers

use super::registry::CommandRegistry;
use super::token::ArgumentToken;
use crate::output::{OutputSink, Severity};
use std::fmt;
use thiserror::Error;

/// Function executing a command given its parsed arguments
///
/// The argument slice excludes the command name itself.
pub type CommandHandler = fn(&mut CommandContext<'_>, &[ArgumentToken]) -> Result<(), HandlerError>;

/// A handler's own validation failure
///
/// Handler errors are ordinary user feedback. The dispatcher writes the
/// message to the output sink verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        HandlerError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Hooks into the embedding host that commands may trigger
pub trait Host {
    /// Clear the display buffer
    fn clear_display(&mut self);

    /// Ask the host to shut down
    fn quit(&mut self);
}

/// Everything a handler may touch while it runs
pub struct CommandContext<'a> {
    pub registry: &'a CommandRegistry,
    pub output: &'a mut dyn OutputSink,
    pub host: &'a mut dyn Host,
}

impl CommandContext<'_> {
    /// Append a normal output line
    pub fn log(&mut self, text: &str) {
        self.output.append_line(Severity::Message, text);
    }

    /// Append a normal output line built from a `{N}` template
    pub fn log_formatted(&mut self, template: &str, args: &[&dyn fmt::Display]) {
        self.output
            .append_formatted(Severity::Message, template, args);
    }
}

/// Accepted argument count range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    /// `None` means unbounded
    pub max: Option<usize>,
}

impl Arity {
    pub const UNBOUNDED: Arity = Arity { min: 0, max: None };

    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }
}

impl Default for Arity {
    fn default() -> Self {
        Arity::UNBOUNDED
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (min, Some(max)) if min == max => write!(f, "exactly {}", min),
            (0, Some(max)) => write!(f, "at most {}", max),
            (min, Some(max)) => write!(f, "between {} and {}", min, max),
            (min, None) => write!(f, "at least {}", min),
        }
    }
}

/// Static metadata for one command
#[derive(Clone)]
pub struct CommandSpec {
    name: String,
    help: Option<String>,
    arity: Arity,
    handler: CommandHandler,
}

impl CommandSpec {
    /// Creates a spec accepting any number of arguments
    ///
    /// The name is canonicalized to upper case.
    pub fn new(name: &str, handler: CommandHandler) -> Self {
        CommandSpec {
            name: name.to_uppercase(),
            help: None,
            arity: Arity::default(),
            handler,
        }
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn min_args(mut self, min: usize) -> Self {
        self.arity.min = min;
        self
    }

    pub fn max_args(mut self, max: usize) -> Self {
        self.arity.max = Some(max);
        self
    }

    pub fn unbounded(mut self) -> Self {
        self.arity.max = None;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn handler(&self) -> CommandHandler {
        self.handler
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("help", &self.help)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}
