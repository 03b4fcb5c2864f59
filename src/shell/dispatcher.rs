#![forbid(unsafe_code)]

//! Line dispatch: tokenize, look up, check arity, invoke
//!
//! Every runtime failure is written to the output sink as a single error
//! line and reported back as an informational [`Outcome`]. Nothing here
//! panics or returns an error to the caller, so one bad line cannot affect
//! the next.

use super::command::{Arity, CommandContext, HandlerError, Host};
use super::registry::CommandRegistry;
use super::tokenizer::tokenize;
use crate::output::{OutputSink, Severity};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Which bound of the accepted range was violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArityBound {
    TooFew,
    TooMany,
}

impl fmt::Display for ArityBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArityBound::TooFew => f.write_str("too few arguments"),
            ArityBound::TooMany => f.write_str("too many arguments"),
        }
    }
}

/// Argument count outside a command's accepted range
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{command}: {bound} (got {actual}, expected {arity})")]
pub struct ArityViolation {
    pub command: String,
    pub bound: ArityBound,
    pub actual: usize,
    pub arity: Arity,
}

impl ArityViolation {
    /// Check `actual` against `arity`, returning the violation if any
    pub fn check(command: &str, arity: Arity, actual: usize) -> Option<Self> {
        if arity.accepts(actual) {
            return None;
        }
        let bound = if actual < arity.min {
            ArityBound::TooFew
        } else {
            ArityBound::TooMany
        };
        Some(ArityViolation {
            command: command.to_string(),
            bound,
            actual,
            arity,
        })
    }
}

/// Runtime dispatch failures, all recoverable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Command not found: {name}")]
    CommandNotFound { name: String },

    #[error(transparent)]
    Arity(#[from] ArityViolation),

    #[error("{error}")]
    Handler { command: String, error: HandlerError },
}

/// What happened to one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The line held no tokens
    Empty,
    /// The handler ran and returned normally
    Completed { command: String },
    /// The line failed; the error has already been written to the sink
    Failed(DispatchError),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// Stateless dispatcher over a read-only registry
///
/// Not internally synchronized; a multi-threaded host must serialize calls.
pub struct Dispatcher<'r> {
    registry: &'r CommandRegistry,
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r CommandRegistry) -> Self {
        Dispatcher { registry }
    }

    /// Execute one raw input line
    ///
    /// Algorithm:
    /// 1. Tokenize; an empty line is a no-op
    /// 2. The first token names the command, the rest are arguments
    /// 3. Look up the command (case-insensitive)
    /// 4. Check the argument count before the handler ever runs
    /// 5. Invoke the handler
    pub fn execute(
        &self,
        line: &str,
        output: &mut dyn OutputSink,
        host: &mut dyn Host,
    ) -> Outcome {
        let tokens = tokenize(line);
        let Some((name, args)) = tokens.split_first() else {
            return Outcome::Empty;
        };

        let spec = match self.registry.lookup(name.as_str()) {
            Ok(spec) => spec,
            Err(_) => {
                let name = name.as_str().to_uppercase();
                return fail(output, DispatchError::CommandNotFound { name });
            }
        };

        debug!(command = spec.name(), args = args.len(), "dispatching command");

        if let Some(violation) = ArityViolation::check(spec.name(), spec.arity(), args.len()) {
            return fail(output, violation.into());
        }

        let mut context = CommandContext {
            registry: self.registry,
            output: &mut *output,
            host,
        };

        match (spec.handler())(&mut context, args) {
            Ok(()) => Outcome::Completed {
                command: spec.name().to_string(),
            },
            Err(error) => fail(
                output,
                DispatchError::Handler {
                    command: spec.name().to_string(),
                    error,
                },
            ),
        }
    }
}

fn fail(output: &mut dyn OutputSink, error: DispatchError) -> Outcome {
    debug!(error = %error, "command failed");
    output.append_line(Severity::Error, &error.to_string());
    Outcome::Failed(error)
}
