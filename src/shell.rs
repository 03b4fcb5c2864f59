//! Command shell core: tokenizer, registry, dispatcher and built-ins

pub mod builtins;
pub mod command;
pub mod dispatcher;
pub mod registry;
pub mod terminal;
pub mod token;
pub mod tokenizer;

pub use command::{Arity, CommandContext, CommandHandler, CommandSpec, HandlerError, Host};
pub use dispatcher::{ArityBound, ArityViolation, DispatchError, Dispatcher, Outcome};
pub use registry::{CommandProvider, CommandRegistry, RegistryError};
pub use terminal::{Terminal, TerminalHost};
pub use token::{ArgumentKind, ArgumentToken, ArgumentValue};
pub use tokenizer::tokenize;

/// Every command provider compiled into the shell
///
/// Providers are registered in this order at startup.
pub const PROVIDERS: &[CommandProvider] = &[builtins::commands];
