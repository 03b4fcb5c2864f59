#![forbid(unsafe_code)]

//! Root object owning the registry, the display buffer and the host hooks

use super::command::Host;
use super::dispatcher::{Dispatcher, Outcome};
use super::registry::{CommandRegistry, RegistryError};
use crate::config::ShellConfig;
use crate::output::{OutputSink, Severity, TextBuffer};

/// Host hooks backed by flags the terminal applies after each line
///
/// A clear request only sets a flag. The buffer is emptied once the handler
/// has returned, so anything the handler logs after calling
/// [`Host::clear_display`] is removed along with the earlier lines.
#[derive(Debug, Default)]
pub struct TerminalHost {
    clear_requested: bool,
    quit_requested: bool,
}

impl Host for TerminalHost {
    fn clear_display(&mut self) {
        self.clear_requested = true;
    }

    fn quit(&mut self) {
        self.quit_requested = true;
    }
}

/// An interactive command terminal
///
/// The registry is built once in [`Terminal::new`] and never changes
/// afterwards. Not internally synchronized.
#[derive(Debug)]
pub struct Terminal {
    registry: CommandRegistry,
    buffer: TextBuffer,
    host: TerminalHost,
    echo_input: bool,
}

impl Terminal {
    /// Creates a terminal with every command from the provider manifest
    ///
    /// # Errors
    ///
    /// Returns the registration error if two providers clash or a spec is
    /// malformed. This is a programming defect and should abort startup.
    pub fn new(config: &ShellConfig) -> Result<Self, RegistryError> {
        let registry = CommandRegistry::from_providers(super::PROVIDERS)?;
        Ok(Self::with_registry(registry, config))
    }

    /// Creates a terminal around an already built registry
    pub fn with_registry(registry: CommandRegistry, config: &ShellConfig) -> Self {
        Terminal {
            registry,
            buffer: TextBuffer::new(config.buffer_size),
            host: TerminalHost::default(),
            echo_input: config.echo_input,
        }
    }

    /// Execute one input line
    ///
    /// A clear requested by the handler is applied after it returns and
    /// wipes the whole buffer, including lines written by this same line.
    pub fn execute(&mut self, line: &str) -> Outcome {
        if self.echo_input && !line.trim().is_empty() {
            self.buffer.append_line(Severity::Input, line.trim());
        }

        let outcome =
            Dispatcher::new(&self.registry).execute(line, &mut self.buffer, &mut self.host);

        if std::mem::take(&mut self.host.clear_requested) {
            self.buffer.clear();
        }

        outcome
    }

    /// Append a line that did not come from a command
    ///
    /// Used by front ends for problems found before a line reaches the
    /// dispatcher, such as undecodable input.
    pub fn report(&mut self, severity: Severity, text: &str) {
        self.buffer.append_line(severity, text);
    }

    /// Whether a command asked the host to shut down
    pub fn quit_requested(&self) -> bool {
        self.host.quit_requested
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }
}
