//! CLI argument parsing and the interactive line loop

pub mod app;
pub mod args;
pub mod repl;

// Re-export types for convenient access
pub use app::{EXIT_FAILURE, EXIT_STARTUP_ERROR, EXIT_SUCCESS, run};
pub use args::{Cli, ColorChoice, OutputFormat};
pub use repl::{Renderer, RunSummary, Session};
