#![forbid(unsafe_code)]

//! cmdterm: an embeddable single-line command shell
//!
//! Commands are declared by providers and registered once at startup. Each
//! input line is tokenized into typed arguments, checked against the
//! command's accepted argument count and handed to its handler. Output and
//! errors share one sink, so a bad line never disturbs the next one.

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;
pub mod shell;
