//! Output sink, display buffer and formatters

pub mod buffer;
pub mod human;
pub mod jsonl;

pub use buffer::{LogEntry, OutputSink, Severity, TemplateError, TextBuffer, format_template};
pub use human::HumanFormatter;
pub use jsonl::JsonlFormatter;
