#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per buffer entry, in append order:
//!
//! ```text
//! {"type":"entry","severity":"message","text":"a b c"}
//! ```
//!
//! Scripted runs finish with one status record:
//!
//! ```text
//! {"type":"status","lines":3,"failed":1,"quit":false}
//! ```

use super::buffer::{LogEntry, Severity};
use serde::Serialize;

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format entries as one JSON object per line
    pub fn format<'a>(&self, entries: impl IntoIterator<Item = &'a LogEntry>) -> String {
        let mut output = String::new();
        for entry in entries {
            let record = EntryRecord {
                record_type: "entry",
                severity: entry.severity,
                text: &entry.text,
            };
            if let Ok(json) = serde_json::to_string(&record) {
                output.push_str(&json);
                output.push('\n');
            }
        }
        output
    }

    /// Format the closing status record of a scripted run
    pub fn format_status(&self, lines: u64, failed: u64, quit: bool) -> String {
        let record = StatusRecord {
            record_type: "status",
            lines,
            failed,
            quit,
        };
        match serde_json::to_string(&record) {
            Ok(json) => format!("{}\n", json),
            Err(_) => String::new(),
        }
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
struct EntryRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    severity: Severity,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct StatusRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    lines: u64,
    failed: u64,
    quit: bool,
}
