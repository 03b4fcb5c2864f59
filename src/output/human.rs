#![forbid(unsafe_code)]

//! Human-readable rendering of buffer entries with colorization support

use super::buffer::{LogEntry, Severity};
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// Human-readable output formatter
///
/// Errors are bold red. Echoed input is dimmed and prefixed with the
/// prompt. Plain messages are written as-is. Whether color is emitted at
/// all is up to the writer passed to [`HumanFormatter::write`].
pub struct HumanFormatter {
    prompt: String,
}

impl HumanFormatter {
    /// Creates a new HumanFormatter that prefixes echoed input with `prompt`
    pub fn new(prompt: impl Into<String>) -> Self {
        HumanFormatter {
            prompt: prompt.into(),
        }
    }

    /// Format entries as plain text, one line each
    pub fn format<'a>(&self, entries: impl IntoIterator<Item = &'a LogEntry>) -> String {
        let mut output = String::new();
        for entry in entries {
            output.push_str(&self.line_text(entry));
            output.push('\n');
        }
        output
    }

    /// Write entries to any color-capable writer
    pub fn write<'a, W: WriteColor>(
        &self,
        out: &mut W,
        entries: impl IntoIterator<Item = &'a LogEntry>,
    ) -> io::Result<()> {
        for entry in entries {
            match color_for(entry.severity) {
                Some(spec) => {
                    out.set_color(&spec)?;
                    write!(out, "{}", self.line_text(entry))?;
                    out.reset()?;
                    writeln!(out)?;
                }
                None => writeln!(out, "{}", self.line_text(entry))?,
            }
        }
        Ok(())
    }

    fn line_text(&self, entry: &LogEntry) -> String {
        match entry.severity {
            Severity::Input => format!("{}{}", self.prompt, entry.text),
            _ => entry.text.clone(),
        }
    }
}

fn color_for(severity: Severity) -> Option<ColorSpec> {
    let mut spec = ColorSpec::new();
    match severity {
        Severity::Message => return None,
        Severity::Input => spec.set_dimmed(true),
        Severity::Error => spec.set_fg(Some(Color::Red)).set_bold(true),
    };
    Some(spec)
}
