#![forbid(unsafe_code)]

//! Output sink interface and the bounded text buffer behind the display
//!
//! All normal output and error text flows through [`OutputSink`]. Entries
//! carry a [`Severity`] so errors share the channel with regular output.

use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// Severity of one output entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Echo of a line the user typed
    Input,
    Message,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Input => "input",
            Severity::Message => "message",
            Severity::Error => "error",
        };
        f.write_str(name)
    }
}

/// One line in the display history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub severity: Severity,
    pub text: String,
}

/// Errors from `{N}` template substitution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("placeholder {{{index}}} has no matching argument ({available} supplied)")]
    MissingArgument { index: usize, available: usize },

    #[error("unbalanced brace at byte {0}")]
    UnbalancedBrace(usize),
}

/// Substitute positional `{N}` placeholders
///
/// `{{` and `}}` produce literal braces. Any other brace is an error.
pub fn format_template(template: &str, args: &[&dyn fmt::Display]) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '{' if chars.next_if(|&(_, next)| next == '{').is_some() => output.push('{'),
            '}' if chars.next_if(|&(_, next)| next == '}').is_some() => output.push('}'),
            '{' => {
                let mut index: Option<usize> = None;
                let mut closed = false;
                for (_, next) in chars.by_ref() {
                    if next == '}' {
                        closed = true;
                        break;
                    }
                    let digit = next
                        .to_digit(10)
                        .ok_or(TemplateError::UnbalancedBrace(position))?;
                    index = index
                        .unwrap_or(0)
                        .checked_mul(10)
                        .and_then(|value| value.checked_add(digit as usize));
                    if index.is_none() {
                        return Err(TemplateError::UnbalancedBrace(position));
                    }
                }
                let index = match (closed, index) {
                    (true, Some(index)) => index,
                    _ => return Err(TemplateError::UnbalancedBrace(position)),
                };
                let arg = args.get(index).ok_or(TemplateError::MissingArgument {
                    index,
                    available: args.len(),
                })?;
                output.push_str(&arg.to_string());
            }
            '}' => return Err(TemplateError::UnbalancedBrace(position)),
            other => output.push(other),
        }
    }

    Ok(output)
}

/// Sink receiving every line the shell writes
pub trait OutputSink {
    /// Append one line of text
    fn append_line(&mut self, severity: Severity, text: &str);

    /// Append one line built from a `{N}` template
    ///
    /// A broken template never fails the caller: the problem is logged and
    /// the literal template is appended instead.
    fn append_formatted(&mut self, severity: Severity, template: &str, args: &[&dyn fmt::Display]) {
        match format_template(template, args) {
            Ok(text) => self.append_line(severity, &text),
            Err(e) => {
                warn!(template, error = %e, "failed to format output template");
                self.append_line(severity, template);
            }
        }
    }
}

/// Bounded display history
///
/// When full, the oldest entry is dropped. Every append advances a sequence
/// number, which lets a renderer pick up only what was added since a mark.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    appended: u64,
}

impl TextBuffer {
    /// Creates an empty buffer holding at most `capacity` entries
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        TextBuffer {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            appended: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries currently held, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Sequence number of the next append; use as a mark for `entries_since`
    pub fn mark(&self) -> u64 {
        self.appended
    }

    /// Entries appended after `mark` that are still held
    pub fn entries_since(&self, mark: u64) -> impl Iterator<Item = &LogEntry> {
        let newer = self.appended.saturating_sub(mark);
        let held = self.entries.len() as u64;
        let skip = held.saturating_sub(newer) as usize;
        self.entries.iter().skip(skip)
    }

    /// Most recent error entry still held
    pub fn last_error(&self) -> Option<&LogEntry> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.severity == Severity::Error)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        TextBuffer::new(512)
    }
}

impl OutputSink for TextBuffer {
    fn append_line(&mut self, severity: Severity, text: &str) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            severity,
            text: text.to_string(),
        });
        self.appended += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(buffer: &TextBuffer) -> Vec<&str> {
        buffer.entries().map(|entry| entry.text.as_str()).collect()
    }

    #[test]
    fn test_format_template_positional() {
        let name = "PRINT";
        let help = "Outputs message";
        let text = format_template("{0}: {1} ({0})", &[&name, &help]).unwrap();
        assert_eq!(text, "PRINT: Outputs message (PRINT)");
    }

    #[test]
    fn test_format_template_multi_digit_index_and_unicode() {
        let args: Vec<String> = (0..12).map(|n| format!("a{n}")).collect();
        let refs: Vec<&dyn fmt::Display> = args.iter().map(|a| a as &dyn fmt::Display).collect();
        let text = format_template("é {11} ü {0}", &refs).unwrap();
        assert_eq!(text, "é a11 ü a0");
    }

    #[test]
    fn test_format_template_escaped_braces() {
        let text = format_template("{{literal}} {0}", &[&7]).unwrap();
        assert_eq!(text, "{literal} 7");
    }

    #[test]
    fn test_format_template_errors() {
        assert_eq!(
            format_template("{2}", &[&1]),
            Err(TemplateError::MissingArgument {
                index: 2,
                available: 1
            })
        );
        assert_eq!(
            format_template("oops {", &[]),
            Err(TemplateError::UnbalancedBrace(5))
        );
        assert_eq!(
            format_template("{name}", &[]),
            Err(TemplateError::UnbalancedBrace(0))
        );
        assert_eq!(
            format_template("a {} b", &[&1]),
            Err(TemplateError::UnbalancedBrace(2))
        );
        assert_eq!(
            format_template("x {0", &[&1]),
            Err(TemplateError::UnbalancedBrace(2))
        );
        assert_eq!(
            format_template("stray }", &[]),
            Err(TemplateError::UnbalancedBrace(6))
        );
    }

    #[test]
    fn test_append_formatted_falls_back_to_literal_template() {
        let mut buffer = TextBuffer::new(8);
        buffer.append_formatted(Severity::Message, "{0} and {1}", &[&"one"]);
        assert_eq!(texts(&buffer), vec!["{0} and {1}"]);

        buffer.append_formatted(Severity::Message, "{0} and {1}", &[&"one", &"two"]);
        assert_eq!(texts(&buffer), vec!["{0} and {1}", "one and two"]);
    }

    #[test]
    fn test_buffer_drops_oldest_when_full() {
        let mut buffer = TextBuffer::new(2);
        buffer.append_line(Severity::Message, "a");
        buffer.append_line(Severity::Message, "b");
        buffer.append_line(Severity::Message, "c");
        assert_eq!(texts(&buffer), vec!["b", "c"]);
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.mark(), 3);
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let mut buffer = TextBuffer::new(0);
        buffer.append_line(Severity::Message, "kept");
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(texts(&buffer), vec!["kept"]);
    }

    #[test]
    fn test_entries_since_mark() {
        let mut buffer = TextBuffer::new(3);
        buffer.append_line(Severity::Message, "old");
        let mark = buffer.mark();
        buffer.append_line(Severity::Message, "new1");
        buffer.append_line(Severity::Error, "new2");

        let since: Vec<&str> = buffer
            .entries_since(mark)
            .map(|entry| entry.text.as_str())
            .collect();
        assert_eq!(since, vec!["new1", "new2"]);

        // More appends than capacity: only what is still held comes back
        let mark = buffer.mark();
        for text in ["w", "x", "y", "z"] {
            buffer.append_line(Severity::Message, text);
        }
        let since: Vec<&str> = buffer
            .entries_since(mark)
            .map(|entry| entry.text.as_str())
            .collect();
        assert_eq!(since, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_entries_since_after_clear() {
        let mut buffer = TextBuffer::new(4);
        buffer.append_line(Severity::Message, "a");
        let mark = buffer.mark();
        buffer.append_line(Severity::Message, "b");
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.entries_since(mark).count(), 0);
    }

    #[test]
    fn test_last_error() {
        let mut buffer = TextBuffer::new(4);
        assert!(buffer.last_error().is_none());
        buffer.append_line(Severity::Error, "first");
        buffer.append_line(Severity::Message, "ok");
        buffer.append_line(Severity::Error, "second");
        buffer.append_line(Severity::Message, "ok again");
        assert_eq!(buffer.last_error().map(|e| e.text.as_str()), Some("second"));
    }
}
