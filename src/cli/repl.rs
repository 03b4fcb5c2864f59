//! Line loop connecting a terminal to an input source and a renderer

use crate::output::{HumanFormatter, JsonlFormatter, LogEntry, Severity};
use crate::shell::{Outcome, Terminal};
use std::io::{self, BufRead, Write};
use termcolor::WriteColor;
use tracing::debug;

/// How buffer entries are written out after each line
pub enum Renderer {
    Human(HumanFormatter),
    Jsonl(JsonlFormatter),
}

impl Renderer {
    fn render<'a, W: WriteColor>(
        &self,
        out: &mut W,
        entries: impl IntoIterator<Item = &'a LogEntry>,
    ) -> io::Result<()> {
        match self {
            Renderer::Human(formatter) => formatter.write(out, entries),
            Renderer::Jsonl(formatter) => out.write_all(formatter.format(entries).as_bytes()),
        }
    }
}

/// Counts gathered over one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Non-empty lines executed
    pub lines: u64,
    /// Lines that failed
    pub failed: u64,
    /// Whether the run stopped because of `quit`
    pub quit: bool,
}

/// A terminal plus the writer its output is rendered to
pub struct Session<W: WriteColor> {
    terminal: Terminal,
    renderer: Renderer,
    out: W,
    prompt: String,
}

impl<W: WriteColor> Session<W> {
    pub fn new(terminal: Terminal, renderer: Renderer, out: W, prompt: impl Into<String>) -> Self {
        Session {
            terminal,
            renderer,
            out,
            prompt: prompt.into(),
        }
    }

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    /// Execute one line and render whatever it appended
    pub fn run_line(&mut self, line: &str) -> io::Result<Outcome> {
        let mark = self.terminal.buffer().mark();
        let outcome = self.terminal.execute(line);
        self.renderer
            .render(&mut self.out, self.terminal.buffer().entries_since(mark))?;
        self.out.flush()?;
        Ok(outcome)
    }

    /// Execute each line in order, stopping early on `quit`
    pub fn run_script(&mut self, lines: &[String]) -> io::Result<RunSummary> {
        let mut summary = RunSummary::default();
        for line in lines {
            self.step(line, &mut summary)?;
            if summary.quit {
                break;
            }
        }

        if let Renderer::Jsonl(formatter) = &self.renderer {
            let status = formatter.format_status(summary.lines, summary.failed, summary.quit);
            self.out.write_all(status.as_bytes())?;
            self.out.flush()?;
        }
        Ok(summary)
    }

    /// Read lines until end of input or `quit`
    ///
    /// A line that is not valid UTF-8 is reported as an error entry and
    /// skipped; the lines after it still run.
    pub fn run_interactive<R: BufRead>(
        &mut self,
        mut input: R,
        show_prompt: bool,
    ) -> io::Result<RunSummary> {
        let mut summary = RunSummary::default();
        let mut raw = Vec::new();

        loop {
            if show_prompt {
                write!(self.out, "{}", self.prompt)?;
                self.out.flush()?;
            }

            raw.clear();
            if input.read_until(b'\n', &mut raw)? == 0 {
                debug!("end of input");
                break;
            }
            if raw.last() == Some(&b'\n') {
                raw.pop();
                if raw.last() == Some(&b'\r') {
                    raw.pop();
                }
            }

            match std::str::from_utf8(&raw) {
                Ok(line) => self.step(line, &mut summary)?,
                Err(e) => self.reject_line(&e.to_string(), &mut summary)?,
            }
            if summary.quit {
                break;
            }
        }

        Ok(summary)
    }

    fn reject_line(&mut self, reason: &str, summary: &mut RunSummary) -> io::Result<()> {
        debug!(reason, "rejected input line");
        let mark = self.terminal.buffer().mark();
        self.terminal
            .report(Severity::Error, &format!("Input line is not valid UTF-8: {reason}"));
        self.renderer
            .render(&mut self.out, self.terminal.buffer().entries_since(mark))?;
        self.out.flush()?;
        summary.lines += 1;
        summary.failed += 1;
        Ok(())
    }

    fn step(&mut self, line: &str, summary: &mut RunSummary) -> io::Result<()> {
        let outcome = self.run_line(line)?;
        if outcome != Outcome::Empty {
            summary.lines += 1;
        }
        if outcome.is_failure() {
            summary.failed += 1;
        }
        summary.quit = self.terminal.quit_requested();
        Ok(())
    }
}
