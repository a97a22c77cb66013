//! Terminal output.
//!
//! A warning and the context notes that follow it form one block; notes are
//! indented under their warning and blocks are separated by a blank line:
//!
//! ```text
//! warning[E2002]: reference type `int &` cannot be bound
//!   --> api.h:12:5: in parameter `out`
//!   note[E2008]: in declaration of function `get`
//!
//! summary: 1 warning
//! ```

use std::io::{self, Write};

use crate::{Diagnostic, Severity};

use super::DiagnosticEmitter;

/// When to color output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colors when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// For `Auto`, `is_tty` decides; it is ignored otherwise.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Clone, Copy)]
enum Style {
    Severity(Severity),
    Location,
    Help,
    Strong,
}

impl Style {
    fn ansi(self) -> &'static str {
        match self {
            Style::Severity(Severity::Error) => "\x1b[1;31m",
            Style::Severity(Severity::Warning) => "\x1b[1;33m",
            Style::Severity(Severity::Note) => "\x1b[1;36m",
            Style::Location => "\x1b[1;34m",
            Style::Help => "\x1b[1;32m",
            Style::Strong => "\x1b[1m",
        }
    }
}

const RESET: &str = "\x1b[0m";

/// Writes diagnostics as text, optionally with ANSI colors.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    /// Something was written; the next block needs a separating blank line.
    started: bool,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            started: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn paint(&mut self, style: Style, text: &str) {
        let _ = if self.colors {
            write!(self.writer, "{}{text}{RESET}", style.ansi())
        } else {
            write!(self.writer, "{text}")
        };
    }

    fn start_block(&mut self) {
        if self.started {
            let _ = writeln!(self.writer);
        }
        self.started = true;
    }
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let is_context = diagnostic.severity == Severity::Note && self.started;
        let indent = if is_context {
            let _ = write!(self.writer, "  ");
            "    "
        } else {
            self.start_block();
            "  "
        };

        self.paint(
            Style::Severity(diagnostic.severity),
            &format!("{}[{}]", diagnostic.severity, diagnostic.code),
        );
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for (i, label) in diagnostic.labels.iter().enumerate() {
            let arrow = if i == 0 { "-->" } else { ":::" };
            let _ = write!(self.writer, "{indent}");
            self.paint(Style::Location, &format!("{arrow} {}", label.location));
            let _ = writeln!(self.writer, ": {}", label.message);
        }
        for note in &diagnostic.notes {
            let _ = write!(self.writer, "{indent}= ");
            self.paint(Style::Strong, "note");
            let _ = writeln!(self.writer, ": {note}");
        }
        for suggestion in &diagnostic.suggestions {
            let _ = write!(self.writer, "{indent}= ");
            self.paint(Style::Help, "help");
            let _ = writeln!(self.writer, ": {suggestion}");
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        let parts: Vec<String> = [(error_count, "error"), (warning_count, "warning")]
            .into_iter()
            .filter(|(count, _)| *count > 0)
            .map(|(count, noun)| {
                let plural = if count == 1 { "" } else { "s" };
                format!("{count} {noun}{plural}")
            })
            .collect();
        if parts.is_empty() {
            return;
        }
        self.start_block();
        self.paint(Style::Strong, "summary");
        let _ = writeln!(self.writer, ": {}", parts.join(", "));
    }
}
