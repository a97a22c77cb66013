//! Diagnostic emitters.
//!
//! The driver reports through [`DiagnosticEmitter`] so tests can capture
//! output in memory.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit in order; context notes rely on following their warning.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    fn flush(&mut self);

    /// Totals line printed once at the end of a run. Nothing is printed when
    /// both counts are zero.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}
