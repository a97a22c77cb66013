//! Per-file diagnostic collection.
//!
//! Diagnostics are kept in report order: a skipped declaration's warning is
//! immediately followed by the notes describing its enclosing context, and
//! reordering would separate them.

use rustc_hash::FxHashSet;

use crate::{Diagnostic, Severity};

/// Configuration for diagnostic collection.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors and warnings kept (0 = unlimited). Notes
    /// attached to a dropped warning are dropped with it.
    pub limit: usize,
    /// Drop an error or warning identical to one already queued. Off by
    /// default: unlabelled warnings of different declarations can be equal.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            limit: 0,
            deduplicate: false,
        }
    }
}

/// Collects diagnostics for one file.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<Diagnostic>,
    error_count: usize,
    warning_count: usize,
    /// Whether the last error/warning was dropped, so its notes go too.
    dropping_notes: bool,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            config,
            ..Self::default()
        }
    }

    /// Queue a diagnostic. Returns `false` if it was filtered.
    pub fn push(&mut self, diag: Diagnostic) -> bool {
        if diag.severity == Severity::Note {
            if self.dropping_notes {
                return false;
            }
            self.diagnostics.push(diag);
            return true;
        }

        let reported = self.error_count + self.warning_count;
        let over_limit = self.config.limit > 0 && reported >= self.config.limit;
        let duplicate = self.config.deduplicate && self.seen.contains(&diag);
        if over_limit || duplicate {
            self.dropping_notes = true;
            return false;
        }
        self.dropping_notes = false;

        match diag.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Note => {}
        }
        if self.config.deduplicate {
            self.seen.insert(diag.clone());
        }
        self.diagnostics.push(diag);
        true
    }

    /// Queue several diagnostics in order.
    pub fn extend(&mut self, diags: impl IntoIterator<Item = Diagnostic>) {
        for diag in diags {
            self.push(diag);
        }
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Queued diagnostics without clearing the queue.
    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Take all queued diagnostics and reset the queue.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        self.seen.clear();
        self.error_count = 0;
        self.warning_count = 0;
        self.dropping_notes = false;
        std::mem::take(&mut self.diagnostics)
    }
}

#[cfg(test)]
mod tests;
