//! Core diagnostic types.

use std::fmt;

use ffi_ir::SourceLocation;

use crate::ErrorCode;

/// How bad a diagnostic is.
///
/// Errors count towards the exit status. Warnings mark a declaration that
/// was left out of the bindings. Notes carry the context of the warning
/// they follow.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        })
    }
}

/// A place in a C/C++ source file, with what happened there.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub location: SourceLocation,
    pub message: String,
}

/// A diagnostic with everything needed to locate the offending declaration
/// without reading the generated output.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    /// The first label is where the problem is; any others add context.
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn error(code: ErrorCode) -> Self {
        Self::new(code, Severity::Error)
    }

    pub fn warning(code: ErrorCode) -> Self {
        Self::new(code, Severity::Warning)
    }

    /// The context a warning arose in.
    pub fn note(code: ErrorCode) -> Self {
        Self::new(code, Severity::Note)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Point at `location`. The front end does not locate every declaration;
    /// unknown locations are skipped rather than printed as `<unknown>`.
    pub fn with_label(mut self, location: &SourceLocation, message: impl Into<String>) -> Self {
        if location.is_known() {
            self.labels.push(Label {
                location: location.clone(),
                message: message.into(),
            });
        }
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn primary_location(&self) -> Option<&SourceLocation> {
        self.labels.first().map(|label| &label.location)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}
