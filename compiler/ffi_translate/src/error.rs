//! Translation failures.

use ffi_diagnostic::{Diagnostic, ErrorCode};
use ffi_ir::{CallConv, CType, SourceLocation};

use crate::ContextKind;

/// Why a type has no FFI form.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TranslateError {
    #[error(
        "type `{name}` is an OpenCL type, a platform extension, or a compiler extension"
    )]
    UnsupportedBuiltin { name: String },

    #[error("C++ references (lvalue, rvalue) are not supported")]
    UnsupportedReference,

    #[error("function pointer does not have a C calling convention (found `{}`)", .conv.name())]
    UnsupportedCallConv { conv: CallConv },

    #[error("type construct `{description}` is not recognized; please report this as a bug")]
    UnknownTypeConstruct { description: String },

    #[error(
        "type `{ty}` is not marshallable (marshallable types: integers, floating points, \
         and pointers)"
    )]
    NotMarshallable { ty: CType },
}

impl TranslateError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TranslateError::UnsupportedBuiltin { .. } => ErrorCode::E2001,
            TranslateError::UnsupportedReference => ErrorCode::E2002,
            TranslateError::UnsupportedCallConv { .. } => ErrorCode::E2003,
            TranslateError::UnknownTypeConstruct { .. } => ErrorCode::E2004,
            TranslateError::NotMarshallable { .. } => ErrorCode::E2005,
        }
    }
}

/// One enclosing context recorded while a rejection propagates.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContextNote {
    pub kind: ContextKind,
    pub location: SourceLocation,
}

/// A failed translation, with the contexts it propagated through.
#[derive(Clone, Debug, Eq, PartialEq)]
#[must_use = "a rejection must be reported or propagated"]
pub struct Rejection {
    pub error: TranslateError,
    /// Location of the declaration being translated when the failure hit.
    pub location: SourceLocation,
    /// Enclosing contexts, innermost first.
    pub context: Vec<ContextNote>,
}

impl Rejection {
    pub fn new(error: TranslateError, location: &SourceLocation) -> Self {
        Rejection {
            error,
            location: location.clone(),
            context: Vec::new(),
        }
    }

    /// Record that the failure happened inside `kind`.
    pub fn context(mut self, kind: ContextKind, location: &SourceLocation) -> Self {
        self.context.push(ContextNote {
            kind,
            location: location.clone(),
        });
        self
    }

    /// One warning for the failure, then one note per context.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        let mut diags = Vec::with_capacity(self.context.len() + 1);
        diags.push(
            Diagnostic::warning(self.error.code())
                .with_message(format!("declaration is ignored: {}", self.error))
                .with_label(&self.location, "declared here"),
        );
        for note in self.context {
            diags.push(
                Diagnostic::note(ErrorCode::E2008)
                    .with_message(note.kind.describe())
                    .with_label(&note.location, "in this declaration"),
            );
        }
        diags
    }
}
