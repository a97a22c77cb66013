//! Diagnostic system for the binding generator.
//!
//! Every user-visible problem is a [`Diagnostic`]:
//! - an error code for searchability (`ffic --explain=E2003`)
//! - a severity: declarations that cannot be bound are *warnings* (the run
//!   continues without them), the context they were found in is reported as
//!   *notes*, and only file-level failures and name clashes are *errors*
//! - a message plus labelled source locations
//!
//! Diagnostics are collected per file in a [`DiagnosticQueue`] and rendered
//! by an emitter once the file has been processed.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod queue;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use queue::DiagnosticQueue;
