//! Translation of front-end declarations into the closed type model.
//!
//! - [`TypeTranslator`] maps one [`SourceType`](ffi_ir::SourceType) to a
//!   [`CType`](ffi_ir::CType), failing with a [`Rejection`] when the type
//!   has no FFI form.
//! - [`translate_unit`] walks the declarations of one translation unit,
//!   applies the origin and linkage filters and collects the survivors into
//!   a [`ModuleContents`](ffi_ir::ModuleContents).
//!
//! A rejected declaration never aborts the unit: it is reported as a warning
//! followed by notes naming each enclosing context, and skipped.

mod context;
mod error;
mod policy;
mod types;
mod visit;

pub use context::ContextKind;
pub use error::{ContextNote, Rejection, TranslateError};
pub use policy::TranslatePolicy;
pub use types::TypeTranslator;
pub use visit::translate_unit;
