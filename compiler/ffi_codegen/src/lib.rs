//! Code generation for ffic.
//!
//! Consumes the [`ModuleContents`](ffi_ir::ModuleContents) of one source
//! file and produces host-language text:
//!
//! ```text
//! ModuleContents + NameResolver
//!        ↓
//!   layout         (natural struct layout for a C data model)
//!        ↓
//!   haskell        (foreign imports, records, newtypes, Storable)
//!        ↓
//!   GeneratedModule (module name, relative path, text)
//! ```

mod context;
pub mod haskell;
pub mod layout;

pub use context::CodegenContext;
pub use haskell::{generate_module, haskell_keywords, GeneratedModule, HaskellOptions};
pub use layout::{align_up, natural_layout, Layout, LayoutContext, StructLayout, TargetLayout};
