//! Intermediate representations for the ffic binding generator.
//!
//! Two families of types live here:
//!
//! - **Source IR** ([`source`]): the declaration tree handed over by the
//!   external C/C++ front end. Every type node is a closed [`SourceType`]
//!   variant so the translator can match on it exhaustively.
//! - **Type model** ([`CType`], [`ScalarType`], [`ModuleContents`]): the
//!   closed, owned-tree representation of translatable types that the
//!   translator produces and the code generator consumes.
//!
//! All types derive `Clone, Eq, Hash, Debug` and serde traits so module
//! contents can be dumped for inspection.

mod ctype;
mod location;
mod module;
mod scalar;
mod scoped_name;
pub mod source;

pub use ctype::{CType, FunctionType};
pub use location::SourceLocation;
pub use module::{Entity, Enumeration, Enumerator, ModuleContents, Structure, TagType};
pub use scalar::{ScalarType, Qualifier, Signedness, Width};
pub use scoped_name::ScopedName;
pub use source::{
    BuiltinKind, CallConv, Decl, DeclKind, DeclOrigin, EnumeratorDecl, FieldDecl, Linkage,
    ParamDecl, SourceType, TranslationUnit, TypedefTarget,
};
