//! Identifier conversion and name resolution.
//!
//! C identifiers are rewritten into host identifiers in three layers:
//!
//! - [`case`]: splitting an identifier into words and re-casing them
//! - [`converter`]: configurable converters (affixes plus a case policy)
//!   flattened into an ordered [`ConverterChain`]
//! - [`resolver`]: memoized, per-kind resolution with reverse maps, scanned
//!   for clashes once a module is complete ([`clash`])
//!
//! Module names share one table for the whole run ([`ModuleNameTable`]);
//! every other kind is resolved by a [`NameResolver`] owned by one module.

pub mod case;
pub mod clash;
pub mod converter;
pub mod resolver;

pub use case::{NameCase, NameVariant};
pub use clash::{ClashReason, KeywordSet, NameClash};
pub use converter::{Affixes, ConverterBundle, ConverterChain, ConverterError, NameConverter};
pub use resolver::{
    ModuleNameTable, NameKind, NameOverrides, NameResolver, Namespace, NamespacePolicy,
};
