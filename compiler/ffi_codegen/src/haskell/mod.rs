//! Haskell FFI module rendering.
//!
//! One C source file becomes one module `<Library>.LowLevel.<Module>`:
//!
//! ```text
//! pragmas, module header, Foreign.* imports
//!   ↓
//! `data T` for every referenced type the module does not define
//!   ↓
//! tags (enums as newtype + pattern synonyms, structs as records,
//!       optionally with Storable instances)
//!   ↓
//! entities (`foreign import ccall`)
//! ```
//!
//! Every identifier goes through the module's [`NameResolver`] so clashes can
//! be scanned once the module is done.

mod keywords;
mod scalar;
mod storable;
mod types;

use std::collections::BTreeSet;
use std::path::PathBuf;

use ffi_diagnostic::DiagnosticQueue;
use ffi_ir::{CType, Enumeration, ModuleContents, Structure, TagType};
use ffi_names::NameResolver;
use tracing::debug;

use crate::context::CodegenContext;
use crate::layout::TargetLayout;

pub use keywords::{haskell_keywords, HASKELL_KEYWORDS};
pub use scalar::scalar_name;
pub use types::collect_opaque;

/// Options that shape the generated Haskell.
#[derive(Clone, Debug, Eq, PartialEq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "independent switches mirrored from the configuration file"
)]
pub struct HaskellOptions {
    pub library_name: String,
    /// Render `void*` as `Ptr a` for a fresh `a` instead of `Ptr ()`.
    pub void_ptr_as_any_ptr: bool,
    /// Emit `RankNTypes` and quantify `void*` record fields in place.
    pub allow_rank_n_types: bool,
    /// Emit `Storable` instances computed from the natural layout.
    pub storable_instances: bool,
    pub target: TargetLayout,
}

impl Default for HaskellOptions {
    fn default() -> Self {
        HaskellOptions {
            library_name: "Library".to_string(),
            void_ptr_as_any_ptr: true,
            allow_rank_n_types: true,
            storable_instances: false,
            target: TargetLayout::default(),
        }
    }
}

/// A rendered module, not yet written.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedModule {
    /// Fully qualified module name, e.g. `Library.LowLevel.Foo`.
    pub module: String,
    /// Path relative to the output directory.
    pub path: PathBuf,
    pub text: String,
}

const PRAGMAS: &[&str] = &[
    "{-# LANGUAGE EmptyDataDecls #-}",
    "{-# LANGUAGE ForeignFunctionInterface #-}",
    "{-# LANGUAGE PatternSynonyms #-}",
];

const OPTIONS: &[&str] = &[
    "{-# OPTIONS_GHC -Wno-missing-pattern-synonym-signatures #-}",
    "{-# OPTIONS_GHC -Wno-unused-imports #-}",
];

const IMPORTS: &[&str] = &[
    "Foreign.C.Types",
    "Foreign.C.String",
    "Foreign.Storable",
    "Foreign.Ptr",
    "Foreign.Marshal.Alloc",
    "Data.Int",
    "Data.Word",
];

/// Render `contents` as the module `module_name` (already resolved).
///
/// Names are resolved through `resolver`; the caller scans it for clashes
/// afterwards. Conversion failures and structs without a layout are reported
/// to `queue`.
pub fn generate_module(
    module_name: &str,
    contents: &ModuleContents,
    resolver: &mut NameResolver,
    options: &HaskellOptions,
    queue: &mut DiagnosticQueue,
) -> GeneratedModule {
    debug!(
        module = module_name,
        tags = contents.tags.len(),
        entities = contents.entities.len(),
        "generating Haskell module"
    );
    let mut cx = CodegenContext::new(options, resolver, queue);
    let module = format!("{}.LowLevel.{module_name}", options.library_name);

    for pragma in PRAGMAS {
        cx.writeln(pragma);
    }
    if options.allow_rank_n_types {
        cx.writeln("{-# LANGUAGE RankNTypes #-}");
    }
    for option in OPTIONS {
        cx.writeln(option);
    }
    cx.writeln(&format!("module {module} where"));
    cx.newline();
    for import in IMPORTS {
        cx.writeln(&format!("import {import}"));
    }
    cx.newline();
    if !contents.imports.is_empty() {
        for import in &contents.imports {
            cx.writeln(&format!("import {import}"));
        }
        cx.newline();
    }

    gen_opaque_decls(&mut cx, contents);
    for (name, tag) in &contents.tags {
        match tag {
            TagType::Enumeration(enumeration) => gen_enum(&mut cx, name, enumeration),
            TagType::Structure(structure) => gen_struct(&mut cx, name, structure, contents),
        }
    }
    for (name, ty) in &contents.entities {
        gen_entity(&mut cx, name, ty);
    }

    let text = cx.take_output();
    let path = PathBuf::from(&options.library_name)
        .join("LowLevel")
        .join(format!("{module_name}.hs"));
    GeneratedModule { module, path, text }
}

/// `data T` for each opaque type referenced but not defined here.
fn gen_opaque_decls(cx: &mut CodegenContext<'_>, contents: &ModuleContents) {
    let mut names = BTreeSet::new();
    for ty in contents.entities.values() {
        collect_opaque(ty, &mut names);
    }
    for tag in contents.tags.values() {
        match tag {
            TagType::Structure(structure) => {
                for field in &structure.fields {
                    collect_opaque(&field.ty, &mut names);
                }
            }
            TagType::Enumeration(enumeration) => {
                collect_opaque(&enumeration.underlying_type, &mut names);
            }
        }
    }
    names.retain(|name| !name.is_empty() && !contents.tags.contains_key(*name));
    if names.is_empty() {
        return;
    }
    for name in names {
        let name = cx.type_name(name);
        cx.writeln(&format!("data {name}"));
    }
    cx.newline();
}

fn gen_enum(cx: &mut CodegenContext<'_>, name: &str, enumeration: &Enumeration) {
    let type_name = cx.type_name(name);
    let ctor = cx.ctor_name("", name);
    // The accessor is a top-level binding, so it shares the variable namespace.
    let accessor = cx.variable_name(name, &format!("unwrap_{name}"));
    let underlying = cx.render_type(&enumeration.underlying_type, false);
    cx.writeln(&format!("newtype {type_name} = {ctor} {{ {accessor} :: {underlying} }}"));
    for item in &enumeration.values {
        let pattern = cx.ctor_name(name, &item.name);
        let value = if item.value < 0 {
            format!("({})", item.value)
        } else {
            item.value.to_string()
        };
        cx.writeln(&format!("pattern {pattern} = {ctor} {value}"));
    }
    cx.newline();
    if cx.options.storable_instances {
        storable::gen_enum_instance(cx, &type_name, &ctor, &enumeration.underlying_type);
    }
}

fn gen_struct(
    cx: &mut CodegenContext<'_>,
    name: &str,
    structure: &Structure,
    contents: &ModuleContents,
) {
    let type_name = cx.type_name(name);
    let ctor = cx.ctor_name("", name);
    cx.writeln(&format!("data {type_name} = {ctor}"));
    if !structure.fields.is_empty() {
        cx.indent();
        for (i, field) in structure.fields.iter().enumerate() {
            let field_name = cx.variable_name(name, &field.name);
            let ty = cx.render_field_type(&field.ty);
            let lead = if i == 0 { '{' } else { ',' };
            cx.writeln(&format!("{lead} {field_name} :: {ty}"));
        }
        cx.writeln("}");
        cx.dedent();
    }
    cx.newline();
    if cx.options.storable_instances {
        storable::gen_struct_instance(cx, name, &type_name, &ctor, structure, contents);
    }
}

/// Functions are imported by address of code, variables by address of data.
fn gen_entity(cx: &mut CodegenContext<'_>, name: &str, ty: &CType) {
    let hs_name = cx.variable_name("", name);
    cx.any_ptr = cx.options.void_ptr_as_any_ptr;
    cx.reset_fresh();
    let line = if ty.is_function() {
        let ty = cx.render_type(ty, false);
        format!("foreign import ccall \"{name}\" {hs_name} :: {ty}")
    } else {
        let ty = cx.render_type(ty, true);
        format!("foreign import ccall \"&{name}\" {hs_name} :: Ptr {ty}")
    };
    cx.reset_fresh();
    cx.writeln(&line);
}
