//! `Storable` instances from the natural layout.
//!
//! Offsets assume every struct is laid out naturally; the driver warns once
//! per run that packed structs get wrong instances.

use ffi_diagnostic::{Diagnostic, ErrorCode};
use ffi_ir::{CType, ModuleContents, Structure};

use crate::context::CodegenContext;
use crate::layout::{Layout, LayoutContext};

pub(super) fn gen_struct_instance(
    cx: &mut CodegenContext<'_>,
    name: &str,
    type_name: &str,
    ctor: &str,
    structure: &Structure,
    contents: &ModuleContents,
) {
    let mut layouts = LayoutContext::new(cx.options.target, &contents.tags);
    let Some(layout) = layouts.struct_layout(name) else {
        let culprit = structure
            .fields
            .iter()
            .find(|field| layouts.type_layout(&field.ty).is_none());
        let mut diag = Diagnostic::warning(ErrorCode::E4002).with_message(format!(
            "cannot compute the layout of struct `{name}`; no Storable instance is generated"
        ));
        if let Some(field) = culprit {
            diag = diag.with_note(format!(
                "field `{}` has type `{}`, whose size is unknown",
                field.name, field.ty
            ));
        }
        cx.report(diag);
        return;
    };

    cx.writeln(&format!("instance Storable {type_name} where"));
    cx.indent();
    cx.writeln(&format!("sizeOf _ = {}", layout.size));
    cx.writeln(&format!("alignment _ = {}", layout.align));
    if layout.offsets.is_empty() {
        cx.writeln(&format!("peek _ = pure {ctor}"));
        cx.writeln("poke _ _ = pure ()");
    } else {
        cx.writeln(&format!("peek p = {ctor}"));
        cx.indent();
        for (i, offset) in layout.offsets.iter().enumerate() {
            let op = if i == 0 { "<$>" } else { "<*>" };
            cx.writeln(&format!("{op} peekByteOff p {offset}"));
        }
        cx.dedent();
        let binders: Vec<String> = (0..layout.offsets.len()).map(|i| format!("f{i}")).collect();
        cx.writeln(&format!("poke p ({ctor} {}) = do", binders.join(" ")));
        cx.indent();
        for (offset, binder) in layout.offsets.iter().zip(&binders) {
            cx.writeln(&format!("pokeByteOff p {offset} {binder}"));
        }
        cx.dedent();
    }
    cx.dedent();
    cx.newline();
}

/// Enums are stored as their underlying integer.
pub(super) fn gen_enum_instance(
    cx: &mut CodegenContext<'_>,
    type_name: &str,
    ctor: &str,
    underlying: &CType,
) {
    let layout = underlying
        .as_scalar()
        .and_then(|scalar| cx.options.target.scalar(scalar))
        .unwrap_or(Layout::natural(4));
    cx.writeln(&format!("instance Storable {type_name} where"));
    cx.indent();
    cx.writeln(&format!("sizeOf _ = {}", layout.size));
    cx.writeln(&format!("alignment _ = {}", layout.align));
    cx.writeln(&format!("peek p = {ctor} <$> peek (castPtr p)"));
    cx.writeln(&format!("poke p ({ctor} v) = poke (castPtr p) v"));
    cx.dedent();
    cx.newline();
}
