//! Rendering of C types as Haskell types.

use std::collections::BTreeSet;

use ffi_ir::{CType, FunctionType};
use ffi_stack::with_stack;

use super::scalar::scalar_name;
use crate::context::CodegenContext;

impl CodegenContext<'_> {
    /// Render `ty`. With `paren`, pointer and function types are wrapped in
    /// parentheses (`CString` never is).
    pub fn render_type(&mut self, ty: &CType, paren: bool) -> String {
        let mut out = String::new();
        self.write_type(&mut out, ty, paren);
        out
    }

    /// Render `ty` as a record field type. Type variables introduced for
    /// `void*` are quantified in place, which needs `RankNTypes`; without it
    /// (or when a `Storable` instance has to read the field) `void*` is
    /// `Ptr ()`.
    pub fn render_field_type(&mut self, ty: &CType) -> String {
        let saved = self.any_ptr;
        self.any_ptr = self.options.void_ptr_as_any_ptr
            && self.options.allow_rank_n_types
            && !self.options.storable_instances;
        self.reset_fresh();
        let body = self.render_type(ty, false);
        let count = self.reset_fresh();
        self.any_ptr = saved;
        if count == 0 {
            return body;
        }
        let mut out = String::from("forall ");
        for _ in 0..count {
            out.push_str(&self.fresh_var());
            out.push(' ');
        }
        self.reset_fresh();
        out.push_str(". ");
        out.push_str(&body);
        out
    }

    fn write_type(&mut self, out: &mut String, ty: &CType, paren: bool) {
        let paren = paren
            && matches!(ty, CType::Pointer { .. } | CType::Function(_))
            && !ty.is_c_string();
        if paren {
            out.push('(');
        }
        with_stack(|| match ty {
            CType::Scalar(scalar) => out.push_str(scalar_name(scalar)),
            CType::Opaque { name } => {
                let name = self.type_name(name);
                out.push_str(&name);
            }
            CType::Pointer { pointee } => self.write_pointer(out, pointee),
            CType::Function(function) => self.write_function(out, function),
        });
        if paren {
            out.push(')');
        }
    }

    fn write_pointer(&mut self, out: &mut String, pointee: &CType) {
        if pointee.is_plain_char() {
            out.push_str("CString");
            return;
        }
        out.push_str(if pointee.is_function() {
            "FunPtr "
        } else {
            "Ptr "
        });
        if pointee.is_void() && self.any_ptr {
            let var = self.fresh_var();
            out.push_str(&var);
        } else {
            self.write_type(out, pointee, true);
        }
    }

    fn write_function(&mut self, out: &mut String, function: &FunctionType) {
        for param in &function.params {
            self.write_type(out, &param.ty, false);
            out.push_str(" -> ");
        }
        out.push_str("IO ");
        self.write_type(out, &function.return_type, true);
    }
}

/// Names of opaque types referenced anywhere in `ty`.
pub fn collect_opaque<'t>(ty: &'t CType, names: &mut BTreeSet<&'t str>) {
    with_stack(|| match ty {
        CType::Scalar(_) => {}
        CType::Opaque { name } => {
            names.insert(name.as_str());
        }
        CType::Pointer { pointee } => collect_opaque(pointee, names),
        CType::Function(function) => {
            collect_opaque(&function.return_type, names);
            for param in &function.params {
                collect_opaque(&param.ty, names);
            }
        }
    });
}
