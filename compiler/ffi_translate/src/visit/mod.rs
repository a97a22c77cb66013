//! Declaration filtering and collection.
//!
//! Every top-level declaration passes three gates before it is translated:
//! origin (main file, or any non-system header for header-group files),
//! external formal linkage, and, for functions and variables, C language
//! linkage. Survivors are translated; a rejection skips just that
//! declaration.

use ffi_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};
use ffi_ir::{
    CType, Decl, DeclKind, DeclOrigin, Entity, EnumeratorDecl, Enumeration, Enumerator,
    FieldDecl, FunctionType, ModuleContents, ParamDecl, SourceLocation, SourceType, Structure,
    TagType, TranslationUnit, TypedefTarget,
};
use tracing::{debug, trace};

use crate::{ContextKind, Rejection, TranslatePolicy, TypeTranslator};

/// Translate every eligible declaration of `unit`.
///
/// Skipped declarations are reported to `diagnostics`; the returned module
/// holds everything that survived.
pub fn translate_unit(
    unit: &TranslationUnit,
    policy: &TranslatePolicy,
    diagnostics: &mut DiagnosticQueue,
) -> ModuleContents {
    debug!(file = %unit.file, decls = unit.decls.len(), "translating unit");
    let mut visitor = DeclVisitor {
        translator: TypeTranslator::new(policy),
        policy,
        diagnostics,
        module: ModuleContents::new(),
    };
    for decl in &unit.decls {
        visitor.visit(decl);
    }
    visitor.module
}

struct DeclVisitor<'a> {
    translator: TypeTranslator<'a>,
    policy: &'a TranslatePolicy,
    diagnostics: &'a mut DiagnosticQueue,
    module: ModuleContents,
}

impl DeclVisitor<'_> {
    fn visit(&mut self, decl: &Decl) {
        if !self.is_public(decl) || !self.has_external_linkage(decl) {
            return;
        }
        if decl.is_entity() && !self.has_c_linkage(decl) {
            return;
        }

        let result = match &decl.kind {
            DeclKind::Var { ty } => self.visit_var(decl, ty),
            DeclKind::Function {
                return_type,
                params,
            } => self.visit_function(decl, return_type, params),
            DeclKind::Enum {
                integer_type,
                enumerators,
            } => self.visit_enum(&decl.name, integer_type, enumerators, &decl.location),
            DeclKind::Struct { fields } => self.visit_struct(&decl.name, fields, &decl.location),
            DeclKind::Typedef { underlying } => self.visit_typedef(decl, underlying),
        };

        if let Err(rejection) = result {
            trace!(name = %decl.name, error = %rejection.error, "declaration skipped");
            self.diagnostics.extend(rejection.into_diagnostics());
        }
    }

    fn is_public(&self, decl: &Decl) -> bool {
        match decl.origin {
            DeclOrigin::MainFile => true,
            DeclOrigin::Header => self.policy.header_group,
            DeclOrigin::SystemHeader => false,
        }
    }

    fn has_external_linkage(&mut self, decl: &Decl) -> bool {
        if decl.linkage.external_formal {
            return true;
        }
        if self.policy.warn_no_external_formal_linkage {
            self.diagnostics.push(
                Diagnostic::warning(ErrorCode::E2006)
                    .with_message(format!(
                        "declaration for entity `{}` is ignored, because it does not have an \
                         external formal linkage",
                        decl.name
                    ))
                    .with_label(&decl.location, "declared here"),
            );
        }
        false
    }

    fn has_c_linkage(&mut self, decl: &Decl) -> bool {
        if decl.linkage.c_language || self.policy.assume_extern_c {
            return true;
        }
        if self.policy.warn_no_c_linkage {
            self.diagnostics.push(
                Diagnostic::warning(ErrorCode::E2007)
                    .with_message(format!(
                        "declaration for entity `{}` is ignored, because it does not have a \
                         C language linkage",
                        decl.name
                    ))
                    .with_label(&decl.location, "declared here")
                    .with_suggestion("declare it `extern \"C\"` or set `assume_extern_c`"),
            );
        }
        false
    }

    fn visit_var(&mut self, decl: &Decl, ty: &SourceType) -> Result<(), Rejection> {
        let ty = self
            .translator
            .translate_value(ty, &decl.location)
            .map_err(|r| {
                let var = ContextKind::Variable {
                    name: decl.name.clone(),
                };
                r.context(var, &decl.location)
            })?;
        self.add_entity(Entity::new(decl.name.clone(), ty));
        Ok(())
    }

    fn visit_function(
        &mut self,
        decl: &Decl,
        return_type: &SourceType,
        params: &[ParamDecl],
    ) -> Result<(), Rejection> {
        let abandon = |r: Rejection| {
            let func = ContextKind::Function {
                name: decl.name.clone(),
            };
            r.context(func, &decl.location)
        };

        let ret = self
            .translator
            .translate(return_type, &decl.location)
            .map_err(abandon)?;
        let mut entities = Vec::with_capacity(params.len());
        for (index, param) in params.iter().enumerate() {
            let location = if param.location.is_known() {
                &param.location
            } else {
                &decl.location
            };
            let ty = self
                .translator
                .translate_value(&param.ty, location)
                .map_err(|r| {
                    let param_ctx = ContextKind::Parameter {
                        name: param.name.clone(),
                        index,
                    };
                    abandon(r.context(param_ctx, location))
                })?;
            entities.push(Entity::new(param.name.clone(), ty));
        }

        let func = CType::Function(FunctionType::new(ret, entities));
        self.add_entity(Entity::new(decl.name.clone(), func));
        Ok(())
    }

    fn add_entity(&mut self, entity: Entity) {
        let name = entity.name.clone();
        if entity.ty.mentions_anonymous_tag() {
            trace!(%name, "anonymous tag in type, entity dropped");
            return;
        }
        if self.module.add_entity(entity) {
            trace!(%name, "entity added");
        } else {
            trace!(%name, "redeclaration ignored");
        }
    }

    /// `name` is empty for an anonymous enum without a typedef; those are
    /// dropped without a diagnostic since they are mostly constant groups.
    fn visit_enum(
        &mut self,
        name: &str,
        integer_type: &SourceType,
        enumerators: &[EnumeratorDecl],
        location: &SourceLocation,
    ) -> Result<(), Rejection> {
        if name.is_empty() {
            return Ok(());
        }
        let underlying_type = self
            .translator
            .translate(integer_type, location)
            .map_err(|r| {
                let ctx = ContextKind::EnumUnderlying {
                    name: name.to_owned(),
                };
                r.context(ctx, location)
            })?;
        let values = enumerators
            .iter()
            .map(|e| Enumerator {
                name: e.name.clone(),
                value: e.value,
            })
            .collect();
        let tag = TagType::Enumeration(Enumeration {
            underlying_type,
            values,
        });
        self.module.add_tag(name, tag);
        Ok(())
    }

    /// As with enums, anonymous structs without a typedef are dropped
    /// silently, and so is a struct with a field of anonymous tag type.
    fn visit_struct(
        &mut self,
        name: &str,
        fields: &[FieldDecl],
        location: &SourceLocation,
    ) -> Result<(), Rejection> {
        if name.is_empty() {
            return Ok(());
        }
        let mut structure = Structure::default();
        for field in fields {
            let at = if field.location.is_known() {
                &field.location
            } else {
                location
            };
            let ty = self.translator.translate(&field.ty, at).map_err(|r| {
                let ctx = ContextKind::StructField {
                    field: field.name.clone(),
                    structure: name.to_owned(),
                };
                r.context(ctx, at)
            })?;
            // An anonymous nested tag cannot be named in the output.
            if ty.mentions_anonymous_tag() {
                trace!(structure = %name, field = %field.name, "anonymous field type");
                return Ok(());
            }
            structure.fields.push(Entity::new(field.name.clone(), ty));
        }
        self.module.add_tag(name, TagType::Structure(structure));
        Ok(())
    }

    /// A typedef of an enum or struct declaration defines that tag, under
    /// the tag's own name or, when it is anonymous, under the typedef's.
    fn visit_typedef(&mut self, decl: &Decl, target: &TypedefTarget) -> Result<(), Rejection> {
        let tag_name = |name: &str| {
            if name.is_empty() {
                decl.name.clone()
            } else {
                name.to_owned()
            }
        };
        match target {
            TypedefTarget::Enum {
                name,
                integer_type,
                enumerators,
            } => self.visit_enum(&tag_name(name), integer_type, enumerators, &decl.location),
            TypedefTarget::Struct { name, fields } => {
                self.visit_struct(&tag_name(name), fields, &decl.location)
            }
            TypedefTarget::Type { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
