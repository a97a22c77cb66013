//! Recursive type translation.
//!
//! One function, [`TypeTranslator::translate`], matches on the closed set of
//! source type kinds. Children are translated first and a failing child fails
//! its parent: there are no partial pointers or partial signatures.

use ffi_ir::{CType, CallConv, Entity, FunctionType, ScalarType, SourceLocation, SourceType};
use ffi_stack::with_stack;

use crate::{ContextKind, Rejection, TranslateError, TranslatePolicy};

/// Maps source type nodes to [`CType`]s under a [`TranslatePolicy`].
#[derive(Clone, Copy, Debug)]
pub struct TypeTranslator<'a> {
    policy: &'a TranslatePolicy,
}

impl<'a> TypeTranslator<'a> {
    pub fn new(policy: &'a TranslatePolicy) -> Self {
        TypeTranslator { policy }
    }

    /// Translate `ty`, found in the declaration at `at`.
    pub fn translate(&self, ty: &SourceType, at: &SourceLocation) -> Result<CType, Rejection> {
        with_stack(|| self.translate_inner(ty, at))
    }

    /// Translate the type of a variable or parameter, which must also be
    /// marshallable. Nested positions (pointees, prototype parameters) are
    /// not checked.
    pub fn translate_value(
        &self,
        ty: &SourceType,
        at: &SourceLocation,
    ) -> Result<CType, Rejection> {
        let ty = self.translate(ty, at)?;
        if ty.is_marshallable() {
            Ok(ty)
        } else {
            Err(Rejection::new(TranslateError::NotMarshallable { ty }, at))
        }
    }

    fn translate_inner(&self, ty: &SourceType, at: &SourceLocation) -> Result<CType, Rejection> {
        match ty {
            SourceType::Builtin { builtin } => ScalarType::from_builtin(builtin)
                .map(CType::Scalar)
                .ok_or_else(|| {
                    let name = builtin.display_name().to_owned();
                    Rejection::new(TranslateError::UnsupportedBuiltin { name }, at)
                }),

            SourceType::Pointer { pointee } => Ok(CType::pointer(self.translate(pointee, at)?)),

            SourceType::LvalueReference { .. } | SourceType::RvalueReference { .. } => {
                Err(Rejection::new(TranslateError::UnsupportedReference, at))
            }

            SourceType::Typedef {
                name,
                qualified_name,
                in_system_header,
                underlying,
            } => {
                let ty = self.translate(underlying, at).map_err(|r| {
                    let alias = ContextKind::TypedefAlias { name: name.clone() };
                    r.context(alias, &SourceLocation::UNKNOWN)
                })?;
                Ok(self.refine_alias(ty, name, qualified_name, *in_system_header))
            }

            SourceType::TemplateSpecialization { printed_name } => {
                Ok(CType::opaque(printed_name.clone()))
            }

            SourceType::Tag { name } => Ok(CType::opaque(name.clone())),

            SourceType::FunctionProto {
                call_conv,
                return_type,
                params,
            } => {
                if *call_conv != CallConv::C {
                    return Err(Rejection::new(
                        TranslateError::UnsupportedCallConv { conv: *call_conv },
                        at,
                    ));
                }
                let ret = self
                    .translate(return_type, at)
                    .map_err(|r| r.context(ContextKind::PrototypeReturn, at))?;
                let params = params
                    .iter()
                    .enumerate()
                    .map(|(index, param)| {
                        self.translate(param, at)
                            .map(|ty| Entity::new(String::new(), ty))
                            .map_err(|r| r.context(ContextKind::PrototypeParam { index }, at))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CType::Function(FunctionType::new(ret, params)))
            }

            SourceType::Other { description } => Err(Rejection::new(
                TranslateError::UnknownTypeConstruct {
                    description: description.clone(),
                },
                at,
            )),
        }
    }

    /// Refine the translation of a typedef.
    ///
    /// Scalars named like a standard alias (`uint32_t`, `size_t`) become that
    /// alias, always inside system headers and elsewhere only when the policy
    /// allows it. An anonymous tag takes the typedef's name.
    fn refine_alias(
        &self,
        ty: CType,
        name: &str,
        qualified_name: &str,
        in_system_header: bool,
    ) -> CType {
        match ty {
            CType::Scalar(scalar) => {
                let refine = in_system_header || self.policy.allow_custom_fixed_size_int;
                let refined = refine.then(|| ScalarType::from_alias_name(name)).flatten();
                CType::Scalar(refined.unwrap_or(scalar))
            }
            CType::Opaque { name: opaque } if opaque.is_empty() => {
                let name = if qualified_name.is_empty() {
                    name
                } else {
                    qualified_name
                };
                CType::opaque(name)
            }
            other => other,
        }
    }
}
