//! The closed type model produced by translation.
//!
//! `CType` is a strict tree: every constructor owns its children, so no two
//! types share structure and cycles cannot be built.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Entity, ScalarType};

/// A translated C type.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CType {
    Scalar(ScalarType),
    Pointer { pointee: Box<CType> },
    /// A by-name reference to a tag type or an unmodeled template
    /// instantiation. The name may be empty until an enclosing typedef
    /// supplies one.
    Opaque { name: String },
    Function(FunctionType),
}

/// A function signature.
///
/// Parameter names are kept for documentation only; unnamed parameters
/// (function pointer prototypes) use the empty string.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct FunctionType {
    pub return_type: Box<CType>,
    pub params: Vec<Entity>,
}

impl FunctionType {
    pub fn new(return_type: CType, params: Vec<Entity>) -> Self {
        FunctionType {
            return_type: Box::new(return_type),
            params,
        }
    }
}

impl CType {
    pub fn pointer(pointee: CType) -> Self {
        CType::Pointer {
            pointee: Box::new(pointee),
        }
    }

    pub fn opaque(name: impl Into<String>) -> Self {
        CType::Opaque { name: name.into() }
    }

    /// Whether a value of this type can cross the FFI boundary by value.
    ///
    /// Only scalars and pointers qualify. The check is shallow: a pointer to
    /// an opaque type is marshallable even though the opaque type is not.
    pub fn is_marshallable(&self) -> bool {
        matches!(self, CType::Scalar(_) | CType::Pointer { .. })
    }

    pub fn as_scalar(&self) -> Option<&ScalarType> {
        match self {
            CType::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn is_void(&self) -> bool {
        self.as_scalar().is_some_and(ScalarType::is_void)
    }

    pub fn is_plain_char(&self) -> bool {
        self.as_scalar().is_some_and(ScalarType::is_plain_char)
    }

    pub fn is_function(&self) -> bool {
        matches!(self, CType::Function(_))
    }

    /// Whether an unnamed tag occurs anywhere in this type. Such a type has
    /// no name to render it by.
    pub fn mentions_anonymous_tag(&self) -> bool {
        match self {
            CType::Scalar(_) => false,
            CType::Pointer { pointee } => pointee.mentions_anonymous_tag(),
            CType::Opaque { name } => name.is_empty(),
            CType::Function(function) => {
                function.return_type.mentions_anonymous_tag()
                    || function.params.iter().any(|p| p.ty.mentions_anonymous_tag())
            }
        }
    }

    /// `char*`, rendered as a C string by host languages that have one.
    pub fn is_c_string(&self) -> bool {
        matches!(self, CType::Pointer { pointee } if pointee.is_plain_char())
    }
}

impl From<ScalarType> for CType {
    fn from(scalar: ScalarType) -> Self {
        CType::Scalar(scalar)
    }
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CType::Scalar(scalar) => write!(f, "{scalar}"),
            CType::Pointer { pointee } => write!(f, "*{pointee}"),
            CType::Opaque { name } if name.is_empty() => write!(f, "<anonymous>"),
            CType::Opaque { name } => write!(f, "{name}"),
            CType::Function(func) => {
                write!(f, "fn(")?;
                for (i, param) in func.params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param.ty)?;
                }
                write!(f, ") -> {}", func.return_type)
            }
        }
    }
}
