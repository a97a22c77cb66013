//! Declarations and type nodes supplied by the external C/C++ front end.
//!
//! The front end resolves every type before handing it over, so each node is
//! already a fully-desugared tree. Node kinds form a closed enumeration; the
//! translator matches on them exhaustively instead of dispatching through
//! visitor callbacks.
//!
//! The serde representation is the on-disk format of front-end dumps:
//!
//! ```text
//! file: point.h
//! decls:
//!   - name: point_norm
//!     location: { file: point.h, line: 12, column: 8 }
//!     kind:
//!       decl: function
//!       return_type: { kind: builtin, builtin: Double }
//!       params:
//!         - name: p
//!           type: { kind: pointer, pointee: { kind: tag, name: point } }
//! ```

mod builtin;

pub use builtin::BuiltinKind;

use serde::{Deserialize, Serialize};

use crate::SourceLocation;

/// Calling convention of a function prototype.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallConv {
    #[default]
    C,
    StdCall,
    FastCall,
    ThisCall,
    VectorCall,
    Pascal,
    Win64,
    Swift,
}

impl CallConv {
    /// Display name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            CallConv::C => "cdecl",
            CallConv::StdCall => "stdcall",
            CallConv::FastCall => "fastcall",
            CallConv::ThisCall => "thiscall",
            CallConv::VectorCall => "vectorcall",
            CallConv::Pascal => "pascal",
            CallConv::Win64 => "ms_abi",
            CallConv::Swift => "swiftcall",
        }
    }
}

/// A resolved source type node.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceType {
    /// A compiler builtin (`int`, `double`, `__int128`, ...).
    Builtin { builtin: BuiltinKind },
    /// `T*`.
    Pointer { pointee: Box<SourceType> },
    /// `T&`.
    LvalueReference { referee: Box<SourceType> },
    /// `T&&`.
    RvalueReference { referee: Box<SourceType> },
    /// A typedef / alias reference, with the type it names.
    Typedef {
        name: String,
        #[serde(default)]
        qualified_name: String,
        #[serde(default)]
        in_system_header: bool,
        underlying: Box<SourceType>,
    },
    /// A class template instantiation, printed as written.
    TemplateSpecialization { printed_name: String },
    /// A reference to a struct, union, class or enum. Anonymous tags have an
    /// empty name.
    Tag {
        #[serde(default)]
        name: String,
    },
    /// A function prototype (the pointee of a function pointer).
    FunctionProto {
        #[serde(default)]
        call_conv: CallConv,
        return_type: Box<SourceType>,
        #[serde(default)]
        params: Vec<SourceType>,
    },
    /// Any construct the front end does not classify further (arrays, member
    /// pointers, vector types, ...).
    Other { description: String },
}

impl SourceType {
    pub fn builtin(builtin: BuiltinKind) -> Self {
        SourceType::Builtin { builtin }
    }

    pub fn pointer(pointee: SourceType) -> Self {
        SourceType::Pointer {
            pointee: Box::new(pointee),
        }
    }

    pub fn tag(name: impl Into<String>) -> Self {
        SourceType::Tag { name: name.into() }
    }

    /// A typedef declared outside system headers.
    pub fn typedef(name: impl Into<String>, underlying: SourceType) -> Self {
        let name = name.into();
        SourceType::Typedef {
            qualified_name: name.clone(),
            name,
            in_system_header: false,
            underlying: Box::new(underlying),
        }
    }

    /// A typedef declared in a system header.
    pub fn system_typedef(name: impl Into<String>, underlying: SourceType) -> Self {
        let name = name.into();
        SourceType::Typedef {
            qualified_name: name.clone(),
            name,
            in_system_header: true,
            underlying: Box::new(underlying),
        }
    }

    /// A C-convention function prototype.
    pub fn function(return_type: SourceType, params: Vec<SourceType>) -> Self {
        SourceType::FunctionProto {
            call_conv: CallConv::C,
            return_type: Box::new(return_type),
            params,
        }
    }
}

/// Linkage facts for a declaration.
///
/// Omitted fields in a dump default to a C declaration with external linkage.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Linkage {
    /// The declaration has external formal linkage.
    pub external_formal: bool,
    /// The declaration has C language linkage (`extern "C"` or a C file).
    pub c_language: bool,
}

impl Default for Linkage {
    fn default() -> Self {
        Linkage {
            external_formal: true,
            c_language: true,
        }
    }
}

/// Where a declaration was expanded from, relative to the processed file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclOrigin {
    #[default]
    MainFile,
    Header,
    SystemHeader,
}

/// A function parameter.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct ParamDecl {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: SourceType,
    #[serde(default)]
    pub location: SourceLocation,
}

/// A struct field.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: SourceType,
    #[serde(default)]
    pub location: SourceLocation,
}

/// An enumerator with its (sign-extended) value.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct EnumeratorDecl {
    pub name: String,
    pub value: i64,
}

/// The kind-specific payload of a declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "decl", rename_all = "snake_case")]
pub enum DeclKind {
    Var {
        #[serde(rename = "type")]
        ty: SourceType,
    },
    Function {
        return_type: SourceType,
        #[serde(default)]
        params: Vec<ParamDecl>,
    },
    Enum {
        integer_type: SourceType,
        #[serde(default)]
        enumerators: Vec<EnumeratorDecl>,
    },
    Struct {
        #[serde(default)]
        fields: Vec<FieldDecl>,
    },
    /// `typedef <underlying> name;`. Only typedefs naming an enum or struct
    /// declaration produce output.
    Typedef { underlying: TypedefTarget },
}

/// What a top-level typedef aliases.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum TypedefTarget {
    /// An enum declaration (possibly anonymous).
    Enum {
        #[serde(default)]
        name: String,
        integer_type: SourceType,
        #[serde(default)]
        enumerators: Vec<EnumeratorDecl>,
    },
    /// A struct declaration (possibly anonymous).
    Struct {
        #[serde(default)]
        name: String,
        #[serde(default)]
        fields: Vec<FieldDecl>,
    },
    /// Any other aliased type; ignored.
    Type {
        #[serde(rename = "type")]
        ty: SourceType,
    },
}

/// A top-level declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Decl {
    /// Declared name; empty for anonymous tags.
    #[serde(default)]
    pub name: String,
    pub kind: DeclKind,
    #[serde(default)]
    pub linkage: Linkage,
    #[serde(default)]
    pub origin: DeclOrigin,
    #[serde(default)]
    pub location: SourceLocation,
}

impl Decl {
    pub fn new(name: impl Into<String>, kind: DeclKind) -> Self {
        Decl {
            name: name.into(),
            kind,
            linkage: Linkage::default(),
            origin: DeclOrigin::MainFile,
            location: SourceLocation::UNKNOWN,
        }
    }

    #[must_use]
    pub fn with_linkage(mut self, external_formal: bool, c_language: bool) -> Self {
        self.linkage = Linkage {
            external_formal,
            c_language,
        };
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: DeclOrigin) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    /// Whether this is a function or variable (as opposed to a tag or alias).
    pub fn is_entity(&self) -> bool {
        matches!(self.kind, DeclKind::Var { .. } | DeclKind::Function { .. })
    }
}

/// One parsed source file.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct TranslationUnit {
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub decls: Vec<Decl>,
}
