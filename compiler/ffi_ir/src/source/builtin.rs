//! Compiler builtin type kinds.

use serde::{Deserialize, Serialize};

/// A builtin type as classified by the front end.
///
/// Only the portable C scalar kinds have a translation; everything else
/// (extended floating point, 128-bit integers, OpenCL and vendor types) is
/// kept so that diagnostics can name it.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum BuiltinKind {
    Void,
    Bool,
    /// Plain `char` on a target where it is unsigned.
    CharU,
    /// Plain `char` on a target where it is signed.
    CharS,
    UChar,
    SChar,
    WCharU,
    WCharS,
    Char8,
    Char16,
    Char32,
    UShort,
    Short,
    UInt,
    Int,
    ULong,
    Long,
    ULongLong,
    LongLong,
    Float,
    Double,
    LongDouble,
    Half,
    Float16,
    BFloat16,
    Float128,
    Int128,
    UInt128,
    NullPtr,
    /// A platform, OpenCL or compiler extension type, by display name.
    Extension(String),
}

impl BuiltinKind {
    /// The front end's display name for this builtin.
    pub fn display_name(&self) -> &str {
        match self {
            BuiltinKind::Void => "Void",
            BuiltinKind::Bool => "Bool",
            BuiltinKind::CharU => "Char_U",
            BuiltinKind::CharS => "Char_S",
            BuiltinKind::UChar => "UChar",
            BuiltinKind::SChar => "SChar",
            BuiltinKind::WCharU => "WChar_U",
            BuiltinKind::WCharS => "WChar_S",
            BuiltinKind::Char8 => "Char8",
            BuiltinKind::Char16 => "Char16",
            BuiltinKind::Char32 => "Char32",
            BuiltinKind::UShort => "UShort",
            BuiltinKind::Short => "Short",
            BuiltinKind::UInt => "UInt",
            BuiltinKind::Int => "Int",
            BuiltinKind::ULong => "ULong",
            BuiltinKind::Long => "Long",
            BuiltinKind::ULongLong => "ULongLong",
            BuiltinKind::LongLong => "LongLong",
            BuiltinKind::Float => "Float",
            BuiltinKind::Double => "Double",
            BuiltinKind::LongDouble => "LongDouble",
            BuiltinKind::Half => "Half",
            BuiltinKind::Float16 => "Float16",
            BuiltinKind::BFloat16 => "BFloat16",
            BuiltinKind::Float128 => "Float128",
            BuiltinKind::Int128 => "Int128",
            BuiltinKind::UInt128 => "UInt128",
            BuiltinKind::NullPtr => "NullPtr",
            BuiltinKind::Extension(name) => name,
        }
    }

    /// Whether the front end classifies this builtin as a signed integer.
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            BuiltinKind::CharS
                | BuiltinKind::SChar
                | BuiltinKind::WCharS
                | BuiltinKind::Short
                | BuiltinKind::Int
                | BuiltinKind::Long
                | BuiltinKind::LongLong
                | BuiltinKind::Int128
        )
    }
}
