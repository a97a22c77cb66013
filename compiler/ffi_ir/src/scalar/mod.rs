//! Scalar types: the leaves of the type model.
//!
//! A scalar is described by three orthogonal facts, following the way C
//! spells its arithmetic types:
//!
//! - [`Signedness`]: signed, unsigned, or unspecified (`char`, `wchar_t`,
//!   `void`, `size_t`).
//! - [`Qualifier`]: the C type family (`int`, `long`, exact-width integer...).
//! - [`Width`]: the bit width for the fixed-width families, `None` otherwise.
//!
//! Scalars come from two tables: [`ScalarType::from_builtin`] for compiler
//! builtins and [`ScalarType::from_alias_name`] for the well-known standard
//! typedef names (`uint32_t`, `size_t`, `char16_t`, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::BuiltinKind;

/// Signedness of a scalar type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Signedness {
    Unsigned,
    Signed,
    /// No signedness applies, or the platform decides (`char`, `wchar_t`).
    Unspecified,
}

/// The C family a scalar belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Qualifier {
    Void,
    Bool,
    Char,
    WChar,
    /// `char8_t`, `char16_t`, `char32_t`.
    UniChar,
    Short,
    Int,
    Long,
    LLong,
    Float,
    Double,
    Ptrdiff,
    Size,
    /// `intptr_t` / `intmax_t` and their unsigned forms.
    Special,
    /// `intN_t`.
    Exact,
    /// `int_leastN_t`.
    Least,
    /// `int_fastN_t`.
    Fast,
}

/// Bit width of a fixed-width scalar.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Width {
    None,
    W8,
    W16,
    W32,
    W64,
    /// Pointer width (`intptr_t`).
    Ptr,
    /// Widest integer (`intmax_t`).
    Max,
}

impl Width {
    /// The width as used in host type names (`8`, `Ptr`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Width::None => "",
            Width::W8 => "8",
            Width::W16 => "16",
            Width::W32 => "32",
            Width::W64 => "64",
            Width::Ptr => "Ptr",
            Width::Max => "Max",
        }
    }

    /// Width in bytes, for the numeric widths.
    pub fn bytes(self) -> Option<u64> {
        match self {
            Width::W8 => Some(1),
            Width::W16 => Some(2),
            Width::W32 => Some(4),
            Width::W64 => Some(8),
            Width::None | Width::Ptr | Width::Max => None,
        }
    }

    fn from_digits(digits: &str) -> Option<Width> {
        match digits {
            "8" => Some(Width::W8),
            "16" => Some(Width::W16),
            "32" => Some(Width::W32),
            "64" => Some(Width::W64),
            _ => None,
        }
    }
}

/// A translated scalar type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct ScalarType {
    pub sign: Signedness,
    pub qualifier: Qualifier,
    pub width: Width,
}

impl ScalarType {
    pub const fn new(sign: Signedness, qualifier: Qualifier, width: Width) -> Self {
        ScalarType {
            sign,
            qualifier,
            width,
        }
    }

    pub const VOID: ScalarType = ScalarType::new(Signedness::Unspecified, Qualifier::Void, Width::None);

    /// Plain `char`.
    pub const CHAR: ScalarType = ScalarType::new(Signedness::Unspecified, Qualifier::Char, Width::None);

    /// Map a compiler builtin to a scalar.
    ///
    /// Returns `None` for builtins with no portable representation; the
    /// caller reports those as unsupported.
    pub fn from_builtin(kind: &BuiltinKind) -> Option<ScalarType> {
        use Qualifier as Q;
        use Signedness as S;

        let sign = if kind.is_signed() {
            S::Signed
        } else {
            S::Unsigned
        };
        let scalar = match kind {
            BuiltinKind::Void => Self::VOID,
            BuiltinKind::Bool => Self::new(S::Unsigned, Q::Bool, Width::None),
            BuiltinKind::CharU | BuiltinKind::CharS => Self::CHAR,
            BuiltinKind::UChar | BuiltinKind::SChar => Self::new(sign, Q::Char, Width::None),
            BuiltinKind::WCharU | BuiltinKind::WCharS => {
                Self::new(S::Unspecified, Q::WChar, Width::None)
            }
            BuiltinKind::Char8 => Self::new(S::Unsigned, Q::UniChar, Width::W8),
            BuiltinKind::Char16 => Self::new(S::Unsigned, Q::UniChar, Width::W16),
            BuiltinKind::Char32 => Self::new(S::Unsigned, Q::UniChar, Width::W32),
            BuiltinKind::UShort | BuiltinKind::Short => Self::new(sign, Q::Short, Width::None),
            BuiltinKind::UInt | BuiltinKind::Int => Self::new(sign, Q::Int, Width::None),
            BuiltinKind::ULong | BuiltinKind::Long => Self::new(sign, Q::Long, Width::None),
            BuiltinKind::ULongLong | BuiltinKind::LongLong => {
                Self::new(sign, Q::LLong, Width::None)
            }
            BuiltinKind::Float => Self::new(S::Signed, Q::Float, Width::None),
            BuiltinKind::Double => Self::new(S::Signed, Q::Double, Width::None),
            BuiltinKind::LongDouble
            | BuiltinKind::Half
            | BuiltinKind::Float16
            | BuiltinKind::BFloat16
            | BuiltinKind::Float128
            | BuiltinKind::Int128
            | BuiltinKind::UInt128
            | BuiltinKind::NullPtr
            | BuiltinKind::Extension(_) => return None,
        };
        Some(scalar)
    }

    /// Recognize a well-known standard alias name.
    ///
    /// Accepts `wchar_t`, `char8_t`, `char16_t`, `char32_t`, `size_t`,
    /// `ptrdiff_t` and the `<stdint.h>` family
    /// `(u)int{N,_leastN,_fastN,ptr,max}_t` for N in 8, 16, 32, 64.
    pub fn from_alias_name(name: &str) -> Option<ScalarType> {
        use Qualifier as Q;
        use Signedness as S;

        let fixed = match name {
            "wchar_t" => Some(Self::new(S::Unspecified, Q::WChar, Width::None)),
            "char8_t" => Some(Self::new(S::Unsigned, Q::UniChar, Width::W8)),
            "char16_t" => Some(Self::new(S::Unsigned, Q::UniChar, Width::W16)),
            "char32_t" => Some(Self::new(S::Unsigned, Q::UniChar, Width::W32)),
            "size_t" => Some(Self::new(S::Unspecified, Q::Size, Width::None)),
            "ptrdiff_t" => Some(Self::new(S::Unspecified, Q::Ptrdiff, Width::None)),
            _ => None,
        };
        if fixed.is_some() {
            return fixed;
        }

        let (sign, rest) = match name.strip_prefix('u') {
            Some(rest) => (S::Unsigned, rest),
            None => (S::Signed, name),
        };
        let body = rest.strip_prefix("int")?.strip_suffix("_t")?;
        match body {
            "ptr" => return Some(Self::new(sign, Q::Special, Width::Ptr)),
            "max" => return Some(Self::new(sign, Q::Special, Width::Max)),
            _ => {}
        }
        let (qualifier, digits) = if let Some(digits) = body.strip_prefix("_least") {
            (Q::Least, digits)
        } else if let Some(digits) = body.strip_prefix("_fast") {
            (Q::Fast, digits)
        } else {
            (Q::Exact, body)
        };
        Width::from_digits(digits).map(|width| Self::new(sign, qualifier, width))
    }

    pub fn is_void(&self) -> bool {
        self.qualifier == Qualifier::Void
    }

    /// Plain `char` (neither `signed char` nor `unsigned char`).
    pub fn is_plain_char(&self) -> bool {
        *self == Self::CHAR
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?}", self.sign, self.qualifier)?;
        if self.width != Width::None {
            write!(f, " {}", self.width.as_str())?;
        }
        Ok(())
    }
}
