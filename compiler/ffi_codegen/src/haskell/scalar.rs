//! Haskell names of C scalar types.
//!
//! Platform-dependent C types map to the `Foreign.C.Types` newtypes; the
//! fixed-width families map to `Data.Int` / `Data.Word`.

use ffi_ir::{Qualifier, ScalarType, Signedness, Width};

pub fn scalar_name(scalar: &ScalarType) -> &'static str {
    let unsigned = scalar.sign == Signedness::Unsigned;
    let pick = |signed: &'static str, unsigned_name: &'static str| {
        if unsigned {
            unsigned_name
        } else {
            signed
        }
    };
    match scalar.qualifier {
        Qualifier::Void => "()",
        Qualifier::Bool => "CBool",
        Qualifier::Char => match scalar.sign {
            Signedness::Unspecified => "CChar",
            Signedness::Signed => "CSChar",
            Signedness::Unsigned => "CUChar",
        },
        Qualifier::WChar => "CWchar",
        Qualifier::UniChar => fixed_width(true, scalar.width),
        Qualifier::Short => pick("CShort", "CUShort"),
        Qualifier::Int => pick("CInt", "CUInt"),
        Qualifier::Long => pick("CLong", "CULong"),
        Qualifier::LLong => pick("CLLong", "CULLong"),
        Qualifier::Float => "CFloat",
        Qualifier::Double => "CDouble",
        Qualifier::Ptrdiff => "CPtrdiff",
        Qualifier::Size => "CSize",
        Qualifier::Special => match scalar.width {
            Width::Max => pick("CIntMax", "CUIntMax"),
            _ => pick("CIntPtr", "CUIntPtr"),
        },
        Qualifier::Exact | Qualifier::Least | Qualifier::Fast => {
            fixed_width(unsigned, scalar.width)
        }
    }
}

fn fixed_width(unsigned: bool, width: Width) -> &'static str {
    match (unsigned, width) {
        (false, Width::W8) => "Int8",
        (false, Width::W16) => "Int16",
        (false, Width::W32) => "Int32",
        (false, Width::W64) => "Int64",
        (true, Width::W8) => "Word8",
        (true, Width::W16) => "Word16",
        (true, Width::W32) => "Word32",
        (true, Width::W64) => "Word64",
        (false, _) => "Int",
        (true, _) => "Word",
    }
}

#[cfg(test)]
mod tests {
    use ffi_ir::{BuiltinKind, ScalarType};
    use pretty_assertions::assert_eq;

    use super::*;

    fn builtin(kind: BuiltinKind) -> Option<&'static str> {
        ScalarType::from_builtin(&kind).map(|s| scalar_name(&s))
    }

    fn alias(name: &str) -> Option<&'static str> {
        ScalarType::from_alias_name(name).map(|s| scalar_name(&s))
    }

    #[test]
    fn builtins() {
        assert_eq!(builtin(BuiltinKind::Void), Some("()"));
        assert_eq!(builtin(BuiltinKind::Bool), Some("CBool"));
        assert_eq!(builtin(BuiltinKind::CharS), Some("CChar"));
        assert_eq!(builtin(BuiltinKind::SChar), Some("CSChar"));
        assert_eq!(builtin(BuiltinKind::UChar), Some("CUChar"));
        assert_eq!(builtin(BuiltinKind::UInt), Some("CUInt"));
        assert_eq!(builtin(BuiltinKind::Long), Some("CLong"));
        assert_eq!(builtin(BuiltinKind::ULongLong), Some("CULLong"));
        assert_eq!(builtin(BuiltinKind::Double), Some("CDouble"));
        assert_eq!(builtin(BuiltinKind::Char16), Some("Word16"));
    }

    #[test]
    fn standard_aliases() {
        assert_eq!(alias("uint32_t"), Some("Word32"));
        assert_eq!(alias("int8_t"), Some("Int8"));
        assert_eq!(alias("int_least64_t"), Some("Int64"));
        assert_eq!(alias("uint_fast16_t"), Some("Word16"));
        assert_eq!(alias("size_t"), Some("CSize"));
        assert_eq!(alias("ptrdiff_t"), Some("CPtrdiff"));
        assert_eq!(alias("intptr_t"), Some("CIntPtr"));
        assert_eq!(alias("uintmax_t"), Some("CUIntMax"));
        assert_eq!(alias("wchar_t"), Some("CWchar"));
    }

    #[test]
    fn every_builtin_scalar_has_a_name() {
        let kinds = [
            BuiltinKind::Void,
            BuiltinKind::Bool,
            BuiltinKind::CharU,
            BuiltinKind::CharS,
            BuiltinKind::UChar,
            BuiltinKind::SChar,
            BuiltinKind::WCharU,
            BuiltinKind::WCharS,
            BuiltinKind::Char8,
            BuiltinKind::Char16,
            BuiltinKind::Char32,
            BuiltinKind::UShort,
            BuiltinKind::Short,
            BuiltinKind::UInt,
            BuiltinKind::Int,
            BuiltinKind::ULong,
            BuiltinKind::Long,
            BuiltinKind::ULongLong,
            BuiltinKind::LongLong,
            BuiltinKind::Float,
            BuiltinKind::Double,
        ];
        for kind in kinds {
            let name = builtin(kind.clone());
            assert!(name.is_some_and(|n| !n.is_empty()), "{kind:?}");
            assert_eq!(name, builtin(kind));
        }
    }

    #[test]
    fn alias_and_builtin_agree_on_native_widths() {
        // On every supported data model `int` is 32 bits wide, so both
        // spellings must name a 32-bit Haskell type.
        assert_eq!(alias("int32_t"), Some("Int32"));
        assert_eq!(builtin(BuiltinKind::Int), Some("CInt"));
        assert_eq!(alias("char32_t"), builtin(BuiltinKind::Char32));
        assert_eq!(alias("char8_t"), builtin(BuiltinKind::Char8));
    }
}
