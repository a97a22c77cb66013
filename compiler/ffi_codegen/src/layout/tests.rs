use std::collections::BTreeMap;

use ffi_ir::{
    CType, Entity, Enumeration, Enumerator, FunctionType, Qualifier, ScalarType, Signedness,
    Structure, TagType, Width,
};
use pretty_assertions::assert_eq;

use super::*;

fn scalar(qualifier: Qualifier, width: Width) -> ScalarType {
    ScalarType::new(Signedness::Signed, qualifier, width)
}

fn int() -> CType {
    scalar(Qualifier::Int, Width::None).into()
}

fn structure(fields: Vec<(&str, CType)>) -> TagType {
    TagType::Structure(Structure {
        fields: fields
            .into_iter()
            .map(|(name, ty)| Entity::new(name, ty))
            .collect(),
    })
}

#[test]
fn align_up_rounds_to_multiples() {
    assert_eq!(align_up(0, 8), 0);
    assert_eq!(align_up(1, 8), 8);
    assert_eq!(align_up(8, 8), 8);
    assert_eq!(align_up(5, 4), 8);
    assert_eq!(align_up(5, 1), 5);
    assert_eq!(align_up(5, 0), 5);
}

#[test]
fn natural_layout_pads_between_and_after_fields() {
    let layout = natural_layout(&[Layout::natural(1), Layout::natural(4), Layout::natural(2)]);
    assert_eq!(layout.offsets, vec![0, 4, 8]);
    assert_eq!(layout.size, 12);
    assert_eq!(layout.align, 4);

    let layout = natural_layout(&[Layout::natural(8), Layout::natural(1)]);
    assert_eq!(layout.offsets, vec![0, 8]);
    assert_eq!(layout.size, 16);
}

#[test]
fn natural_layout_packs_already_aligned_fields() {
    let layout = natural_layout(&[Layout::natural(4), Layout::natural(1), Layout::natural(8)]);
    assert_eq!(layout.offsets, vec![0, 4, 8]);
    assert_eq!(layout.size, 16);
    assert_eq!(layout.align, 8);
}

#[test]
fn empty_struct_has_zero_size() {
    let layout = natural_layout(&[]);
    assert!(layout.offsets.is_empty());
    assert_eq!(layout.size, 0);
    assert_eq!(layout.align, 1);
}

#[test]
fn scalar_sizes_follow_the_data_model() {
    let long = scalar(Qualifier::Long, Width::None);
    assert_eq!(TargetLayout::Lp64.scalar(&long), Some(Layout::natural(8)));
    assert_eq!(TargetLayout::Llp64.scalar(&long), Some(Layout::natural(4)));
    assert_eq!(TargetLayout::Ilp32.scalar(&long), Some(Layout::natural(4)));

    let wchar = scalar(Qualifier::WChar, Width::None);
    assert_eq!(TargetLayout::Lp64.scalar(&wchar), Some(Layout::natural(4)));
    assert_eq!(TargetLayout::Llp64.scalar(&wchar), Some(Layout::natural(2)));

    let size = scalar(Qualifier::Size, Width::None);
    assert_eq!(TargetLayout::Lp64.scalar(&size), Some(Layout::natural(8)));
    assert_eq!(TargetLayout::Ilp32.scalar(&size), Some(Layout::natural(4)));

    let intmax = scalar(Qualifier::Special, Width::Max);
    assert_eq!(TargetLayout::Ilp32.scalar(&intmax), Some(Layout::new(8, 4)));

    let least16 = scalar(Qualifier::Least, Width::W16);
    assert_eq!(TargetLayout::Lp64.scalar(&least16), Some(Layout::natural(2)));

    assert_eq!(TargetLayout::Lp64.scalar(&ScalarType::VOID), None);
}

#[test]
fn ilp32_caps_alignment_at_four() {
    let double = scalar(Qualifier::Double, Width::None);
    assert_eq!(TargetLayout::Ilp32.scalar(&double), Some(Layout::new(8, 4)));
    assert_eq!(TargetLayout::Lp64.scalar(&double), Some(Layout::natural(8)));
}

#[test]
fn pointers_and_functions() {
    let tags = BTreeMap::new();
    let mut cx = LayoutContext::new(TargetLayout::Lp64, &tags);
    let fn_ty = CType::Function(FunctionType::new(int(), vec![]));
    assert_eq!(cx.type_layout(&CType::pointer(fn_ty.clone())), Some(Layout::natural(8)));
    assert_eq!(cx.type_layout(&fn_ty), None);

    let mut cx = LayoutContext::new(TargetLayout::Ilp32, &tags);
    assert_eq!(cx.type_layout(&CType::pointer(int())), Some(Layout::natural(4)));
}

#[test]
fn nested_struct_and_enum_fields() {
    let mut tags = BTreeMap::new();
    tags.insert(
        "color".to_string(),
        TagType::Enumeration(Enumeration {
            underlying_type: scalar(Qualifier::Char, Width::None).into(),
            values: vec![Enumerator {
                name: "RED".to_string(),
                value: 0,
            }],
        }),
    );
    tags.insert(
        "inner".to_string(),
        structure(vec![("a", int()), ("b", CType::pointer(int()))]),
    );
    tags.insert(
        "outer".to_string(),
        structure(vec![
            ("c", CType::opaque("color")),
            ("i", CType::opaque("inner")),
        ]),
    );

    let mut cx = LayoutContext::new(TargetLayout::Lp64, &tags);
    let outer = cx.struct_layout("outer");
    assert_eq!(
        outer,
        Some(StructLayout {
            offsets: vec![0, 8],
            size: 24,
            align: 8,
        })
    );
}

#[test]
fn unknown_opaque_field_has_no_layout() {
    let mut tags = BTreeMap::new();
    tags.insert(
        "holder".to_string(),
        structure(vec![("x", int()), ("f", CType::opaque("FILE"))]),
    );
    let mut cx = LayoutContext::new(TargetLayout::Lp64, &tags);
    assert_eq!(cx.struct_layout("holder"), None);
    assert_eq!(cx.struct_layout("missing"), None);
}

#[test]
fn pointer_to_unknown_opaque_is_fine() {
    let mut tags = BTreeMap::new();
    tags.insert(
        "holder".to_string(),
        structure(vec![("f", CType::pointer(CType::opaque("FILE")))]),
    );
    let mut cx = LayoutContext::new(TargetLayout::Lp64, &tags);
    assert_eq!(cx.struct_layout("holder").map(|l| l.size), Some(8));
}

#[test]
fn by_value_cycle_has_no_layout() {
    let mut tags = BTreeMap::new();
    tags.insert(
        "a".to_string(),
        structure(vec![("b", CType::opaque("b"))]),
    );
    tags.insert(
        "b".to_string(),
        structure(vec![("a", CType::opaque("a"))]),
    );
    let mut cx = LayoutContext::new(TargetLayout::Lp64, &tags);
    assert_eq!(cx.struct_layout("a"), None);
    // The guard is released after a failed walk.
    assert_eq!(cx.struct_layout("b"), None);
}

#[test]
fn enum_is_not_a_struct() {
    let mut tags = BTreeMap::new();
    tags.insert(
        "e".to_string(),
        TagType::Enumeration(Enumeration {
            underlying_type: int(),
            values: vec![],
        }),
    );
    let mut cx = LayoutContext::new(TargetLayout::Lp64, &tags);
    assert_eq!(cx.struct_layout("e"), None);
    assert_eq!(cx.type_layout(&CType::opaque("e")), Some(Layout::natural(4)));
}
