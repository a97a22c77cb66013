use super::*;
use pretty_assertions::assert_eq;

fn affixes(remove_prefix: &str, remove_suffix: &str, add_prefix: &str, add_suffix: &str) -> Affixes {
    Affixes {
        remove_prefix: remove_prefix.into(),
        remove_suffix: remove_suffix.into(),
        add_prefix: add_prefix.into(),
        add_suffix: add_suffix.into(),
    }
}

#[test]
fn affixes_strip_only_literal_matches() {
    let a = affixes("png_", "_t", "", "");
    assert_eq!(a.apply("png_info_t"), "info");
    assert_eq!(a.apply("zlib_info"), "zlib_info");
}

#[test]
fn suffix_is_stripped_from_the_end() {
    let a = affixes("", "_t", "", "");
    assert_eq!(a.apply("_t_size_t"), "_t_size");
}

#[test]
fn added_affixes_are_case_converted() {
    let chain = ConverterChain::single(
        &NameConverter::new(NameCase::Camel).with_affixes(affixes("", "", "c_", "")),
        NameVariant::Variable,
    );
    assert_eq!(chain.convert("get_size").unwrap(), "cGetSize");
}

#[test]
fn default_bundle_produces_host_identifiers() {
    let bundle = ConverterBundle::default();
    let convert = |variant, raw| bundle.chain(variant, None).convert(raw).unwrap();
    assert_eq!(convert(NameVariant::TypeCtor, "struct_point"), "StructPoint");
    assert_eq!(convert(NameVariant::DataCtor, "COLOR_RED"), "ColorRed");
    assert_eq!(convert(NameVariant::Variable, "GetValue"), "getValue");
    assert_eq!(convert(NameVariant::ModuleName, "gl/gl_core"), "GlGlCore");
}

#[test]
fn shared_converter_runs_before_kind_case() {
    let mut bundle = ConverterBundle::default();
    bundle.all.affixes = affixes("SDL_", "", "", "");
    let chain = bundle.chain(NameVariant::Variable, None);
    assert_eq!(chain.convert("SDL_CreateWindow").unwrap(), "createWindow");
}

#[test]
fn kind_affixes_run_before_shared_ones() {
    let mut bundle = ConverterBundle::default();
    bundle.all.affixes = affixes("lib_", "", "", "");
    bundle.type_ctor.affixes = affixes("", "_t", "", "");
    let chain = bundle.chain(NameVariant::TypeCtor, None);
    assert_eq!(chain.convert("lib_handle_t").unwrap(), "Handle");
}

#[test]
fn file_converter_layers_under_shared() {
    let bundle = ConverterBundle::default();
    let file = NameConverter::default().with_affixes(affixes("gz", "", "", ""));
    let chain = bundle.chain(NameVariant::Variable, Some(&file));
    assert_eq!(chain.convert("gzopen").unwrap(), "open");
    assert_eq!(
        bundle.chain(NameVariant::Variable, None).convert("gzopen").unwrap(),
        "gzopen"
    );
}

#[test]
fn empty_result_is_an_error() {
    let mut bundle = ConverterBundle::default();
    bundle.all.affixes = affixes("SDL_", "", "", "");
    let err = bundle.chain(NameVariant::TypeCtor, None).convert("SDL_").unwrap_err();
    assert_eq!(err, ConverterError::EmptyName { raw: "SDL_".into() });

    let preserving = ConverterChain::single(
        &NameConverter::default().with_affixes(affixes("x", "", "", "")),
        NameVariant::Preserving,
    );
    assert!(preserving.convert("x").is_err());
}

#[test]
fn default_bundle_is_valid() {
    assert_eq!(ConverterBundle::default().validate(), vec![]);
}

#[test]
fn shared_converter_may_not_recase_or_prepend() {
    let mut bundle = ConverterBundle::default();
    bundle.all.case = NameCase::Camel;
    bundle.all.affixes.add_prefix = "x".into();
    let errors = bundle.validate();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ConverterError::SharedCase { .. }));

    let file = NameConverter::default().with_affixes(affixes("", "", "p", ""));
    assert!(matches!(
        file.validate_shared("a.h"),
        Err(ConverterError::SharedPrefix { .. })
    ));
}

#[test]
fn preserving_kind_converter_needs_matching_prefix() {
    let mut bundle = ConverterBundle::default();
    bundle.type_ctor = NameConverter::default().with_affixes(affixes("", "", "T", ""));
    bundle.variable = NameConverter::default().with_affixes(affixes("", "", "V", ""));
    bundle.module = NameConverter::default();
    let errors = bundle.validate();
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| matches!(e, ConverterError::BadInitial { .. })));
    assert!(errors[0].to_string().contains("`module`"));
    assert!(errors[1].to_string().contains("lower-case"));
}
