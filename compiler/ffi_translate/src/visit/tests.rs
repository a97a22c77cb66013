use super::*;
use ffi_diagnostic::Severity;
use ffi_ir::{BuiltinKind, CallConv, ScalarType};
use pretty_assertions::assert_eq;

fn int() -> SourceType {
    SourceType::builtin(BuiltinKind::Int)
}

fn param(name: &str, ty: SourceType) -> ParamDecl {
    ParamDecl {
        name: name.into(),
        ty,
        location: SourceLocation::UNKNOWN,
    }
}

fn field(name: &str, ty: SourceType) -> FieldDecl {
    FieldDecl {
        name: name.into(),
        ty,
        location: SourceLocation::UNKNOWN,
    }
}

fn function(name: &str, params: Vec<ParamDecl>) -> Decl {
    Decl::new(
        name,
        DeclKind::Function {
            return_type: int(),
            params,
        },
    )
    .with_location(SourceLocation::new("api.h", 3, 1))
}

fn var(name: &str, ty: SourceType) -> Decl {
    Decl::new(name, DeclKind::Var { ty })
}

fn run(policy: &TranslatePolicy, decls: Vec<Decl>) -> (ModuleContents, Vec<Diagnostic>) {
    let unit = TranslationUnit {
        file: "api.h".into(),
        decls,
    };
    let mut queue = DiagnosticQueue::new();
    let module = translate_unit(&unit, policy, &mut queue);
    (module, queue.flush())
}

#[test]
fn functions_and_variables_are_collected() {
    let (module, diags) = run(
        &TranslatePolicy::default(),
        vec![
            function("add", vec![param("a", int()), param("b", int())]),
            var("counter", int()),
        ],
    );
    assert!(diags.is_empty());
    assert_eq!(module.entities.len(), 2);
    let CType::Function(add) = &module.entities["add"] else {
        panic!("expected a function");
    };
    let names: Vec<_> = add.params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn non_c_callback_skips_whole_function() {
    let callback = SourceType::pointer(SourceType::FunctionProto {
        call_conv: CallConv::StdCall,
        return_type: Box::new(int()),
        params: vec![],
    });
    let (module, diags) = run(
        &TranslatePolicy::default(),
        vec![
            function("on_event", vec![param("cb", callback)]),
            function("ok", vec![]),
        ],
    );
    assert!(!module.entities.contains_key("on_event"));
    assert!(module.entities.contains_key("ok"));

    let messages: Vec<_> = diags.iter().map(|d| (d.severity, d.code)).collect();
    assert_eq!(
        messages,
        [
            (Severity::Warning, ErrorCode::E2003),
            (Severity::Note, ErrorCode::E2008),
            (Severity::Note, ErrorCode::E2008),
        ]
    );
    assert_eq!(diags[1].message, "in declaration for parameter `cb`");
    assert_eq!(
        diags[2].message,
        "declaration for function `on_event` is therefore ignored"
    );
    assert_eq!(
        diags[0].primary_location(),
        Some(&SourceLocation::new("api.h", 3, 1))
    );
}

#[test]
fn non_marshallable_parameter_is_rejected() {
    let (module, diags) = run(
        &TranslatePolicy::default(),
        vec![function("draw", vec![param("", SourceType::tag("point"))])],
    );
    assert!(module.entities.is_empty());
    assert_eq!(diags[0].code, ErrorCode::E2005);
    assert_eq!(diags[1].message, "in declaration for the 1st parameter");
}

#[test]
fn return_types_are_not_checked_for_marshallability() {
    let decl = Decl::new(
        "origin",
        DeclKind::Function {
            return_type: SourceType::tag("point"),
            params: vec![],
        },
    );
    let (module, diags) = run(&TranslatePolicy::default(), vec![decl]);
    assert!(diags.is_empty());
    assert!(module.entities.contains_key("origin"));
}

#[test]
fn variable_rejection_has_variable_note() {
    let (_, diags) = run(
        &TranslatePolicy::default(),
        vec![var("r", SourceType::RvalueReference {
            referee: Box::new(int()),
        })],
    );
    assert_eq!(diags.len(), 2);
    assert_eq!(diags[1].message, "in declaration for variable `r`");
}

#[test]
fn origin_filter() {
    let decls = vec![
        var("main_var", int()),
        var("header_var", int()).with_origin(DeclOrigin::Header),
        var("system_var", int()).with_origin(DeclOrigin::SystemHeader),
    ];
    let (module, _) = run(&TranslatePolicy::default(), decls.clone());
    assert_eq!(module.entities.keys().collect::<Vec<_>>(), ["main_var"]);

    let group = TranslatePolicy {
        header_group: true,
        ..TranslatePolicy::default()
    };
    let (module, _) = run(&group, decls);
    assert_eq!(
        module.entities.keys().collect::<Vec<_>>(),
        ["header_var", "main_var"]
    );
}

#[test]
fn linkage_filters_and_warnings() {
    let decls = vec![
        var("internal", int()).with_linkage(false, true),
        var("cpp", int()).with_linkage(true, false),
    ];

    let (module, diags) = run(&TranslatePolicy::default(), decls.clone());
    assert!(module.entities.is_empty());
    let codes: Vec<_> = diags.iter().map(|d| d.code).collect();
    assert_eq!(codes, [ErrorCode::E2007]);

    let noisy = TranslatePolicy {
        warn_no_external_formal_linkage: true,
        warn_no_c_linkage: false,
        ..TranslatePolicy::default()
    };
    let (_, diags) = run(&noisy, decls.clone());
    let codes: Vec<_> = diags.iter().map(|d| d.code).collect();
    assert_eq!(codes, [ErrorCode::E2006]);

    let assume = TranslatePolicy {
        assume_extern_c: true,
        ..TranslatePolicy::default()
    };
    let (module, diags) = run(&assume, decls);
    assert!(diags.is_empty());
    assert_eq!(module.entities.keys().collect::<Vec<_>>(), ["cpp"]);
}

#[test]
fn first_declaration_wins() {
    let (module, _) = run(
        &TranslatePolicy::default(),
        vec![
            var("v", int()),
            var("v", SourceType::builtin(BuiltinKind::Double)),
        ],
    );
    assert_eq!(
        module.entities["v"],
        CType::Scalar(ScalarType::from_builtin(&BuiltinKind::Int).unwrap())
    );
}

#[test]
fn enums_keep_order_and_duplicates() {
    let decl = Decl::new(
        "color",
        DeclKind::Enum {
            integer_type: SourceType::builtin(BuiltinKind::UInt),
            enumerators: vec![
                EnumeratorDecl {
                    name: "RED".into(),
                    value: 0,
                },
                EnumeratorDecl {
                    name: "CRIMSON".into(),
                    value: 0,
                },
                EnumeratorDecl {
                    name: "NEG".into(),
                    value: -1,
                },
            ],
        },
    );
    let (module, _) = run(&TranslatePolicy::default(), vec![decl]);
    let TagType::Enumeration(color) = &module.tags["color"] else {
        panic!("expected an enum");
    };
    let values: Vec<_> = color.values.iter().map(|e| (e.name.as_str(), e.value)).collect();
    assert_eq!(values, [("RED", 0), ("CRIMSON", 0), ("NEG", -1)]);
}

#[test]
fn anonymous_tags_are_dropped_silently() {
    let decls = vec![
        Decl::new(
            "",
            DeclKind::Enum {
                integer_type: int(),
                enumerators: vec![],
            },
        ),
        Decl::new("", DeclKind::Struct { fields: vec![] }),
    ];
    let (module, diags) = run(&TranslatePolicy::default(), decls);
    assert!(module.tags.is_empty());
    assert!(diags.is_empty());
}

#[test]
fn typedef_names_anonymous_tags() {
    let decls = vec![
        Decl::new(
            "point_t",
            DeclKind::Typedef {
                underlying: TypedefTarget::Struct {
                    name: String::new(),
                    fields: vec![field("x", int()), field("y", int())],
                },
            },
        ),
        Decl::new(
            "named_t",
            DeclKind::Typedef {
                underlying: TypedefTarget::Enum {
                    name: "named".into(),
                    integer_type: int(),
                    enumerators: vec![],
                },
            },
        ),
        Decl::new(
            "count_t",
            DeclKind::Typedef {
                underlying: TypedefTarget::Type { ty: int() },
            },
        ),
    ];
    let (module, _) = run(&TranslatePolicy::default(), decls);
    assert_eq!(module.tags.keys().collect::<Vec<_>>(), ["named", "point_t"]);
}

#[test]
fn struct_with_bad_field_is_dropped_and_reported() {
    let decl = Decl::new(
        "wide",
        DeclKind::Struct {
            fields: vec![
                field("ok", int()),
                field("big", SourceType::builtin(BuiltinKind::Int128)),
            ],
        },
    );
    let (module, diags) = run(&TranslatePolicy::default(), vec![decl]);
    assert!(module.tags.is_empty());
    assert_eq!(diags.len(), 2);
    assert_eq!(diags[0].code, ErrorCode::E2001);
    assert_eq!(diags[1].message, "in declaration of field `big` of struct `wide`");
}

#[test]
fn struct_fields_may_hold_structs_by_value() {
    let decl = Decl::new(
        "line",
        DeclKind::Struct {
            fields: vec![
                field("from", SourceType::tag("point")),
                field("to", SourceType::tag("point")),
            ],
        },
    );
    let (module, diags) = run(&TranslatePolicy::default(), vec![decl]);
    assert!(diags.is_empty());
    let TagType::Structure(line) = &module.tags["line"] else {
        panic!("expected a struct");
    };
    assert_eq!(line.fields[1].ty, CType::opaque("point"));
}

#[test]
fn anonymous_nested_tags_drop_their_users_silently() {
    let decls = vec![
        Decl::new(
            "outer",
            DeclKind::Struct {
                fields: vec![field("id", int()), field("inner", SourceType::tag(""))],
            },
        ),
        var("cursor", SourceType::pointer(SourceType::tag(""))),
        var("count", int()),
    ];
    let (module, diags) = run(&TranslatePolicy::default(), decls);
    assert!(module.tags.is_empty());
    assert_eq!(module.entities.keys().collect::<Vec<_>>(), ["count"]);
    assert!(diags.is_empty());
}
