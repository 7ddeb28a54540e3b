//! Declaration checks against annotated method headers.

use fmtcontract::{
    Anchor, ArgCategory, ArgumentType, FormatChecker, MethodDecl, Parameter, StructuralViolation,
    check_declaration,
};
use test_case::test_case;

fn string(name: &str) -> Parameter {
    Parameter::new(name, ArgumentType::TEXT)
}

fn object(name: &str) -> Parameter {
    Parameter::new(name, ArgumentType::OBJECT)
}

fn varargs() -> Parameter {
    Parameter::new("args", ArgumentType::array_of(ArgCategory::Object))
}

#[test]
fn test_well_formed_format_method() {
    let decl = MethodDecl::new("log")
        .format_method()
        .param(string("s").template())
        .param(varargs());
    assert_eq!(check_declaration(&decl), None);
}

#[test]
fn test_implicit_template_is_well_formed() {
    let decl = MethodDecl::new("log")
        .format_method()
        .param(object("context"))
        .param(string("s"))
        .param(varargs());
    assert_eq!(check_declaration(&decl), None);
}

#[test]
fn test_multiple_marked_params() {
    let decl = MethodDecl::new("log1")
        .format_method()
        .param(string("s1").template())
        .param(string("s2").template());

    let diagnostic = check_declaration(&decl).unwrap();
    assert_eq!(
        diagnostic.kind,
        StructuralViolation::MultipleMarkedParams { param_index: 1 }
    );
    assert_eq!(diagnostic.anchor, Anchor::Method);
    insta::assert_snapshot!(
        diagnostic.message,
        @"A method cannot have more than one @FormatString parameter."
    );
}

#[test]
fn test_missing_string_param() {
    let decl = MethodDecl::new("log2").format_method().param(object("o"));

    let diagnostic = check_declaration(&decl).unwrap();
    assert_eq!(diagnostic.kind, StructuralViolation::MissingStringParam);
    assert_eq!(diagnostic.anchor, Anchor::Method);
    insta::assert_snapshot!(
        diagnostic.message,
        @"An @FormatMethod must contain at least one String parameter."
    );
}

#[test]
fn test_marked_non_string_param() {
    let decl = MethodDecl::new("log3")
        .format_method()
        .param(object("o").template());

    let diagnostic = check_declaration(&decl).unwrap();
    assert_eq!(
        diagnostic.kind,
        StructuralViolation::MarkedNonStringParam { param_index: 0 }
    );
    assert_eq!(diagnostic.anchor, Anchor::Parameter(0));
    insta::assert_snapshot!(
        diagnostic.message,
        @"Only strings can be annotated @FormatString."
    );
}

#[test]
fn test_marked_outside_format_method() {
    let decl = MethodDecl::new("log4").param(object("o").template());

    let diagnostic = check_declaration(&decl).unwrap();
    assert_eq!(diagnostic.anchor, Anchor::Method);
    insta::assert_snapshot!(
        diagnostic.message,
        @"A parameter can only be annotated @FormatString in a method annotated @FormatMethod: o"
    );
}

#[test_case(ArgumentType::TEXT; "string")]
#[test_case(ArgumentType::OBJECT; "object")]
#[test_case(ArgumentType::INTEGRAL; "integral")]
#[test_case(ArgumentType::array_of(ArgCategory::Text); "string array")]
fn test_marked_outside_format_method_regardless_of_type(ty: ArgumentType) {
    let decl = MethodDecl::new("log").param(Parameter::new("p", ty).template());
    assert!(matches!(
        check_declaration(&decl).map(|d| d.kind),
        Some(StructuralViolation::MarkedOutsideFormatMethod { param_index: 0, .. })
    ));
}

#[test_case(2; "two marks")]
#[test_case(3; "three marks")]
#[test_case(5; "five marks")]
fn test_every_extra_mark_is_reported(marks: usize) {
    let mut decl = MethodDecl::new("log").format_method();
    for i in 0..marks {
        decl = decl.param(string(&format!("s{i}")).template());
    }
    assert_eq!(
        check_declaration(&decl).map(|d| d.kind),
        Some(StructuralViolation::MultipleMarkedParams { param_index: 1 })
    );
}

#[test_case(&[]; "no params")]
#[test_case(&[ArgumentType::OBJECT]; "object only")]
#[test_case(&[ArgumentType::INTEGRAL, ArgumentType::array_of(ArgCategory::Text)]; "string array is not a string")]
fn test_format_method_without_string(types: &[ArgumentType]) {
    let mut decl = MethodDecl::new("log").format_method();
    for (i, ty) in types.iter().enumerate() {
        decl = decl.param(Parameter::new(format!("p{i}"), *ty));
    }
    assert_eq!(
        check_declaration(&decl).map(|d| d.kind),
        Some(StructuralViolation::MissingStringParam)
    );
}

#[test]
fn test_plain_methods_are_ignored() {
    let checker = FormatChecker::new();
    let decl = MethodDecl::new("helper").param(object("o")).param(string("s"));
    assert_eq!(checker.check_declaration(&decl), None);
}
