//! Declaration-side rules: where the template lives and whether the
//! annotations on a method are placed legally.

use crate::model::MethodDecl;
use crate::result::StructuralViolation;

/// The format contract a declaration implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodContract {
    pub is_format_method: bool,
    /// The explicitly marked parameter, else the first string parameter.
    pub template_param_index: Option<usize>,
    pub has_string_param: bool,
}

impl MethodContract {
    pub fn of(decl: &MethodDecl) -> Self {
        let mut marked = None;
        let mut first_string = None;
        for (index, param) in decl.params.iter().enumerate() {
            if param.ty.is_template_bearing() && first_string.is_none() {
                first_string = Some(index);
            }
            if param.is_template && marked.is_none() {
                marked = Some(index);
            }
        }
        Self {
            is_format_method: decl.is_format_method,
            template_param_index: marked.or(first_string),
            has_string_param: first_string.is_some(),
        }
    }

    /// Index of the template parameter at a call to this method.
    ///
    /// `None` means the call is not subject to format checking.
    #[inline]
    pub fn template_slot(&self) -> Option<usize> {
        if self.is_format_method {
            self.template_param_index
        } else {
            None
        }
    }
}

/// Locates the template parameter of the invoked method.
///
/// Uses the same rule as declaration checking so both sides agree on which
/// argument is the template.
pub fn locate_template(target: &MethodDecl) -> Option<usize> {
    MethodContract::of(target).template_slot()
}

/// Checks annotation placement on one declaration.
///
/// Parameters are scanned in order and the first misuse wins; the
/// missing-string check runs only after the scan.
pub fn validate_declaration(decl: &MethodDecl) -> Option<StructuralViolation> {
    let mut found_template_mark = false;
    let mut found_string = false;

    for (param_index, param) in decl.params.iter().enumerate() {
        let is_string = param.ty.is_template_bearing();
        if is_string {
            found_string = true;
        }

        if !param.is_template {
            continue;
        }
        if !decl.is_format_method {
            return Some(StructuralViolation::MarkedOutsideFormatMethod {
                param_index,
                param: param.name.clone(),
            });
        }
        if !is_string {
            return Some(StructuralViolation::MarkedNonStringParam { param_index });
        }
        if found_template_mark {
            return Some(StructuralViolation::MultipleMarkedParams { param_index });
        }
        found_template_mark = true;
    }

    if decl.is_format_method && !found_string {
        return Some(StructuralViolation::MissingStringParam);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArgumentType, Parameter};

    fn string(name: &str) -> Parameter {
        Parameter::new(name, ArgumentType::TEXT)
    }

    fn object(name: &str) -> Parameter {
        Parameter::new(name, ArgumentType::OBJECT)
    }

    #[test]
    fn test_contract_prefers_marked_parameter() {
        let decl = MethodDecl::new("log")
            .format_method()
            .param(string("tag"))
            .param(string("format").template())
            .param(Parameter::new("args", ArgumentType::array_of(crate::ArgCategory::Object)));

        let contract = MethodContract::of(&decl);
        assert_eq!(contract.template_param_index, Some(1));
        assert!(contract.has_string_param);
        assert_eq!(locate_template(&decl), Some(1));
    }

    #[test]
    fn test_contract_falls_back_to_first_string() {
        let decl = MethodDecl::new("log")
            .format_method()
            .param(object("level"))
            .param(string("format"))
            .param(string("other"));

        assert_eq!(locate_template(&decl), Some(1));
    }

    #[test]
    fn test_not_a_format_method_has_no_slot() {
        let decl = MethodDecl::new("log").param(string("format"));
        assert_eq!(MethodContract::of(&decl).template_param_index, Some(0));
        assert_eq!(locate_template(&decl), None);
    }

    #[test]
    fn test_string_array_is_not_template_bearing() {
        let decl = MethodDecl::new("log")
            .format_method()
            .param(Parameter::new("lines", ArgumentType::array_of(crate::ArgCategory::Text)));
        assert_eq!(locate_template(&decl), None);
        assert_eq!(
            validate_declaration(&decl),
            Some(StructuralViolation::MissingStringParam)
        );
    }

    #[test]
    fn test_valid_declaration() {
        let decl = MethodDecl::new("log")
            .format_method()
            .param(string("format").template())
            .param(object("arg"));
        assert_eq!(validate_declaration(&decl), None);
    }

    #[test]
    fn test_plain_method_is_valid() {
        let decl = MethodDecl::new("log").param(object("o"));
        assert_eq!(validate_declaration(&decl), None);
    }

    #[test]
    fn test_multiple_marks() {
        let decl = MethodDecl::new("log1")
            .format_method()
            .param(string("s1").template())
            .param(string("s2").template());
        assert_eq!(
            validate_declaration(&decl),
            Some(StructuralViolation::MultipleMarkedParams { param_index: 1 })
        );
    }

    #[test]
    fn test_missing_string() {
        let decl = MethodDecl::new("log2").format_method().param(object("o"));
        assert_eq!(
            validate_declaration(&decl),
            Some(StructuralViolation::MissingStringParam)
        );
    }

    #[test]
    fn test_marked_non_string() {
        let decl = MethodDecl::new("log3")
            .format_method()
            .param(object("o").template());
        assert_eq!(
            validate_declaration(&decl),
            Some(StructuralViolation::MarkedNonStringParam { param_index: 0 })
        );
    }

    #[test]
    fn test_marked_outside_format_method_wins_over_type() {
        let decl = MethodDecl::new("log4").param(object("o").template());
        assert_eq!(
            validate_declaration(&decl),
            Some(StructuralViolation::MarkedOutsideFormatMethod {
                param_index: 0,
                param: "o".into()
            })
        );
    }

    #[test]
    fn test_first_bad_parameter_wins() {
        let decl = MethodDecl::new("log")
            .format_method()
            .param(object("o").template())
            .param(string("a").template())
            .param(string("b").template());
        assert_eq!(
            validate_declaration(&decl),
            Some(StructuralViolation::MarkedNonStringParam { param_index: 0 })
        );
    }
}
