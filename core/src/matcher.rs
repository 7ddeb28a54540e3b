//! Argument type matching.
//!
//! Compatibility is categorical:
//!
//! | conversion | accepts |
//! |---|---|
//! | general | every category |
//! | character | character, integral, null |
//! | integral | integral, null |
//! | floating point | floating point, null |
//! | date/time | date/time, integral, null |
//!
//! Escapes never reach the table since they take no argument.
//!
//! A lone trailing array of reference elements is the varargs array itself,
//! so each specifier sees its element category. A lone primitive array
//! (`int[]`) is not: it is one object argument, exactly as any array among
//! several trailing arguments is.

use crate::model::{ArgCategory, ArgumentType};
use crate::result::ValidationResult;
use crate::template::{Conversion, Template};

/// Whether an argument of `category` satisfies `conversion`.
pub const fn accepts(conversion: Conversion, category: ArgCategory) -> bool {
    use ArgCategory as A;

    if matches!(category, A::Null) {
        return true;
    }
    match conversion {
        Conversion::General => true,
        Conversion::Character => matches!(category, A::Character | A::Integral),
        Conversion::Integral => matches!(category, A::Integral),
        Conversion::FloatingPoint => matches!(category, A::FloatingPoint),
        Conversion::DateTime => matches!(category, A::DateTime | A::Integral),
        Conversion::Percent | Conversion::LineSeparator => true,
    }
}

/// The trailing arguments as the matcher sees them.
enum Trailing {
    /// One category per supplied argument.
    Spread(Vec<ArgCategory>),
    /// Element category of a lone array passed straight through as the varargs array.
    Array(ArgCategory),
}

impl Trailing {
    fn classify(args: &[ArgumentType]) -> Self {
        match args {
            [only] if only.spreads_as_varargs() => Trailing::Array(only.category),
            _ => Trailing::Spread(args.iter().map(|ty| ty.as_single_argument()).collect()),
        }
    }
}

/// Matches a parsed template against the static types of the trailing arguments.
///
/// The argument count is checked before any type: a template needing more or
/// fewer slots than supplied is a count mismatch either way. A lone array
/// argument is spread over every specifier with its element category, and its
/// length is not checked.
pub fn match_arguments(template: &Template, args: &[ArgumentType]) -> ValidationResult {
    let trailing = Trailing::classify(args);

    if let Trailing::Spread(categories) = &trailing {
        let used = template.used();
        let provided = categories.len();
        if used != provided {
            return ValidationResult::CountMismatch { used, provided };
        }
    }

    for (specifier_index, spec) in template.specifiers().iter().enumerate() {
        let Some(slot) = spec.argument else {
            continue;
        };
        let (argument, actual) = match &trailing {
            Trailing::Array(element) => (0, *element),
            Trailing::Spread(categories) => match categories.get(slot) {
                Some(category) => (slot, *category),
                None => continue,
            },
        };
        if !accepts(spec.conversion, actual) {
            return ValidationResult::TypeMismatch {
                specifier_index,
                specifier: spec.text.clone(),
                argument,
                expected: spec.conversion,
                actual,
            };
        }
    }

    ValidationResult::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckConfig;
    use test_case::test_case;

    fn check(text: &str, args: &[ArgumentType]) -> ValidationResult {
        let template = Template::parse(text, &CheckConfig::default()).unwrap();
        match_arguments(&template, args)
    }

    #[test_case(Conversion::General, ArgCategory::Object, true; "general object")]
    #[test_case(Conversion::General, ArgCategory::Boolean, true; "general boolean")]
    #[test_case(Conversion::Integral, ArgCategory::Integral, true; "integral integral")]
    #[test_case(Conversion::Integral, ArgCategory::FloatingPoint, false; "integral float")]
    #[test_case(Conversion::Integral, ArgCategory::Object, false; "integral object")]
    #[test_case(Conversion::Integral, ArgCategory::Null, true; "integral null")]
    #[test_case(Conversion::FloatingPoint, ArgCategory::Integral, false; "float integral")]
    #[test_case(Conversion::Character, ArgCategory::Integral, true; "char code point")]
    #[test_case(Conversion::Character, ArgCategory::Text, false; "char string")]
    #[test_case(Conversion::DateTime, ArgCategory::Integral, true; "date millis")]
    #[test_case(Conversion::DateTime, ArgCategory::Text, false; "date string")]
    fn test_accepts(conversion: Conversion, category: ArgCategory, expected: bool) {
        assert_eq!(accepts(conversion, category), expected);
    }

    #[test]
    fn test_matching_arguments() {
        let result = check(
            "%s has %d items costing %.2f",
            &[
                ArgumentType::TEXT,
                ArgumentType::INTEGRAL,
                ArgumentType::FLOATING_POINT,
            ],
        );
        assert_eq!(result, ValidationResult::None);
    }

    #[test]
    fn test_too_few_arguments() {
        assert_eq!(
            check("%s %s", &[ArgumentType::TEXT]),
            ValidationResult::CountMismatch {
                used: 2,
                provided: 1
            }
        );
    }

    #[test]
    fn test_too_many_arguments() {
        assert_eq!(
            check("%s", &[ArgumentType::OBJECT, ArgumentType::OBJECT]),
            ValidationResult::CountMismatch {
                used: 1,
                provided: 2
            }
        );
    }

    #[test]
    fn test_count_checked_before_types() {
        assert!(matches!(
            check("%d", &[ArgumentType::OBJECT, ArgumentType::OBJECT]),
            ValidationResult::CountMismatch { .. }
        ));
    }

    #[test]
    fn test_first_type_mismatch_wins() {
        assert_eq!(
            check("%s %d %f", &[
                ArgumentType::TEXT,
                ArgumentType::TEXT,
                ArgumentType::TEXT
            ]),
            ValidationResult::TypeMismatch {
                specifier_index: 1,
                specifier: "%d".into(),
                argument: 1,
                expected: Conversion::Integral,
                actual: ArgCategory::Text,
            }
        );
    }

    #[test]
    fn test_escapes_do_not_shift_specifier_index() {
        assert_eq!(
            check("%% %n %d", &[ArgumentType::BOOLEAN]),
            ValidationResult::TypeMismatch {
                specifier_index: 2,
                specifier: "%d".into(),
                argument: 0,
                expected: Conversion::Integral,
                actual: ArgCategory::Boolean,
            }
        );
    }

    #[test]
    fn test_explicit_index_checks_referenced_argument() {
        assert_eq!(
            check("%2$d %1$s", &[ArgumentType::OBJECT, ArgumentType::INTEGRAL]),
            ValidationResult::None
        );
    }

    #[test]
    fn test_array_pass_through_uses_element_type() {
        let array = ArgumentType::array_of(ArgCategory::Integral);
        assert_eq!(check("%d %x %o", &[array]), ValidationResult::None);

        let array = ArgumentType::array_of(ArgCategory::Text);
        assert!(matches!(
            check("%s %d", &[array]),
            ValidationResult::TypeMismatch {
                specifier_index: 1,
                actual: ArgCategory::Text,
                ..
            }
        ));
    }

    #[test]
    fn test_array_among_others_is_object() {
        let array = ArgumentType::array_of(ArgCategory::Integral);
        assert!(matches!(
            check("%s %d", &[ArgumentType::TEXT, array]),
            ValidationResult::TypeMismatch {
                actual: ArgCategory::Object,
                ..
            }
        ));
    }

    #[test]
    fn test_primitive_array_is_one_object() {
        let array = ArgumentType::primitive_array_of(ArgCategory::Integral);
        assert_eq!(
            check("%d %d", &[array]),
            ValidationResult::CountMismatch {
                used: 2,
                provided: 1
            }
        );
        assert_eq!(check("%s", &[array]), ValidationResult::None);
        assert!(matches!(
            check("%d", &[array]),
            ValidationResult::TypeMismatch {
                actual: ArgCategory::Object,
                ..
            }
        ));
    }

    #[test]
    fn test_no_specifiers_no_arguments() {
        assert_eq!(check("plain", &[]), ValidationResult::None);
    }
}
