//! Verdicts reported to the host.

use core::fmt;

use crate::model::{ArgCategory, ArgumentType};
use crate::template::Conversion;

/// The node a diagnostic should be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Anchor {
    /// The method declaration as a whole.
    Method,
    /// A declared parameter, by position.
    Parameter(usize),
    /// The whole invocation.
    Call,
    /// An actual argument of the invocation, by position.
    Argument(usize),
}

/// Annotation misuse on a method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StructuralViolation {
    /// A parameter is marked as the template but the method is not a format method.
    ///
    /// `param` is the parameter name; the host owns the source text of the
    /// declaration and may render it in place of the name.
    MarkedOutsideFormatMethod { param_index: usize, param: String },
    /// The marked parameter is not of the template-bearing type.
    MarkedNonStringParam { param_index: usize },
    /// A second parameter is marked as the template.
    MultipleMarkedParams { param_index: usize },
    /// A format method has no template-bearing parameter at all.
    MissingStringParam,
}

impl StructuralViolation {
    pub fn message(&self) -> String {
        match self {
            Self::MarkedOutsideFormatMethod { param, .. } => format!(
                "A parameter can only be annotated @FormatString in a method annotated @FormatMethod: {param}"
            ),
            Self::MarkedNonStringParam { .. } => {
                "Only strings can be annotated @FormatString.".to_string()
            }
            Self::MultipleMarkedParams { .. } => {
                "A method cannot have more than one @FormatString parameter.".to_string()
            }
            Self::MissingStringParam => {
                "An @FormatMethod must contain at least one String parameter.".to_string()
            }
        }
    }

    /// Only a non-string mark points at the parameter; the rest flag the method.
    pub fn anchor(&self) -> Anchor {
        match self {
            Self::MarkedNonStringParam { param_index } => Anchor::Parameter(*param_index),
            _ => Anchor::Method,
        }
    }
}

impl fmt::Display for StructuralViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Outcome of checking one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationResult {
    None,
    /// The template needs `used` argument slots but `provided` were supplied.
    CountMismatch { used: usize, provided: usize },
    /// The first specifier whose argument has an incompatible category.
    ///
    /// `specifier_index` counts every specifier in the template, escapes
    /// included; `argument` is the zero-based trailing argument checked.
    TypeMismatch {
        specifier_index: usize,
        specifier: String,
        argument: usize,
        expected: Conversion,
        actual: ArgCategory,
    },
    /// The template argument is neither a literal nor a compile-time constant.
    UnresolvedTemplate,
    MalformedTemplate { reason: String },
    /// A forwarded template received a different number of arguments than
    /// the header that declared it.
    ForwardedCountMismatch { expected: usize, provided: usize },
    /// A forwarded template received an argument whose type differs from
    /// the header that declared it.
    ForwardedTypeMismatch {
        argument: usize,
        expected: ArgumentType,
        actual: ArgumentType,
    },
}

impl ValidationResult {
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn message(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::CountMismatch { used, provided } => {
                format!("extra format arguments: used {used}, provided {provided}")
            }
            Self::TypeMismatch {
                specifier,
                expected,
                actual,
                ..
            } => format!(
                "illegal format conversion: '{specifier}' expects {expected}, got {actual}"
            ),
            Self::UnresolvedTemplate => {
                "Format strings must be either a literal or a compile-time constant.".to_string()
            }
            Self::MalformedTemplate { reason } => format!("invalid format string: {reason}"),
            Self::ForwardedCountMismatch { expected, provided } => format!(
                "The number of format arguments passed with an @FormatString must match the number of format arguments in the @FormatMethod header where the format string was declared: expected {expected}, provided {provided}"
            ),
            Self::ForwardedTypeMismatch {
                argument,
                expected,
                actual,
            } => format!(
                "The format argument types passed with an @FormatString must match the types of the format arguments in the @FormatMethod header where the format string was declared: argument {argument} expected {expected}, got {actual}"
            ),
        }
    }

    /// Where to attach the diagnostic, given the template argument's position.
    pub fn anchor(&self, template_index: usize) -> Anchor {
        match self {
            Self::UnresolvedTemplate | Self::MalformedTemplate { .. } => {
                Anchor::Argument(template_index)
            }
            Self::TypeMismatch { argument, .. } | Self::ForwardedTypeMismatch { argument, .. } => {
                Anchor::Argument(template_index + 1 + argument)
            }
            Self::None | Self::CountMismatch { .. } | Self::ForwardedCountMismatch { .. } => {
                Anchor::Call
            }
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// A reported defect: what went wrong, its rendered message, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic<K> {
    pub kind: K,
    pub message: String,
    pub anchor: Anchor,
}

pub type DeclarationDiagnostic = Diagnostic<StructuralViolation>;
pub type CallDiagnostic = Diagnostic<ValidationResult>;

impl From<StructuralViolation> for DeclarationDiagnostic {
    fn from(kind: StructuralViolation) -> Self {
        Self {
            message: kind.message(),
            anchor: kind.anchor(),
            kind,
        }
    }
}

impl CallDiagnostic {
    /// `None` when the result is not a defect.
    pub fn from_result(kind: ValidationResult, template_index: usize) -> Option<Self> {
        if kind.is_none() {
            return None;
        }
        Some(Self {
            message: kind.message(),
            anchor: kind.anchor(template_index),
            kind,
        })
    }
}

impl<K> fmt::Display for Diagnostic<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
