//! Error types.
//!
//! Defects in the checked program are never errors here: they are reported
//! as [`ValidationResult`](crate::ValidationResult) and
//! [`StructuralViolation`](crate::StructuralViolation) values. The types in
//! this module cover the two remaining cases: a template that cannot be
//! parsed (which becomes the reason of a malformed-template result) and host
//! facts that break the engine's preconditions.

use thiserror::Error;

/// Syntax errors found while parsing a template.
///
/// The `Display` text is the reason shown in the malformed-template diagnostic.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateError {
    #[default]
    #[error("unrecognized format specifier")]
    Unknown,

    #[error("unterminated format specifier '{fragment}' at offset {offset}")]
    Unterminated { fragment: String, offset: usize },

    #[error("unknown format conversion '{conversion}' at offset {offset}")]
    UnknownConversion { conversion: char, offset: usize },

    #[error("missing date/time suffix after '{conversion}' at offset {offset}")]
    MissingDateTimeSuffix { conversion: char, offset: usize },

    #[error("unknown date/time suffix '{suffix}' at offset {offset}")]
    UnknownDateTimeSuffix { suffix: char, offset: usize },

    #[error("illegal format argument index {index} at offset {offset}")]
    InvalidIndex { index: String, offset: usize },

    #[error("invalid {field} at offset {offset}")]
    InvalidNumber { field: &'static str, offset: usize },

    #[error("relative index '%<' at offset {offset} has no previous argument")]
    NoPreviousArgument { offset: usize },

    #[error("template length {len} exceeds limit {limit}")]
    TemplateTooLong { len: usize, limit: usize },

    #[error("template has more than {limit} format specifiers")]
    TooManySpecifiers { limit: usize },
}

impl TemplateError {
    /// Byte offset in the template the error points at, when it has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Unterminated { offset, .. }
            | Self::UnknownConversion { offset, .. }
            | Self::MissingDateTimeSuffix { offset, .. }
            | Self::UnknownDateTimeSuffix { offset, .. }
            | Self::InvalidIndex { offset, .. }
            | Self::InvalidNumber { offset, .. }
            | Self::NoPreviousArgument { offset } => Some(*offset),
            Self::Unknown | Self::TemplateTooLong { .. } | Self::TooManySpecifiers { .. } => None,
        }
    }
}

/// Host facts violate a precondition of the call-site check.
///
/// These are bugs in the host's lowering, not defects in the checked
/// program, so they are surfaced instead of being reported as "no violation".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error(
        "template parameter {index} of '{method}' has no matching argument: call supplies {supplied}"
    )]
    MissingTemplateArgument {
        method: String,
        index: usize,
        supplied: usize,
    },
}
