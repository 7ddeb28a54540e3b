//! Call-site validation.
//!
//! One invocation runs through a linear pipeline with early exit:
//! locate the template slot, resolve it to a constant, parse it, then match
//! the trailing arguments. A template forwarded from the enclosing format
//! method skips parsing and is checked against that method's header instead.
#![cfg_attr(feature = "docs", doc = simple_mermaid::mermaid!("../docs/diagrams/call_site.mmd"))]

use crate::config::CheckConfig;
use crate::contract::locate_template;
use crate::error::ContractError;
use crate::matcher::match_arguments;
use crate::model::{ArgumentType, Expr, Invocation};
use crate::resolve::{ForwardedTemplate, Resolution, SymbolTable, resolve_template};
use crate::result::{CallDiagnostic, ValidationResult};
use crate::template::Template;

/// Validates a template expression against the types of the arguments after it.
pub fn validate_call<S: SymbolTable + ?Sized>(
    template: &Expr,
    trailing: &[ArgumentType],
    symbols: &S,
    config: &CheckConfig,
) -> ValidationResult {
    let text = match resolve_template(template, symbols, config) {
        Resolution::Constant(text) => text,
        Resolution::Forwarded(forwarded) => {
            tracing::trace!("template forwarded from enclosing format method");
            return check_forwarded(&forwarded, trailing);
        }
        Resolution::Unresolved => {
            tracing::trace!("template is not a compile-time constant");
            return ValidationResult::UnresolvedTemplate;
        }
    };

    let template = match Template::parse(&text, config) {
        Ok(template) => template,
        Err(error) => {
            tracing::trace!(%error, "template failed to parse");
            return ValidationResult::MalformedTemplate {
                reason: error.to_string(),
            };
        }
    };

    match_arguments(&template, trailing)
}

/// A forwarded template must receive exactly the arguments its declaring
/// header promised, type for type.
fn check_forwarded(forwarded: &ForwardedTemplate, trailing: &[ArgumentType]) -> ValidationResult {
    let expected = &forwarded.format_args;
    if expected.len() != trailing.len() {
        return ValidationResult::ForwardedCountMismatch {
            expected: expected.len(),
            provided: trailing.len(),
        };
    }
    expected
        .iter()
        .zip(trailing)
        .enumerate()
        .find(|(_, (expected, actual))| expected != actual)
        .map_or(
            ValidationResult::None,
            |(argument, (expected, actual))| ValidationResult::ForwardedTypeMismatch {
                argument,
                expected: *expected,
                actual: *actual,
            },
        )
}

/// Checks one invocation.
///
/// Returns `Ok(None)` when there is no defect or the check does not apply:
/// the target could not be resolved, is not a format method, or has no
/// template parameter. A template slot with no argument is a host bug and
/// is returned as an error.
pub fn check_invocation<S: SymbolTable + ?Sized>(
    invocation: &Invocation,
    symbols: &S,
    config: &CheckConfig,
) -> Result<Option<CallDiagnostic>, ContractError> {
    let Some(target) = &invocation.target else {
        tracing::trace!("invocation target unresolved, skipping");
        return Ok(None);
    };
    let Some(template_index) = locate_template(target) else {
        tracing::trace!(method = %target.name, "not a format method call");
        return Ok(None);
    };

    let template_arg =
        invocation
            .args
            .get(template_index)
            .ok_or_else(|| ContractError::MissingTemplateArgument {
                method: target.name.clone(),
                index: template_index,
                supplied: invocation.args.len(),
            })?;
    let trailing: Vec<ArgumentType> = invocation.args[template_index + 1..]
        .iter()
        .map(|arg| arg.ty)
        .collect();

    let result = validate_call(&template_arg.expr, &trailing, symbols, config);
    let diagnostic = CallDiagnostic::from_result(result, template_index);
    if let Some(diagnostic) = &diagnostic {
        tracing::debug!(
            method = %target.name,
            anchor = ?diagnostic.anchor,
            "{}",
            diagnostic.message
        );
    }
    Ok(diagnostic)
}
