#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Static checking of format-method contracts.
//!
//! Two entry points, both pure over host-supplied facts:
//!
//! - [`check_declaration`] validates how a method declaration places the
//!   format-method and template-parameter annotations.
//! - [`check_invocation`] validates one call to a format method: the
//!   template argument must be a compile-time constant that parses, and its
//!   specifiers must agree with the trailing arguments in number and type.

pub mod call;
pub mod config;
pub mod contract;
mod error;
pub mod matcher;
mod model;
pub mod resolve;
mod result;
pub mod template;

mod checker;

pub use call::{check_invocation, validate_call};
pub use checker::{FormatChecker, check_declaration};
pub use config::{CheckConfig, DepthGuard};
pub use contract::{MethodContract, locate_template, validate_declaration};
pub use error::{ContractError, TemplateError};
pub use matcher::{accepts, match_arguments};
pub use model::{ArgCategory, Argument, ArgumentType, Expr, Invocation, MethodDecl, Parameter};
pub use resolve::{
    Binding, EmptyScope, ForwardedTemplate, Resolution, SymbolTable, resolve_template,
};
pub use result::{
    Anchor, CallDiagnostic, DeclarationDiagnostic, Diagnostic, StructuralViolation,
    ValidationResult,
};
pub use template::{Conversion, ConversionSpecifier, IndexSpec, Template};
