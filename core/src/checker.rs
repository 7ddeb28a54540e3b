//! The two host entry points.
//!
//! [`FormatChecker`] holds only its configuration, so one instance can be
//! shared across threads and used for any number of declarations and call
//! sites in any order.

use crate::call;
use crate::config::CheckConfig;
use crate::contract::validate_declaration;
use crate::error::ContractError;
use crate::model::{Invocation, MethodDecl};
use crate::resolve::SymbolTable;
use crate::result::{CallDiagnostic, DeclarationDiagnostic};

/// Checks a method declaration's annotation placement.
pub fn check_declaration(decl: &MethodDecl) -> Option<DeclarationDiagnostic> {
    let violation = validate_declaration(decl)?;
    let diagnostic = DeclarationDiagnostic::from(violation);
    tracing::debug!(
        method = %decl.name,
        anchor = ?diagnostic.anchor,
        "{}",
        diagnostic.message
    );
    Some(diagnostic)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatChecker {
    config: CheckConfig,
}

impl FormatChecker {
    #[inline]
    pub const fn new() -> Self {
        Self {
            config: CheckConfig::DEFAULT,
        }
    }

    #[inline]
    pub const fn with_config(config: CheckConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub const fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// See [`check_declaration`].
    pub fn check_declaration(&self, decl: &MethodDecl) -> Option<DeclarationDiagnostic> {
        check_declaration(decl)
    }

    /// See [`call::check_invocation`].
    pub fn check_invocation<S: SymbolTable + ?Sized>(
        &self,
        invocation: &Invocation,
        symbols: &S,
    ) -> Result<Option<CallDiagnostic>, ContractError> {
        call::check_invocation(invocation, symbols, &self.config)
    }
}
