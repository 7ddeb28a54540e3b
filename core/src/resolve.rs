//! Compile-time constant resolution of template arguments.
//!
//! Only expressions whose value is fixed without running the program are
//! accepted: literals, references to constants, `+` over constants and
//! conditionals with a constant condition. Everything else is unresolved.
//!
//! Folding is bounded two ways: nesting depth by
//! [`CheckConfig::max_resolution_depth`] and the length of every folded
//! string by [`CheckConfig::max_constant_len`]. Each constant name is folded
//! at most once per resolution, so constants shared across a concatenation
//! tree cost linear work.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::config::{CheckConfig, DepthGuard};
use crate::model::{ArgumentType, Expr};

/// What a name refers to at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Binding {
    /// An immutable variable or field with a constant-eligible initializer.
    Constant(Expr),
    /// Anything whose value is only known at run time.
    Variable,
    /// The template parameter of the enclosing format method.
    TemplateParameter(ForwardedTemplate),
}

/// The enclosing format method's contract for a template it received.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForwardedTemplate {
    /// Types of the enclosing method's parameters after its template parameter.
    pub format_args: Vec<ArgumentType>,
}

/// Read-only name lookup supplied by the host.
///
/// Implementations must be pure: the checker may call `binding` any number
/// of times, from any thread, for the same name.
pub trait SymbolTable {
    fn binding(&self, name: &str) -> Option<Binding>;
}

impl SymbolTable for HashMap<String, Binding> {
    fn binding(&self, name: &str) -> Option<Binding> {
        self.get(name).cloned()
    }
}

impl SymbolTable for BTreeMap<String, Binding> {
    fn binding(&self, name: &str) -> Option<Binding> {
        self.get(name).cloned()
    }
}

/// A scope with no names in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyScope;

impl SymbolTable for EmptyScope {
    fn binding(&self, _name: &str) -> Option<Binding> {
        None
    }
}

impl<T: SymbolTable + ?Sized> SymbolTable for &T {
    fn binding(&self, name: &str) -> Option<Binding> {
        (**self).binding(name)
    }
}

/// What the template argument turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Constant(String),
    Forwarded(ForwardedTemplate),
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ConstValue {
    Str(String),
    Int(i64),
    Char(char),
    Bool(bool),
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Str(s) => f.write_str(s),
            ConstValue::Int(i) => write!(f, "{i}"),
            ConstValue::Char(c) => write!(f, "{c}"),
            ConstValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl ConstValue {
    fn numeric(&self) -> Option<i64> {
        match self {
            ConstValue::Int(i) => Some(*i),
            ConstValue::Char(c) => Some(i64::from(u32::from(*c))),
            _ => None,
        }
    }
}

struct Evaluator<'a, S: ?Sized> {
    symbols: &'a S,
    limit: usize,
    max_len: usize,
    depth: DepthGuard,
    folded: HashMap<String, ConstValue>,
}

impl<S: SymbolTable + ?Sized> Evaluator<'_, S> {
    fn eval(&mut self, expr: &Expr) -> Option<ConstValue> {
        let within = self.depth.enter(self.limit);
        let value = if within {
            self.eval_inner(expr)
        } else {
            tracing::debug!(limit = self.limit, "constant resolution depth exceeded");
            None
        };
        self.depth.exit();
        match value {
            Some(ConstValue::Str(s)) if s.len() > self.max_len => {
                tracing::debug!(
                    len = s.len(),
                    limit = self.max_len,
                    "folded constant exceeds length limit"
                );
                None
            }
            value => value,
        }
    }

    /// Folds a named constant, reusing the value if it was already folded.
    ///
    /// Only successes are kept: any failure aborts the whole resolution.
    fn eval_name(&mut self, name: &str) -> Option<ConstValue> {
        if let Some(value) = self.folded.get(name) {
            return Some(value.clone());
        }
        let value = match self.symbols.binding(name)? {
            Binding::Constant(init) => self.eval(&init)?,
            Binding::Variable | Binding::TemplateParameter(_) => return None,
        };
        self.folded.insert(name.to_string(), value.clone());
        Some(value)
    }

    fn eval_inner(&mut self, expr: &Expr) -> Option<ConstValue> {
        match expr {
            Expr::StringLiteral(s) => Some(ConstValue::Str(s.clone())),
            Expr::IntLiteral(i) => Some(ConstValue::Int(*i)),
            Expr::CharLiteral(c) => Some(ConstValue::Char(*c)),
            Expr::BoolLiteral(b) => Some(ConstValue::Bool(*b)),
            Expr::Name(name) => self.eval_name(name),
            Expr::Concat(left, right) => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                match (left, right) {
                    (ConstValue::Str(mut s), other) => {
                        s.push_str(&other.to_string());
                        Some(ConstValue::Str(s))
                    }
                    (other, ConstValue::Str(s)) => Some(ConstValue::Str(format!("{other}{s}"))),
                    (l, r) => Some(ConstValue::Int(l.numeric()?.wrapping_add(r.numeric()?))),
                }
            }
            Expr::Conditional {
                condition,
                then,
                otherwise,
            } => match self.eval(condition)? {
                ConstValue::Bool(true) => self.eval(then),
                ConstValue::Bool(false) => self.eval(otherwise),
                _ => None,
            },
            Expr::NullLiteral | Expr::Call(_) | Expr::Opaque => None,
        }
    }
}

/// Resolves the expression in the template slot.
///
/// A bare reference to the enclosing method's own template parameter is
/// reported as [`Resolution::Forwarded`]; otherwise the expression must
/// reduce to a constant string.
pub fn resolve_template<S: SymbolTable + ?Sized>(
    expr: &Expr,
    symbols: &S,
    config: &CheckConfig,
) -> Resolution {
    if let Expr::Name(name) = expr {
        if let Some(Binding::TemplateParameter(forwarded)) = symbols.binding(name) {
            return Resolution::Forwarded(forwarded);
        }
    }

    let mut evaluator = Evaluator {
        symbols,
        limit: config.max_resolution_depth,
        max_len: config.max_constant_len,
        depth: DepthGuard::new(),
        folded: HashMap::new(),
    };
    match evaluator.eval(expr) {
        Some(ConstValue::Str(text)) => Resolution::Constant(text),
        _ => Resolution::Unresolved,
    }
}
