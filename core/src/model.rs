//! Host facts consumed by the checker.
//!
//! The host lowers its own syntax tree and symbol table into these types.
//! Nothing here is derived by the engine: static types, annotation presence
//! and constant bindings are taken as already resolved.

use core::fmt;

/// Static type classification of a parameter or argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum ArgCategory {
    /// `byte`, `short`, `int`, `long`, big integers and their boxes.
    Integral,
    /// `float`, `double`, big decimals and their boxes.
    FloatingPoint,
    /// `char` and its box.
    Character,
    /// `boolean` and its box.
    Boolean,
    /// The template-bearing string type.
    Text,
    /// Calendars, dates and temporal accessors.
    DateTime,
    /// The type of the `null` literal.
    Null,
    /// Anything else, including unknown static types.
    Object,
}

impl ArgCategory {
    pub const fn name(self) -> &'static str {
        match self {
            ArgCategory::Integral => "integral",
            ArgCategory::FloatingPoint => "floating point",
            ArgCategory::Character => "character",
            ArgCategory::Boolean => "boolean",
            ArgCategory::Text => "string",
            ArgCategory::DateTime => "date/time",
            ArgCategory::Null => "null",
            ArgCategory::Object => "object",
        }
    }
}

impl fmt::Display for ArgCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static type of one parameter or argument.
///
/// Arrays keep their element category so a lone array argument can be
/// spread over a varargs template. Arrays of a primitive element type
/// (`int[]`, `char[]`) cannot stand in for an `Object...` array and are
/// marked with `is_primitive_array`; the flag is only meaningful together
/// with `is_array`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct ArgumentType {
    pub category: ArgCategory,
    pub is_array: bool,
    pub is_primitive_array: bool,
}

impl ArgumentType {
    pub const INTEGRAL: Self = Self::scalar(ArgCategory::Integral);
    pub const FLOATING_POINT: Self = Self::scalar(ArgCategory::FloatingPoint);
    pub const CHARACTER: Self = Self::scalar(ArgCategory::Character);
    pub const BOOLEAN: Self = Self::scalar(ArgCategory::Boolean);
    pub const TEXT: Self = Self::scalar(ArgCategory::Text);
    pub const DATE_TIME: Self = Self::scalar(ArgCategory::DateTime);
    pub const NULL: Self = Self::scalar(ArgCategory::Null);
    pub const OBJECT: Self = Self::scalar(ArgCategory::Object);

    #[inline]
    pub const fn scalar(category: ArgCategory) -> Self {
        Self {
            category,
            is_array: false,
            is_primitive_array: false,
        }
    }

    #[inline]
    pub const fn array_of(category: ArgCategory) -> Self {
        Self {
            category,
            is_array: true,
            is_primitive_array: false,
        }
    }

    /// An array whose elements are primitives, e.g. `int[]`.
    #[inline]
    pub const fn primitive_array_of(category: ArgCategory) -> Self {
        Self {
            category,
            is_array: true,
            is_primitive_array: true,
        }
    }

    /// Whether a lone argument of this type is passed as the varargs array itself.
    #[inline]
    pub const fn spreads_as_varargs(self) -> bool {
        self.is_array && !self.is_primitive_array
    }

    /// True only for the exact template-bearing type; arrays of it do not count.
    #[inline]
    pub const fn is_template_bearing(self) -> bool {
        !self.is_array && matches!(self.category, ArgCategory::Text)
    }

    /// Category seen by a conversion when the value is passed as a single argument.
    ///
    /// An array is just an object to a conversion.
    #[inline]
    pub const fn as_single_argument(self) -> ArgCategory {
        if self.is_array {
            ArgCategory::Object
        } else {
            self.category
        }
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_array {
            write!(f, "{}[]", self.category)
        } else {
            write!(f, "{}", self.category)
        }
    }
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    pub name: String,
    pub ty: ArgumentType,
    /// The parameter carries the template-parameter annotation.
    pub is_template: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: ArgumentType) -> Self {
        Self {
            name: name.into(),
            ty,
            is_template: false,
        }
    }

    /// Marks the parameter as the explicit template parameter.
    pub fn template(mut self) -> Self {
        self.is_template = true;
        self
    }
}

/// A method declaration as seen by the checker.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodDecl {
    pub name: String,
    /// The method carries the format-method annotation.
    pub is_format_method: bool,
    pub params: Vec<Parameter>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_format_method: false,
            params: Vec::new(),
        }
    }

    pub fn format_method(mut self) -> Self {
        self.is_format_method = true;
        self
    }

    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }
}

/// An argument expression, reduced to the shapes constant resolution cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    StringLiteral(String),
    IntLiteral(i64),
    CharLiteral(char),
    BoolLiteral(bool),
    NullLiteral,
    /// A reference to a local, parameter or field, looked up in a [`SymbolTable`](crate::SymbolTable).
    Name(String),
    /// Binary `+`.
    Concat(Box<Expr>, Box<Expr>),
    Conditional {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    /// A method invocation; never constant.
    Call(String),
    /// Any other expression the host does not lower.
    Opaque,
}

impl Expr {
    pub fn string(value: impl Into<String>) -> Self {
        Expr::StringLiteral(value.into())
    }

    pub fn name(value: impl Into<String>) -> Self {
        Expr::Name(value.into())
    }

    pub fn concat(left: Expr, right: Expr) -> Self {
        Expr::Concat(Box::new(left), Box::new(right))
    }

    pub fn conditional(condition: Expr, then: Expr, otherwise: Expr) -> Self {
        Expr::Conditional {
            condition: Box::new(condition),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }
}

/// One actual argument at a call site.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Argument {
    pub expr: Expr,
    pub ty: ArgumentType,
}

impl Argument {
    pub fn new(expr: Expr, ty: ArgumentType) -> Self {
        Self { expr, ty }
    }

    /// A string literal argument.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::new(Expr::string(value), ArgumentType::TEXT)
    }

    /// An argument whose expression is irrelevant, only its type.
    pub fn typed(ty: ArgumentType) -> Self {
        Self::new(Expr::Opaque, ty)
    }
}

/// A method invocation.
///
/// `target` is `None` when the host could not resolve the invoked method.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Invocation {
    pub target: Option<MethodDecl>,
    pub args: Vec<Argument>,
}

impl Invocation {
    pub fn new(target: MethodDecl) -> Self {
        Self {
            target: Some(target),
            args: Vec::new(),
        }
    }

    pub fn unresolved() -> Self {
        Self {
            target: None,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: Argument) -> Self {
        self.args.push(arg);
        self
    }
}
