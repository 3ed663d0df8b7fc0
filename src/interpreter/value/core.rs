use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::{LiteralValue, Node},
    error::runtime_error::{OpError, RuntimeErrorKind},
    interpreter::evaluator::scope::{Context, SymbolTable},
    span::Span,
};

/// A user-defined function: its parameter list, its body, and the scope it
/// was defined in.
///
/// The body is shared with the `fn` node that produced it; the closure
/// table is the *defining* context's table, consulted for free-variable
/// lookup at call time.
pub struct FnValue {
    /// The function's name; anonymous functions have none.
    pub name:    Option<String>,
    /// Parameter names, in declaration order.
    pub params:  Vec<String>,
    /// The body block evaluated when the function is called.
    pub body:    Rc<Node>,
    /// The defining scope, captured by reference.
    pub closure: Rc<RefCell<SymbolTable>>,
}

impl FnValue {
    /// The name shown in diagnostics and tracebacks.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }
}

// A function's closure table can (and for recursion, does) contain the
// function itself, so the derived impl would recurse forever.
impl std::fmt::Debug for FnValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnValue")
         .field("name", &self.name)
         .field("params", &self.params)
         .finish_non_exhaustive()
    }
}

/// The payload of a runtime value.
///
/// This enum models every type a rill expression can evaluate to. Equality
/// compares payloads and is total: mismatched variants compare unequal
/// instead of erroring, and functions compare by identity.
#[derive(Debug, Clone)]
pub enum ValueKind {
    /// The absent value, `none`.
    None,
    /// A number. All numbers are 64-bit floats; no integer type is exposed.
    Number(f64),
    /// A boolean, produced by comparisons and the logical operators.
    Bool(bool),
    /// An immutable string.
    Str(Rc<str>),
    /// A user-defined function together with its captured scope.
    Function(Rc<FnValue>),
    /// A named host capability, invocable like a function.
    Builtin(&'static str),
}

impl PartialEq for ValueKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => a == b,
            _ => false,
        }
    }
}

impl ValueKind {
    /// The type's name as used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Number(_) => "number",
            Self::Bool(_) => "bool",
            Self::Str(_) => "string",
            Self::Function(_) => "function",
            Self::Builtin(_) => "built-in function",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Function(function) => match &function.name {
                Some(name) => write!(f, "<function {name}>"),
                None => write!(f, "<function>"),
            },
            Self::Builtin(name) => write!(f, "<built-in function {name}>"),
        }
    }
}

/// A runtime value: a payload plus provenance stamps.
///
/// Every value remembers where it was produced (`span`) and in which frame
/// (`context`); both are used only to populate diagnostics, never for
/// control flow. Values are copied on variable access and on being used as
/// a call target, so that re-stamping one use site never leaks into
/// another.
#[derive(Clone)]
pub struct Value {
    /// The payload.
    pub kind:    ValueKind,
    /// The source region this value was produced at, if known.
    pub span:    Option<Span>,
    /// The frame this value was produced in, if known.
    pub context: Option<Rc<Context>>,
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

// The context stamp points at a table that may in turn contain this value,
// so the derived impl would recurse forever; print payload and span only.
impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Value")
         .field("kind", &self.kind)
         .field("span", &self.span)
         .finish_non_exhaustive()
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::new(ValueKind::Number(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::new(ValueKind::Bool(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::new(ValueKind::Str(Rc::from(value.as_str())))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::new(ValueKind::Str(Rc::from(value)))
    }
}

impl Value {
    /// Wraps a payload with no provenance stamps yet.
    #[must_use]
    pub const fn new(kind: ValueKind) -> Self {
        Self { kind,
               span: None,
               context: None, }
    }

    /// The `none` value.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(ValueKind::None)
    }

    /// Wraps a user-defined function.
    #[must_use]
    pub fn function(function: FnValue) -> Self {
        Self::new(ValueKind::Function(Rc::new(function)))
    }

    /// Wraps a named host capability.
    #[must_use]
    pub const fn builtin(name: &'static str) -> Self {
        Self::new(ValueKind::Builtin(name))
    }

    /// Materializes a literal from the syntax tree.
    #[must_use]
    pub fn from_literal(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::None => Self::none(),
            LiteralValue::Number(n) => (*n).into(),
            LiteralValue::Bool(b) => (*b).into(),
            LiteralValue::Str(s) => s.as_str().into(),
        }
    }

    /// Returns a value-semantics clone: the same payload with its own,
    /// independent provenance stamps.
    ///
    /// Every variable read and every call-target evaluation goes through
    /// this before re-stamping, so position and context never bleed
    /// between unrelated use sites.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Replaces the source-region stamp.
    #[must_use]
    pub const fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Replaces the frame stamp.
    #[must_use]
    pub fn with_context(mut self, context: &Rc<Context>) -> Self {
        self.context = Some(Rc::clone(context));
        self
    }

    /// The payload type's name as used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Returns `true` if the value is `none`.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self.kind, ValueKind::None)
    }

    /// Converts the value to an `f64`, or reports the mismatch.
    ///
    /// # Parameters
    /// - `at`: Span reported when the value carries no stamp of its own.
    ///
    /// # Returns
    /// - `Ok(f64)`: If the value is a number.
    /// - `Err(OpError)`: An `ExpectedNumber` failure otherwise.
    pub fn as_number(&self, at: Span) -> Result<f64, OpError> {
        match self.kind {
            ValueKind::Number(n) => Ok(n),
            _ => Err(OpError::new(RuntimeErrorKind::ExpectedNumber { found: self.type_name() },
                                  self.span.unwrap_or(at))),
        }
    }

    /// Converts the value to a `bool`, or reports the mismatch.
    ///
    /// Used for `if`, `while` and `for` conditions, which must be booleans.
    ///
    /// # Parameters
    /// - `at`: Span reported when the value carries no stamp of its own.
    ///
    /// # Returns
    /// - `Ok(bool)`: If the value is a boolean.
    /// - `Err(OpError)`: An `ExpectedBoolean` failure otherwise.
    pub fn as_bool(&self, at: Span) -> Result<bool, OpError> {
        match self.kind {
            ValueKind::Bool(b) => Ok(b),
            _ => Err(OpError::new(RuntimeErrorKind::ExpectedBoolean { found: self.type_name() },
                                  self.span.unwrap_or(at))),
        }
    }

    /// Renders the value in its literal (re-lexable) form.
    ///
    /// For strings this is the quoted, escape-encoded spelling; for every
    /// other type it matches [`Display`](std::fmt::Display). Lexing and
    /// parsing this form back yields a value equal to `self` for numbers,
    /// booleans, strings and `none` (functions have no literal form).
    #[must_use]
    pub fn render_literal(&self) -> String {
        match &self.kind {
            ValueKind::Str(s) => {
                let mut quoted = String::with_capacity(s.len() + 2);
                quoted.push('"');
                for ch in s.chars() {
                    match ch {
                        '\\' => quoted.push_str("\\\\"),
                        '"' => quoted.push_str("\\\""),
                        '\n' => quoted.push_str("\\n"),
                        '\t' => quoted.push_str("\\t"),
                        '\r' => quoted.push_str("\\r"),
                        '\u{0008}' => quoted.push_str("\\b"),
                        '\u{000C}' => quoted.push_str("\\f"),
                        ch if ch.is_control() => {
                            quoted.push_str(&format!("\\u{{{:04x}}}", ch as u32));
                        },
                        ch => quoted.push(ch),
                    }
                }
                quoted.push('"');
                quoted
            },
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}
