use std::rc::Rc;

use crate::span::{Position, Source, Span};

/// Describes what went wrong during evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    /// Tried to read a variable with no binding in scope.
    UnknownVariable {
        /// The name of the variable.
        name: String,
    },
    /// A boolean value was expected, but not found.
    ExpectedBoolean {
        /// The type of the value actually found.
        found: &'static str,
    },
    /// A numeric value was expected, but not found.
    ExpectedNumber {
        /// The type of the value actually found.
        found: &'static str,
    },
    /// Attempted division or modulo by zero.
    DivisionByZero,
    /// Raised `0` to the power `0`.
    ZeroPowerZero,
    /// No such operator for this operand type or combination of types.
    UndefinedOperation {
        /// Human-readable description of the operator and operand types.
        details: String,
    },
    /// Repeated a string a negative or fractional number of times.
    InvalidRepetition {
        /// The count that was supplied.
        count: f64,
    },
    /// The wrong number of arguments was supplied to a call.
    ArgumentCountMismatch {
        /// The callee's name.
        name:     String,
        /// How many parameters the callee declares.
        expected: usize,
        /// How many arguments were supplied.
        found:    usize,
    },
    /// Called a value that is neither a function nor a built-in.
    NotCallable {
        /// The type of the value actually called.
        found: &'static str,
    },
    /// A built-in function value names no known host capability. This is an
    /// internal error: the root scope only ever binds known names.
    UnknownBuiltin {
        /// The unrecognized name.
        name: String,
    },
    /// The host input sink produced no line for `prompt`.
    InputClosed,
}

impl std::fmt::Display for RuntimeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name } => write!(f, "'{name}' is not defined."),
            Self::ExpectedBoolean { found } => write!(f, "Expected a bool, found {found}."),
            Self::ExpectedNumber { found } => write!(f, "Expected a number, found {found}."),
            Self::DivisionByZero => write!(f, "Division by zero."),
            Self::ZeroPowerZero => write!(f, "0^0 is undefined."),
            Self::UndefinedOperation { details } => write!(f, "{details}."),
            Self::InvalidRepetition { count } => write!(f,
                                                        "Cannot repeat a string {count} times; the count must be a non-negative integer."),
            Self::ArgumentCountMismatch { name,
                                          expected,
                                          found, } => {
                write!(f, "'{name}' expects {expected} argument(s), found {found}.")
            },
            Self::NotCallable { found } => write!(f, "Value of type {found} is not callable."),
            Self::UnknownBuiltin { name } => write!(f, "Unknown built-in function '{name}'."),
            Self::InputClosed => write!(f, "The input stream is closed."),
        }
    }
}

/// A runtime failure before it has been attached to a call-frame chain.
///
/// Operator dispatch and value conversions are pure functions with no view
/// of the active frames; they report this light pair and the evaluator
/// promotes it to a full [`RuntimeError`] with a traceback.
#[derive(Debug, Clone, PartialEq)]
pub struct OpError {
    /// What went wrong.
    pub kind: RuntimeErrorKind,
    /// The source region of the offense.
    pub span: Span,
}

impl OpError {
    /// Creates an operator-level failure for `kind` at `span`.
    #[must_use]
    pub const fn new(kind: RuntimeErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// One entry of a traceback.
///
/// The innermost frame pairs the error position with the frame the error
/// was raised in; each enclosing frame pairs the call-site position with
/// the caller's name.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Display name of the frame: `<program>` or the function's name.
    pub name: String,
    /// The position reported for this frame.
    pub pos:  Position,
}

/// An evaluation diagnostic.
///
/// Carries the offending span, the frame chain captured where the error was
/// raised (innermost first) and the source, so the rendered form can show a
/// full traceback with a caret-underlined snippet.
#[derive(Debug)]
pub struct RuntimeError {
    /// What went wrong.
    pub kind:   RuntimeErrorKind,
    /// The source region of the offense.
    pub span:   Span,
    /// The call-frame chain, innermost frame first.
    pub frames: Vec<Frame>,
    /// The source the failing program was built from.
    pub source: Rc<Source>,
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Traceback (most recent call last):")?;
        for frame in self.frames.iter().rev() {
            writeln!(f,
                     "  File {}, line {}, column {}, in {}",
                     self.source.name, frame.pos.line, frame.pos.column, frame.name)?;
        }
        writeln!(f, "RuntimeError: {}", self.kind)?;
        write!(f, "\n{}", self.source.underline(self.span))
    }
}

impl std::error::Error for RuntimeError {}
