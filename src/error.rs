/// Lexing and parsing errors.
///
/// Defines all error types that can occur before evaluation: illegal
/// characters, malformed string literals and unexpected tokens. Each error
/// carries the source span of the offense and renders a single-frame
/// diagnostic with a caret-underlined snippet.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: undefined
/// variables and operators, type mismatches in control flow, division by
/// zero, and call-protocol failures. Each error carries the call-frame
/// chain it was raised in and renders a multi-frame traceback.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any diagnostic the pipeline can produce.
///
/// Running a source yields either a value or exactly one of these; no error
/// is caught or retried internally.
#[derive(Debug)]
pub enum Error {
    /// Lexing or parsing failed; the source never reached evaluation.
    Parse(ParseError),
    /// Evaluation failed.
    Runtime(RuntimeError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(error) => write!(f, "{error}"),
            Self::Runtime(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<RuntimeError> for Error {
    fn from(error: RuntimeError) -> Self {
        Self::Runtime(error)
    }
}
