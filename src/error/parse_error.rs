use std::rc::Rc;

use crate::span::{Source, Span};

/// Describes what went wrong during lexing or parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A character no lexer pattern recognizes.
    IllegalCharacter {
        /// The offending character.
        ch: char,
    },
    /// A string literal with no closing quote on its line.
    UnterminatedString,
    /// A malformed `\u{....}` escape inside a string literal.
    InvalidEscape,
    /// Found a token the grammar does not allow at this point.
    UnexpectedToken {
        /// What the grammar expected, e.g. `')'` or `an expression`.
        expected: String,
        /// A description of the token actually found.
        found:    String,
    },
    /// The token sequence ended while a construct was still open.
    UnexpectedEndOfInput {
        /// What the grammar expected next.
        expected: String,
    },
}

impl ParseErrorKind {
    /// The diagnostic header this kind renders under.
    #[must_use]
    pub const fn header(&self) -> &'static str {
        match self {
            Self::IllegalCharacter { .. } | Self::UnterminatedString | Self::InvalidEscape => {
                "LexError"
            },
            Self::UnexpectedToken { .. } | Self::UnexpectedEndOfInput { .. } => "SyntaxError",
        }
    }
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IllegalCharacter { ch } => write!(f, "Illegal character '{ch}'."),
            Self::UnterminatedString => write!(f, "Unterminated string literal."),
            Self::InvalidEscape => {
                write!(f, "Invalid escape sequence in string literal.")
            },
            Self::UnexpectedToken { expected, found } => {
                write!(f, "Expected {expected}, found {found}.")
            },
            Self::UnexpectedEndOfInput { expected } => {
                write!(f, "Expected {expected}, but the input ended.")
            },
        }
    }
}

/// A lexing or parsing diagnostic.
///
/// Pairs the [`ParseErrorKind`] with the span of the offending text and the
/// source it came from, so the rendered form can show the file, position
/// and a caret-underlined snippet. Lexing and parsing abort at the first of
/// these; there is no recovery or multi-error reporting.
#[derive(Debug)]
pub struct ParseError {
    /// What went wrong.
    pub kind:   ParseErrorKind,
    /// The source region of the offense.
    pub span:   Span,
    /// The source the error was found in.
    pub source: Rc<Source>,
}

impl ParseError {
    /// Creates a diagnostic for `kind` at `span`.
    #[must_use]
    pub fn new(kind: ParseErrorKind, span: Span, source: &Rc<Source>) -> Self {
        Self { kind,
               span,
               source: Rc::clone(source) }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}: {}", self.kind.header(), self.kind)?;
        writeln!(f,
                 "File {}, line {}, column {}",
                 self.source.name, self.span.start.line, self.span.start.column)?;
        write!(f, "\n{}", self.source.underline(self.span))
    }
}

impl std::error::Error for ParseError {}
