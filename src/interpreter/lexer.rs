use std::rc::Rc;

use logos::Logos;

use crate::{
    error::{ParseError, parse_error::ParseErrorKind},
    span::{Source, Span},
};

/// Error detail attached to a failed lexer step.
///
/// Logos reports this for any input slice that no token pattern matches;
/// the string callbacks refine it when a literal starts correctly but is
/// malformed.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A character no pattern recognizes.
    #[default]
    IllegalCharacter,
    /// A string literal with no closing quote on its line.
    UnterminatedString,
    /// A malformed `\u{....}` escape inside a string literal.
    InvalidEscape,
}

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexErrorKind)]
pub enum TokenKind {
    /// Numeric literal tokens, such as `42`, `3.14`, `.5` or `2.1e-10`.
    /// Every number is a 64-bit float.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// String literal tokens. Escapes are decoded here, at lex time, so the
    /// payload is the runtime text.
    #[regex(r#""([^"\\\n\r]|\\[^\n\r])*""#, decode_string)]
    #[regex(r#""([^"\\\n\r]|\\[^\n\r])*"#, unterminated_string)]
    Str(String),
    /// Boolean literal tokens, `true` and `false`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// `none`
    #[token("none")]
    None,
    /// `set`
    #[token("set")]
    Set,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `to`
    #[token("to")]
    To,
    /// `step`
    #[token("step")]
    Step,
    /// `while`
    #[token("while")]
    While,
    /// `fn`
    #[token("fn")]
    Fn,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `xor`
    #[token("xor")]
    Xor,
    /// `not`
    #[token("not")]
    Not,
    /// Identifier tokens; variable or function names such as `x` or `add`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip)]
    Comment,
    /// ```text
    /// /* Multi line comments. */
    /// ```
    #[regex(r"/\*([^*]|\*[^/])*\*/", logos::skip)]
    MultiLineComment,
    /// Assignment, spelled `:=` or `:`. Both spellings produce the same
    /// kind, so the parser accepts either anywhere an assignment occurs.
    #[token(":=")]
    #[token(":")]
    Assign,
    /// `=`
    #[token("=")]
    Eq,
    /// `!=`
    #[token("!=")]
    Neq,
    /// `<=`
    #[token("<=")]
    LessEq,
    /// `>=`
    #[token(">=")]
    GreaterEq,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// Spaces, tabs, newlines and feeds.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

impl TokenKind {
    /// Describes the token for diagnostics, e.g. `'+'` or `identifier 'x'`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Number(n) => format!("number '{n}'"),
            Self::Str(s) => format!("string {s:?}"),
            Self::Bool(b) => format!("'{b}'"),
            Self::Ident(name) => format!("identifier '{name}'"),
            Self::None => "'none'".to_string(),
            Self::Set => "'set'".to_string(),
            Self::If => "'if'".to_string(),
            Self::Else => "'else'".to_string(),
            Self::For => "'for'".to_string(),
            Self::To => "'to'".to_string(),
            Self::Step => "'step'".to_string(),
            Self::While => "'while'".to_string(),
            Self::Fn => "'fn'".to_string(),
            Self::And => "'and'".to_string(),
            Self::Or => "'or'".to_string(),
            Self::Xor => "'xor'".to_string(),
            Self::Not => "'not'".to_string(),
            Self::Assign => "':'".to_string(),
            Self::Eq => "'='".to_string(),
            Self::Neq => "'!='".to_string(),
            Self::LessEq => "'<='".to_string(),
            Self::GreaterEq => "'>='".to_string(),
            Self::Less => "'<'".to_string(),
            Self::Greater => "'>'".to_string(),
            Self::Plus => "'+'".to_string(),
            Self::Minus => "'-'".to_string(),
            Self::Star => "'*'".to_string(),
            Self::Slash => "'/'".to_string(),
            Self::Percent => "'%'".to_string(),
            Self::Caret => "'^'".to_string(),
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
            Self::LBrace => "'{'".to_string(),
            Self::RBrace => "'}'".to_string(),
            Self::Comma => "','".to_string(),
            Self::Semicolon => "';'".to_string(),
            Self::Comment | Self::MultiLineComment | Self::Ignored => "trivia".to_string(),
        }
    }
}

/// A token together with the source region it was lexed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What was recognized, including any literal payload.
    pub kind: TokenKind,
    /// Where in the source it was recognized.
    pub span: Span,
}

/// Converts a source text into its token sequence.
///
/// Tokens are produced in source order, each stamped with the span it was
/// lexed from. Whitespace and comments are consumed and discarded. Lexing
/// is not resumable: the first input the patterns cannot match aborts the
/// whole pass and returns a diagnostic instead of a partial sequence.
///
/// # Errors
/// Returns a [`ParseError`] for an illegal character (spanning that one
/// character), an unterminated string literal, or a string literal with a
/// malformed `\u{....}` escape.
pub fn tokenize(source: &Rc<Source>) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(&source.text);

    while let Some(item) = lexer.next() {
        let span = source.span_at(lexer.span());
        match item {
            Ok(kind) => tokens.push(Token { kind, span }),
            Err(error) => {
                let kind = match error {
                    LexErrorKind::IllegalCharacter => {
                        let ch = source.text[lexer.span()].chars().next().unwrap_or(' ');
                        ParseErrorKind::IllegalCharacter { ch }
                    },
                    LexErrorKind::UnterminatedString => ParseErrorKind::UnterminatedString,
                    LexErrorKind::InvalidEscape => ParseErrorKind::InvalidEscape,
                };
                return Err(ParseError::new(kind, span, source));
            },
        }
    }

    Ok(tokens)
}

/// Parses a numeric literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed value if the slice is a valid number.
/// - `None`: If the slice does not parse (out-of-range exponents).
fn parse_number(lex: &mut logos::Lexer<TokenKind>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses a boolean literal from the current token slice (`true` or
/// `false`).
fn parse_bool(lex: &mut logos::Lexer<TokenKind>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Rejects a string literal whose line ends before the closing quote.
fn unterminated_string(_lex: &mut logos::Lexer<TokenKind>) -> Result<String, LexErrorKind> {
    Err(LexErrorKind::UnterminatedString)
}

/// Decodes the backslash escapes of a string literal.
///
/// Recognized escapes: `\n`, `\t`, `\r`, `\b`, `\f` and `\u{....}` with
/// exactly four hex digits. Any other escaped character stands for itself,
/// so `\"` and `\\` fall out without special cases.
///
/// # Returns
/// - `Ok(String)`: The decoded text, without the surrounding quotes.
/// - `Err(LexErrorKind::InvalidEscape)`: For a malformed `\u{....}` escape.
fn decode_string(lex: &mut logos::Lexer<TokenKind>) -> Result<String, LexErrorKind> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    let mut decoded = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            decoded.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => decoded.push('\n'),
            Some('t') => decoded.push('\t'),
            Some('r') => decoded.push('\r'),
            Some('b') => decoded.push('\u{0008}'),
            Some('f') => decoded.push('\u{000C}'),
            Some('u') => {
                if chars.next() != Some('{') {
                    return Err(LexErrorKind::InvalidEscape);
                }
                let hex: String = chars.by_ref().take_while(|&c| c != '}').collect();
                if hex.len() != 4 {
                    return Err(LexErrorKind::InvalidEscape);
                }
                let code = u32::from_str_radix(&hex, 16).map_err(|_| LexErrorKind::InvalidEscape)?;
                let decoded_char =
                    char::from_u32(code).ok_or(LexErrorKind::InvalidEscape)?;
                decoded.push(decoded_char);
            },
            Some(other) => decoded.push(other),
            // The literal pattern guarantees every backslash is paired.
            None => return Err(LexErrorKind::InvalidEscape),
        }
    }

    Ok(decoded)
}
