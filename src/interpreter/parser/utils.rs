use std::{iter::Peekable, rc::Rc};

use crate::{
    error::{ParseError, parse_error::ParseErrorKind},
    interpreter::lexer::{Token, TokenKind},
    span::{Source, Span},
};

use super::core::ParseResult;

/// Builds the diagnostic for a token the grammar does not allow here.
pub(in crate::interpreter::parser) fn unexpected(src: &Rc<Source>,
                                                 expected: &str,
                                                 token: &Token)
                                                 -> ParseError {
    ParseError::new(ParseErrorKind::UnexpectedToken { expected: expected.to_string(),
                                                      found:    token.kind.describe(), },
                    token.span,
                    src)
}

/// Builds the diagnostic for input that ended while `expected` was still
/// required. The span is zero-width at the end of the source.
pub(in crate::interpreter::parser) fn end_of_input(src: &Rc<Source>, expected: &str) -> ParseError {
    ParseError::new(ParseErrorKind::UnexpectedEndOfInput { expected: expected.to_string() },
                    src.end_span(),
                    src)
}

/// Consumes the next token, requiring it to be of `kind`.
///
/// # Parameters
/// - `kind`: The exact token kind the grammar requires here.
/// - `expected`: Human-readable spelling for the diagnostic, e.g. `"')'"`.
///
/// # Returns
/// The consumed token (cloned, so its span stays available).
///
/// # Errors
/// Returns a `ParseError` if the next token differs or the input ended.
pub(in crate::interpreter::parser) fn expect<'a, I>(src: &Rc<Source>,
                                                    tokens: &mut Peekable<I>,
                                                    kind: &TokenKind,
                                                    expected: &str)
                                                    -> ParseResult<Token>
    where I: Iterator<Item = &'a Token>
{
    match tokens.next() {
        Some(token) if token.kind == *kind => Ok(token.clone()),
        Some(token) => Err(unexpected(src, expected, token)),
        None => Err(end_of_input(src, expected)),
    }
}

/// Parses a plain identifier and returns its name and span.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the
/// input ended.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(src: &Rc<Source>,
                                                              tokens: &mut Peekable<I>)
                                                              -> ParseResult<(String, Span)>
    where I: Iterator<Item = &'a Token>
{
    match tokens.next() {
        Some(Token { kind: TokenKind::Ident(name),
                     span, }) => Ok((name.clone(), *span)),
        Some(token) => Err(unexpected(src, "an identifier", token)),
        None => Err(end_of_input(src, "an identifier")),
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// Shared by call argument lists and parameter lists. Repeatedly calls
/// `parse_item`, expecting either a comma (continue) or the closing token
/// (stop). An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Parameters
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list.
/// - `closing_text`: Its spelling for diagnostics, e.g. `"')'"`.
///
/// # Returns
/// The parsed items and the span of the consumed closing token.
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, an unexpected token
/// appears between items, or the input ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    src: &Rc<Source>,
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&Rc<Source>, &mut Peekable<I>) -> ParseResult<T>,
    closing: &TokenKind,
    closing_text: &str)
    -> ParseResult<(Vec<T>, Span)>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut items = Vec::new();
    if let Some(token) = tokens.peek()
       && token.kind == *closing
    {
        let span = token.span;
        tokens.next();
        return Ok((items, span));
    }
    loop {
        items.push(parse_item(src, tokens)?);
        match tokens.peek() {
            Some(Token { kind: TokenKind::Comma, .. }) => {
                tokens.next();
            },
            Some(token) if token.kind == *closing => {
                let span = token.span;
                tokens.next();
                return Ok((items, span));
            },
            Some(token) => {
                return Err(unexpected(src, &format!("',' or {closing_text}"), token));
            },
            None => return Err(end_of_input(src, closing_text)),
        }
    }
}
