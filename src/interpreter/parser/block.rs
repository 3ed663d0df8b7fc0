use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::Node,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            utils::expect,
        },
    },
    span::{Source, Span},
};

/// Parses a block expression delimited by braces.
///
/// A block is a statement list between `{` and `}`. Its value, when
/// evaluated, is the value of its last statement, or `none` when empty.
/// Blocks do not open a scope of their own.
///
/// Grammar: `block := "{" statements "}"`
pub fn parse_block<'a, I>(src: &Rc<Source>, tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let lbrace = expect(src, tokens, &TokenKind::LBrace, "'{'")?;
    let statements = parse_statement_list(src, tokens)?;
    let rbrace = expect(src, tokens, &TokenKind::RBrace, "'}'")?;

    Ok(Node::Statements { statements,
                          span: Span::new(lbrace.span.start, rbrace.span.end) })
}

/// Parses a bare statement list.
///
/// Statements are expressions separated by semicolons; the separator after
/// the last statement is optional, extra separators are ignored and the
/// list may be empty. Parsing stops before a `}` (end of block) or the end
/// of input (end of program) — the caller consumes whichever terminator it
/// expects.
///
/// Grammar: `statements := (expr (";" expr)* ";"?)?`
pub fn parse_statement_list<'a, I>(src: &Rc<Source>,
                                   tokens: &mut Peekable<I>)
                                   -> ParseResult<Vec<Node>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut statements = Vec::new();

    while let Some(Token { kind: TokenKind::Semicolon, .. }) = tokens.peek() {
        tokens.next();
    }

    loop {
        match tokens.peek() {
            None | Some(Token { kind: TokenKind::RBrace, .. }) => break,
            _ => {},
        }

        statements.push(parse_expression(src, tokens)?);

        let mut separated = false;
        while let Some(Token { kind: TokenKind::Semicolon, .. }) = tokens.peek() {
            tokens.next();
            separated = true;
        }
        if !separated {
            break;
        }
    }

    Ok(statements)
}
