use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{BinaryOperator, LiteralValue, Node, UnaryOperator},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression, parse_fn_def, parse_for, parse_if, parse_while},
            utils::{end_of_input, expect, parse_comma_separated, unexpected},
        },
    },
    span::{Source, Span},
};

/// Parses a signed factor.
///
/// Supports the prefix operators `+` and `-` applied to an exponentiation
/// expression. The sign binds looser than `^`, so `-2 ^ 2` is `-(2 ^ 2)`.
///
/// Grammar: `factor := ("+" | "-") power | power`
pub fn parse_factor<'a, I>(src: &Rc<Source>, tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    if let Some(Token { kind: kind @ (TokenKind::Plus | TokenKind::Minus),
                        span, }) = tokens.peek()
    {
        let op = if *kind == TokenKind::Plus { UnaryOperator::Plus } else { UnaryOperator::Negate };
        let sign_span = *span;
        tokens.next();

        let operand = parse_power(src, tokens)?;
        let span = Span::new(sign_span.start, operand.span().end);
        return Ok(Node::UnaryOp { op,
                                  operand: Box::new(operand),
                                  span });
    }

    parse_power(src, tokens)
}

/// Parses exponentiation expressions.
///
/// Right-associative: `2 ^ 3 ^ 2` parses as `2 ^ (3 ^ 2)`, because the
/// right operand recurses back into the factor rule.
///
/// Grammar: `power := call ("^" factor)*`
pub fn parse_power<'a, I>(src: &Rc<Source>, tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut left = parse_call(src, tokens)?;

    while let Some(Token { kind: TokenKind::Caret, .. }) = tokens.peek() {
        tokens.next();

        let right = parse_factor(src, tokens)?;
        let span = left.span().to(right.span());
        left = Node::BinaryOp { left: Box::new(left),
                                op: BinaryOperator::Pow,
                                right: Box::new(right),
                                span };
    }

    Ok(left)
}

/// Parses an atom with an optional call suffix.
///
/// A parenthesized argument list directly after an atom turns it into a
/// call: `add(2, 3)`, `fn (x) { x }(1)`. The callee is an arbitrary
/// expression, not just a name.
///
/// Grammar: `call := atom ("(" (expr ("," expr)*)? ")")?`
pub fn parse_call<'a, I>(src: &Rc<Source>, tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let atom = parse_atom(src, tokens)?;

    if let Some(Token { kind: TokenKind::LParen, .. }) = tokens.peek() {
        tokens.next();

        let (args, rparen_span) =
            parse_comma_separated(src, tokens, parse_expression, &TokenKind::RParen, "')'")?;
        let span = Span::new(atom.span().start, rparen_span.end);
        return Ok(Node::Call { callee: Box::new(atom),
                               args,
                               span });
    }

    Ok(atom)
}

/// Parses an atomic expression.
///
/// Atoms are the leaves and bracketed constructs of the grammar:
/// - the literals `none`, numbers, booleans and strings
/// - identifiers
/// - parenthesized expressions
/// - `if`, `for` and `while` expressions
/// - function definitions
///
/// Grammar:
/// ```text
///     atom := NONE | NUMBER | BOOL | STRING | IDENT
///           | "(" expr ")"
///           | if_expr | for_expr | while_expr | fn_def
/// ```
///
/// # Errors
/// Reports any other token as "expected an expression".
pub fn parse_atom<'a, I>(src: &Rc<Source>, tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let Some(token) = tokens.peek() else {
        return Err(end_of_input(src, "an expression"));
    };

    match &token.kind {
        TokenKind::None => {
            let span = token.span;
            tokens.next();
            Ok(Node::Literal { value: LiteralValue::None,
                               span })
        },
        TokenKind::Number(n) => {
            let (value, span) = ((*n).into(), token.span);
            tokens.next();
            Ok(Node::Literal { value, span })
        },
        TokenKind::Bool(b) => {
            let (value, span) = ((*b).into(), token.span);
            tokens.next();
            Ok(Node::Literal { value, span })
        },
        TokenKind::Str(s) => {
            let (value, span) = (s.clone().into(), token.span);
            tokens.next();
            Ok(Node::Literal { value, span })
        },
        TokenKind::Ident(name) => {
            let (name, span) = (name.clone(), token.span);
            tokens.next();
            Ok(Node::VarAccess { name, span })
        },
        TokenKind::LParen => {
            tokens.next();
            let inner = parse_expression(src, tokens)?;
            expect(src, tokens, &TokenKind::RParen, "')'")?;
            Ok(inner)
        },
        TokenKind::If => parse_if(src, tokens),
        TokenKind::For => parse_for(src, tokens),
        TokenKind::While => parse_while(src, tokens),
        TokenKind::Fn => parse_fn_def(src, tokens),
        _ => Err(unexpected(src, "an expression", token)),
    }
}
