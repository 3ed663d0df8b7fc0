use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            binary::{LOGIC_OPS, parse_binary_level, parse_logic},
            block::{parse_block, parse_statement_list},
            utils::{expect, parse_comma_separated, parse_identifier, unexpected},
        },
    },
    span::{Source, Span},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole token sequence into a program.
///
/// This is the entry point for parsing. The program is a statement list
/// followed by the end of input; any trailing unconsumed token is a syntax
/// error. Parsing never recovers: the first offense aborts with a
/// diagnostic, so a returned tree is always fully valid.
///
/// # Parameters
/// - `src`: The source the tokens were lexed from.
/// - `tokens`: The full token sequence.
///
/// # Returns
/// The program as a single `Node::Statements`.
///
/// # Errors
/// Propagates the first syntax error, or reports trailing tokens after the
/// top-level statement list.
pub fn parse(src: &Rc<Source>, tokens: &[Token]) -> ParseResult<Node> {
    let mut iter = tokens.iter().peekable();
    let statements = parse_statement_list(src, &mut iter)?;

    if let Some(token) = iter.peek() {
        return Err(unexpected(src, "end of input", token));
    }

    let span = match (statements.first(), statements.last()) {
        (Some(first), Some(last)) => first.span().to(last.span()),
        _ => src.end_span(),
    };
    Ok(Node::Statements { statements, span })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. Assignments are
/// recognized first: either the `set` keyword, or a bare identifier
/// directly followed by `:`/`:=` — the one place the grammar needs a second
/// token of lookahead. Everything else starts the precedence chain at the
/// logical-connective level.
///
/// Grammar: `expr := "set"? IDENT ASSIGN expr | logic (("and"|"or"|"xor") logic)*`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(src: &Rc<Source>, tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    if let Some(Token { kind: TokenKind::Set,
                        span, }) = tokens.peek()
    {
        let set_span = *span;
        tokens.next();

        let (name, _) = parse_identifier(src, tokens)?;
        expect(src, tokens, &TokenKind::Assign, "':'")?;
        let value = parse_expression(src, tokens)?;

        let span = Span::new(set_span.start, value.span().end);
        return Ok(Node::VarAssign { name,
                                    value: Box::new(value),
                                    span });
    }

    if let Some(Token { kind: TokenKind::Ident(_), .. }) = tokens.peek() {
        let mut lookahead = tokens.clone();
        lookahead.next();

        if let Some(Token { kind: TokenKind::Assign, .. }) = lookahead.peek() {
            let (name, name_span) = parse_identifier(src, tokens)?;
            tokens.next(); // the ':'

            let value = parse_expression(src, tokens)?;

            let span = Span::new(name_span.start, value.span().end);
            return Ok(Node::VarAssign { name,
                                        value: Box::new(value),
                                        span });
        }
    }

    parse_binary_level(src, tokens, parse_logic, LOGIC_OPS)
}

/// Parses an `if` expression with an optional `else` block.
///
/// Syntax:
/// ```text
///     if <condition> { <statements> }
///     else { <statements> }
/// ```
/// The whole construct is an expression: its value is the value of the
/// branch that ran, or `none` when the condition is false and there is no
/// `else`. Chained tests are written by nesting an `if` inside the `else`
/// block.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `if` keyword.
///
/// # Returns
/// An `Node::If` covering the keyword through the last brace.
///
/// # Errors
/// Propagates failures from the condition or either block.
pub fn parse_if<'a, I>(src: &Rc<Source>, tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let if_token = expect(src, tokens, &TokenKind::If, "'if'")?;
    let condition = parse_expression(src, tokens)?;
    let then_branch = parse_block(src, tokens)?;

    let (else_branch, end) = if let Some(Token { kind: TokenKind::Else, .. }) = tokens.peek() {
        tokens.next();
        let block = parse_block(src, tokens)?;
        let end = block.span().end;
        (Some(Box::new(block)), end)
    } else {
        (None, then_branch.span().end)
    };

    Ok(Node::If { condition: Box::new(condition),
                  then_branch: Box::new(then_branch),
                  else_branch,
                  span: Span::new(if_token.span.start, end) })
}

/// Parses a `while` expression.
///
/// Syntax: `while <condition> { <statements> }`. The condition is
/// re-evaluated before every iteration; the loop itself evaluates to
/// `none`.
///
/// # Errors
/// Propagates failures from the condition or the body block.
pub fn parse_while<'a, I>(src: &Rc<Source>, tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let while_token = expect(src, tokens, &TokenKind::While, "'while'")?;
    let condition = parse_expression(src, tokens)?;
    let body = parse_block(src, tokens)?;

    let span = Span::new(while_token.span.start, body.span().end);
    Ok(Node::While { condition: Box::new(condition),
                     body: Box::new(body),
                     span })
}

/// Parses a `for` expression.
///
/// Syntax:
/// ```text
///     for <name> := <start> to <end> { <statements> }
///     for <name> := <start> to <end> step <step> { <statements> }
/// ```
/// Both bounds are inclusive and the step defaults to `1`. The loop itself
/// evaluates to `none`.
///
/// # Errors
/// Propagates failures from the header expressions or the body block, and
/// reports missing `:=`, `to` or braces.
pub fn parse_for<'a, I>(src: &Rc<Source>, tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let for_token = expect(src, tokens, &TokenKind::For, "'for'")?;
    let (var, _) = parse_identifier(src, tokens)?;
    expect(src, tokens, &TokenKind::Assign, "':='")?;
    let start = parse_expression(src, tokens)?;
    expect(src, tokens, &TokenKind::To, "'to'")?;
    let end = parse_expression(src, tokens)?;

    let step = if let Some(Token { kind: TokenKind::Step, .. }) = tokens.peek() {
        tokens.next();
        Some(Box::new(parse_expression(src, tokens)?))
    } else {
        None
    };

    let body = parse_block(src, tokens)?;

    let span = Span::new(for_token.span.start, body.span().end);
    Ok(Node::For { var,
                   start: Box::new(start),
                   end: Box::new(end),
                   step,
                   body: Box::new(body),
                   span })
}

/// Parses a function definition.
///
/// Syntax: `fn <name>? ( <param> ("," <param>)* ) { <statements> }`.
/// The name is optional; an anonymous `fn` is only useful as a value. The
/// definition is itself an expression evaluating to the function.
///
/// # Errors
/// Propagates failures from the parameter list or the body block.
pub fn parse_fn_def<'a, I>(src: &Rc<Source>, tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let fn_token = expect(src, tokens, &TokenKind::Fn, "'fn'")?;

    let name = if let Some(Token { kind: TokenKind::Ident(_), .. }) = tokens.peek() {
        let (name, _) = parse_identifier(src, tokens)?;
        Some(name)
    } else {
        None
    };

    expect(src, tokens, &TokenKind::LParen, "'('")?;
    let (params, _) =
        parse_comma_separated(src, tokens, parse_identifier, &TokenKind::RParen, "')'")?;
    let body = parse_block(src, tokens)?;

    let span = Span::new(fn_token.span.start, body.span().end);
    Ok(Node::FnDef { name,
                     params: params.into_iter().map(|(name, _)| name).collect(),
                     body: Rc::new(body),
                     span })
}
