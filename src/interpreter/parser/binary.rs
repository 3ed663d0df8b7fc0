use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{BinaryOperator, Node, UnaryOperator},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{core::ParseResult, unary::parse_factor},
    },
    span::{Source, Span},
};

/// The operator kinds recognized at the logical-connective level.
pub const LOGIC_OPS: &[TokenKind] = &[TokenKind::And, TokenKind::Or, TokenKind::Xor];

/// The operator kinds recognized at the comparison level.
pub const RELATIONAL_OPS: &[TokenKind] = &[TokenKind::Eq,
                                           TokenKind::Neq,
                                           TokenKind::LessEq,
                                           TokenKind::GreaterEq,
                                           TokenKind::Less,
                                           TokenKind::Greater];

/// The operator kinds recognized at the sum level.
pub const ADDITIVE_OPS: &[TokenKind] = &[TokenKind::Plus, TokenKind::Minus];

/// The operator kinds recognized at the product level.
pub const TERM_OPS: &[TokenKind] = &[TokenKind::Star, TokenKind::Slash, TokenKind::Percent];

/// Parses one left-associative binary precedence level.
///
/// Every level of the expression grammar shares this single helper,
/// parameterized by the sub-rule its operands are parsed with and by the
/// set of operator token kinds recognized at the level. Operands are
/// folded left-associatively: `a - b - c` becomes `(a - b) - c`.
///
/// Grammar: `level := operand (OP operand)*`
///
/// # Parameters
/// - `operand`: The next-tighter rule, used for both sides of each operator.
/// - `operators`: The token kinds this level folds over.
///
/// # Returns
/// A `Node::BinaryOp` tree, or a single operand when no operator follows.
pub fn parse_binary_level<'a, I, F>(src: &Rc<Source>,
                                    tokens: &mut Peekable<I>,
                                    operand: F,
                                    operators: &[TokenKind])
                                    -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone,
          F: Fn(&Rc<Source>, &mut Peekable<I>) -> ParseResult<Node>
{
    let mut left = operand(src, tokens)?;

    while let Some(token) = tokens.peek() {
        if !operators.contains(&token.kind) {
            break;
        }
        let Some(op) = token_to_binary_operator(&token.kind) else {
            break;
        };
        tokens.next();

        let right = operand(src, tokens)?;
        let span = left.span().to(right.span());
        left = Node::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                span };
    }

    Ok(left)
}

/// Parses the `not` rule.
///
/// `not` binds looser than the comparisons, so `not a = b` negates the
/// whole comparison. It is right-recursive: `not not x` parses inside out.
///
/// Grammar: `logic := "not" logic | relational`
pub fn parse_logic<'a, I>(src: &Rc<Source>, tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    if let Some(Token { kind: TokenKind::Not,
                        span, }) = tokens.peek()
    {
        let not_span = *span;
        tokens.next();

        let operand = parse_logic(src, tokens)?;
        let span = Span::new(not_span.start, operand.span().end);
        return Ok(Node::UnaryOp { op: UnaryOperator::Not,
                                  operand: Box::new(operand),
                                  span });
    }

    parse_relational(src, tokens)
}

/// Parses comparison and equality expressions.
///
/// Grammar: `relational := additive (("="|"!="|"<"|"<="|">"|">=") additive)*`
pub fn parse_relational<'a, I>(src: &Rc<Source>, tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_binary_level(src, tokens, parse_additive, RELATIONAL_OPS)
}

/// Parses addition and subtraction expressions.
///
/// Grammar: `additive := term (("+"|"-") term)*`
pub fn parse_additive<'a, I>(src: &Rc<Source>, tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_binary_level(src, tokens, parse_term, ADDITIVE_OPS)
}

/// Parses multiplication, division and modulo expressions.
///
/// Grammar: `term := factor (("*"|"/"|"%") factor)*`
pub fn parse_term<'a, I>(src: &Rc<Source>, tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_binary_level(src, tokens, parse_factor, TERM_OPS)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for all tokens that are not binary operators.
#[must_use]
pub const fn token_to_binary_operator(token: &TokenKind) -> Option<BinaryOperator> {
    match token {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Percent => Some(BinaryOperator::Mod),
        TokenKind::Caret => Some(BinaryOperator::Pow),
        TokenKind::Eq => Some(BinaryOperator::Equal),
        TokenKind::Neq => Some(BinaryOperator::NotEqual),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::LessEq => Some(BinaryOperator::LessEqual),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::GreaterEq => Some(BinaryOperator::GreaterEqual),
        TokenKind::And => Some(BinaryOperator::And),
        TokenKind::Or => Some(BinaryOperator::Or),
        TokenKind::Xor => Some(BinaryOperator::Xor),
        _ => None,
    }
}
