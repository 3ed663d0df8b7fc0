use crate::{
    ast::BinaryOperator,
    error::runtime_error::{OpError, RuntimeErrorKind},
    interpreter::{
        evaluator::binary::core::undefined_op,
        value::core::{Value, ValueKind},
    },
    span::Span,
    util::num::f64_to_usize_exact,
};

/// Evaluates a binary operation whose left operand is a string.
///
/// - `+` concatenates with the right operand's rendered text, whatever its
///   type: `"n = " + 3` is `"n = 3"`.
/// - `*` repeats the string; the count must be a non-negative integer.
/// - `<`, `<=`, `>`, `>=` compare lexicographically against another string.
///
/// Anything else is an undefined operation (equality is intercepted
/// upstream; strings have no `not`).
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand, guaranteed to be a string by the dispatcher.
/// - `right`: Right operand.
/// - `span`: Source region of the operation, for diagnostics.
pub(in crate::interpreter::evaluator::binary) fn eval(op: BinaryOperator,
                                                      left: &Value,
                                                      right: &Value,
                                                      span: Span)
                                                      -> Result<Value, OpError> {
    use BinaryOperator::{Add, Greater, GreaterEqual, Less, LessEqual, Mul};

    let ValueKind::Str(s) = &left.kind else {
        return Err(undefined_op(op, left, right, span));
    };

    match op {
        Add => Ok(Value::from(format!("{}{}", s, right.kind))),

        Mul => {
            let ValueKind::Number(count) = right.kind else {
                return Err(undefined_op(op, left, right, span));
            };
            f64_to_usize_exact(count).map_or_else(|| {
                                                      Err(OpError::new(RuntimeErrorKind::InvalidRepetition { count },
                                                                       right.span.unwrap_or(span)))
                                                  },
                                                  |n| Ok(Value::from(s.repeat(n))))
        },

        Less | LessEqual | Greater | GreaterEqual => {
            let ValueKind::Str(other) = &right.kind else {
                return Err(undefined_op(op, left, right, span));
            };
            let (a, b) = (s.as_ref(), other.as_ref());
            let result = match op {
                Less => a < b,
                LessEqual => a <= b,
                Greater => a > b,
                _ => a >= b,
            };
            Ok(Value::from(result))
        },

        _ => Err(undefined_op(op, left, right, span)),
    }
}
