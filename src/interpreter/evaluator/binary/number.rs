use crate::{
    ast::BinaryOperator,
    error::runtime_error::{OpError, RuntimeErrorKind},
    interpreter::{
        evaluator::binary::core::undefined_op,
        value::core::{Value, ValueKind},
    },
    span::Span,
};

/// Evaluates a binary operation whose left operand is a number.
///
/// All arithmetic is IEEE double precision, with two deliberate
/// departures from IEEE behavior:
/// - `/` and `%` by zero are runtime errors, never infinities or NaN;
/// - `0 ^ 0` is a runtime error.
///
/// The connectives `and`, `or` and `xor` act bitwise between numbers: each
/// operand is truncated to `i64` (Rust's saturating `as` cast), combined,
/// and widened back to a number. Comparisons yield booleans. Any other
/// right-operand type is an undefined operation (equality is intercepted
/// upstream).
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand, guaranteed numeric by the dispatcher.
/// - `right`: Right operand.
/// - `span`: Source region of the operation, for diagnostics.
///
/// # Errors
/// Division or modulo by zero and `0 ^ 0` report the right operand's span,
/// so the diagnostic caret lands on the offending value.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(in crate::interpreter::evaluator::binary) fn eval(op: BinaryOperator,
                                                      left: &Value,
                                                      right: &Value,
                                                      span: Span)
                                                      -> Result<Value, OpError> {
    use BinaryOperator::{
        Add, And, Div, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, Or, Pow, Sub, Xor,
    };

    let (ValueKind::Number(a), ValueKind::Number(b)) = (&left.kind, &right.kind) else {
        return Err(undefined_op(op, left, right, span));
    };
    let (a, b) = (*a, *b);
    let at_right = right.span.unwrap_or(span);

    match op {
        Add => Ok(Value::from(a + b)),
        Sub => Ok(Value::from(a - b)),
        Mul => Ok(Value::from(a * b)),

        Div => {
            if b == 0.0 {
                Err(OpError::new(RuntimeErrorKind::DivisionByZero, at_right))
            } else {
                Ok(Value::from(a / b))
            }
        },
        Mod => {
            if b == 0.0 {
                Err(OpError::new(RuntimeErrorKind::DivisionByZero, at_right))
            } else {
                Ok(Value::from(a % b))
            }
        },

        Pow => {
            if a == 0.0 && b == 0.0 {
                Err(OpError::new(RuntimeErrorKind::ZeroPowerZero, at_right))
            } else {
                Ok(Value::from(a.powf(b)))
            }
        },

        And => Ok(Value::from(((a as i64) & (b as i64)) as f64)),
        Or => Ok(Value::from(((a as i64) | (b as i64)) as f64)),
        Xor => Ok(Value::from(((a as i64) ^ (b as i64)) as f64)),

        Less => Ok(Value::from(a < b)),
        LessEqual => Ok(Value::from(a <= b)),
        Greater => Ok(Value::from(a > b)),
        GreaterEqual => Ok(Value::from(a >= b)),

        _ => Err(undefined_op(op, left, right, span)),
    }
}
