use crate::{
    ast::BinaryOperator,
    error::runtime_error::OpError,
    interpreter::{
        evaluator::binary::core::undefined_op,
        value::core::{Value, ValueKind},
    },
    span::Span,
};

/// Evaluates a binary operation whose left operand is a boolean.
///
/// The logical connectives `and`, `xor` and `or` are defined only between
/// two booleans; both operands are already evaluated, so none of them
/// short-circuits. Everything else is undefined for booleans (equality is
/// intercepted upstream).
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand, guaranteed boolean by the dispatcher.
/// - `right`: Right operand.
/// - `span`: Source region of the operation, for diagnostics.
pub(in crate::interpreter::evaluator::binary) fn eval(op: BinaryOperator,
                                                      left: &Value,
                                                      right: &Value,
                                                      span: Span)
                                                      -> Result<Value, OpError> {
    let (ValueKind::Bool(a), ValueKind::Bool(b)) = (&left.kind, &right.kind) else {
        return Err(undefined_op(op, left, right, span));
    };

    match op {
        BinaryOperator::And => Ok(Value::from(*a && *b)),
        BinaryOperator::Xor => Ok(Value::from(a ^ b)),
        BinaryOperator::Or => Ok(Value::from(*a || *b)),
        _ => Err(undefined_op(op, left, right, span)),
    }
}
