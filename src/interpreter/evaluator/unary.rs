use crate::{
    ast::UnaryOperator,
    error::runtime_error::{OpError, RuntimeErrorKind},
    interpreter::value::core::{Value, ValueKind},
    span::Span,
};

/// Evaluates a unary operation.
///
/// Dispatch is a pure match on `(operator, operand variant)`:
/// - `-` and `+` are defined for numbers;
/// - `not` flips a boolean and yields `true` for `none`.
///
/// Any other combination is an undefined-operation failure.
///
/// # Parameters
/// - `op`: The unary operator.
/// - `value`: The evaluated operand.
/// - `span`: Source region of the operation, for diagnostics.
///
/// # Returns
/// The resulting value, unstamped; the caller stamps it with the node's
/// span and context.
pub fn eval_unary(op: UnaryOperator, value: &Value, span: Span) -> Result<Value, OpError> {
    match (op, &value.kind) {
        (UnaryOperator::Negate, ValueKind::Number(n)) => Ok(Value::from(-n)),
        (UnaryOperator::Plus, ValueKind::Number(n)) => Ok(Value::from(*n)),
        (UnaryOperator::Not, ValueKind::Bool(b)) => Ok(Value::from(!b)),
        (UnaryOperator::Not, ValueKind::None) => Ok(Value::from(true)),
        (op, kind) => {
            let details = format!("Operator '{op}' is not defined for {}", kind.type_name());
            Err(OpError::new(RuntimeErrorKind::UndefinedOperation { details }, span))
        },
    }
}
