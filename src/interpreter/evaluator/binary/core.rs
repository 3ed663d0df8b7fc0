use crate::{
    ast::BinaryOperator,
    error::runtime_error::{OpError, RuntimeErrorKind},
    interpreter::{
        evaluator::binary::{logic, number, string},
        value::core::{Value, ValueKind},
    },
    span::Span,
};

/// Evaluates a binary operation between two values.
///
/// This is a pure function matching on `(operator, operand variants)` — no
/// dynamic method lookup. Equality and inequality are intercepted before
/// any type-specific dispatch, so they are total: `none = 0` and
/// `"" = false` are well-defined (false) rather than errors. Every other
/// operator dispatches through the *left* operand's type: numbers handle
/// arithmetic and bitwise connectives, strings handle concatenation,
/// repetition and ordering, booleans handle the logical connectives.
///
/// Both operands are always already evaluated — the language has no
/// short-circuiting `and`/`or`.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `span`: Source region of the operation, for diagnostics.
///
/// # Returns
/// The resulting value, unstamped; the caller stamps it with the node's
/// span and context.
///
/// # Errors
/// An undefined-operation failure for any combination no handler defines,
/// or the handler's own failure (division by zero, bad repetition count).
pub fn eval_binary(op: BinaryOperator,
                   left: &Value,
                   right: &Value,
                   span: Span)
                   -> Result<Value, OpError> {
    match op {
        BinaryOperator::Equal => return Ok(Value::from(left.kind == right.kind)),
        BinaryOperator::NotEqual => return Ok(Value::from(left.kind != right.kind)),
        _ => {},
    }

    match &left.kind {
        ValueKind::Number(_) => number::eval(op, left, right, span),
        ValueKind::Str(_) => string::eval(op, left, right, span),
        ValueKind::Bool(_) => logic::eval(op, left, right, span),
        _ => Err(undefined_op(op, left, right, span)),
    }
}

/// Builds the failure for an operator no operand combination defines.
pub(in crate::interpreter::evaluator::binary) fn undefined_op(op: BinaryOperator,
                                                              left: &Value,
                                                              right: &Value,
                                                              span: Span)
                                                              -> OpError {
    let details = format!("Operator '{op}' is not defined for {} and {}",
                          left.type_name(),
                          right.type_name());
    OpError::new(RuntimeErrorKind::UndefinedOperation { details }, span)
}
