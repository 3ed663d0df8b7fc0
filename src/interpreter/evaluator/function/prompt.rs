use crate::{
    error::runtime_error::{OpError, RuntimeErrorKind},
    interpreter::{host::HostIo, value::core::Value},
    span::Span,
};

/// Renders a prompt and blocks for one line from the host input sink.
///
/// The argument's `Display` form is handed to the input sink as the prompt
/// text (no newline is appended, so the cursor stays on the prompt line).
/// The line read back is returned as a string, without its line
/// terminator.
///
/// This is the interpreter's only blocking point.
///
/// # Parameters
/// - `io`: The host I/O capabilities.
/// - `args`: Exactly one argument; arity is checked by the caller.
/// - `span`: The call span, reported when the input sink is exhausted.
///
/// # Returns
/// The line as a string value.
pub fn prompt(io: &mut dyn HostIo, args: &[Value], span: Span) -> Result<Value, OpError> {
    let text = args[0].to_string();
    match io.read_line(&text) {
        Some(line) => Ok(Value::from(line)),
        None => Err(OpError::new(RuntimeErrorKind::InputClosed, span)),
    }
}
