use crate::{
    error::runtime_error::OpError,
    interpreter::{host::HostIo, value::core::Value},
    span::Span,
};

/// Writes a value to the host output sink and returns it unchanged.
///
/// The value is rendered with its `Display` form (strings unquoted) and
/// followed by a newline. Printing works for every value variant.
///
/// # Parameters
/// - `io`: The host output sink.
/// - `args`: Exactly one argument; arity is checked by the caller.
/// - `_span`: Unused; printing cannot fail.
///
/// # Returns
/// The printed value, stamps and all.
pub fn print(io: &mut dyn HostIo, args: &[Value], _span: Span) -> Result<Value, OpError> {
    io.write(&format!("{}\n", args[0]));
    Ok(args[0].clone())
}
