/// The call protocol and the built-in function table.
///
/// Implements function-value creation, user-defined calls with closure
/// scoping, and dispatch to the named host capabilities.
pub mod core;

/// The `print` built-in.
///
/// Writes a value's display form to the host output sink.
pub mod print;

/// The `prompt` built-in.
///
/// Writes a prompt to the host output sink and reads one line from the
/// host input sink.
pub mod prompt;
