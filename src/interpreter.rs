/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST against a chain of call frames, performs
/// all arithmetic and logical operations, manages variable scopes, and
/// produces a value or a traceback-carrying error. It is the core
/// execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, closures, calls and control flow.
/// - Reports runtime errors such as division by zero or undefined
///   operations, with full tracebacks.
pub mod evaluator;
/// Host input/output capabilities.
///
/// Defines the sink trait the built-ins `print` and `prompt` go through,
/// plus the standard implementation wired to the process's stdin and
/// stdout. Injecting these keeps the evaluator host-agnostic.
pub mod host;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a sequence of tokens,
/// each corresponding to a meaningful language element such as a number,
/// identifier, operator, delimiter, or keyword. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input text into tokens with kind and source location.
/// - Handles numeric and string literals (escapes included), identifiers,
///   and operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token sequence produced by the lexer and
/// constructs an AST that represents the syntactic structure of the
/// program. Expressions use precedence climbing; statements and blocks use
/// recursive descent.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Validates the grammar, reporting the first error with location info.
/// - Never produces a partially-invalid tree.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the value types used during execution — `none`,
/// numbers, booleans, strings, functions and built-in functions — together
/// with their display forms, their provenance stamps, and the conversions
/// the evaluator relies on.
///
/// # Responsibilities
/// - Defines the `Value` type and all supported payload variants.
/// - Implements payload equality, display and literal rendering.
/// - Provides checked conversions for condition and loop-header values.
pub mod value;
