/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions:
/// arithmetic, comparisons, equality and the logical connectives.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements the unary operations: arithmetic negation, unary plus and
/// logical `not`.
pub mod unary;

/// Core evaluation logic.
///
/// Contains the interpreter facade, the tree-walking evaluator, and error
/// propagation.
pub mod core;

/// Evaluation of for-loop expressions.
///
/// Drives the counted loop, manages the iteration variable, and executes
/// the loop body in context.
pub mod for_loop;

/// Lexical scopes and call frames.
///
/// Defines the symbol table chain used for variable lookup and the context
/// chain used for tracebacks.
pub mod scope;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, arity checking, and
/// return value computation.
pub mod function;
