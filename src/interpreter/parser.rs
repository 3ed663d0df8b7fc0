/// Parser entry points and control-flow constructs.
///
/// Contains the program rule, the assignment lookahead, and the parsers for
/// `if`, `while`, `for` and `fn` expressions.
pub mod core;

/// Binary expression parsing.
///
/// Implements the shared precedence-level helper and the chain of
/// left-associative levels from logical connectives down to products.
pub mod binary;

/// Atoms, unary signs, exponentiation and calls.
///
/// Handles the tightest-binding rules of the grammar: literals,
/// identifiers, groupings, the sign operators, `^` and call suffixes.
pub mod unary;

/// Block parsing.
///
/// Parses brace-delimited statement sequences and the bare statement list
/// shared with the top-level program rule.
pub mod block;

/// Utility functions for the parser.
///
/// Provides token expectation helpers, identifier parsing and the shared
/// comma-separated list rule.
pub mod utils;
