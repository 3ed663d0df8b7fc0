//! # rill
//!
//! rill is a small, dynamically typed scripting language written in Rust.
//! It lexes, parses and evaluates programs with lexical scoping,
//! first-class functions and closures, and reports failures with
//! source-accurate diagnostics, including multi-frame tracebacks for
//! runtime errors.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::Error,
    interpreter::{evaluator::core::Interpreter, value::core::Value},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and related types that represent
/// the syntactic structure of source code as a tree. The AST is built by
/// the parser and walked by the evaluator.
///
/// # Responsibilities
/// - Defines node types for all language constructs.
/// - Attaches source spans to every node for error reporting.
/// - Owns its children outright; the tree is immutable once built.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all diagnostics the pipeline can produce. It
/// standardizes error reporting and carries detailed information about
/// failures, including error kinds, messages, source spans, and — for
/// runtime errors — the call-frame chain for traceback rendering.
///
/// # Responsibilities
/// - Defines error types for all failure modes (lexer, parser, evaluator).
/// - Renders human-readable diagnostics with caret-underlined snippets.
/// - Integrates with the standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, scoping and host I/O to provide a complete runtime for
/// source code evaluation. It exposes the public API for interpreting
/// programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, values.
/// - Provides the `Interpreter` entry point with its pre-populated root
///   scope.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Source text, positions and spans.
///
/// This module defines the `Source` handle shared across the pipeline and
/// the `Position`/`Span` value types every token, node and diagnostic
/// carries. It also renders the caret-underlined snippets diagnostics end
/// with.
pub mod span;
/// General utilities for safe numeric conversion.
///
/// This module provides reusable conversion helpers used by the evaluator,
/// such as turning a language number into an exact host-side count.
pub mod util;

/// Runs a source text and returns its final value.
///
/// This convenience wrapper builds a fresh [`Interpreter`] wired to the
/// process's stdin and stdout, runs the program, and returns the value of
/// its last statement. Embedders that need persistent globals or their own
/// I/O use [`Interpreter`] directly instead.
///
/// # Errors
/// Returns the first lex, syntax or runtime error, ready to display.
///
/// # Examples
/// ```
/// use rill::run_source;
///
/// let value = run_source("sum.rill", "set x : 10; set y : 20; x + y").unwrap();
/// assert_eq!(value.to_string(), "30");
///
/// // An intentional error: 'y' is not defined.
/// assert!(run_source("bad.rill", "x := y + 1").is_err());
/// ```
pub fn run_source(file_name: &str, source: &str) -> Result<Value, Error> {
    Interpreter::with_std_io().run(file_name, source)
}
