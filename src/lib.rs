//! # algom
//!
//! algom is an embeddable expression language for mathematics written in
//! Rust. Source is lexed, parsed into an expression tree, resolved and then
//! interpreted over a numeric tower of integers, exact rationals, floats and
//! complex numbers, with closures, blocks, conditionals and loops.
//!
//! ```
//! let program = algom::parse("let f(n) = { let g() = n; g }; let h = f(5); f(7); h();");
//! assert_eq!(algom::evaluate(&program).unwrap(), algom::Value::from(5));
//!
//! let square = algom::compile_to_callable("x^2 + 1", &["x"]).unwrap();
//! assert_eq!(square.call_f64(&[2.0]).unwrap(), 5.0);
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
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
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum that represents programs as a tree.
/// The AST is built by the parser and walked by the resolver, the evaluator
/// and the source renderer.
///
/// # Responsibilities
/// - Defines one node variant per language construct.
/// - Attaches source lines and resolution ids to nodes.
/// - Renders nodes back to canonical source.
pub mod ast;
/// Hosting: engine instances, limits and compiled callables.
pub mod engine;
/// Provides unified error types for parsing, resolution and evaluation.
///
/// This module defines all errors that can be raised while running code. It
/// standardizes error reporting and carries detailed information about
/// failures, including a category, a message and the source line.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, resolver, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Classifies errors into stable categories.
pub mod error;
/// Orchestrates the phases of code execution.
///
/// This module ties together the lexer, the parser, the resolver, the
/// evaluator, the runtime values and the native library.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, resolver, evaluator and
///   value types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion and helpers.
///
/// This module provides reusable helpers used throughout the interpreter,
/// such as lossless conversions between `i64` and `f64` and stack growth for
/// deep recursion.
pub mod util;

pub use crate::{
    ast::Program,
    engine::{Callable, Engine, EngineConfig},
    error::Error,
    interpreter::value::core::Value,
};

/// Parses `source` with the standard library's function names.
///
/// Never fails: a syntax error is the single statement of the returned
/// program, available through [`Program::error`].
///
/// # Example
/// ```
/// let program = algom::parse("[ [1, 2], [3, 4, 5] ];");
/// let error = program.error().unwrap();
/// assert!(error.to_string().contains("No jagged arrays permitted."));
/// ```
#[must_use]
pub fn parse(source: &str) -> Program {
    Engine::new().parse(source)
}

/// Evaluates a program in a fresh engine.
///
/// # Errors
/// The program's parse error, a resolution error or the first runtime error.
///
/// # Example
/// ```
/// let err = algom::evaluate(&algom::parse("f(1, 2);")).unwrap_err();
/// assert!(err.to_string().contains("No function named f exists."));
/// ```
pub fn evaluate(program: &Program) -> Result<Value, Error> {
    Engine::new().evaluate(program)
}

/// Compiles `source` into a function of `params` in a fresh engine.
///
/// # Errors
/// The parse error of `source`, or a resolution error in the body.
pub fn compile_to_callable(source: &str, params: &[&str]) -> Result<Callable, Error> {
    Engine::new().compile_to_callable(source, params)
}
