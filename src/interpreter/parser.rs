/// Parser state, token navigation and error construction.
///
/// Defines the `Parser` type and `parse_tokens`, the entry point that turns a
/// token stream into a `Program`.
pub mod core;

/// Prefix operators, literals, symbols, calls, groups and tuples.
pub mod unary;

/// The precedence-climbing loop over infix and postfix operators.
///
/// Also home to implicit multiplication and chained comparisons.
pub mod binary;

/// Blocks, conditionals and while loops.
pub mod block;

/// Comma-separated lists and bracketed literals (vectors, matrices, ranges).
pub mod utils;

/// Statements and declarations.
///
/// Implements the top-level statement loop, `let` declarations of variables
/// and functions, and statement terminators.
pub mod statement;
