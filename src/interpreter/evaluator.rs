/// Binary operator evaluation logic.
///
/// Handles arithmetic over the numeric tower, comparisons, logical
/// connectives, tuple concatenation and elementwise array arithmetic.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements negation, logical `not` and factorial.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the evaluation context, node dispatch, scope handling and the
/// step budget.
pub mod core;

/// Function evaluation.
///
/// Handles calls to natives and closures, argument checking and the call
/// depth limit.
pub mod function;
