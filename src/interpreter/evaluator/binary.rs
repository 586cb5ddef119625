/// Entry point routing a binary operator to its handler.
pub mod core;

/// Elementwise arithmetic on vectors and matrices.
pub mod array;

/// Equality and ordering.
pub mod comparison;

/// Boolean connectives.
pub mod logic;

/// Arithmetic on numbers and string joining.
pub mod scalar;

/// Tuple concatenation with `++`.
pub mod tuple;
