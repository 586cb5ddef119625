/// Complex number support.
///
/// Defines the `ComplexNumber` type used for arithmetic with real and imaginary
/// parts, including the elementary functions the native library lifts to the
/// complex plane.
pub mod complex;
/// Runtime values.
///
/// Defines the `Value` enum: null, booleans, numbers, strings, tuples,
/// vectors, matrices and the two kinds of function.
pub mod core;
/// User-defined function values.
pub mod function;
/// The numeric tower.
///
/// Defines `Number` and the promotion rules every arithmetic operator and
/// comparison goes through.
pub mod number;
/// Exact fractions.
pub mod rational;
