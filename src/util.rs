/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss, plus the `gcd`
/// used to keep rationals in lowest terms.
pub mod num;
/// Native stack management for deeply nested sources.
///
/// Parsing and evaluation recurse over the tree. Wrapping the recursive entry
/// points keeps a deeply nested expression or a deep user-level recursion from
/// overflowing the native stack before the configured limits report it.
pub mod stack;
