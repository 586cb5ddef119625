/// The token model: kinds, their syntactic class, precedence and
/// associativity.
pub mod token;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens:
/// numbers in every literal form, identifiers, keywords, strings, operators
/// and delimiters. Malformed input becomes error tokens instead of stopping
/// the scan.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with kind, lexeme and
///   line.
/// - Distinguishes fraction literals (`3/4`) from division (`3 / 4`).
/// - Reports lexical errors as error tokens for the parser to surface.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// A precedence-climbing expression parser plus a small statement grammar.
/// The first syntax error ends parsing and becomes the program's single
/// statement.
///
/// # Responsibilities
/// - Converts tokens into AST nodes, desugaring ranges and absolute values
///   and folding chained comparisons into one node.
/// - Detects implicit multiplication such as `2x` and `2(x + 1)`.
/// - Reports the first grammar violation with its location.
pub mod parser;
/// Static resolution of local variables to scope distances.
pub mod resolver;
/// Lexical scopes shared between the evaluator and closures.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the tree, applies operators through the numeric tower,
/// manages scopes and calls functions. Failures are returned as errors, never
/// raised as panics.
///
/// # Responsibilities
/// - Evaluates every AST node variant.
/// - Handles variables, closures and control flow.
/// - Enforces the call-depth and step limits.
pub mod evaluator;
/// The value module defines the runtime data types for evaluation.
///
/// Declares the `Value` enum, the numeric tower (integers, rationals, floats
/// and complex numbers) and function values.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements checked arithmetic with promotion between numeric kinds.
/// - Renders values for display.
pub mod value;
/// Native functions and named constants available to programs.
pub mod library;
