/// Parsing errors.
///
/// Defines the single syntax error a failed parse produces, including scanner
/// diagnostics surfaced through error tokens. A parse error always records the
/// line, the last lexeme consumed and the kind of the last node built.
pub mod parse_error;
/// Static resolution errors.
///
/// Raised by the resolver before evaluation starts, such as reading a local
/// variable inside its own initializer.
pub mod resolve_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: undefined
/// names, redeclarations, arity and type mismatches, arithmetic failures,
/// unimplemented numeric combinations and the configured execution limits.
pub mod runtime_error;

use std::fmt;

pub use parse_error::{ParseError, ParseErrorKind};
pub use resolve_error::ResolveError;
pub use runtime_error::RuntimeError;
use thiserror::Error;

/// Every failure a host can observe from the engine.
///
/// Errors are ordinary return values. Evaluating the same failing program
/// twice, each time in a fresh environment, yields equal errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The source did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The program parsed but failed static resolution.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Returns the coarse category of the error.
    ///
    /// # Example
    /// ```
    /// use algom::error::ErrorCategory;
    ///
    /// let err = algom::Engine::new().run("f(1, 2);").unwrap_err();
    /// assert_eq!(err.category(), ErrorCategory::Resolver);
    /// ```
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Parse(_) => ErrorCategory::Syntax,
            Self::Resolve(_) => ErrorCategory::Resolver,
            Self::Runtime(e) => e.category(),
        }
    }
}

/// Coarse classification of errors, stable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Lexer diagnostics and parse failures.
    Syntax,
    /// Undefined or redeclared names.
    Resolver,
    /// Operands or callees of the wrong kind.
    Type,
    /// Calls with the wrong number of arguments.
    Arguments,
    /// Division by zero, overflow and lossy conversions.
    Arithmetic,
    /// Numeric combinations the tower does not support.
    Unimplemented,
    /// Call-depth or step budget exhausted.
    Limit,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Syntax => "syntax",
            Self::Resolver => "resolver",
            Self::Type => "type",
            Self::Arguments => "arguments",
            Self::Arithmetic => "arithmetic",
            Self::Unimplemented => "unimplemented",
            Self::Limit => "limit",
        };
        f.write_str(name)
    }
}
