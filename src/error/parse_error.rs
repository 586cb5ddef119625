use thiserror::Error;

/// The one syntax error a failed parse reports.
///
/// The parser stops at the first violation, so a program never carries more
/// than one of these. Besides the reason it records where the parser was:
/// the line, the last lexeme consumed and the kind of the last node it built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parsing Error:\nLine: {line}\nLast lexeme parsed: “{lexeme}”\nLast semantic parsed: {node}\n{kind}")]
pub struct ParseError {
    /// Why parsing stopped.
    pub kind:   ParseErrorKind,
    /// The source line where the error occurred.
    pub line:   usize,
    /// The lexeme of the last token consumed.
    pub lexeme: String,
    /// The kind of the last AST node built before the failure.
    pub node:   &'static str,
}

/// Represents the reasons a parse can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The lexer produced an error token.
    #[error("[scanner]: {0}")]
    Scanner(String),
    /// Input ended in the middle of a construct.
    #[error("Abrupt end of input.")]
    AbruptEnd,
    /// A specific token was required but something else was found.
    #[error("Expected {expected}, but found “{found}”.")]
    Expected {
        /// Description of what was required.
        expected: &'static str,
        /// The lexeme actually found.
        found:    String,
    },
    /// A token that cannot start or continue an expression.
    #[error("Unexpected token “{0}”.")]
    UnexpectedToken(String),
    /// A reserved word that the language does not support.
    #[error("“{0}” is a reserved word and cannot be used.")]
    ReservedWord(String),
    /// A matrix literal with a row that is not a vector.
    #[error("Matrices must only have vector elements.")]
    MixedMatrix,
    /// A matrix literal whose rows differ in length.
    #[error("No jagged arrays permitted.")]
    JaggedArray,
    /// A numeric literal that does not fit its type.
    #[error("Numeric literal “{0}” is malformed or too large.")]
    InvalidLiteral(String),
    /// A fraction literal with a zero denominator.
    #[error("Fraction “{0}” has a zero denominator.")]
    ZeroDenominator(String),
}
