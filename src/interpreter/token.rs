use std::fmt;

/// A single lexical token.
///
/// The lexeme is the exact source text, except for string literals (which
/// drop their quotes) and negative number literals (which carry their sign).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind:   TokenKind,
    /// The text the token was read from, or the diagnostic of an error token.
    pub lexeme: String,
    /// The source line the token starts on.
    pub line:   usize,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self { kind,
               lexeme: lexeme.into(),
               line }
    }

    /// Creates an error token carrying a diagnostic message.
    #[must_use]
    pub fn error(message: impl Into<String>, line: usize) -> Self {
        Self::new(TokenKind::Error, message, line)
    }

    /// Creates the end-of-input token.
    #[must_use]
    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::Eof, "", line)
    }
}

/// Every kind of token the lexer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Delimiters.
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `|`
    Pipe,

    // Operators.
    /// `+`
    Plus,
    /// `++`, tuple concatenation.
    PlusPlus,
    /// `-` after an operand.
    Minus,
    /// `-` before an operand.
    Negate,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `//`, floored division.
    SlashSlash,
    /// `%`, truncated remainder.
    Percent,
    /// `^`
    Caret,
    /// `!`, factorial.
    Bang,
    /// `=`
    Assign,
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,

    // Keywords.
    /// `let`
    Let,
    /// `if`
    If,
    /// `else`
    Else,
    /// `while`
    While,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,
    /// `xor`
    Xor,
    /// `xnor`
    Xnor,
    /// `nand`
    Nand,
    /// `nor`
    Nor,
    /// `mod`, Euclidean modulo.
    Mod,
    /// `rem`, truncated remainder.
    Rem,
    /// `Inf`
    Inf,
    /// `NaN`
    NaN,
    /// A reserved word the language does not support.
    Reserved,

    // Literals.
    /// `42`
    Integer,
    /// `3.14`, `.5`
    Float,
    /// `3/4`, written without spaces.
    Fraction,
    /// `1e3`, `2.5E-2`
    Scientific,
    /// `0b101`
    Binary,
    /// `0o17`
    Octal,
    /// `0xff`
    Hex,
    /// `2i`, `1.5i`
    Complex,
    /// An identifier that is not a keyword.
    Symbol,
    /// `"text"`
    String,

    // Utility.
    /// End of input.
    Eof,
    /// A lexer diagnostic.
    Error,
}

/// The grammatical role of a token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// Punctuation that separates or groups.
    Delimiter,
    /// A statement keyword or literal keyword.
    Keyword,
    /// An operator placed before its operand.
    Prefix,
    /// An operator placed between operands.
    Infix,
    /// An operator placed after its operand.
    Postfix,
    /// A literal or a symbol.
    Atomic,
    /// A reserved word.
    Illegal,
    /// End of input and error tokens.
    Util,
}

/// Binding power, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    /// Below every operator; the threshold a full expression starts at.
    Nil,
    /// Tokens that never bind.
    Non,
    /// Assignment.
    Low,
    /// Boolean connectives.
    LowMid,
    /// Comparisons and equality.
    Mid,
    /// `+`, `-` and `++`.
    UpperMid,
    /// `*`, `/` and the remainder family.
    High,
    /// `^` and the prefix operators.
    Top,
    /// Postfix `!`.
    Peak,
    /// Reserved for atoms.
    Apex,
}

impl Precedence {
    /// The level just below this one, used as the right-hand threshold of
    /// right-associative operators.
    #[must_use]
    pub const fn lower(self) -> Self {
        match self {
            Self::Nil | Self::Non => Self::Nil,
            Self::Low => Self::Non,
            Self::LowMid => Self::Low,
            Self::Mid => Self::LowMid,
            Self::UpperMid => Self::Mid,
            Self::High => Self::UpperMid,
            Self::Top => Self::High,
            Self::Peak => Self::Top,
            Self::Apex => Self::Peak,
        }
    }
}

/// How repeated operators of equal precedence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// The token is not an operator.
    None,
    /// `a - b - c` is `(a - b) - c`.
    Left,
    /// `a ^ b ^ c` is `a ^ (b ^ c)`.
    Right,
    /// `a < b < c` is `(a < b) and (b < c)`.
    Chain,
}

/// Words the language reserves but rejects.
const RESERVED_WORDS: [&str; 11] =
    ["for", "function", "fn", "return", "do", "const", "throw", "class", "this", "super", "var"];

impl TokenKind {
    /// Looks an identifier up in the keyword table.
    ///
    /// Returns `None` for ordinary symbols.
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::token::TokenKind;
    ///
    /// assert_eq!(TokenKind::keyword("while"), Some(TokenKind::While));
    /// assert_eq!(TokenKind::keyword("return"), Some(TokenKind::Reserved));
    /// assert_eq!(TokenKind::keyword("x"), None);
    /// ```
    #[must_use]
    pub fn keyword(ident: &str) -> Option<Self> {
        let kind = match ident {
            "let" => Self::Let,
            "if" => Self::If,
            "else" => Self::Else,
            "while" => Self::While,
            "true" => Self::True,
            "false" => Self::False,
            "null" => Self::Null,
            "and" => Self::And,
            "or" => Self::Or,
            "not" => Self::Not,
            "xor" => Self::Xor,
            "xnor" => Self::Xnor,
            "nand" => Self::Nand,
            "nor" => Self::Nor,
            "mod" => Self::Mod,
            "rem" => Self::Rem,
            "Inf" => Self::Inf,
            "NaN" => Self::NaN,
            _ if RESERVED_WORDS.contains(&ident) => Self::Reserved,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns the `(class, precedence, associativity)` record of this kind.
    #[must_use]
    pub const fn record(self) -> (TokenClass, Precedence, Associativity) {
        use Associativity as A;
        use Precedence as P;
        use TokenClass as C;

        match self {
            Self::LeftParen
            | Self::RightParen
            | Self::LeftBracket
            | Self::RightBracket
            | Self::LeftBrace
            | Self::RightBrace
            | Self::Comma
            | Self::Semicolon
            | Self::Colon
            | Self::Pipe => (C::Delimiter, P::Non, A::None),

            Self::Assign => (C::Infix, P::Low, A::Right),
            Self::And | Self::Or | Self::Xor | Self::Xnor | Self::Nand | Self::Nor => {
                (C::Infix, P::LowMid, A::Left)
            },
            Self::EqualEqual
            | Self::BangEqual
            | Self::Less
            | Self::LessEqual
            | Self::Greater
            | Self::GreaterEqual => (C::Infix, P::Mid, A::Chain),
            Self::Plus | Self::Minus | Self::PlusPlus => (C::Infix, P::UpperMid, A::Left),
            Self::Star | Self::Slash | Self::SlashSlash | Self::Percent | Self::Mod | Self::Rem => {
                (C::Infix, P::High, A::Left)
            },
            Self::Caret => (C::Infix, P::Top, A::Right),
            Self::Negate | Self::Not => (C::Prefix, P::Top, A::Right),
            Self::Bang => (C::Postfix, P::Peak, A::Left),

            Self::Let | Self::If | Self::Else | Self::While => (C::Keyword, P::Non, A::None),
            Self::True | Self::False | Self::Null | Self::Inf | Self::NaN => {
                (C::Keyword, P::Apex, A::None)
            },
            Self::Reserved => (C::Illegal, P::Nil, A::None),

            Self::Integer
            | Self::Float
            | Self::Fraction
            | Self::Scientific
            | Self::Binary
            | Self::Octal
            | Self::Hex
            | Self::Complex
            | Self::Symbol
            | Self::String => (C::Atomic, P::Apex, A::None),

            Self::Eof | Self::Error => (C::Util, P::Nil, A::None),
        }
    }

    /// The grammatical class of this kind.
    #[must_use]
    pub const fn class(self) -> TokenClass {
        self.record().0
    }

    /// The binding power of this kind.
    #[must_use]
    pub const fn precedence(self) -> Precedence {
        self.record().1
    }

    /// The associativity of this kind.
    #[must_use]
    pub const fn associativity(self) -> Associativity {
        self.record().2
    }

    /// Whether this kind is a numeric literal.
    #[must_use]
    pub const fn is_number(self) -> bool {
        matches!(self,
                 Self::Integer
                 | Self::Float
                 | Self::Fraction
                 | Self::Scientific
                 | Self::Binary
                 | Self::Octal
                 | Self::Hex
                 | Self::Complex)
    }

    /// Whether a `-` right after a token of this kind means subtraction.
    #[must_use]
    pub const fn ends_operand(self) -> bool {
        self.is_number() || matches!(self, Self::Symbol)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
