use logos::Logos;
use tracing::trace;

use crate::interpreter::token::{Token, TokenKind};

/// Raw tokens recognised by the generated scanner.
///
/// The scanner knows nothing about context. [`Lexer`] turns these into
/// [`Token`]s, deciding what a `-` means from the previous token and gluing
/// an imaginary `i` onto the number in front of it.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(extras = LexerExtras)]
enum RawToken {
    /// `42`
    #[regex(r"[0-9]+")]
    Integer,
    /// `3.14` or `.5`
    #[regex(r"[0-9]+\.[0-9]+")]
    #[regex(r"\.[0-9]+")]
    Float,
    /// `3/4`; only without whitespace around the slash.
    #[regex(r"[0-9]+/[0-9]+")]
    Fraction,
    /// `2e10`, `1.5E-3`
    #[regex(r"([0-9]+(\.[0-9]+)?|\.[0-9]+)[eE][+-]?[0-9]+")]
    Scientific,
    /// `0b1010`
    #[regex(r"0b[01]+")]
    Binary,
    /// `0o17`
    #[regex(r"0o[0-7]+")]
    Octal,
    /// `0xff`
    #[regex(r"0x[0-9a-fA-F]+")]
    Hex,
    /// Identifiers and keywords alike; keywords are split off afterwards.
    #[regex(r"[a-zA-Z][a-zA-Z0-9]*")]
    Identifier,
    /// `"text"`
    #[regex(r#""[^"]*""#, count_newlines, allow_greedy = true)]
    String,
    /// A string that runs to the end of input.
    #[regex(r#""[^"]*"#, count_newlines, allow_greedy = true)]
    UnterminatedString,
    /// `(`
    #[token("(")]
    LeftParen,
    /// `)`
    #[token(")")]
    RightParen,
    /// `[`
    #[token("[")]
    LeftBracket,
    /// `]`
    #[token("]")]
    RightBracket,
    /// `{`
    #[token("{")]
    LeftBrace,
    /// `}`
    #[token("}")]
    RightBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,
    /// `|`
    #[token("|")]
    Pipe,
    /// `+`
    #[token("+")]
    Plus,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `//`
    #[token("//")]
    SlashSlash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `!`
    #[token("!")]
    Bang,
    /// `=`
    #[token("=")]
    Assign,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,

    /// Line breaks only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl RawToken {
    /// Maps context-free raw tokens onto their final kind.
    ///
    /// Returns `None` for the tokens [`Lexer`] handles itself.
    const fn kind(self) -> Option<TokenKind> {
        let kind = match self {
            Self::Integer => TokenKind::Integer,
            Self::Float => TokenKind::Float,
            Self::Fraction => TokenKind::Fraction,
            Self::Scientific => TokenKind::Scientific,
            Self::Binary => TokenKind::Binary,
            Self::Octal => TokenKind::Octal,
            Self::Hex => TokenKind::Hex,
            Self::LeftParen => TokenKind::LeftParen,
            Self::RightParen => TokenKind::RightParen,
            Self::LeftBracket => TokenKind::LeftBracket,
            Self::RightBracket => TokenKind::RightBracket,
            Self::LeftBrace => TokenKind::LeftBrace,
            Self::RightBrace => TokenKind::RightBrace,
            Self::Comma => TokenKind::Comma,
            Self::Semicolon => TokenKind::Semicolon,
            Self::Colon => TokenKind::Colon,
            Self::Pipe => TokenKind::Pipe,
            Self::Plus => TokenKind::Plus,
            Self::PlusPlus => TokenKind::PlusPlus,
            Self::Star => TokenKind::Star,
            Self::Slash => TokenKind::Slash,
            Self::SlashSlash => TokenKind::SlashSlash,
            Self::Percent => TokenKind::Percent,
            Self::Caret => TokenKind::Caret,
            Self::Bang => TokenKind::Bang,
            Self::Assign => TokenKind::Assign,
            Self::EqualEqual => TokenKind::EqualEqual,
            Self::BangEqual => TokenKind::BangEqual,
            Self::Less => TokenKind::Less,
            Self::LessEqual => TokenKind::LessEqual,
            Self::Greater => TokenKind::Greater,
            Self::GreaterEqual => TokenKind::GreaterEqual,
            Self::Minus
            | Self::Identifier
            | Self::String
            | Self::UnterminatedString
            | Self::NewLine
            | Self::Ignored => return None,
        };
        Some(kind)
    }

    /// Whether an `i` directly after this token makes it imaginary.
    const fn takes_imaginary_suffix(self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Scientific)
    }
}

/// Additional information carried by the scanner during tokenization.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Counts line breaks inside a string literal.
fn count_newlines(lex: &mut logos::Lexer<RawToken>) {
    lex.extras.line += lex.slice().matches('\n').count();
}

/// Converts source text into [`Token`]s, one per call.
///
/// The cursor only moves forward. Errors do not stop the lexer: an
/// unrecognised character becomes an [`TokenKind::Error`] token and scanning
/// continues after it, so the parser decides how to react.
///
/// # Example
/// ```
/// use algom::interpreter::{lexer::Lexer, token::TokenKind};
///
/// let mut lexer = Lexer::new("3-4");
/// assert_eq!(lexer.next_token().kind, TokenKind::Integer);
/// assert_eq!(lexer.next_token().kind, TokenKind::Minus);
/// assert_eq!(lexer.next_token().kind, TokenKind::Integer);
/// assert_eq!(lexer.next_token().kind, TokenKind::Eof);
/// ```
pub struct Lexer<'src> {
    raw:          logos::Lexer<'src, RawToken>,
    previous:     Option<TokenKind>,
    /// Byte offset just past the previous token.
    previous_end: usize,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { raw:          RawToken::lexer_with_extras(source, LexerExtras { line: 1 }),
               previous:     None,
               previous_end: 0, }
    }

    /// Produces the next token. Once input is exhausted every call returns
    /// [`TokenKind::Eof`].
    pub fn next_token(&mut self) -> Token {
        let token = match self.raw.next() {
            None => Token::eof(self.raw.extras.line),
            Some(raw) => self.classify(raw),
        };
        trace!(kind = ?token.kind, lexeme = %token.lexeme, line = token.line, "token");
        self.previous = Some(token.kind);
        self.previous_end = self.raw.span().end;
        token
    }

    /// Turns one raw scanner result into a token.
    fn classify(&mut self, raw: Result<RawToken, ()>) -> Token {
        let line = self.raw.extras.line;
        let slice = self.raw.slice();

        let Ok(raw) = raw else {
            return Token::error(format!("Unrecognized token “{slice}”"), line);
        };

        match raw {
            RawToken::Minus => self.minus(line),
            RawToken::Identifier => {
                let kind = TokenKind::keyword(slice).unwrap_or(TokenKind::Symbol);
                Token::new(kind, slice, line)
            },
            RawToken::String => Token::new(TokenKind::String, &slice[1..slice.len() - 1], line),
            RawToken::UnterminatedString => Token::error("Unterminated string.", line),
            raw if raw.kind().is_some_and(TokenKind::is_number) => self.number(raw, "", line),
            raw => match raw.kind() {
                Some(kind) => Token::new(kind, slice, line),
                None => Token::error(format!("Unrecognized token “{slice}”"), line),
            },
        }
    }

    /// Decides between a negative literal, subtraction and negation.
    ///
    /// A `-` directly followed by a digit starts a negative literal unless the
    /// previous token was a number or a symbol. Otherwise it is subtraction
    /// after a number or symbol and negation anywhere else.
    ///
    /// After a symbol the rule looks at spacing: in `x -4` the `-` is apart
    /// from the symbol and touches the digit, so it starts a negative literal
    /// that the parser multiplies onto `x`. `x-4` and `x - 4` subtract.
    fn minus(&mut self, line: usize) -> Token {
        let after_operand = self.previous.is_some_and(TokenKind::ends_operand);
        let digit_follows = self.raw.remainder().starts_with(|c: char| c.is_ascii_digit());
        let spaced_after_symbol =
            self.previous == Some(TokenKind::Symbol) && self.raw.span().start > self.previous_end;

        if digit_follows && (!after_operand || spaced_after_symbol) {
            return match self.raw.next() {
                Some(Ok(raw)) if raw.kind().is_some_and(TokenKind::is_number) => {
                    self.number(raw, "-", line)
                },
                _ => Token::error(format!("Unrecognized token “-{}”", self.raw.slice()), line),
            };
        }

        if after_operand {
            Token::new(TokenKind::Minus, "-", line)
        } else {
            Token::new(TokenKind::Negate, "-", line)
        }
    }

    /// Builds a number token, absorbing a trailing imaginary `i` when it is
    /// not the start of a longer identifier.
    fn number(&mut self, raw: RawToken, sign: &str, line: usize) -> Token {
        let mut lexeme = format!("{sign}{}", self.raw.slice());
        let mut kind = raw.kind().unwrap_or(TokenKind::Integer);

        let mut rest = self.raw.remainder().chars();
        if raw.takes_imaginary_suffix()
           && rest.next() == Some('i')
           && !rest.next().is_some_and(|c| c.is_ascii_alphanumeric())
        {
            self.raw.bump(1);
            lexeme.push('i');
            kind = TokenKind::Complex;
        }

        Token::new(kind, lexeme, line)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields tokens up to and including the first [`TokenKind::Eof`].
    fn next(&mut self) -> Option<Token> {
        if self.previous == Some(TokenKind::Eof) {
            return None;
        }
        Some(self.next_token())
    }
}

/// Tokenizes a whole source, ending with an EOF token.
///
/// # Example
/// ```
/// use algom::interpreter::{lexer::tokenize, token::TokenKind};
///
/// let kinds: Vec<_> = tokenize("3/4").iter().map(|t| t.kind).collect();
/// assert_eq!(kinds, [TokenKind::Fraction, TokenKind::Eof]);
///
/// let kinds: Vec<_> = tokenize("3 / 4").iter().map(|t| t.kind).collect();
/// assert_eq!(kinds,
///            [TokenKind::Integer, TokenKind::Slash, TokenKind::Integer, TokenKind::Eof]);
/// ```
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}
