use std::collections::HashSet;

use tracing::debug;

use crate::{
    ast::{Node, NodeId, Program},
    error::{ParseError, ParseErrorKind},
    interpreter::token::{Token, TokenKind},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Precedence-climbing parser over a token buffer.
///
/// The parser stops at the first violation: every parse routine returns a
/// [`ParseResult`], so the first error unwinds through `?` straight to
/// [`parse_tokens`], which turns it into a program holding that single error.
///
/// The parser also knows which names are functions. A symbol directly followed
/// by `(` is a call only when the name is a known function (a native, or a
/// function declared earlier in the source); otherwise it is implicit
/// multiplication, `x(2)` meaning `x * (2)`.
pub struct Parser {
    pub(in crate::interpreter::parser) tokens:    Vec<Token>,
    pub(in crate::interpreter::parser) current:   usize,
    pub(in crate::interpreter::parser) functions: HashSet<String>,
    next_id:                                      usize,
    last_node:                                    &'static str,
}

/// Parses a token stream into a program.
///
/// The stream is expected to end with [`TokenKind::Eof`]; one is appended if
/// it does not. `functions` seeds the table of known function names.
///
/// Never fails: a syntax error becomes a program whose single statement is
/// [`Node::Error`].
///
/// # Example
/// ```
/// use algom::interpreter::{lexer::tokenize, parser::core::parse_tokens};
///
/// let program = parse_tokens(tokenize("let x = 5; x = x + 2; x;"), ["sin".to_string()]);
/// assert_eq!(program.statements().len(), 3);
/// assert!(program.error().is_none());
/// ```
pub fn parse_tokens(tokens: Vec<Token>, functions: impl IntoIterator<Item = String>) -> Program {
    let mut parser = Parser::new(tokens, functions);

    match parser.program() {
        Ok(statements) => {
            debug!(statements = statements.len(), "parsed program");
            Program::new(statements)
        },
        Err(error) => {
            debug!(%error, "parse failed");
            Program::failed(error)
        },
    }
}

impl Parser {
    /// Creates a parser positioned at the first token.
    #[must_use]
    pub fn new(mut tokens: Vec<Token>, functions: impl IntoIterator<Item = String>) -> Self {
        if tokens.last().is_none_or(|token| token.kind != TokenKind::Eof) {
            let line = tokens.last().map_or(1, |token| token.line);
            tokens.push(Token::eof(line));
        }

        Self { tokens,
               current: 0,
               functions: functions.into_iter().collect(),
               next_id: 0,
               last_node: "Root" }
    }

    /// The token under the cursor. Sticks at EOF.
    pub(in crate::interpreter::parser) fn peek(&self) -> &Token {
        let index = self.current.min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// The kind of the token under the cursor.
    pub(in crate::interpreter::parser) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// The kind of the token `n` places after the cursor.
    pub(in crate::interpreter::parser) fn peek_nth(&self, n: usize) -> TokenKind {
        let index = (self.current + n).min(self.tokens.len() - 1);
        self.tokens[index].kind
    }

    /// Whether the parenthesis under the cursor holds a comma-separated list,
    /// scanning ahead to its matching close.
    pub(in crate::interpreter::parser) fn opens_list(&self) -> bool {
        let mut depth = 0_usize;
        for token in self.tokens.iter().skip(self.current + 1) {
            match token.kind {
                TokenKind::LeftParen | TokenKind::LeftBracket | TokenKind::LeftBrace => depth += 1,
                TokenKind::RightParen | TokenKind::RightBracket | TokenKind::RightBrace => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                },
                TokenKind::Comma if depth == 0 => return true,
                TokenKind::Eof => return false,
                _ => {},
            }
        }
        false
    }

    /// The kind of the last token consumed.
    pub(in crate::interpreter::parser) fn previous_kind(&self) -> Option<TokenKind> {
        self.current
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .map(|token| token.kind)
    }

    /// Consumes the token under the cursor and returns it.
    pub(in crate::interpreter::parser) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.current += 1;
        }
        token
    }

    /// Whether the token under the cursor is of `kind`.
    pub(in crate::interpreter::parser) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Consumes the token under the cursor if it is of `kind`.
    pub(in crate::interpreter::parser) fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            return true;
        }
        false
    }

    /// Consumes a token of `kind` or fails with "Expected {expected}".
    pub(in crate::interpreter::parser) fn expect(&mut self,
                                                 kind: TokenKind,
                                                 expected: &'static str)
                                                 -> ParseResult<Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(self.expected(expected))
    }

    /// Skips any number of stray `;`.
    pub(in crate::interpreter::parser) fn skip_semicolons(&mut self) {
        while self.matches(TokenKind::Semicolon) {}
    }

    /// Hands out the next reference-node id.
    pub(in crate::interpreter::parser) const fn fresh_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Records `node` as the last node built and returns it.
    pub(in crate::interpreter::parser) fn built(&mut self, node: Node) -> Node {
        self.last_node = node.kind_name();
        node
    }

    /// Builds a parse error at the current position.
    pub(in crate::interpreter::parser) fn error(&self, kind: ParseErrorKind) -> ParseError {
        let lexeme = self.current
                         .checked_sub(1)
                         .and_then(|index| self.tokens.get(index))
                         .map(|token| token.lexeme.clone())
                         .unwrap_or_default();

        ParseError { kind,
                     line: self.peek().line,
                     lexeme,
                     node: self.last_node }
    }

    /// The error for a token that cannot appear here.
    ///
    /// Error tokens surface their scanner diagnostic, EOF reports an abrupt
    /// end and reserved words are named as such.
    pub(in crate::interpreter::parser) fn unexpected(&self) -> ParseError {
        let token = self.peek();
        let kind = match token.kind {
            TokenKind::Error => ParseErrorKind::Scanner(token.lexeme.clone()),
            TokenKind::Eof => ParseErrorKind::AbruptEnd,
            TokenKind::Reserved => ParseErrorKind::ReservedWord(token.lexeme.clone()),
            _ => ParseErrorKind::UnexpectedToken(token.lexeme.clone()),
        };
        self.error(kind)
    }

    /// The error for a missing required token.
    pub(in crate::interpreter::parser) fn expected(&self, expected: &'static str) -> ParseError {
        match self.peek_kind() {
            TokenKind::Error | TokenKind::Eof | TokenKind::Reserved => self.unexpected(),
            _ => self.error(ParseErrorKind::Expected { expected,
                                                       found: self.peek().lexeme.clone() }),
        }
    }
}
