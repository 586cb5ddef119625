use crate::{
    ast::{Node, UnaryOperator},
    error::ParseErrorKind,
    interpreter::{
        parser::core::{ParseResult, Parser},
        token::{Precedence, TokenKind},
        value::{complex::ComplexNumber, number::Number, rational::Rational},
    },
};

impl Parser {
    /// Parses a prefix operation or a primary term.
    ///
    /// `min` is the threshold of the surrounding expression; an assignment is
    /// only recognised where it could bind, below [`Precedence::Low`].
    ///
    /// Prefix `-` and `not` take an operand of precedence above
    /// [`Precedence::High`], so `-x^2` is `-(x^2)` and `-x * y` is `(-x) * y`.
    pub(in crate::interpreter::parser) fn prefix(&mut self, min: Precedence) -> ParseResult<Node> {
        let token = self.peek().clone();
        let line = token.line;

        let node = match token.kind {
            TokenKind::Negate | TokenKind::Minus | TokenKind::Not => {
                self.advance();
                let op = if token.kind == TokenKind::Not {
                    UnaryOperator::Not
                } else {
                    UnaryOperator::Negate
                };
                let operand = self.expression(Precedence::High)?;
                Node::Unary { op,
                              operand: Box::new(operand),
                              line }
            },
            TokenKind::True | TokenKind::False => {
                self.advance();
                Node::Bool { value: token.kind == TokenKind::True,
                             line }
            },
            TokenKind::Null => {
                self.advance();
                Node::Null { line }
            },
            TokenKind::Inf | TokenKind::NaN => {
                self.advance();
                let value = if token.kind == TokenKind::Inf { f64::INFINITY } else { f64::NAN };
                Node::Number { value: Number::Float(value),
                               line }
            },
            kind if kind.is_number() => {
                self.advance();
                self.number_literal(kind, &token.lexeme, line)?
            },
            TokenKind::String => {
                self.advance();
                Node::String { value: token.lexeme,
                               line }
            },
            TokenKind::Symbol => return self.symbol(min),
            TokenKind::LeftParen => self.group()?,
            TokenKind::LeftBracket => self.array()?,
            TokenKind::Pipe => self.absolute()?,
            TokenKind::LeftBrace => return self.block(),
            TokenKind::If => return self.conditional(),
            TokenKind::While => return self.while_loop(),
            _ => return Err(self.unexpected()),
        };

        Ok(self.built(node))
    }

    /// Parses a symbol, an assignment to it, or a call through it.
    ///
    /// A symbol followed by `(` is a call when the name is a known function,
    /// the parentheses are empty or they hold a comma-separated list; `x(2)`
    /// for any other name is a product. `f(x)(y)` calls the result of `f(x)`.
    fn symbol(&mut self, min: Precedence) -> ParseResult<Node> {
        let token = self.advance();
        let id = self.fresh_id();
        let line = token.line;

        if self.check(TokenKind::Assign) && min < Precedence::Low {
            self.advance();
            let value = self.expression(Precedence::Nil)?;
            let node = Node::Assignment { name: token.lexeme,
                                          id,
                                          value: Box::new(value),
                                          line };
            return Ok(self.built(node));
        }

        let is_call = self.check(TokenKind::LeftParen)
                      && (self.functions.contains(&token.lexeme)
                          || self.peek_nth(1) == TokenKind::RightParen
                          || self.opens_list());
        let symbol = Node::Symbol { name: token.lexeme,
                                    id,
                                    line };
        if !is_call {
            return Ok(self.built(symbol));
        }

        let mut callee = symbol;
        while self.check(TokenKind::LeftParen) {
            let line = self.advance().line;
            let arguments = self.comma_list(TokenKind::RightParen, "“,” or “)” in the argument list")?;
            callee = Node::Call { callee: Box::new(callee),
                                  arguments,
                                  line };
            callee = self.built(callee);
        }
        Ok(callee)
    }

    /// Parses `()`, a group `(e)` or a tuple `(a, b, ...)`.
    fn group(&mut self) -> ParseResult<Node> {
        let line = self.advance().line;
        if self.matches(TokenKind::RightParen) {
            return Ok(Node::Tuple { elements: Vec::new(),
                                    line });
        }

        let first = self.expression(Precedence::Nil)?;
        if self.matches(TokenKind::RightParen) {
            return Ok(Node::Group { expr: Box::new(first),
                                    line });
        }

        self.expect(TokenKind::Comma, "“,” or “)” after the element")?;
        let mut elements = vec![first];
        elements.extend(self.comma_list(TokenKind::RightParen, "“,” or “)” in the tuple")?);
        Ok(Node::Tuple { elements, line })
    }

    /// Parses `|e|`, shorthand for `abs(e)`.
    fn absolute(&mut self) -> ParseResult<Node> {
        let id = self.fresh_id();
        let line = self.advance().line;
        let inner = self.expression(Precedence::Nil)?;
        self.expect(TokenKind::Pipe, "a closing “|”")?;

        Ok(Node::Call { callee: Box::new(Node::Symbol { name: "abs".to_string(),
                                                        id,
                                                        line }),
                        arguments: vec![inner],
                        line })
    }

    /// Converts a numeric literal into a node.
    ///
    /// Binary, octal and hexadecimal literals become integers, scientific
    /// literals floats, `a/b` an unreduced rational and a trailing `i` an
    /// imaginary number.
    pub(in crate::interpreter::parser) fn number_literal(&self,
                                                         kind: TokenKind,
                                                         lexeme: &str,
                                                         line: usize)
                                                         -> ParseResult<Node> {
        let invalid = || self.error(ParseErrorKind::InvalidLiteral(lexeme.to_string()));
        let (negative, digits) = match lexeme.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, lexeme),
        };
        let sign = if negative { "-" } else { "" };

        let value = match kind {
            TokenKind::Integer => {
                Number::Integer(lexeme.parse::<i64>().map_err(|_| invalid())?)
            },
            TokenKind::Float | TokenKind::Scientific => {
                Number::Float(lexeme.parse::<f64>().map_err(|_| invalid())?)
            },
            TokenKind::Binary | TokenKind::Octal | TokenKind::Hex => {
                let radix = match kind {
                    TokenKind::Binary => 2,
                    TokenKind::Octal => 8,
                    _ => 16,
                };
                let value = i64::from_str_radix(&format!("{sign}{}", &digits[2..]), radix).map_err(|_| invalid())?;
                Number::Integer(value)
            },
            TokenKind::Fraction => {
                let (numerator, denominator) = lexeme.split_once('/').ok_or_else(invalid)?;
                let numerator = numerator.parse::<i64>().map_err(|_| invalid())?;
                let denominator = denominator.parse::<i64>().map_err(|_| invalid())?;
                let rational = Rational::new(numerator, denominator).ok_or_else(|| {
                    self.error(ParseErrorKind::ZeroDenominator(lexeme.to_string()))
                })?;
                Number::Rational(rational)
            },
            TokenKind::Complex => {
                let imaginary = lexeme.strip_suffix('i')
                                      .and_then(|text| text.parse::<f64>().ok())
                                      .ok_or_else(invalid)?;
                Number::Complex(ComplexNumber::new(0.0, imaginary))
            },
            _ => return Err(invalid()),
        };

        Ok(Node::Number { value, line })
    }
}
