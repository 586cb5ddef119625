use crate::{
    ast::{BinaryOperator, Node, UnaryOperator},
    error::ParseErrorKind,
    interpreter::{
        parser::core::{ParseResult, Parser},
        token::{Associativity, Precedence, TokenClass, TokenKind},
    },
    util::stack::ensure_sufficient_stack,
};

impl Parser {
    /// Parses an expression whose operators all bind tighter than `min`.
    ///
    /// This is the entry point for expression parsing: `Precedence::Nil`
    /// parses a full expression.
    pub(in crate::interpreter::parser) fn expression(&mut self,
                                                     min: Precedence)
                                                     -> ParseResult<Node> {
        ensure_sufficient_stack(|| {
            let left = self.prefix(min)?;
            self.infix(left, min)
        })
    }

    /// Folds operators onto `left` while they bind tighter than `min`.
    ///
    /// For each operator the right-hand side is parsed with a threshold of
    /// the operator's own precedence (left and chain associativity) or one
    /// level lower (right associativity), so `a - b - c` groups to the left
    /// and `a ^ b ^ c` to the right.
    ///
    /// Besides the infix operators of the token table the loop handles:
    /// - postfix `!`;
    /// - implicit multiplication, `2x`, `2(x + 1)`, `x(2)` for a variable `x`
    ///   and `(a)(b)`;
    /// - a negation or negative literal directly after a complete operand,
    ///   which is subtraction: `(3)-4`;
    /// - a negative literal after a symbol, `x -4`, which the lexer only
    ///   produces for a spaced `-` touching its digits, as implicit
    ///   multiplication;
    /// - chained comparisons, `a < b <= c` becoming one [`Node::Chain`].
    pub(in crate::interpreter::parser) fn infix(&mut self,
                                                mut left: Node,
                                                min: Precedence)
                                                -> ParseResult<Node> {
        // Whether `left` was just built by a comparison at this level.
        let mut chained = false;

        loop {
            let kind = self.peek_kind();

            if kind == TokenKind::Bang {
                if Precedence::Peak <= min {
                    break;
                }
                let line = self.advance().line;
                left = Node::Unary { op: UnaryOperator::Factorial,
                                     operand: Box::new(left),
                                     line };
                left = self.built(left);
                chained = false;
                continue;
            }

            let negative_literal = kind.is_number() && self.peek().lexeme.starts_with('-');
            let after_symbol = self.previous_kind() == Some(TokenKind::Symbol);

            if negative_literal && !after_symbol {
                if Precedence::UpperMid <= min {
                    break;
                }
                left = self.subtract_literal(left)?;
                chained = false;
                continue;
            }

            if negative_literal || Self::implies_multiplication(&left, kind) {
                if Precedence::High <= min {
                    break;
                }
                let line = self.peek().line;
                let right = self.expression(Precedence::High)?;
                left = self.binary(left, BinaryOperator::Mul, right, line);
                chained = false;
                continue;
            }

            let kind = if kind == TokenKind::Negate { TokenKind::Minus } else { kind };
            if kind.class() != TokenClass::Infix {
                break;
            }

            let precedence = kind.precedence();
            if precedence <= min {
                break;
            }
            if kind == TokenKind::Assign {
                return Err(self.error(ParseErrorKind::UnexpectedToken("=".to_string())));
            }
            let Some(op) = BinaryOperator::from_token(kind) else {
                return Err(self.unexpected());
            };

            let line = self.advance().line;
            let associativity = kind.associativity();
            let threshold = if associativity == Associativity::Right {
                precedence.lower()
            } else {
                precedence
            };
            let right = self.expression(threshold)?;

            left = if chained && associativity == Associativity::Chain {
                self.extend_chain(left, op, right)
            } else {
                self.binary(left, op, right, line)
            };
            chained = associativity == Associativity::Chain;
        }

        Ok(left)
    }

    /// Whether `left` followed by a token of `next` is an implicit product.
    ///
    /// A symbol reaches this point followed by `(` only when it is not a known
    /// function, and a call only when it is not curried further.
    fn implies_multiplication(left: &Node, next: TokenKind) -> bool {
        match next {
            TokenKind::LeftParen => matches!(left,
                                             Node::Number { .. }
                                             | Node::Symbol { .. }
                                             | Node::Group { .. }
                                             | Node::Tuple { .. }),
            TokenKind::Symbol => matches!(left, Node::Number { .. }),
            _ => false,
        }
    }

    /// Reads a negative literal after a complete operand as a subtraction of
    /// the positive literal.
    fn subtract_literal(&mut self, left: Node) -> ParseResult<Node> {
        let token = self.advance();
        let magnitude = &token.lexeme[1..];
        let first = self.number_literal(token.kind, magnitude, token.line)?;
        let right = self.infix(first, Precedence::UpperMid)?;
        Ok(self.binary(left, BinaryOperator::Sub, right, token.line))
    }

    /// Appends `op right` to the comparison that `left` ends with, turning a
    /// single comparison into a [`Node::Chain`].
    fn extend_chain(&mut self, left: Node, op: BinaryOperator, right: Node) -> Node {
        let node = match left {
            Node::Chain { mut operands,
                          mut operators,
                          line, } => {
                operands.push(right);
                operators.push(op);
                Node::Chain { operands,
                              operators,
                              line }
            },
            Node::Binary { left: first,
                           op: first_op,
                           right: second,
                           line, } => Node::Chain { operands: vec![*first, *second, right],
                                                    operators: vec![first_op, op],
                                                    line },
            other => {
                let line = other.line();
                return self.binary(other, op, right, line);
            },
        };
        self.built(node)
    }

    fn binary(&mut self, left: Node, op: BinaryOperator, right: Node, line: usize) -> Node {
        let node = Node::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
        self.built(node)
    }
}
